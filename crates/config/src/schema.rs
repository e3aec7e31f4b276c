/// Config schema types (telegram credential and transport, MCP server identity).
use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Default number of recent updates scanned when auto-detecting a chat.
pub const DEFAULT_UPDATES_LIMIT: u8 = 100;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    pub telegram: TelegramConfig,
    pub server: ServerConfig,
}

/// Telegram Bot API settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token from @BotFather. Usually supplied via `TELEGRAM_BOT_TOKEN`.
    #[serde(
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub token: Option<Secret<String>>,

    /// Custom Bot API endpoint (self-hosted `telegram-bot-api` server).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// HTTP client timeout for every Bot API request, in seconds.
    pub timeout_secs: u64,

    /// How many recent updates to scan when no chat id is given (1..=100).
    pub updates_limit: u8,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("updates_limit", &self.updates_limit)
            .finish()
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: None,
            timeout_secs: 60,
            updates_limit: DEFAULT_UPDATES_LIMIT,
        }
    }
}

fn serialize_option_secret<S: serde::Serializer>(
    secret: &Option<Secret<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(s) => serializer.serialize_str(s.expose_secret()),
        None => serializer.serialize_none(),
    }
}

/// Identity the MCP server reports in its `initialize` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "telegram-file-sender".into(),
        }
    }
}
