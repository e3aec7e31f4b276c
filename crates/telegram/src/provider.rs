//! Lazily constructed, process-lifetime Bot API client.

use std::{sync::Arc, time::Duration};

use {
    courier_config::TelegramConfig,
    once_cell::sync::OnceCell,
    secrecy::{ExposeSecret, Secret},
    tracing::info,
};

use crate::{
    api::BotApi,
    client::TeloxideApi,
    error::{Error, Result},
};

/// Builds a client from the exposed bot token.
pub type ClientFactory = Box<dyn Fn(&str) -> Result<Arc<dyn BotApi>> + Send + Sync>;

/// Owns the bot credential and hands out one shared client.
///
/// The client is built on the first [`get_client`](Self::get_client) call and
/// reused afterwards. A failed build is not cached. The provider is created by
/// the entry point and shared by `Arc`; it never reads global state itself.
pub struct ClientProvider {
    token: Option<Secret<String>>,
    factory: ClientFactory,
    client: OnceCell<Arc<dyn BotApi>>,
}

impl ClientProvider {
    pub fn new<F>(token: Option<Secret<String>>, factory: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn BotApi>> + Send + Sync + 'static,
    {
        Self {
            token,
            factory: Box::new(factory),
            client: OnceCell::new(),
        }
    }

    /// Production provider: teloxide client honouring `api_url` and `timeout_secs`.
    pub fn from_config(config: &TelegramConfig) -> Self {
        let api_url = config.api_url.clone();
        let timeout = Duration::from_secs(config.timeout_secs);
        Self::new(config.token.clone(), move |token| {
            let api = TeloxideApi::connect(token, api_url.as_deref(), timeout)?;
            Ok(Arc::new(api) as Arc<dyn BotApi>)
        })
    }

    /// Whether a non-empty credential is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().trim().is_empty())
    }

    /// Return the shared client, building it on first use.
    ///
    /// Fails with [`Error::MissingToken`] when no credential is configured.
    pub fn get_client(&self) -> Result<Arc<dyn BotApi>> {
        let client = self.client.get_or_try_init(|| {
            let token = self
                .token
                .as_ref()
                .map(|t| t.expose_secret().trim())
                .filter(|t| !t.is_empty())
                .ok_or(Error::MissingToken)?;
            let client = (self.factory)(token)?;
            info!("telegram client initialized");
            Ok::<_, Error>(client)
        })?;
        Ok(Arc::clone(client))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::api::{InboundUpdate, SentMessage, Upload},
        async_trait::async_trait,
        std::sync::atomic::{AtomicUsize, Ordering},
    };

    struct NullBot;

    #[async_trait]
    impl BotApi for NullBot {
        async fn recent_updates(&self, _limit: u8) -> Result<Vec<InboundUpdate>> {
            Ok(Vec::new())
        }

        async fn send_upload(
            &self,
            chat_id: &str,
            _upload: Upload,
            _caption: &str,
        ) -> Result<SentMessage> {
            Ok(SentMessage {
                chat_id: chat_id.to_string(),
                message_id: 1,
            })
        }
    }

    fn counting_provider(token: Option<&str>, builds: Arc<AtomicUsize>) -> ClientProvider {
        ClientProvider::new(
            token.map(|t| Secret::new(t.to_string())),
            move |_token| {
                builds.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(NullBot) as Arc<dyn BotApi>)
            },
        )
    }

    #[test]
    fn builds_client_once_and_reuses_it() {
        let builds = Arc::new(AtomicUsize::new(0));
        let provider = counting_provider(Some("1:abc"), Arc::clone(&builds));

        let first = provider.get_client().unwrap();
        let second = provider.get_client().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_token_fails_without_building() {
        let builds = Arc::new(AtomicUsize::new(0));
        let provider = counting_provider(None, Arc::clone(&builds));

        assert!(!provider.is_configured());
        assert!(matches!(provider.get_client(), Err(Error::MissingToken)));
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let builds = Arc::new(AtomicUsize::new(0));
        let provider = counting_provider(Some("   "), Arc::clone(&builds));
        assert!(matches!(provider.get_client(), Err(Error::MissingToken)));
    }

    #[test]
    fn failed_build_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let provider = ClientProvider::new(
            Some(Secret::new("1:abc".into())),
            move |_token| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(Error::message("network down"))
                } else {
                    Ok(Arc::new(NullBot) as Arc<dyn BotApi>)
                }
            },
        );

        assert!(provider.get_client().is_err());
        assert!(provider.get_client().is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn from_config_builds_teloxide_client() {
        let config = TelegramConfig {
            token: Some(Secret::new("1:abc".into())),
            ..Default::default()
        };
        let provider = ClientProvider::from_config(&config);
        assert!(provider.is_configured());
        assert!(provider.get_client().is_ok());
    }
}
