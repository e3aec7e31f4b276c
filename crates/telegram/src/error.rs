use {courier_common::FromMessage, teloxide::RequestError, thiserror::Error};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Telegram(#[from] RequestError),

    #[error("TELEGRAM_BOT_TOKEN environment variable is required")]
    MissingToken,

    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    /// What went wrong on the Bot API side, or `None` for local setup
    /// failures. API errors yield Telegram's own description (e.g.
    /// `Bad Request: chat not found`) without teloxide's framing.
    #[must_use]
    pub fn remote_description(&self) -> Option<String> {
        match self {
            Self::Telegram(RequestError::Api(api)) => Some(api.to_string()),
            Self::Telegram(other) => Some(other.to_string()),
            _ => None,
        }
    }
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

courier_common::impl_context!();
