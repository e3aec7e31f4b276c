use thiserror::Error;

/// Why a transfer did not happen.
///
/// Every variant is an expected outcome of a tool call and is rendered to
/// text with [`Error::to_text`] at the protocol boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("file_path is required")]
    MissingFilePath,

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Not a regular file: {path}")]
    NotAFile { path: String },

    #[error(
        "chat_id not provided and could not auto-detect. Please send a message to the bot first."
    )]
    UnresolvedChat,

    /// Missing credential or an unusable client setup.
    #[error("{0}")]
    Configuration(String),

    /// The Bot API rejected or failed the request.
    #[error("{0}")]
    Remote(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Single-line description returned to the calling assistant.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Remote(description) => format!("Telegram error: {description}"),
            other => format!("Error: {other}"),
        }
    }
}

impl From<courier_telegram::Error> for Error {
    fn from(err: courier_telegram::Error) -> Self {
        match err.remote_description() {
            Some(description) => Self::Remote(description),
            None => Self::Configuration(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
