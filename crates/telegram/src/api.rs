//! Trait abstraction over the Bot API calls courier needs.
//!
//! Only three calls cross this seam: fetch recent updates, send a document,
//! send a photo. Tests substitute scripted implementations.

use {async_trait::async_trait, courier_common::PayloadKind};

use crate::error::Result;

/// One entry from `getUpdates`, reduced to what chat detection needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundUpdate {
    pub update_id: i64,
    /// Chat the update came from, set only for plain inbound messages
    /// (edits, callback queries and channel posts leave it empty).
    pub chat_id: Option<String>,
}

impl InboundUpdate {
    #[must_use]
    pub fn message(update_id: i64, chat_id: impl Into<String>) -> Self {
        Self {
            update_id,
            chat_id: Some(chat_id.into()),
        }
    }

    #[must_use]
    pub fn other(update_id: i64) -> Self {
        Self {
            update_id,
            chat_id: None,
        }
    }
}

/// The parts of a sent message that callers report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Chat id echoed back by Telegram.
    pub chat_id: String,
    pub message_id: i64,
}

/// An open local file ready to be streamed as a multipart upload.
///
/// The file handle is moved into the request and closed when the request
/// finishes, whether it succeeded or not.
#[derive(Debug)]
pub struct Upload {
    pub kind: PayloadKind,
    pub file_name: String,
    pub file: tokio::fs::File,
}

/// Remote messaging operations used by the resolver and the dispatcher.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Fetch up to `limit` pending updates, oldest first.
    async fn recent_updates(&self, limit: u8) -> Result<Vec<InboundUpdate>>;

    /// Upload `upload` to `chat_id` via `sendDocument` or `sendPhoto`.
    /// An empty `caption` sends no caption.
    async fn send_upload(&self, chat_id: &str, upload: Upload, caption: &str)
    -> Result<SentMessage>;
}
