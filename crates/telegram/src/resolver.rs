//! Destination chat auto-detection.
//!
//! When a caller omits the chat id we fall back to whoever messaged the bot
//! most recently. This is a heuristic: several users may talk to the same bot
//! and only the latest sender is picked, without disambiguation.

use std::sync::Arc;

use {
    async_trait::async_trait,
    tracing::{debug, warn},
};

use crate::{api::InboundUpdate, provider::ClientProvider};

/// Strategy for picking a destination chat when none was supplied.
#[async_trait]
pub trait ChatResolver: Send + Sync {
    /// Best-effort guess. `None` means the caller must supply a chat id.
    async fn resolve_latest_chat(&self) -> Option<String>;
}

/// Resolves to the chat of the newest inbound message among recent updates.
pub struct LatestSenderResolver {
    provider: Arc<ClientProvider>,
    limit: u8,
}

impl LatestSenderResolver {
    pub fn new(provider: Arc<ClientProvider>, limit: u8) -> Self {
        Self {
            provider,
            limit: limit.clamp(1, 100),
        }
    }
}

/// Scan `updates` newest to oldest and return the first inbound message's chat.
pub fn latest_sender(updates: &[InboundUpdate]) -> Option<&str> {
    updates.iter().rev().find_map(|u| u.chat_id.as_deref())
}

#[async_trait]
impl ChatResolver for LatestSenderResolver {
    async fn resolve_latest_chat(&self) -> Option<String> {
        let client = match self.provider.get_client() {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "cannot auto-detect chat id");
                return None;
            },
        };

        let updates = match client.recent_updates(self.limit).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "error getting chat_id from updates");
                return None;
            },
        };

        let chat_id = latest_sender(&updates).map(str::to_owned);
        debug!(
            scanned = updates.len(),
            chat_id = chat_id.as_deref(),
            "chat id auto-detection finished"
        );
        chat_id
    }
}
