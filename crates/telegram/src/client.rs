use std::time::Duration;

use {
    async_trait::async_trait,
    courier_common::PayloadKind,
    teloxide::{
        prelude::*,
        types::{InputFile, Message, Recipient, Update, UpdateKind},
    },
    tracing::debug,
};

use crate::{
    api::{BotApi, InboundUpdate, SentMessage, Upload},
    error::{Context, Result},
};

/// [`BotApi`] backed by a teloxide [`Bot`].
#[derive(Clone)]
pub struct TeloxideApi {
    bot: Bot,
}

impl TeloxideApi {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Build a bot whose HTTP client gives up after `timeout`, optionally
    /// pointed at a self-hosted Bot API server.
    pub fn connect(token: &str, api_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(timeout)
            .build()
            .context("failed to build Bot API HTTP client")?;
        let mut bot = Bot::with_client(token, client);
        if let Some(url) = api_url {
            let url = reqwest::Url::parse(url)
                .with_context(|| format!("invalid Bot API url '{url}'"))?;
            bot = bot.set_api_url(url);
        }
        Ok(Self::new(bot))
    }
}

/// Numeric ids address a chat directly; anything else (e.g. `@channel`) is
/// passed through as a public username.
fn recipient(chat_id: &str) -> Recipient {
    match chat_id.trim().parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

/// Only plain inbound messages carry a chat; edits, callback queries and
/// everything else are kept as bare update ids.
fn inbound_update(update: &Update) -> InboundUpdate {
    let update_id = i64::from(update.id.0);
    match &update.kind {
        UpdateKind::Message(msg) => InboundUpdate::message(update_id, msg.chat.id.0.to_string()),
        _ => InboundUpdate::other(update_id),
    }
}

#[async_trait]
impl BotApi for TeloxideApi {
    async fn recent_updates(&self, limit: u8) -> Result<Vec<InboundUpdate>> {
        let updates = self.bot.get_updates().limit(limit).await?;
        debug!(count = updates.len(), "fetched telegram updates");
        Ok(updates.iter().map(inbound_update).collect())
    }

    async fn send_upload(
        &self,
        chat_id: &str,
        upload: Upload,
        caption: &str,
    ) -> Result<SentMessage> {
        let Upload {
            kind,
            file_name,
            file,
        } = upload;
        let input = InputFile::read(file).file_name(file_name);
        let to = recipient(chat_id);

        let message = match kind {
            PayloadKind::Document => {
                let mut req = self.bot.send_document(to, input);
                if !caption.is_empty() {
                    req = req.caption(caption);
                }
                req.await?
            },
            PayloadKind::Photo => {
                let mut req = self.bot.send_photo(to, input);
                if !caption.is_empty() {
                    req = req.caption(caption);
                }
                req.await?
            },
        };

        Ok(sent_message(&message))
    }
}

fn sent_message(message: &Message) -> SentMessage {
    SentMessage {
        chat_id: message.chat.id.0.to_string(),
        message_id: i64::from(message.id.0),
    }
}
