//! Telegram Bot API access for courier.
//!
//! [`BotApi`] is the seam between the transfer logic and the remote service;
//! [`TeloxideApi`] implements it with the teloxide library. The
//! [`ClientProvider`] memoizes one authenticated client per process and the
//! [`LatestSenderResolver`] guesses a destination chat from recent updates.

pub mod api;
pub mod client;
pub mod error;
pub mod provider;
pub mod resolver;

pub use {
    api::{BotApi, InboundUpdate, SentMessage, Upload},
    client::TeloxideApi,
    error::{Error, Result},
    provider::ClientProvider,
    resolver::{ChatResolver, LatestSenderResolver},
};
