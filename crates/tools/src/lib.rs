//! File transfer tools: upload a local document or photo to a Telegram chat.

pub mod error;
pub mod request;
pub mod transfer;

pub use {
    error::{Error as TransferError, Result},
    request::TransferRequest,
    transfer::{Delivery, TransferDispatcher},
};
