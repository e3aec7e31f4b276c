//! Routes `tools/call` invocations to the transfer dispatcher.
//!
//! Every outcome, including an unknown tool name, leaves this module as a
//! single text item. Typed failures are rendered here and nowhere else.

use std::sync::Arc;

use {
    courier_tools::{Delivery, TransferDispatcher, TransferError, TransferRequest},
    serde_json::Value,
    tracing::{debug, error},
};

use crate::{
    registry::{ToolKind, tool_definitions},
    types::{McpToolDef, ToolsCallResult},
};

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl RouterError {
    /// Text returned to the caller in place of a success message.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Transfer(err) => err.to_text(),
            other => format!("Error: {other}"),
        }
    }
}

pub struct ToolRouter {
    dispatcher: Arc<TransferDispatcher>,
}

impl ToolRouter {
    pub fn new(dispatcher: Arc<TransferDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn list_tools(&self) -> Vec<McpToolDef> {
        tool_definitions()
    }

    /// Run the named tool and return its typed outcome.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<Delivery, RouterError> {
        let kind =
            ToolKind::from_name(name).ok_or_else(|| RouterError::UnknownTool(name.to_string()))?;
        let request = TransferRequest::from_arguments(arguments)?;
        debug!(tool = name, payload = %kind.payload_kind(), "dispatching tool call");

        let delivery = match kind {
            ToolKind::SendDocument => self.dispatcher.send_document(request).await?,
            ToolKind::SendPhoto => self.dispatcher.send_photo(request).await?,
        };
        Ok(delivery)
    }

    /// Run the named tool; always yields exactly one text content item.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ToolsCallResult {
        match self.dispatch(name, arguments).await {
            Ok(delivery) => ToolsCallResult::text(delivery.to_string()),
            Err(e) => {
                error!(tool = name, error = %e, "error calling tool");
                ToolsCallResult::text(e.to_text())
            },
        }
    }
}
