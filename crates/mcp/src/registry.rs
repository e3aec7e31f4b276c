//! The two tools this server exposes, with their input schemas.

use {
    courier_common::PayloadKind,
    serde_json::{Value, json},
};

use crate::types::McpToolDef;

pub const SEND_DOCUMENT: &str = "send_telegram_document";
pub const SEND_PHOTO: &str = "send_telegram_photo";

/// A tool name this server recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    SendDocument,
    SendPhoto,
}

impl ToolKind {
    pub const ALL: [Self; 2] = [Self::SendDocument, Self::SendPhoto];

    /// Exact-match lookup.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SendDocument => SEND_DOCUMENT,
            Self::SendPhoto => SEND_PHOTO,
        }
    }

    #[must_use]
    pub fn payload_kind(self) -> PayloadKind {
        match self {
            Self::SendDocument => PayloadKind::Document,
            Self::SendPhoto => PayloadKind::Photo,
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::SendDocument => "Send a document file (PDF, ZIP, DOCX, etc.) to Telegram",
            Self::SendPhoto => "Send a photo/image file to Telegram",
        }
    }

    fn input_schema(self) -> Value {
        let (file_hint, caption_hint) = match self {
            Self::SendDocument => (
                "Absolute path to the file to send",
                "Optional caption for the file",
            ),
            Self::SendPhoto => (
                "Absolute path to the image file",
                "Optional caption for the photo",
            ),
        };
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": file_hint
                },
                "chat_id": {
                    "type": "string",
                    "description": "Telegram chat ID (optional, will auto-detect if not provided)"
                },
                "caption": {
                    "type": "string",
                    "description": caption_hint,
                    "default": ""
                }
            },
            "required": ["file_path"]
        })
    }

    #[must_use]
    pub fn definition(self) -> McpToolDef {
        McpToolDef {
            name: self.name().to_string(),
            description: Some(self.description().to_string()),
            input_schema: self.input_schema(),
        }
    }
}

/// Descriptors for every tool, document first.
#[must_use]
pub fn tool_definitions() -> Vec<McpToolDef> {
    ToolKind::ALL.into_iter().map(ToolKind::definition).collect()
}
