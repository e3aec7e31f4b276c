//! MCP (Model Context Protocol) server side for courier.
//!
//! This crate provides:
//! - JSON-RPC 2.0 / MCP wire types (`types`)
//! - The static tool descriptors (`registry`)
//! - Name-based routing of tool calls to the transfer dispatcher (`router`)
//! - The newline-delimited stdio server loop (`server`)

pub mod error;
pub mod registry;
pub mod router;
pub mod server;
pub mod types;

pub use {
    error::{Error, Result},
    registry::{ToolKind, tool_definitions},
    router::{RouterError, ToolRouter},
    server::McpServer,
};
