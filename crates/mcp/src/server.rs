//! Stdio server: newline-delimited JSON-RPC messages on stdin, replies on stdout.
//!
//! Requests are handled one at a time in arrival order. Logging must never
//! touch stdout, which belongs to the protocol.

use {
    serde::Serialize,
    serde_json::{Value, json},
    tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader},
    tracing::{debug, info, trace, warn},
};

use crate::{
    error::{Context, Result},
    router::ToolRouter,
    types::{
        INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, InitializeParams, InitializeResult,
        JsonRpcError, JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR,
        PROTOCOL_VERSION, SUPPORTED_PROTOCOL_VERSIONS, ServerCapabilities, ServerInfo,
        ToolsCallParams, ToolsCapability, ToolsListResult,
    },
};

pub struct McpServer {
    router: ToolRouter,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(router: ToolRouter, name: impl Into<String>) -> Self {
        Self {
            router,
            info: ServerInfo {
                name: name.into(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            },
        }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve on an arbitrary line-oriented reader/writer pair.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = %self.info.name, "MCP server listening on stdio");
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            trace!(raw = %trimmed, "client -> server");

            let Some(response) = self.handle_line(trimmed).await else {
                continue;
            };
            let mut out = serde_json::to_string(&response)?;
            trace!(raw = %out, "server -> client");
            out.push('\n');
            writer
                .write_all(out.as_bytes())
                .await
                .context("failed to write response")?;
            writer.flush().await.context("failed to flush response")?;
        }

        info!("stdin closed, MCP server stopping");
        Ok(())
    }

    /// Handle one raw message. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparseable message from client");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("parse error: {e}")),
                ));
            },
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!(error = %e, "invalid JSON-RPC request");
                Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(INVALID_REQUEST, format!("invalid request: {e}")),
                ))
            },
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification from client");
            return None;
        };

        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => to_result(&ToolsListResult {
                tools: self.router.list_tools(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("method not found: {other}"),
            )),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let params = params
            .map(serde_json::from_value::<InitializeParams>)
            .transpose()
            .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("invalid params: {e}")))?;

        let requested = params.as_ref().map(|p| p.protocol_version.as_str());
        let protocol_version = requested
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
            .unwrap_or(PROTOCOL_VERSION);

        info!(
            client = params
                .as_ref()
                .and_then(|p| p.client_info.as_ref())
                .map(|c| c.name.as_str()),
            requested = requested,
            protocol_version,
            "MCP client initialized"
        );

        to_result(&InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let params: ToolsCallParams = params
            .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "missing params"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| {
                    JsonRpcError::new(INVALID_PARAMS, format!("invalid params: {e}"))
                })
            })?;

        let result = self.router.call_tool(&params.name, params.arguments).await;
        to_result(&result)
    }
}

fn to_result<T: Serialize>(value: &T) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("serialize result: {e}")))
}
