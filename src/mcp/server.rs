// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! MCP Server - request dispatch and stdio transport

use serde_json::json;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use super::tools;
use super::types::*;
use crate::media::MediaGateway;

/// MCP Server for the media gateway
pub struct McpServer {
    gateway: MediaGateway,
    initialized: AtomicBool,
}

impl McpServer {
    pub fn new(gateway: MediaGateway) -> Self {
        Self {
            gateway,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Relaxed)
    }

    /// Run the MCP server using stdio transport
    pub fn run(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve line-delimited JSON-RPC from `input` to `output`
    pub fn serve<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        log::info!("[chatlog-mcp] Server starting...");

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            log::debug!("[chatlog-mcp] Received: {}", truncate(&line, 100));

            let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => self.handle_request(request),
                Err(e) => {
                    log::warn!("[chatlog-mcp] Parse error: {}", e);
                    Some(JsonRpcResponse::error(
                        None,
                        PARSE_ERROR,
                        format!("Parse error: {}", e),
                    ))
                }
            };

            if let Some(response) = response {
                let response_str = serde_json::to_string(&response)?;
                log::debug!("[chatlog-mcp] Sending: {}", truncate(&response_str, 100));
                writeln!(output, "{}", response_str)?;
                output.flush()?;
            }
        }

        Ok(())
    }

    /// Dispatch one request. Notifications yield no response.
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            if request.method == "initialized" || request.method == "notifications/initialized" {
                self.initialized.store(true, Ordering::Relaxed);
            }
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        self.initialized.store(true, Ordering::Relaxed);

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: "chatlog-mcp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            },
        };

        to_response(request.id, &result)
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = tools::list_tools();
        JsonRpcResponse::success(request.id, json!({ "tools": tools }))
    }

    fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        match serde_json::from_value::<CallToolParams>(request.params) {
            Ok(params) => {
                let result = tools::call_tool(&self.gateway, &params.name, &params.arguments);
                to_response(request.id, &result)
            }
            Err(e) => JsonRpcResponse::error(
                request.id,
                INVALID_PARAMS,
                format!("Invalid params: {}", e),
            ),
        }
    }
}

fn to_response<T: serde::Serialize>(id: Option<serde_json::Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DisabledTranscoder, XorDatDecoder};
    use crate::database::MediaDatabase;
    use crate::models::{MediaRecord, MediaType};
    use std::sync::Arc;

    const HASH: &str = "0123456789abcdef0123456789abcdef";

    fn server(root: &std::path::Path) -> McpServer {
        let db = MediaDatabase::open_in_memory().unwrap();
        db.insert(&MediaRecord::stored(HASH, MediaType::Image, "msg/a.dat"))
            .unwrap();
        McpServer::new(MediaGateway::new(
            root,
            Arc::new(db),
            Arc::new(XorDatDecoder::new()),
            Arc::new(DisabledTranscoder),
        ))
    }

    fn request(line: &str) -> JsonRpcRequest {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_initialize_and_notification() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path());

        let resp = server
            .handle_request(request(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#))
            .unwrap();
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "chatlog-mcp");
        assert!(server.is_initialized());

        assert!(server
            .handle_request(request(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#))
            .is_none());
    }

    #[test]
    fn test_unknown_method() {
        let dir = tempfile::tempdir().unwrap();
        let resp = server(dir.path())
            .handle_request(request(r#"{"jsonrpc":"2.0","id":"x","method":"resources/list"}"#))
            .unwrap();
        assert_eq!(resp.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[test]
    fn test_tools_call_media_url() {
        let dir = tempfile::tempdir().unwrap();
        let line = format!(
            r#"{{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{{"name":"chatlog_media_url","arguments":{{"type":"image","key":"{}","base_url":"http://127.0.0.1:5030/"}}}}}}"#,
            HASH
        );
        let resp = server(dir.path()).handle_request(request(&line)).unwrap();
        let result = resp.result.unwrap();
        assert_eq!(
            result["content"][0]["text"],
            "http://127.0.0.1:5030/data/msg/a.dat"
        );
        assert!(result.get("isError").is_none());
    }

    #[test]
    fn test_tools_call_bad_params() {
        let dir = tempfile::tempdir().unwrap();
        let resp = server(dir.path())
            .handle_request(request(r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{}}"#))
            .unwrap();
        assert_eq!(resp.error.unwrap().code, INVALID_PARAMS);
    }

    #[test]
    fn test_serve_stdio_lines() {
        let dir = tempfile::tempdir().unwrap();
        let input = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n\nnot json\n";
        let mut output = Vec::new();
        server(dir.path()).serve(&input[..], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"result\":{}"));
        assert!(lines[1].contains("-32700"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("语音消息", 2), "语音");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
