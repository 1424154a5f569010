// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! chatlog MCP Server - Entry point
//!
//! This binary provides a Model Context Protocol (MCP) server interface
//! for the chatlog media gateway, enabling AI agents to look up media
//! referenced in chat history.
//!
//! # Usage
//!
//! The server communicates via stdio (stdin/stdout) using JSON-RPC 2.0.
//! Logs go to stderr.
//!
//! ## Available Tools
//!
//! - `chatlog_media_info` - Metadata for a media key
//! - `chatlog_media_url` - URL serving a media key
//!
//! # Configuration
//!
//! Reads the same `config.json` as the `chatlog` binary; `CHATLOG_DATA_DIR`
//! and `CHATLOG_DATABASE` override it. Add to your MCP client configuration:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "chatlog": {
//!       "command": "chatlog-mcp",
//!       "args": []
//!     }
//!   }
//! }
//! ```

use std::path::PathBuf;

use chatlog::config::GatewayConfig;
use chatlog::logging;
use chatlog::mcp::McpServer;

fn main() {
    logging::init(0);

    if let Err(e) = run() {
        log::error!("[chatlog-mcp] Server error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut config = GatewayConfig::load()?;
    if let Ok(dir) = std::env::var("CHATLOG_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(db) = std::env::var("CHATLOG_DATABASE") {
        config.database = Some(PathBuf::from(db));
    }

    let server = McpServer::new(config.build_gateway()?);
    server.run()?;
    Ok(())
}
