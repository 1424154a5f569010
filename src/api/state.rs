// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Application state for the API server

use std::sync::Arc;

use crate::mcp::McpServer;
use crate::media::MediaGateway;

/// Shared application state
pub struct AppState {
    pub gateway: MediaGateway,
    pub mcp: Arc<McpServer>,
}

impl AppState {
    pub fn new(gateway: MediaGateway) -> Self {
        Self {
            mcp: Arc::new(McpServer::new(gateway.clone())),
            gateway,
        }
    }
}
