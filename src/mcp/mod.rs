// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! MCP (Model Context Protocol) Server for the media gateway
//!
//! This module implements an MCP server that exposes media resolution
//! to AI agents, enabling them to:
//! - Look up media metadata by key from a chat message
//! - Get a fetchable URL for an image, video, file or voice message

pub mod server;
pub mod tools;
pub mod types;

pub use server::McpServer;
