// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! chatlog media gateway - Library
//!
//! Serves the media a messaging client keeps alongside its chat history.
//! Chat messages reference media by key; the gateway turns a key into bytes
//! a browser can use.
//!
//! ## Media keys
//!
//! - **Content hash** - 32 characters, looked up in the media index
//! - **Relative path** - anything else, resolved under the data root
//! - **Candidate list** - several of the above joined by commas; the first
//!   one that resolves wins
//!
//! ## Formats
//!
//! - **`.dat` images** - XOR-wrapped JPEG/PNG/GIF/BMP, decoded on the fly
//! - **SILK voice** - transcoded to MP3 through an external decoder, or
//!   served as `audio/silk` when that fails
//! - **Video and files** - passed through untouched
//!
//! ```rust,ignore
//! use chatlog::config::GatewayConfig;
//! use chatlog::models::MediaType;
//!
//! let gateway = GatewayConfig::load()?.build_gateway()?;
//! let outcome = gateway.resolve(MediaType::Image, "msg/attach/1.dat,3f2a...", false)?;
//! ```

pub mod api;
pub mod cli;
pub mod codec;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod media;
pub mod models;

// Re-export commonly used items
pub use config::GatewayConfig;
pub use database::{MediaDatabase, MediaStore};
pub use error::{GatewayError, Result};
pub use media::{MediaGateway, ResolvedOutcome};
pub use models::{MediaRecord, MediaType};
