// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Error types for the media gateway

use thiserror::Error;

use crate::models::MediaType;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Media not found: {category} {key}")]
    MediaNotFound { category: MediaType, key: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transcode failed: {0}")]
    Transcode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            GatewayError::InvalidArgument(_) => 400,
            GatewayError::NotFound(_) | GatewayError::MediaNotFound { .. } => 404,
            _ => 500,
        }
    }

    /// Whether the error means "nothing there" rather than "something broke".
    pub fn is_not_found(&self) -> bool {
        self.http_status() == 404
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
