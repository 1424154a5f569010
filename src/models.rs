// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Data models for media records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GatewayError;

/// Media category, fixed by the request path prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    File,
    Voice,
}

impl MediaType {
    pub const ALL: [MediaType; 4] = [
        MediaType::Image,
        MediaType::Video,
        MediaType::File,
        MediaType::Voice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::File => "file",
            MediaType::Voice => "voice",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            "file" => Ok(MediaType::File),
            "voice" => Ok(MediaType::Voice),
            other => Err(GatewayError::InvalidArgument(format!(
                "unknown media type: {}",
                other
            ))),
        }
    }
}

/// A media record as stored in the media index.
///
/// `path` is relative to the data root and may be empty when the payload is
/// inline. `data` is only populated for voice messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub key: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub size: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "base64_bytes"
    )]
    pub data: Option<Vec<u8>>,
}

impl MediaRecord {
    /// Record whose payload lives on disk under the data root
    pub fn stored(key: impl Into<String>, media_type: MediaType, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            media_type,
            path: path.into(),
            name: String::new(),
            size: 0,
            data: None,
        }
    }

    /// Voice record carrying its payload inline
    pub fn voice(key: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            media_type: MediaType::Voice,
            path: String::new(),
            name: String::new(),
            size: data.len() as i64,
            data: Some(data),
        }
    }
}

/// Serialize inline payloads as standard base64 strings
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|s| STANDARD.decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
