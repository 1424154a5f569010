// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Data endpoint resolution

use std::path::{Path, PathBuf};

use super::outcome::ResolvedOutcome;
use super::resolver::MediaGateway;
use crate::codec::dat::CONTAINER_EXTENSION;
use crate::error::{GatewayError, Result};

/// Collapse `.` and `..` segments of a relative path.
///
/// `..` never climbs above the root: leading parent segments are dropped, the
/// same way cleaning `/<path>` would. Both `/` and `\` separate segments.
pub fn normalize_relative(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

fn is_container(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(CONTAINER_EXTENSION))
}

impl MediaGateway {
    /// Absolute location of a relative path, normalized first
    pub fn data_path(&self, relative: &str) -> PathBuf {
        let normalized = normalize_relative(relative);
        if normalized.is_empty() {
            self.data_root().to_path_buf()
        } else {
            self.data_root().join(normalized)
        }
    }

    /// Resolve `/data/<path>` to bytes.
    ///
    /// Containers are decoded when possible; anything else, including
    /// containers the decoder does not recognize, is served verbatim.
    pub fn resolve_data(&self, relative: &str) -> Result<ResolvedOutcome> {
        let path = self.data_path(relative);

        let meta = match std::fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GatewayError::NotFound(format!("file not found: {}", relative)));
            }
            Err(e) => return Err(e.into()),
        };
        if !meta.is_file() {
            return Err(GatewayError::NotFound(format!("not a file: {}", relative)));
        }

        if !is_container(&path) {
            return Ok(ResolvedOutcome::File(path));
        }

        let raw = std::fs::read(&path)?;
        match self.decoder().decode(&raw) {
            Some(image) => {
                log::debug!(
                    "decoded container {} as {}",
                    path.display(),
                    image.format.extension()
                );
                Ok(ResolvedOutcome::inline(image.format.content_type(), image.bytes))
            }
            None => {
                log::warn!(
                    "unrecognized container {}, serving raw bytes",
                    path.display()
                );
                Ok(ResolvedOutcome::File(path))
            }
        }
    }
}
