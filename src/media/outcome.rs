// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Resolution outcomes

use std::path::PathBuf;

use crate::models::MediaRecord;

/// Result of resolving a media request. Exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedOutcome {
    /// Metadata-only answer (`?info=1`)
    Metadata(MediaRecord),
    /// Bytes produced by the gateway itself (decoded image, voice)
    InlineBytes {
        content_type: &'static str,
        bytes: Vec<u8>,
    },
    /// Fetch `/data/<path>` instead
    Redirect(String),
    /// Serve a file under the data root verbatim; the serving layer picks
    /// the content type from the extension
    File(PathBuf),
    NotFound,
}

impl ResolvedOutcome {
    pub fn inline(content_type: &'static str, bytes: Vec<u8>) -> Self {
        ResolvedOutcome::InlineBytes {
            content_type,
            bytes,
        }
    }

    /// Location a redirect points at
    pub fn location(&self) -> Option<String> {
        match self {
            ResolvedOutcome::Redirect(path) => Some(data_url(path)),
            _ => None,
        }
    }
}

/// Data endpoint URL for a relative path, percent-encoding each segment
pub fn data_url(path: &str) -> String {
    let encoded: Vec<String> = path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("/data/{}", encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_location() {
        let outcome = ResolvedOutcome::Redirect("msg/attach/a b.dat".to_string());
        assert_eq!(
            outcome.location().as_deref(),
            Some("/data/msg/attach/a%20b.dat")
        );
        assert_eq!(ResolvedOutcome::NotFound.location(), None);
    }

    #[test]
    fn test_data_url_keeps_separators() {
        assert_eq!(data_url("a/b/c.jpg"), "/data/a/b/c.jpg");
        assert_eq!(data_url("图片/1.jpg"), "/data/%E5%9B%BE%E7%89%87/1.jpg");
    }
}
