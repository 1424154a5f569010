// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Media key parsing

use crate::error::{GatewayError, Result};

/// Length of a content hash candidate
pub const HASH_LEN: usize = 32;

/// One component of a comma-separated media key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    /// Content hash, looked up in the media index
    Hash(&'a str),
    /// Path relative to the data root
    Path(&'a str),
}

impl<'a> Candidate<'a> {
    /// Classify by length only; hashes are not validated
    pub fn classify(value: &'a str) -> Self {
        if value.len() == HASH_LEN {
            Candidate::Hash(value)
        } else {
            Candidate::Path(value)
        }
    }

    pub fn as_str(&self) -> &'a str {
        match self {
            Candidate::Hash(s) | Candidate::Path(s) => s,
        }
    }
}

/// Split a raw key into candidates, preserving order.
///
/// A single leading `/` (left over from the wildcard route) is dropped and
/// blank entries are skipped.
pub fn parse_key(raw: &str) -> Result<Vec<Candidate<'_>>> {
    let key = raw.strip_prefix('/').unwrap_or(raw);
    if key.is_empty() {
        return Err(GatewayError::InvalidArgument("empty media key".to_string()));
    }

    let candidates: Vec<Candidate<'_>> = key
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Candidate::classify)
        .collect();

    if candidates.is_empty() {
        return Err(GatewayError::InvalidArgument(format!(
            "no candidates in media key: {}",
            raw
        )));
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_classify_by_length() {
        assert_eq!(Candidate::classify(HASH), Candidate::Hash(HASH));
        assert_eq!(
            Candidate::classify("msg/attach/a.dat"),
            Candidate::Path("msg/attach/a.dat")
        );
        // 32 characters that are not hex still count as a hash
        let odd = "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz";
        assert_eq!(Candidate::classify(odd), Candidate::Hash(odd));
    }

    #[test]
    fn test_parse_preserves_order() {
        let key = format!("/missing.jpg,{},other.png", HASH);
        let candidates = parse_key(&key).unwrap();
        assert_eq!(
            candidates,
            vec![
                Candidate::Path("missing.jpg"),
                Candidate::Hash(HASH),
                Candidate::Path("other.png"),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            parse_key(""),
            Err(GatewayError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_key("/"),
            Err(GatewayError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_key(",, ,"),
            Err(GatewayError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_skips_blank_entries() {
        let key = format!(",{}, ,", HASH);
        let candidates = parse_key(&key).unwrap();
        assert_eq!(candidates, vec![Candidate::Hash(HASH)]);
    }
}
