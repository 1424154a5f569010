//! Tests for error handling
//!
//! This file contains unit tests for:
//! - GatewayError types and variants
//! - Error messages and Display trait
//! - HTTP status mapping
//! - Error conversions and From implementations

use chatlog::error::{GatewayError, Result};
use chatlog::models::MediaType;

// ============================================================================
// GatewayError Variant Tests
// ============================================================================

mod error_variant_tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = GatewayError::InvalidArgument("empty media key".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid argument"));
        assert!(msg.contains("empty media key"));
    }

    #[test]
    fn test_not_found_error() {
        let err = GatewayError::NotFound("file not found: a.jpg".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Not found"));
        assert!(msg.contains("a.jpg"));
    }

    #[test]
    fn test_media_not_found_error() {
        let err = GatewayError::MediaNotFound {
            category: MediaType::Voice,
            key: "c81e728d9d4c2f636f067f89cc14862c".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Media not found"));
        assert!(msg.contains("voice"));
        assert!(msg.contains("c81e728d9d4c2f636f067f89cc14862c"));
    }

    #[test]
    fn test_transcode_error() {
        let err = GatewayError::Transcode("no voice transcoder configured".to_string());
        assert!(format!("{}", err).contains("Transcode failed"));
    }

    #[test]
    fn test_error_debug_format() {
        let err = GatewayError::DatabaseError("locked".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("DatabaseError"));
    }
}

// ============================================================================
// Status Mapping Tests
// ============================================================================

mod status_tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert_eq!(GatewayError::InvalidArgument(String::new()).http_status(), 400);
        assert_eq!(GatewayError::NotFound(String::new()).http_status(), 404);
        assert_eq!(
            GatewayError::MediaNotFound {
                category: MediaType::Image,
                key: String::new(),
            }
            .http_status(),
            404
        );
    }

    #[test]
    fn test_server_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let cases = [
            GatewayError::DatabaseError("x".to_string()),
            GatewayError::Config("x".to_string()),
            GatewayError::Internal("x".to_string()),
            GatewayError::from(io),
        ];
        for err in cases {
            assert_eq!(err.http_status(), 500, "{}", err);
            assert!(!err.is_not_found());
        }
    }
}

// ============================================================================
// Conversion Tests
// ============================================================================

mod conversion_tests {
    use super::*;

    fn parse(json: &str) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(json)?)
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GatewayError = io_err.into();
        assert!(format!("{}", err).contains("IO error"));
    }

    #[test]
    fn test_from_json_error() {
        let err = parse("{ invalid").unwrap_err();
        assert!(matches!(err, GatewayError::JsonError(_)));
    }

    #[test]
    fn test_from_sqlite_error() {
        let err: GatewayError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(format!("{}", err).contains("SQLite error"));
    }

    #[test]
    fn test_unknown_media_type_is_invalid_argument() {
        let err = "sticker".parse::<MediaType>().unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument(_)));
    }
}
