// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Mapping of resolution outcomes and errors to HTTP responses

use actix_files::NamedFile;
use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;

use crate::error::GatewayError;
use crate::media::ResolvedOutcome;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
        HttpResponse::build(status).json(ErrorBody {
            error: message.into(),
        })
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        if self.http_status() >= 500 {
            log::error!("{}", self);
        }
        ErrorBody::response(ResponseError::status_code(self), self.to_string())
    }
}

/// Turn an outcome into a response
pub fn emit(outcome: ResolvedOutcome, req: &HttpRequest) -> Result<HttpResponse, GatewayError> {
    let response = match outcome {
        ResolvedOutcome::Metadata(record) => HttpResponse::Ok().json(record),
        ResolvedOutcome::InlineBytes {
            content_type,
            bytes,
        } => HttpResponse::Ok().content_type(content_type).body(bytes),
        redirect @ ResolvedOutcome::Redirect(_) => {
            let location = redirect.location().unwrap_or_else(|| "/data/".to_string());
            HttpResponse::Found()
                .insert_header((header::LOCATION, location))
                .finish()
        }
        ResolvedOutcome::File(path) => NamedFile::open(&path)?
            .use_etag(false)
            .use_last_modified(false)
            .into_response(req),
        ResolvedOutcome::NotFound => ErrorBody::response(StatusCode::NOT_FOUND, "Not found"),
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;
    use actix_web::test::TestRequest;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (GatewayError::InvalidArgument("k".into()), 400),
            (GatewayError::NotFound("p".into()), 404),
            (
                GatewayError::MediaNotFound {
                    category: MediaType::Image,
                    key: "k".into(),
                },
                404,
            ),
            (GatewayError::DatabaseError("locked".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(ResponseError::status_code(&err).as_u16(), status);
        }
    }

    #[test]
    fn test_emit_redirect() {
        let req = TestRequest::default().to_http_request();
        let resp = emit(ResolvedOutcome::Redirect("a/b.dat".into()), &req).unwrap();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/data/a/b.dat"
        );
    }

    #[test]
    fn test_emit_inline_bytes() {
        let req = TestRequest::default().to_http_request();
        let resp = emit(ResolvedOutcome::inline("audio/silk", vec![1, 2]), &req).unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "audio/silk"
        );
    }

    #[test]
    fn test_emit_not_found() {
        let req = TestRequest::default().to_http_request();
        let resp = emit(ResolvedOutcome::NotFound, &req).unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
