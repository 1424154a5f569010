// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Media request handlers

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Responder};

use super::response::{emit, ErrorBody};
use super::state::AppState;
use crate::error::GatewayError;
use crate::mcp::types::{JsonRpcRequest, JsonRpcResponse, PARSE_ERROR};
use crate::media::ResolvedOutcome;
use crate::models::MediaType;

#[derive(Debug, Default)]
pub struct MediaQuery {
    /// Any non-empty value asks for metadata only
    pub info: Option<String>,
}

impl MediaQuery {
    /// Build from raw query pairs. Repeated keys keep their first value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            info: pairs
                .iter()
                .find(|(name, _)| name == "info")
                .map(|(_, value)| value.clone()),
        }
    }

    pub fn info_only(&self) -> bool {
        self.info.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// Run a blocking gateway call off the async workers
async fn blocking<F>(f: F) -> Result<ResolvedOutcome, GatewayError>
where
    F: FnOnce() -> Result<ResolvedOutcome, GatewayError> + Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| GatewayError::Internal(e.to_string()))?
}

// =============================================================================
// Media
// =============================================================================

async fn get_media(
    category: MediaType,
    state: web::Data<AppState>,
    key: String,
    query: MediaQuery,
    req: HttpRequest,
) -> Result<HttpResponse, GatewayError> {
    let gateway = state.gateway.clone();
    let info = query.info_only();
    log::debug!("GET /{}/{} info={}", category, key, info);

    let outcome = blocking(move || gateway.resolve(category, &key, info)).await?;
    emit(outcome, &req)
}

pub async fn get_image(
    state: web::Data<AppState>,
    key: web::Path<String>,
    query: web::Query<Vec<(String, String)>>,
    req: HttpRequest,
) -> Result<HttpResponse, GatewayError> {
    get_media(
        MediaType::Image,
        state,
        key.into_inner(),
        MediaQuery::from_pairs(&query),
        req,
    )
    .await
}

pub async fn get_video(
    state: web::Data<AppState>,
    key: web::Path<String>,
    query: web::Query<Vec<(String, String)>>,
    req: HttpRequest,
) -> Result<HttpResponse, GatewayError> {
    get_media(
        MediaType::Video,
        state,
        key.into_inner(),
        MediaQuery::from_pairs(&query),
        req,
    )
    .await
}

pub async fn get_file(
    state: web::Data<AppState>,
    key: web::Path<String>,
    query: web::Query<Vec<(String, String)>>,
    req: HttpRequest,
) -> Result<HttpResponse, GatewayError> {
    get_media(
        MediaType::File,
        state,
        key.into_inner(),
        MediaQuery::from_pairs(&query),
        req,
    )
    .await
}

pub async fn get_voice(
    state: web::Data<AppState>,
    key: web::Path<String>,
    query: web::Query<Vec<(String, String)>>,
    req: HttpRequest,
) -> Result<HttpResponse, GatewayError> {
    get_media(
        MediaType::Voice,
        state,
        key.into_inner(),
        MediaQuery::from_pairs(&query),
        req,
    )
    .await
}

pub async fn get_media_data(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, GatewayError> {
    let gateway = state.gateway.clone();
    let path = path.into_inner();

    let outcome = blocking(move || gateway.resolve_data(&path)).await?;
    emit(outcome, &req)
}

// =============================================================================
// MCP over HTTP
// =============================================================================

pub async fn mcp_message(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return HttpResponse::Ok().json(JsonRpcResponse::error(
                None,
                PARSE_ERROR,
                format!("Parse error: {}", e),
            ))
        }
    };

    let mcp = state.mcp.clone();
    match web::block(move || mcp.handle_request(request)).await {
        Ok(Some(response)) => HttpResponse::Ok().json(response),
        Ok(None) => HttpResponse::Accepted().finish(),
        Err(e) => ErrorBody::response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

// =============================================================================
// Service
// =============================================================================

pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/image/{key}",
            "/video/{key}",
            "/file/{key}",
            "/voice/{key}",
            "/data/{path}",
            "/message",
            "/health",
        ],
    }))
}

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Unknown API and static paths get a JSON 404; everything else goes home
pub async fn no_route(req: HttpRequest) -> HttpResponse {
    let path = req.path();
    if path.starts_with("/api") || path.starts_with("/static") {
        return ErrorBody::response(StatusCode::NOT_FOUND, "Not found");
    }
    HttpResponse::Found()
        .insert_header((
            "Cache-Control",
            "no-cache, no-store, max-age=0, must-revalidate",
        ))
        .insert_header(("Location", "/"))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_flag() {
        let q = |info: Option<&str>| MediaQuery {
            info: info.map(str::to_string),
        };
        assert!(!q(None).info_only());
        assert!(!q(Some("")).info_only());
        assert!(q(Some("1")).info_only());
        assert!(q(Some("false")).info_only());
    }

    #[test]
    fn test_repeated_info_takes_first_value() {
        let pairs = |raw: &[(&str, &str)]| -> Vec<(String, String)> {
            raw.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };

        let q = MediaQuery::from_pairs(&pairs(&[("info", "1"), ("info", "2")]));
        assert_eq!(q.info.as_deref(), Some("1"));
        assert!(q.info_only());

        let q = MediaQuery::from_pairs(&pairs(&[("info", ""), ("info", "1")]));
        assert!(!q.info_only());

        assert!(!MediaQuery::from_pairs(&pairs(&[("x", "1")])).info_only());
    }
}
