// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! HTTP API Server for the media gateway
//!
//! Serves chat media by key and raw data files by path, plus an MCP
//! endpoint. Uses Actix-web for the HTTP server.

mod handlers;
mod response;
mod state;

pub use handlers::MediaQuery;
pub use response::{emit, ErrorBody};
pub use state::AppState;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;

use crate::config::GatewayConfig;

/// Configure gateway routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use handlers::*;

    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        // Media
        .route("/image/{key:.*}", web::get().to(get_image))
        .route("/video/{key:.*}", web::get().to(get_video))
        .route("/file/{key:.*}", web::get().to(get_file))
        .route("/voice/{key:.*}", web::get().to(get_voice))
        .route("/data/{path:.*}", web::get().to(get_media_data))
        // MCP, answered inline
        .route("/message", web::post().to(mcp_message));
}

/// Fallback for unmatched paths
pub fn default_service() -> actix_web::Route {
    web::to(handlers::no_route)
}

/// Start the API server
pub async fn start_server(config: GatewayConfig) -> Result<()> {
    let gateway = config.build_gateway()?;
    let state = web::Data::new(AppState::new(gateway));
    let cors_origins = config.cors_origins.clone();

    log::info!("chatlog media gateway starting");
    log::info!("   Address: http://{}:{}", config.host, config.port);
    log::info!("   Data dir: {}", config.data_dir.display());
    log::info!("   Database: {}", config.database_path().display());
    log::info!(
        "   Voice: {}",
        config.voice_command.as_deref().unwrap_or("passthrough (audio/silk)")
    );

    let server = HttpServer::new(move || {
        let origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origin_str = origin.to_str().unwrap_or("");
                origins.iter().any(|allowed| allowed == origin_str)
                    || origin_str.starts_with("http://localhost:")
                    || origin_str.starts_with("http://127.0.0.1:")
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Content-Type", "Accept"])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
            .default_service(default_service())
    });

    let server = server.bind((config.host.as_str(), config.port))?;
    server.run().await?;

    log::info!("server stopped");
    Ok(())
}
