//! HTTP server exposing the task, document, chat and insight APIs

pub mod error;
pub mod routes;
pub mod state;

pub use state::AppState;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue,
    },
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Version information for the server
#[derive(serde::Serialize)]
struct VersionInfo {
    version: String,
    repository: String,
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(state: AppState) -> Result<(), String> {
    let server_config = &state.config.server;

    // CORS must be the outermost layer so preflight OPTIONS requests are
    // answered before anything else sees them
    let cors = if server_config.cors_origins.is_empty() {
        // Permissive CORS: allow any origin (default for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
    } else {
        let allowed_origins: Vec<HeaderValue> = server_config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
    };

    let addr: SocketAddr = format!("{}:{}", server_config.bind, server_config.port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let cors_display = if server_config.cors_origins.is_empty() {
        "*".to_string()
    } else {
        server_config.cors_origins.join(", ")
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/version", get(version_handler))
        .merge(routes::api_router())
        .layer(cors)
        .with_state(state.clone());

    println!("\nTaskMind server");
    println!("  URL:          http://{}", addr);
    println!("  Model:        {}", state.config.ai.model);
    println!("  CORS origins: {}", cors_display);
    println!("  Data dir:     {}\n", state.config.storage.data_dir.display());

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    log::info!("Shutdown signal received, stopping server...");
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Version endpoint - returns server version and repository URL
async fn version_handler() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        repository: "https://github.com/taskmind/taskmind-server".to_string(),
    })
}
