//! Margem Certa server binary.
//!
//! Loads and validates configuration (failing fast on missing
//! credentials), wires the adapters and serves the HTTP API.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use margem_certa::adapters::ai::{GeminiConfig, GeminiProvider};
use margem_certa::adapters::http::{api_router, recommendations::RecommendationsState};
use margem_certa::application::GenerateAdviceHandler;
use margem_certa::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {err}");
        process::exit(1);
    }

    init_tracing(&config);

    let provider = GeminiProvider::new(GeminiConfig::from_app_config(&config.ai));
    let advice = Arc::new(GenerateAdviceHandler::new(Arc::new(provider)));

    let app = api_router(RecommendationsState::new(advice))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%addr, error = %err, "failed to bind listener");
            process::exit(1);
        }
    };

    info!(%addr, environment = ?config.server.environment, "margem-certa listening");

    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "server terminated");
        process::exit(1);
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
