use axum::http::HeaderValue;
use reqwest::Client;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::booter::Booter;
use crate::config::Config;
use crate::core::backend::HttpBackend;
use crate::core::processor::ImageProcessor;
use crate::server::types::AppState;
use crate::utils::constants::{SERVER_REQUEST_BODY_LIMIT, SERVER_REQUEST_TIMEOUT};

pub mod booter;
pub mod config;
pub mod core;
pub mod server;
pub mod utils;

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, anyhow::Error> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() {
        return Ok(cors.allow_origin(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(cors.allow_origin(AllowOrigin::list(origins)))
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    tracing::info!("processing backend at {}", config.base_url);

    let http_client = Client::builder().timeout(config.backend_timeout).build()?;
    let backend = HttpBackend::new(http_client, config.base_url.clone());
    let processor = ImageProcessor::new(backend, config.base_url.clone());
    let state = Arc::new(AppState::new(processor));

    let middleware = ServiceBuilder::new()
        .layer(RequestBodyLimitLayer::new(SERVER_REQUEST_BODY_LIMIT))
        .layer(cors_layer(&config.allowed_origins)?)
        .layer(TimeoutLayer::new(SERVER_REQUEST_TIMEOUT));

    let router = server::router(state).layer(middleware);

    let booter = Booter::new(config.port).await?;
    booter.start(router).await
}
