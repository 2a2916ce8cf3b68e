pub mod handlers;
pub mod render;
pub mod types;

use crate::core::backend::ProcessingBackend;
use crate::server::handlers::{
    clear_images_handler, index_handler, list_images_handler, processor_status_handler,
    server_status_handler, upload_handler,
};
use crate::server::types::AppState;
use crate::utils::constants::SERVER_REQUEST_BODY_LIMIT;
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get, routing::post};
use std::sync::Arc;

pub fn router<B: ProcessingBackend>(state: Arc<AppState<B>>) -> Router {
    Router::new()
        .route("/", get(index_handler::<B>))
        .route("/health", get(server_status_handler))
        .route("/status", get(processor_status_handler::<B>))
        .route("/upload", post(upload_handler::<B>))
        .route(
            "/images",
            get(list_images_handler::<B>).delete(clear_images_handler::<B>),
        )
        // multipart extraction otherwise stops at axum's 2MB default
        .layer(DefaultBodyLimit::max(SERVER_REQUEST_BODY_LIMIT))
        .with_state(state)
}
