use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;

use crate::pipeline::CoordinatePipeline;
use super::handlers::*;

pub fn create_router(pipeline: Arc<CoordinatePipeline>) -> Router {
    Router::new()
        .route("/api/convert", get(convert_coordinate))
        .route("/api/inverse", get(inverse_coordinate))
        .route("/api/upload", post(upload_csv))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(16 * 1024 * 1024)) // 16MB limit
                .layer(CorsLayer::permissive())
        )
        .with_state(pipeline)
}
