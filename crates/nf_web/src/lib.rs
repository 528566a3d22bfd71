use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub mod cache;
pub mod handlers;
pub mod pipeline;
pub mod state;

pub use pipeline::PipelineConfig;
pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/summarize", post(handlers::summarize))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{AppState, PipelineConfig};
    pub use nf_core::{Article, Error, Result, SummarizeResponse};
}
