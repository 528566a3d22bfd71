use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

use nf_core::ArticleRequest;

use crate::pipeline;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ArticleRequest>,
) -> impl IntoResponse {
    Json(pipeline::run(&state, &request.url).await)
}

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        message: "NewsFast is running",
    })
}
