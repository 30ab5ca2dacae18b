// src/api/webhook.rs
use axum::{
    Extension, Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::WEBHOOK_MEDIA_TYPE;
use crate::SharedState;
use crate::endpoint::{Changes, Endpoint};
use crate::error::AppError;

fn webhook_json<T: Serialize>(value: T) -> Response {
    (
        [(header::CONTENT_TYPE, WEBHOOK_MEDIA_TYPE)],
        Json(value),
    )
        .into_response()
}

// GET /
pub async fn negotiate(Extension(state): Extension<SharedState>) -> Response {
    webhook_json(&state.config.domain_filter)
}

// GET /records
pub async fn get_records(Extension(state): Extension<SharedState>) -> Result<Response, AppError> {
    let endpoints = state.provider.records().await?;
    Ok(webhook_json(endpoints))
}

// POST /records
pub async fn apply_changes(
    Extension(state): Extension<SharedState>,
    Json(changes): Json<Changes>,
) -> Result<StatusCode, AppError> {
    state.provider.apply_changes(changes).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /adjustendpoints
pub async fn adjust_endpoints(
    Extension(state): Extension<SharedState>,
    Json(endpoints): Json<Vec<Endpoint>>,
) -> Result<Response, AppError> {
    let adjusted = state.provider.adjust_endpoints(endpoints).await?;
    Ok(webhook_json(adjusted))
}

// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}
