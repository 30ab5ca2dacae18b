pub mod webhook;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::SharedState;

/// Media type of every external-dns webhook payload.
pub const WEBHOOK_MEDIA_TYPE: &str = "application/external.dns.webhook+json;version=1";

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(webhook::negotiate))
        .route("/records", get(webhook::get_records).post(webhook::apply_changes))
        .route("/adjustendpoints", post(webhook::adjust_endpoints))
        .route("/healthz", get(webhook::healthz))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
