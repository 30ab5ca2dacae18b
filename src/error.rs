// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reqwest::Method;
use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationError;

/// Failures surfaced by the controller client.
#[derive(Debug, Error)]
pub enum UnifiError {
    #[error("login failed with {status}: {body}")]
    Auth {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{method} request to {url} returned {status}: {message}")]
    Api {
        method: Method,
        url: String,
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),
}

impl UnifiError {
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        UnifiError::Decode {
            context: context.into(),
            source,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponseBody {
    pub error: String,
}

/// Errors returned by the webhook HTTP surface.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("upstream error: {0}")]
    Upstream(#[source] UnifiError),
}

impl From<UnifiError> for AppError {
    fn from(err: UnifiError) -> Self {
        match err {
            UnifiError::Validation(e) => AppError::BadRequest(e.to_string()),
            UnifiError::NotFound(key) => AppError::NotFound(key),
            other => AppError::Upstream(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponseBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
