use crate::storage::ReviewStore;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReviewStore>,
}

/// Review payload for create and update requests.
///
/// The id is accepted for wire-shape compatibility but ignored; the store
/// assigns ids on insert and the path id governs updates.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub rating: f64,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_reviews: i64,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ReviewRequest {
    /// Validate the payload: non-blank title, rating within [1, 5].
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Review title cannot be empty".to_string());
        }
        if !(1.0..=5.0).contains(&self.rating) {
            return Err("Review rating must be between 1 and 5".to_string());
        }
        Ok(())
    }
}

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unprocessable(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (
            status,
            Json(ErrorResponse {
                error: status.to_string(),
                message,
            }),
        )
            .into_response()
    }
}
