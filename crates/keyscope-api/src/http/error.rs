//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use keyscope_types::error::ConsoleError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// A console operation failed. `action` names the failed operation for
    /// the operator ("Failed to fetch keys").
    Console {
        action: &'static str,
        error: ConsoleError,
    },
    /// Malformed request (bad JSON body, non-numeric limit).
    Validation(String),
}

impl AppError {
    /// Adapter for `map_err` that tags a console error with the failed action.
    pub fn during(action: &'static str) -> impl FnOnce(ConsoleError) -> AppError {
        move |error| AppError::Console { action, error }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Console { error, .. } => match error {
                ConsoleError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                ConsoleError::KeyNotFound(_) => StatusCode::NOT_FOUND,
                ConsoleError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::Console { error, .. } => match error {
                ConsoleError::InvalidInput(msg) => msg.clone(),
                ConsoleError::KeyNotFound(_) => "Key not found".to_string(),
                ConsoleError::StoreUnavailable(_) => self.action_message(),
            },
            AppError::Validation(msg) => msg.clone(),
        }
    }

    fn action_message(&self) -> String {
        match self {
            AppError::Console { action, error } => format!("{action}: {error}"),
            AppError::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{message}");
        } else {
            tracing::debug!(status = status.as_u16(), "{message}");
        }

        let request_id = uuid::Uuid::now_v7().to_string();
        (status, Json(ApiResponse::failure(message, request_id, 0))).into_response()
    }
}
