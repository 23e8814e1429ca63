//! Error types for the bookshelf server

use std::fmt;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::api::ResponseStatus;

/// Book operation an error was raised from, used to word the failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Add,
    Fetch,
    Update,
    Delete,
}

impl BookAction {
    fn not_found_message(self) -> String {
        match self {
            BookAction::Fetch => "Book not found".to_string(),
            action => format!("Failed to {} book. Id not found", action),
        }
    }
}

impl fmt::Display for BookAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            BookAction::Add => "add",
            BookAction::Fetch => "fetch",
            BookAction::Update => "update",
            BookAction::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to {0} book. Please provide the book name")]
    MissingName(BookAction),

    #[error("Failed to {0} book. readPage must not be greater than pageCount")]
    PageOverflow(BookAction),

    #[error("{}", .0.not_found_message())]
    NotFound(BookAction),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingName(_) | AppError::PageOverflow(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse {
                    status: ResponseStatus::Error,
                    message: "Internal server error".to_string(),
                }
            }
            other => ErrorResponse {
                status: ResponseStatus::Fail,
                message: other.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
