//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{extract::BodyRejection, models::count_record::DateFormatError};

/// The operation a backend failure interrupted.
///
/// Each operation reports its own generic failure message to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateTable,
    Insert,
    Retrieve,
    Update,
    Delete,
}

impl Operation {
    /// Message returned to the client when this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::CreateTable => "Error creating one or more tables.",
            Operation::Insert => "Failed to insert data",
            Operation::Retrieve => "Failed to retrieve data",
            Operation::Update => "Failed to update data",
            Operation::Delete => "Failed to delete data",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateTable => "create table",
            Operation::Insert => "insert",
            Operation::Retrieve => "retrieve",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Anything that goes wrong between the handler and the stored table.
///
/// Connectivity problems, constraint violations, unparseable dates and
/// undecodable bodies (e.g. a count outside INT range) collapse into this one kind.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    MalformedDate(#[from] DateFormatError),

    #[error(transparent)]
    Body(#[from] BodyRejection),
}

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Authentication Errors**: Invalid or missing API key
/// - **Validation Errors**: Missing required input
/// - **Resource Errors**: No record for the requested date
/// - **Backend Errors**: Any database or date-parsing failure
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// API key is missing or does not match.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid or missing API key")]
    InvalidApiKey,

    /// Required request input is missing.
    ///
    /// Returns HTTP 400 Bad Request with the message under `error`.
    #[error("{0}")]
    InvalidRequest(&'static str),

    /// No record exists for the requested date.
    ///
    /// Returns HTTP 404 Not Found with the message under `message`.
    #[error("{0}")]
    NotFound(&'static str),

    /// The backend failed while performing `operation`.
    ///
    /// Returns HTTP 500 and logs the source; details never reach the client.
    #[error("{operation} failed: {source}")]
    Backend {
        operation: Operation,
        #[source]
        source: BackendError,
    },
}

impl AppError {
    /// Adapter for `map_err` that tags a backend failure with its operation.
    ///
    /// ```ignore
    /// store.list().await.map_err(AppError::backend(Operation::Retrieve))?;
    /// ```
    pub fn backend<E>(operation: Operation) -> impl FnOnce(E) -> AppError
    where
        E: Into<BackendError>,
    {
        move |source| AppError::Backend {
            operation,
            source: source.into(),
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Status Code Mapping
///
/// - `InvalidApiKey` → 401 `{"error": "Invalid or missing API key"}`
/// - `InvalidRequest` → 400 `{"error": "<message>"}`
/// - `NotFound` → 404 `{"message": "<message>"}`
/// - `Backend` → 500 `{"error": "Failed to ..."}` (plain text for table creation)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            AppError::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            AppError::Backend { operation, source } => {
                tracing::error!(%operation, error = %source, "backend failure");

                let message = operation.failure_message();
                match operation {
                    Operation::CreateTable => {
                        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
                    }
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": message })),
                    )
                        .into_response(),
                }
            }
        }
    }
}
