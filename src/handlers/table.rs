//! Table initializer endpoint.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, Operation},
};

/// Create `count_data_table` if it does not exist.
///
/// # Endpoint
///
/// `GET /create` (public)
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "Table created or already exists."}`
/// - **Error (500)**: plain text `Error creating one or more tables.`
///
/// Safe to call any number of times; existing rows are left untouched.
pub async fn create_table(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state
        .store
        .create_table()
        .await
        .map_err(AppError::backend(Operation::CreateTable))?;

    Ok(Json(json!({ "message": "Table created or already exists." })))
}
