//! Count record HTTP handlers.
//!
//! This module implements the record endpoints:
//! - POST /api/add - Insert a record
//! - GET /api/all/data - List every record, ascending by date
//! - GET /api/data?date=DD/MM/YYYY - Fetch one record
//! - PUT /api/update?date=DD/MM/YYYY - Replace both counts of a record
//! - DELETE /api/delete?date=DD/MM/YYYY - Delete a record
//!
//! All of them sit behind the API key middleware.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, Operation},
    extract::{BodyRejection, CountBody},
    models::count_record::{
        CountRecord, CountRecordResponse, CreateCountRequest, DateQuery, DeletedRecord,
        UpdateCountRequest, parse_date,
    },
};

const DATE_REQUIRED: &str = "Date is required as query param";
const NO_DATA_FOR_DATE: &str = "No data found for this date";
const NO_RECORD_FOR_DATE: &str = "No record found for this date";

/// Insert a new record.
///
/// # Request Body
///
/// ```json
/// { "date": "06/05/2025", "tf_count": 5, "da_count": 3 }
/// ```
///
/// An urlencoded form with the same fields is accepted too.
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "Data inserted successfully"}`
/// - **Error (400)**: A field is missing, or no body at all
/// - **Error (500)**: Duplicate date, malformed date, undecodable body or database error
pub async fn add_record(
    State(state): State<AppState>,
    body: Result<CountBody<CreateCountRequest>, BodyRejection>,
) -> Result<Json<Value>, AppError> {
    let CountBody(request) = body.map_err(AppError::backend(Operation::Insert))?;
    let (Some(date), Some(tf_count), Some(da_count)) =
        (request.date, request.tf_count, request.da_count)
    else {
        return Err(AppError::InvalidRequest(
            "date, tf_count, and da_count are required",
        ));
    };

    let record = CountRecord {
        date: parse_date(&date).map_err(AppError::backend(Operation::Insert))?,
        tf_count,
        da_count,
    };

    state
        .store
        .insert(&record)
        .await
        .map_err(AppError::backend(Operation::Insert))?;

    tracing::info!(date = %date, "record inserted");

    Ok(Json(json!({ "message": "Data inserted successfully" })))
}

/// List every record ordered by date.
///
/// An empty table yields `[]`.
pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountRecordResponse>>, AppError> {
    let records = state
        .store
        .list()
        .await
        .map_err(AppError::backend(Operation::Retrieve))?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// Fetch the record for one date.
///
/// # Response
///
/// - **Success (200 OK)**: the record object (not wrapped in an array)
/// - **Error (400)**: `date` query parameter missing
/// - **Error (404)**: no record for that date
pub async fn get_record(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<CountRecordResponse>, AppError> {
    let date = query.date().ok_or(AppError::InvalidRequest(DATE_REQUIRED))?;
    let date = parse_date(date).map_err(AppError::backend(Operation::Retrieve))?;

    let record = state
        .store
        .find(date)
        .await
        .map_err(AppError::backend(Operation::Retrieve))?
        .ok_or(AppError::NotFound(NO_DATA_FOR_DATE))?;

    Ok(Json(record.into()))
}

/// Replace both counts of the record for `date`.
///
/// # Request Body
///
/// ```json
/// { "tf_count": 9, "da_count": 1 }
/// ```
///
/// Both counts are required; zero is accepted. An urlencoded form is accepted too.
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "Data updated successfully", "updated": <record>}`
/// - **Error (400)**: date or a count missing, or no body at all
/// - **Error (404)**: no record for that date
/// - **Error (500)**: malformed date, undecodable body or database error
pub async fn update_record(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
    body: Result<CountBody<UpdateCountRequest>, BodyRejection>,
) -> Result<Json<Value>, AppError> {
    let CountBody(request) = body.map_err(AppError::backend(Operation::Update))?;
    let (Some(date), Some(tf_count), Some(da_count)) =
        (query.date(), request.tf_count, request.da_count)
    else {
        return Err(AppError::InvalidRequest(
            "Date, tf_count, and da_count are required",
        ));
    };

    let date = parse_date(date).map_err(AppError::backend(Operation::Update))?;

    let updated: CountRecordResponse = state
        .store
        .update(date, tf_count, da_count)
        .await
        .map_err(AppError::backend(Operation::Update))?
        .ok_or(AppError::NotFound(NO_RECORD_FOR_DATE))?
        .into();

    tracing::info!(date = %updated.date, tf_count, da_count, "record updated");

    Ok(Json(json!({
        "message": "Data updated successfully",
        "updated": updated,
    })))
}

/// Delete the record for `date`.
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "Record deleted successfully", "deleted": {"date": "..."}}`
/// - **Error (400)**: `date` query parameter missing
/// - **Error (404)**: no record for that date
pub async fn delete_record(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>, AppError> {
    let date = query.date().ok_or(AppError::InvalidRequest(DATE_REQUIRED))?;
    let date = parse_date(date).map_err(AppError::backend(Operation::Delete))?;

    let deleted: DeletedRecord = state
        .store
        .delete(date)
        .await
        .map_err(AppError::backend(Operation::Delete))?
        .ok_or(AppError::NotFound(NO_RECORD_FOR_DATE))?
        .into();

    tracing::info!(date = %deleted.date, "record deleted");

    Ok(Json(json!({
        "message": "Record deleted successfully",
        "deleted": deleted,
    })))
}
