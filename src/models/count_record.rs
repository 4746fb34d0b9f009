//! Count record data models and API request/response types.
//!
//! This module defines:
//! - `CountRecord`: Database entity for one row of `count_data_table`
//! - `CreateCountRequest` / `UpdateCountRequest`: request bodies
//! - `CountRecordResponse` / `DeletedRecord`: response bodies
//! - `parse_date` / `format_date`: the `DD/MM/YYYY` boundary format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used on the wire, e.g. `06/05/2025` for 6 May 2025.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A date string that does not match `DD/MM/YYYY`.
#[derive(Debug, thiserror::Error)]
#[error("malformed date {input:?}: {source}")]
pub struct DateFormatError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Parse a `DD/MM/YYYY` string into a calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateFormatError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| DateFormatError {
        input: input.to_string(),
        source,
    })
}

/// Render a calendar date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Represents a row of `count_data_table`.
///
/// # Database Table
///
/// ```sql
/// CREATE TABLE count_data_table (
///     date DATE PRIMARY KEY,
///     tf_count INT,
///     da_count INT
/// );
/// ```
///
/// At most one row exists per date. Rows written by this service always carry both counts.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CountRecord {
    pub date: NaiveDate,
    pub tf_count: i32,
    pub da_count: i32,
}

/// Request body for inserting a record.
///
/// # JSON Example
///
/// ```json
/// {
///   "date": "06/05/2025",
///   "tf_count": 5,
///   "da_count": 3
/// }
/// ```
///
/// Fields are optional at the type level so a missing field is reported as a
/// validation failure instead of a body rejection. Also accepted as an
/// urlencoded form: `date=06/05/2025&tf_count=5&da_count=3`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCountRequest {
    pub date: Option<String>,
    pub tf_count: Option<i32>,
    pub da_count: Option<i32>,
}

/// Request body for replacing both counts of an existing record.
///
/// Zero is a valid count; only absent fields are rejected.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCountRequest {
    pub tf_count: Option<i32>,
    pub da_count: Option<i32>,
}

/// Query string carrying the target date, e.g. `?date=06/05/2025`.
///
/// Other parameters such as `api_key` are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    /// The requested date, treating an empty value as absent.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref().filter(|date| !date.is_empty())
    }
}

/// Response body for a single record.
///
/// # JSON Example
///
/// ```json
/// {
///   "date": "06/05/2025",
///   "tf_count": 5,
///   "da_count": 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRecordResponse {
    pub date: String,
    pub tf_count: i32,
    pub da_count: i32,
}

impl From<CountRecord> for CountRecordResponse {
    fn from(record: CountRecord) -> Self {
        Self {
            date: format_date(record.date),
            tf_count: record.tf_count,
            da_count: record.da_count,
        }
    }
}

/// Identifies a deleted record: `{"date": "06/05/2025"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedRecord {
    pub date: String,
}

impl From<NaiveDate> for DeletedRecord {
    fn from(date: NaiveDate) -> Self {
        Self {
            date: format_date(date),
        }
    }
}
