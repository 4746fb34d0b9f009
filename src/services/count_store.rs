//! Count store - persistence for `count_data_table`.
//!
//! Every operation is a single SQL statement, so each one is atomic on its
//! own. Nothing here spans a transaction.
//!
//! # Concurrency
//!
//! Update and delete report a missing row through `RETURNING` instead of a
//! separate existence check, so a concurrent delete between "check" and
//! "write" cannot produce a 200 for a row that no longer exists.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{db::DbPool, models::count_record::CountRecord};

/// Idempotent DDL for the backing table. Never drops or alters existing data.
pub const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS count_data_table (
        date DATE PRIMARY KEY,
        tf_count INT,
        da_count INT
    )
"#;

/// Storage operations behind the HTTP handlers.
#[async_trait]
pub trait CountStore: Send + Sync + 'static {
    /// Create the table if it does not exist yet.
    async fn create_table(&self) -> Result<(), sqlx::Error>;

    /// Insert a new record. A duplicate date is a database error.
    async fn insert(&self, record: &CountRecord) -> Result<(), sqlx::Error>;

    /// Every record, ascending by date.
    async fn list(&self) -> Result<Vec<CountRecord>, sqlx::Error>;

    async fn find(&self, date: NaiveDate) -> Result<Option<CountRecord>, sqlx::Error>;

    /// Replace both counts. Returns `None` when no record exists for `date`.
    async fn update(
        &self,
        date: NaiveDate,
        tf_count: i32,
        da_count: i32,
    ) -> Result<Option<CountRecord>, sqlx::Error>;

    /// Delete the record. Returns the deleted date, or `None` if there was none.
    async fn delete(&self, date: NaiveDate) -> Result<Option<NaiveDate>, sqlx::Error>;

    /// Round trip to the backend without touching the table.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// PostgreSQL implementation over the shared connection pool.
#[derive(Debug, Clone)]
pub struct PgCountStore {
    pool: DbPool,
}

impl PgCountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountStore for PgCountStore {
    async fn create_table(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, record: &CountRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO count_data_table (date, tf_count, da_count)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(record.date)
        .bind(record.tf_count)
        .bind(record.da_count)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<CountRecord>, sqlx::Error> {
        sqlx::query_as::<_, CountRecord>(
            r#"
            SELECT date, tf_count, da_count
            FROM count_data_table
            ORDER BY date
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn find(&self, date: NaiveDate) -> Result<Option<CountRecord>, sqlx::Error> {
        sqlx::query_as::<_, CountRecord>(
            r#"
            SELECT date, tf_count, da_count
            FROM count_data_table
            WHERE date = $1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update(
        &self,
        date: NaiveDate,
        tf_count: i32,
        da_count: i32,
    ) -> Result<Option<CountRecord>, sqlx::Error> {
        sqlx::query_as::<_, CountRecord>(
            r#"
            UPDATE count_data_table
            SET tf_count = $2, da_count = $3
            WHERE date = $1
            RETURNING date, tf_count, da_count
            "#,
        )
        .bind(date)
        .bind(tf_count)
        .bind(da_count)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete(&self, date: NaiveDate) -> Result<Option<NaiveDate>, sqlx::Error> {
        sqlx::query_scalar::<_, NaiveDate>(
            r#"
            DELETE FROM count_data_table
            WHERE date = $1
            RETURNING date
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
