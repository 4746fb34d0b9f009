//! In-memory `CountStore` used by the handler tests.
//!
//! `MemoryCountStore::len` lets a test assert that a rejected request left the
//! table untouched (no row created, none removed).

use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::count_store::CountStore;
use crate::models::count_record::CountRecord;

/// Table kept in a `BTreeMap`, so iteration is already ordered by date.
#[derive(Debug, Default)]
pub struct MemoryCountStore {
    rows: Mutex<BTreeMap<NaiveDate, (i32, i32)>>,
}

impl MemoryCountStore {
    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl CountStore for MemoryCountStore {
    async fn create_table(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn insert(&self, record: &CountRecord) -> Result<(), sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&record.date) {
            return Err(sqlx::Error::Protocol(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }
        rows.insert(record.date, (record.tf_count, record.da_count));
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CountRecord>, sqlx::Error> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .map(|(&date, &(tf_count, da_count))| CountRecord {
                date,
                tf_count,
                da_count,
            })
            .collect())
    }

    async fn find(&self, date: NaiveDate) -> Result<Option<CountRecord>, sqlx::Error> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.get(&date).map(|&(tf_count, da_count)| CountRecord {
            date,
            tf_count,
            da_count,
        }))
    }

    async fn update(
        &self,
        date: NaiveDate,
        tf_count: i32,
        da_count: i32,
    ) -> Result<Option<CountRecord>, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&date).map(|counts| {
            *counts = (tf_count, da_count);
            CountRecord {
                date,
                tf_count,
                da_count,
            }
        }))
    }

    async fn delete(&self, date: NaiveDate) -> Result<Option<NaiveDate>, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.remove(&date).map(|_| date))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

/// Store whose every call fails, for exercising the 500 paths.
#[derive(Debug, Default)]
pub struct UnavailableStore;

#[async_trait]
impl CountStore for UnavailableStore {
    async fn create_table(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn insert(&self, _record: &CountRecord) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn list(&self) -> Result<Vec<CountRecord>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn find(&self, _date: NaiveDate) -> Result<Option<CountRecord>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn update(
        &self,
        _date: NaiveDate,
        _tf_count: i32,
        _da_count: i32,
    ) -> Result<Option<CountRecord>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn delete(&self, _date: NaiveDate) -> Result<Option<NaiveDate>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}
