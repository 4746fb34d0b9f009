//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables.

/// Date-indexed counter record
pub mod count_record;
