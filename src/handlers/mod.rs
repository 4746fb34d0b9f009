//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, query string)
//! 2. Calls the count store
//! 3. Returns HTTP response (JSON, status code)

/// Record CRUD endpoints
pub mod counts;
/// Authenticated liveness endpoint
pub mod health;
/// Table initializer endpoint
pub mod table;
