//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can short-circuit requests (reject unauthorized) before any handler side effect.

/// Shared-secret API key middleware
pub mod auth;
