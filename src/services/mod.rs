//! Persistence services behind the HTTP handlers.

/// Count table storage trait and PostgreSQL implementation
pub mod count_store;

#[cfg(test)]
pub mod memory_store;
