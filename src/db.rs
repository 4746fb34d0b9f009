//! Database connection pool management.
//!
//! The pool talks to PostgreSQL over TLS. The server certificate is verified
//! against the CA bundle named in the configuration, including the host name.

use std::{path::Path, str::FromStr};

use sqlx::{
    Pool, Postgres,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};

/// Type alias for PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// A connection pool maintains multiple database connections that can be reused across HTTP requests which is much more efficient than opening a new connection for each request.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `ca_cert` - PEM bundle of the certificate authority that signed the server certificate
///
/// # Configuration
///
/// - Maximum connections: 5
/// - SSL mode: `verify-full`, rooted at `ca_cert`
///
/// # Errors
///
/// Returns an error if:
/// - Database connection string is invalid
/// - Cannot connect to PostgreSQL server or the TLS handshake fails
/// - Database authentication fails
pub async fn create_pool(database_url: &str, ca_cert: &Path) -> Result<DbPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url)?
        .ssl_mode(PgSslMode::VerifyFull)
        .ssl_root_cert(ca_cert);

    PgPoolOptions::new()
        // Limit concurrent connections
        .max_connections(5)
        .connect_with(options)
        .await
}
