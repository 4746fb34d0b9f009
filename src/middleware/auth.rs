//! API key authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the candidate key from the `x-api-key` header or `api_key` query parameter
//! 2. Compare it against the configured shared secret
//! 3. Reject mismatches with HTTP 401 before the handler runs

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The configured shared secret, held as its SHA-256 digest.
///
/// Comparing digests keeps the comparison time independent of the secret's
/// length and of how long a prefix the candidate shares with it.
#[derive(Clone)]
pub struct ApiKey {
    digest: [u8; 32],
}

impl ApiKey {
    pub fn new(secret: &str) -> Self {
        Self {
            digest: Sha256::digest(secret.as_bytes()).into(),
        }
    }

    /// Exact-match check of a client supplied key.
    pub fn verify(&self, candidate: &str) -> bool {
        let candidate: [u8; 32] = Sha256::digest(candidate.as_bytes()).into();
        candidate
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }

    /// Short hex prefix of the digest, safe to log.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.digest[..4])
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct AuthQuery {
    api_key: Option<String>,
}

/// Pull the candidate key out of the request.
///
/// A non-empty header wins; otherwise the query parameter is used.
fn candidate_key(request: &Request) -> Option<String> {
    let from_header = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|key| !key.is_empty());

    if let Some(key) = from_header {
        return Some(key.to_string());
    }

    Query::<AuthQuery>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(query)| query.api_key)
}

/// API key authentication middleware function.
///
/// # Accepted credentials
///
/// ```text
/// x-api-key: <secret>
/// GET /api/data?date=06/05/2025&api_key=<secret>
/// ```
///
/// # Returns
///
/// - `Ok(Response)` if the key matches (calls next handler)
/// - `Err(AppError::InvalidApiKey)` otherwise (401, handler never runs)
pub async fn auth_middleware(
    State(api_key): State<ApiKey>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let candidate = candidate_key(&request).ok_or(AppError::InvalidApiKey)?;

    if !api_key.verify(&candidate) {
        tracing::debug!(path = %request.uri().path(), "rejected request with wrong API key");
        return Err(AppError::InvalidApiKey);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(uri: &str, header: Option<&str>) -> Request {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = header {
            builder = builder.header(API_KEY_HEADER, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn verify_is_exact() {
        let key = ApiKey::new("s3cret");
        assert!(key.verify("s3cret"));
        assert!(!key.verify("s3cret "));
        assert!(!key.verify("S3CRET"));
        assert!(!key.verify(""));
    }

    #[test]
    fn header_takes_precedence_over_query() {
        let req = request("/api?api_key=from-query", Some("from-header"));
        assert_eq!(candidate_key(&req).as_deref(), Some("from-header"));
    }

    #[test]
    fn empty_header_falls_back_to_query() {
        let req = request("/api?api_key=from-query", Some(""));
        assert_eq!(candidate_key(&req).as_deref(), Some("from-query"));
    }

    #[test]
    fn no_credentials() {
        let req = request("/api/data?date=01/01/2025", None);
        assert_eq!(candidate_key(&req), None);
    }

    #[test]
    fn debug_output_hides_secret() {
        let key = ApiKey::new("s3cret");
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("s3cret"));
        assert_eq!(key.fingerprint().len(), 8);
    }
}
