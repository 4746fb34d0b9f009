//! Liveness endpoint for service monitoring.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    AppState,
    error::{AppError, Operation},
};

/// Liveness response: `{"message": "Server Online"}`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
}

/// Liveness handler (`GET /api`, authenticated).
///
/// # Checks
///
/// - Database connectivity (executes `SELECT 1`)
///
/// Returns 500 `{"error": "Failed to retrieve data"}` if the database is unreachable.
pub async fn server_status(State(state): State<AppState>) -> Result<Json<StatusResponse>, AppError> {
    state
        .store
        .ping()
        .await
        .map_err(AppError::backend(Operation::Retrieve))?;

    Ok(Json(StatusResponse {
        message: "Server Online",
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{
        AppState, build_router,
        middleware::auth::{API_KEY_HEADER, ApiKey},
        services::{
            count_store::CountStore,
            memory_store::{MemoryCountStore, UnavailableStore},
        },
    };

    async fn status_of(store: Arc<dyn CountStore>) -> (StatusCode, serde_json::Value) {
        let app = build_router(
            AppState {
                store,
                api_key: ApiKey::new("key"),
            },
            std::path::Path::new("public"),
        );
        let request = Request::builder()
            .uri("/api")
            .header(API_KEY_HEADER, "key")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn reports_online() {
        let (status, body) = status_of(Arc::new(MemoryCountStore::default())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"message": "Server Online"}));
    }

    #[tokio::test]
    async fn database_down_is_500() {
        let (status, body) = status_of(Arc::new(UnavailableStore)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to retrieve data");
    }
}
