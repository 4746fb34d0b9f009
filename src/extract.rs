//! Custom Axum extractors

use axum::{
    Form, Json,
    body::Bytes,
    extract::{
        FromRequest, Request,
        rejection::{BytesRejection, FormRejection, JsonRejection},
    },
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request body accepted as JSON or as an urlencoded form.
///
/// The form branch is chosen by `Content-Type`; anything else is read as
/// JSON regardless of the header. An empty body yields `T::default()`, so a
/// missing body reaches the handler's own required-field check.
pub struct CountBody<T>(pub T);

/// A body that was present but could not be decoded into the request type.
#[derive(Debug, thiserror::Error)]
pub enum BodyRejection {
    #[error("unreadable body: {0}")]
    Read(#[from] BytesRejection),

    #[error("invalid JSON body: {0}")]
    Json(#[from] JsonRejection),

    #[error("invalid form body: {0}")]
    Form(#[from] FormRejection),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request body rejected");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to read request body" })),
        )
            .into_response()
    }
}

fn is_form(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}

impl<S, T> FromRequest<S> for CountBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = BodyRejection;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&request) {
            let Form(value) = Form::<T>::from_request(request, state).await?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(request, state).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Counts {
        tf_count: Option<i32>,
        da_count: Option<i32>,
    }

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<Counts, BodyRejection> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(value) = content_type {
            builder = builder.header(CONTENT_TYPE, value);
        }
        let request = builder.body(Body::from(body)).unwrap();
        CountBody::<Counts>::from_request(request, &())
            .await
            .map(|CountBody(counts)| counts)
    }

    #[tokio::test]
    async fn empty_body_is_all_missing() {
        assert_eq!(extract(None, "").await.unwrap(), Counts::default());
        assert_eq!(
            extract(Some("application/json"), " \n").await.unwrap(),
            Counts::default()
        );
    }

    #[tokio::test]
    async fn json_without_content_type() {
        let counts = extract(None, r#"{"tf_count": 0, "da_count": 2}"#).await.unwrap();
        assert_eq!(counts.tf_count, Some(0));
        assert_eq!(counts.da_count, Some(2));
    }

    #[tokio::test]
    async fn urlencoded_form() {
        let counts = extract(Some("application/x-www-form-urlencoded"), "tf_count=5&da_count=3")
            .await
            .unwrap();
        assert_eq!(counts.tf_count, Some(5));
        assert_eq!(counts.da_count, Some(3));
    }

    #[tokio::test]
    async fn out_of_range_count_is_rejected() {
        let result = extract(Some("application/json"), r#"{"tf_count": 3000000000}"#).await;
        assert!(matches!(result, Err(BodyRejection::Json(_))));

        let result = extract(Some("application/x-www-form-urlencoded"), "tf_count=3000000000").await;
        assert!(matches!(result, Err(BodyRejection::Form(_))));
    }

    #[tokio::test]
    async fn rejection_hides_decoder_details() {
        let rejection = extract(None, "{not json").await.unwrap_err();
        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Failed to read request body" }));
    }
}
