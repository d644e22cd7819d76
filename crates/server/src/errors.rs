use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use service::errors::StorageError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": title, "detail": …, "code": …}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
    pub code: Option<u16>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail, code: None }
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = json!({"error": self.title});
        if let Some(detail) = self.detail {
            body["detail"] = json!(detail);
        }
        if let Some(code) = self.code {
            body["code"] = json!(code);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<StorageError> for JsonApiError {
    fn from(e: StorageError) -> Self {
        error!(err = %e, code = e.code(), "storage failure");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            title: "Storage Failure",
            detail: Some(e.to_string()),
            code: Some(e.code()),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage initialization failed: {0}")]
    Storage(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
