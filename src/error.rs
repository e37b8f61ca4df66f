use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::object_store::StoreError;

/// Errors surfaced by the gateway's HTTP operations.
///
/// Every error is terminal for the current request; nothing is retried or
/// downgraded to partial success.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Malformed or missing request data
    #[error("{0}")]
    ClientInput(String),

    /// Filename extension not in the allow-list
    #[error("unsupported file extension {0:?}")]
    UnsupportedMediaType(String),

    /// Failure reading the uploaded payload
    #[error("failed to read uploaded file: {0}")]
    PayloadRead(String),

    /// Any backend put/list/presign/remove failure
    #[error("storage backend error: {0}")]
    Storage(String),
}

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl GatewayError {
    fn status(&self) -> StatusCode {
        match self {
            GatewayError::ClientInput(_) => StatusCode::BAD_REQUEST,
            GatewayError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            GatewayError::PayloadRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            GatewayError::ClientInput(_) => "BAD_REQUEST",
            GatewayError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            GatewayError::PayloadRead(_) => "PAYLOAD_READ_ERROR",
            GatewayError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(e: StoreError) -> Self {
        GatewayError::Storage(e.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::ClientInput("no file provided".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::UnsupportedMediaType(".txt".into()).status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            GatewayError::PayloadRead("truncated".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::Storage("connection refused".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            GatewayError::UnsupportedMediaType(".txt".into()).code(),
            "UNSUPPORTED_MEDIA_TYPE"
        );
        assert_eq!(
            GatewayError::Storage("boom".into()).code(),
            "STORAGE_ERROR"
        );
    }
}
