//! Application error type mapping to HTTP status codes.
//!
//! Error surface per operation:
//! - missing required field  -> 400 JSON `{"error": "Invalid request"}`
//! - unknown session         -> 404 JSON `{"error": "Session not found"}`
//! - storage failure         -> 500 JSON, detail logged, never retried
//! - OAuth exchange failure  -> 400 plain text

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use datadex_types::error::{AuthError, SessionError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Session operation errors (validation, lookup, storage).
    Session(SessionError),
    /// OAuth2/OIDC exchange errors.
    Auth(AuthError),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

/// Status code and body message for a session error.
pub(crate) fn session_error_parts(error: &SessionError) -> (StatusCode, &'static str) {
    match error {
        SessionError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
        SessionError::NotFound => (StatusCode::NOT_FOUND, "Session not found"),
        SessionError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Storage failure"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Session(error) => {
                let (status, message) = session_error_parts(&error);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!(%error, "Session operation failed");
                } else {
                    tracing::debug!(%error, "Request rejected");
                }
                (
                    status,
                    [(axum::http::header::CONTENT_TYPE, "application/json")],
                    json!({ "error": message }).to_string(),
                )
                    .into_response()
            }
            AppError::Auth(error) => {
                tracing::warn!(%error, "Auth flow failed");
                (StatusCode::BAD_REQUEST, error.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_maps_to_400() {
        let (status, message) =
            session_error_parts(&SessionError::InvalidRequest("message is required".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Invalid request");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, message) = session_error_parts(&SessionError::NotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Session not found");
    }

    #[test]
    fn test_storage_error_maps_to_500() {
        let error = SessionError::Storage(datadex_types::error::StorageError::Backend(
            "connection refused".into(),
        ));
        let (status, _) = session_error_parts(&error);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
