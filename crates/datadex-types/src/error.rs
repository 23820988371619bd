use thiserror::Error;

/// Errors from the storage backends.
///
/// No distinction is made between transient and permanent failures and
/// none are retried; they propagate straight to the request that caused them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("backend request failed: {0}")]
    Backend(String),

    #[error("backend returned status {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("document serialization error: {0}")]
    Serialization(String),
}

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A required field was missing or empty. Raised before storage is touched.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("session not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from the OAuth2/OIDC exchange.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization failed: no code returned")]
    MissingCode,

    #[error("authorization failed: state mismatch")]
    StateMismatch,

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("token exchange returned no access token")]
    MissingToken,

    #[error("userinfo returned no stable user id")]
    MissingSubject,

    #[error("identity provider request failed: {0}")]
    Http(String),

    #[error("authentication is not configured")]
    NotConfigured,
}

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        let err = SessionError::InvalidRequest("sessionId is required".to_string());
        assert_eq!(err.to_string(), "invalid request: sessionId is required");
        assert_eq!(SessionError::NotFound.to_string(), "session not found");
    }

    #[test]
    fn test_storage_error_wraps_into_session_error() {
        let err: SessionError = StorageError::Backend("connection refused".to_string()).into();
        assert!(matches!(err, SessionError::Storage(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingVar("DATADEX_BLOB_ENDPOINT");
        assert!(err.to_string().contains("DATADEX_BLOB_ENDPOINT"));
    }
}
