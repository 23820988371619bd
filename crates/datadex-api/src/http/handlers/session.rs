//! Session HTTP handlers.
//!
//! Endpoints:
//! - GET  /start_session - Create a session, set the userId cookie
//! - POST /store_message - Append a user/bot pair, return it
//! - GET  /get_session   - Return the full session document
//!
//! Wire shapes match the persisted document layout: camelCase field names
//! throughout.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use serde::Deserialize;
use serde_json::json;

use datadex_types::identity::RequestIdentity;
use datadex_types::session::SessionDocument;

use crate::http::cookies;
use crate::http::error::AppError;
use crate::state::AppState;

/// Body of POST /store_message. Fields arrive optional so that missing
/// ones fall through to service validation as empty values (400, not a
/// deserialization rejection).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMessageRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Query parameters of GET /get_session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSessionQuery {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Resolve the caller's identity from the first-party auth record or the
/// returning guest cookie.
pub(crate) fn resolve_identity(state: &AppState, headers: &HeaderMap) -> RequestIdentity {
    if let Some(sid) = cookies::get(headers, cookies::AUTH_SESSION)
        && let Some(auth) = state.auth_sessions.get(&sid)
    {
        return RequestIdentity::Authenticated {
            id: auth.user_id.clone(),
            name: auth.user_name.clone(),
        };
    }

    RequestIdentity::Guest {
        returning_user_id: cookies::get(headers, cookies::USER_ID),
    }
}

/// GET /start_session - Create a session and hand the ids back.
///
/// Sets the `userId` cookie so a returning guest keeps a stable user id.
pub async fn start_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let identity = resolve_identity(&state, &headers);
    let document = state.session_service.start_session(identity).await?;

    let cookie = cookies::set(cookies::USER_ID, &document.user_id);
    let body = json!({
        "message": "Session started",
        "userId": document.user_id,
        "sessionId": document.session_id,
        "loginType": document.login_type,
        "userName": document.user_name,
    });

    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(body)))
}

/// POST /store_message - Append the user message and the bot reply.
pub async fn store_message(
    State(state): State<AppState>,
    Json(request): Json<StoreMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exchange = state
        .session_service
        .store_message(
            request.session_id.as_deref().unwrap_or(""),
            request.user_id.as_deref().unwrap_or(""),
            request.message.as_deref().unwrap_or(""),
        )
        .await?;

    Ok(Json(exchange))
}

/// GET /get_session - Return the full session document.
pub async fn get_session(
    State(state): State<AppState>,
    Query(query): Query<GetSessionQuery>,
) -> Result<Json<SessionDocument>, AppError> {
    let document = state
        .session_service
        .get_session(
            query.session_id.as_deref().unwrap_or(""),
            query.user_id.as_deref().unwrap_or(""),
        )
        .await?;

    Ok(Json(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AuthSession;
    use axum::http::HeaderValue;
    use axum::http::header::COOKIE;
    use datadex_types::config::{AppConfig, StorageBackendKind};

    async fn test_state(dir: &tempfile::TempDir) -> AppState {
        let config = AppConfig {
            backend: StorageBackendKind::Sqlite,
            data_dir: dir.path().to_path_buf(),
            blob: None,
            oauth: None,
        };
        AppState::init(config).await.unwrap()
    }

    #[tokio::test]
    async fn test_resolve_identity_prefers_auth_record() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;
        state.auth_sessions.insert(
            "sid-1".to_string(),
            AuthSession {
                user_id: "ext-1".to_string(),
                user_name: "Ada".to_string(),
            },
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("userId=guest-9; ddx_auth=sid-1"),
        );

        let identity = resolve_identity(&state, &headers);
        assert_eq!(
            identity,
            RequestIdentity::Authenticated {
                id: "ext-1".to_string(),
                name: "Ada".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_identity_returning_guest() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("userId=guest-9"));

        let identity = resolve_identity(&state, &headers);
        assert_eq!(
            identity,
            RequestIdentity::Guest {
                returning_user_id: Some("guest-9".to_string()),
            }
        );

        let identity = resolve_identity(&state, &HeaderMap::new());
        assert_eq!(identity, RequestIdentity::anonymous());
    }

    #[test]
    fn test_store_message_request_accepts_camel_case() {
        let request: StoreMessageRequest =
            serde_json::from_str(r#"{"sessionId":"s","userId":"u","message":"hi"}"#).unwrap();
        assert_eq!(request.session_id.as_deref(), Some("s"));
        assert_eq!(request.user_id.as_deref(), Some("u"));
        assert_eq!(request.message.as_deref(), Some("hi"));
    }

    #[test]
    fn test_store_message_request_tolerates_missing_fields() {
        let request: StoreMessageRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert!(request.session_id.is_none());
        assert!(request.user_id.is_none());
    }
}
