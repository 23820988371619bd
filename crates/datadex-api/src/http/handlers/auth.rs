//! OAuth2 authorization-code flow handlers.
//!
//! Endpoints:
//! - GET /login         - Redirect the browser to the identity provider
//! - GET /auth/callback - Exchange the code, establish the first-party record
//! - GET /logout        - Drop the first-party record
//!
//! The flow moves Anonymous -> PendingCallback (state cookie set) ->
//! Authenticated (auth record registered) and falls back to a plain-text
//! 400 on any failure. Active only when OAuth configuration is present.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Redirect};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use datadex_infra::auth::OidcClient;
use datadex_types::error::AuthError;

use crate::http::cookies;
use crate::http::error::AppError;
use crate::state::{AppState, AuthSession};

/// Query parameters delivered to the callback by the identity provider.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

fn oidc(state: &AppState) -> Result<Arc<OidcClient>, AppError> {
    state.oidc.clone().ok_or(AppError::Auth(AuthError::NotConfigured))
}

/// GET /login - Start the authorization-code flow.
pub async fn login(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let oidc = oidc(&state)?;

    let csrf_state = Uuid::new_v4().to_string();
    let url = oidc.authorize_url(&csrf_state);
    let cookie = cookies::set_http_only(cookies::OAUTH_STATE, &csrf_state);

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::temporary(&url),
    ))
}

/// GET /auth/callback - Complete the flow and establish the auth record.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, AppError> {
    let oidc = oidc(&state)?;

    let expected = cookies::get(&headers, cookies::OAUTH_STATE);
    if expected.is_none() || expected != query.state {
        return Err(AppError::Auth(AuthError::StateMismatch));
    }

    let code = query.code.as_deref().ok_or(AppError::Auth(AuthError::MissingCode))?;
    let token = oidc.exchange_code(code).await?;
    let profile = oidc.fetch_profile(&token).await?;

    let sid = Uuid::new_v4().to_string();
    state.auth_sessions.insert(
        sid.clone(),
        AuthSession {
            user_id: profile.id,
            user_name: profile.name.clone(),
        },
    );
    info!(user_name = %profile.name, "Login completed");

    Ok((
        AppendHeaders([
            (SET_COOKIE, cookies::set_http_only(cookies::AUTH_SESSION, &sid)),
            (SET_COOKIE, cookies::clear(cookies::OAUTH_STATE)),
        ]),
        Redirect::temporary("/"),
    ))
}

/// GET /logout - Drop the first-party record, reverting to Anonymous.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(sid) = cookies::get(&headers, cookies::AUTH_SESSION) {
        state.auth_sessions.remove(&sid);
    }

    (
        AppendHeaders([(SET_COOKIE, cookies::clear(cookies::AUTH_SESSION))]),
        Redirect::temporary("/"),
    )
}
