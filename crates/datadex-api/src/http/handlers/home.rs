//! Landing page handler.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;

use crate::http::cookies;
use crate::state::AppState;

/// GET / - Render the landing page, reflecting an authenticated identity.
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let greeting = cookies::get(&headers, cookies::AUTH_SESSION)
        .and_then(|sid| state.auth_sessions.get(&sid).map(|auth| auth.user_name.clone()));

    let (who, auth_link) = match greeting {
        Some(name) => (name, r#"<a href="/logout">Log out</a>"#),
        None => ("Anonymous".to_string(), r#"<a href="/login">Log in</a>"#),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>DataDex Chatbot</title></head>
<body>
  <h1>DataDex Chatbot</h1>
  <p>Signed in as: {who}</p>
  <p>{auth_link}</p>
  <p>Start a session at <code>GET /start_session</code>, then chat via
     <code>POST /store_message</code>.</p>
</body>
</html>
"#
    ))
}
