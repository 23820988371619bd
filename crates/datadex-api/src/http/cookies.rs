//! Minimal cookie handling for the three first-party cookies.
//!
//! - `userId`: guest continuity across sessions, readable by the frontend.
//! - `ddx_auth`: first-party auth session id, HttpOnly.
//! - `ddx_oauth_state`: CSRF state for the in-flight login redirect, HttpOnly.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Guest user-id continuity cookie.
pub const USER_ID: &str = "userId";
/// First-party auth session cookie.
pub const AUTH_SESSION: &str = "ddx_auth";
/// In-flight OAuth CSRF state cookie.
pub const OAUTH_STATE: &str = "ddx_oauth_state";

/// Read a cookie value from the request headers.
pub fn get(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
        .next()
        .filter(|value| !value.is_empty())
}

/// Build a `Set-Cookie` value for a frontend-readable cookie.
pub fn set(name: &str, value: &str) -> String {
    format!("{name}={value}; Path=/; SameSite=Lax")
}

/// Build a `Set-Cookie` value for an HttpOnly cookie.
pub fn set_http_only(name: &str, value: &str) -> String {
    format!("{name}={value}; Path=/; SameSite=Lax; HttpOnly")
}

/// Build a `Set-Cookie` value that clears a cookie.
pub fn clear(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_get_single_cookie() {
        let headers = headers_with("userId=u-1");
        assert_eq!(get(&headers, USER_ID).as_deref(), Some("u-1"));
    }

    #[test]
    fn test_get_among_multiple_cookies() {
        let headers = headers_with("a=1; userId=u-2; ddx_auth=sid-9");
        assert_eq!(get(&headers, USER_ID).as_deref(), Some("u-2"));
        assert_eq!(get(&headers, AUTH_SESSION).as_deref(), Some("sid-9"));
    }

    #[test]
    fn test_get_missing_or_empty() {
        let headers = headers_with("userId=");
        assert_eq!(get(&headers, USER_ID), None);
        assert_eq!(get(&headers, "other"), None);
    }

    #[test]
    fn test_set_and_clear_format() {
        assert_eq!(set("userId", "u-1"), "userId=u-1; Path=/; SameSite=Lax");
        assert_eq!(
            set_http_only("ddx_auth", "s"),
            "ddx_auth=s; Path=/; SameSite=Lax; HttpOnly"
        );
        assert_eq!(clear("ddx_auth"), "ddx_auth=; Path=/; Max-Age=0");
    }
}
