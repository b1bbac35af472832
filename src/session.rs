//! Cookie-based session resolution.
//!
//! Each browser session owns its own cart; the session id travels in an
//! HttpOnly cookie. A request without the cookie gets a fresh id, and the
//! handler attaches the matching `Set-Cookie` to its response.

use axum::http::{header, HeaderMap};
use axum::response::Response;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "shop_session";

/// Resolves the session id from the request headers.
///
/// Returns the id and whether it was newly minted (in which case the caller
/// must attach the cookie via [`attach_session_cookie`]).
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    if let Some(cookies) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        for pair in cookies.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE && !value.is_empty() {
                    return (value.to_string(), false);
                }
            }
        }
    }

    (Uuid::new_v4().simple().to_string(), true)
}

/// Attaches the session cookie to `response` when the id is newly minted.
pub fn with_session_cookie(mut response: Response, session_id: &str, is_new: bool) -> Response {
    if is_new {
        let cookie_val = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly");
        response
            .headers_mut()
            .insert(header::SET_COOKIE, cookie_val.parse().unwrap());
    }
    response
}
