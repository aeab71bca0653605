use chrono::{DateTime, Utc};
use http::HeaderMap;

use crate::config::IS_PRODUCTION;
use crate::session::config::SESSION_COOKIE_NAME;
use crate::session::errors::SessionError;
use crate::utils::{CookieSpec, cookie_value, header_set_cookie};

/// `Set-Cookie` headers persisting `token` until `expires_at`
pub(super) fn store_session_cookie(
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    let max_age = (expires_at - Utc::now()).num_seconds();
    header_set_cookie(
        &mut headers,
        &CookieSpec {
            name: SESSION_COOKIE_NAME.as_str(),
            value: token,
            expires_at,
            max_age,
            secure: *IS_PRODUCTION,
        },
    )?;
    Ok(headers)
}

/// `Set-Cookie` headers removing the session cookie from the client
pub(super) fn clear_session_cookie() -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        &CookieSpec {
            name: SESSION_COOKIE_NAME.as_str(),
            value: "",
            expires_at: DateTime::<Utc>::UNIX_EPOCH,
            max_age: 0,
            secure: *IS_PRODUCTION,
        },
    )?;
    Ok(headers)
}

/// Raw session token from the request's `Cookie` header, if any
pub fn read_session_cookie(headers: &HeaderMap) -> Option<&str> {
    cookie_value(headers, SESSION_COOKIE_NAME.as_str()).filter(|v| !v.is_empty())
}
