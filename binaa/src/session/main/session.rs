use chrono::{DateTime, Utc};
use http::HeaderMap;

use super::codec::SessionCodec;
use super::cookie::{clear_session_cookie, read_session_cookie, store_session_cookie};
use crate::session::config::{SESSION_LOGIN_MAX_AGE, SESSION_REFRESH_MAX_AGE};
use crate::session::errors::SessionError;
use crate::session::types::SessionClaims;
use crate::userdb::User;

fn expiry_datetime(exp: i64) -> Result<DateTime<Utc>, SessionError> {
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| SessionError::Token(format!("Expiry out of range: {exp}")))
}

/// Signs a new login session for `user` and returns the cookie headers carrying it
#[tracing::instrument(skip(codec, user), fields(user_id = %user.id))]
pub fn create_session(
    codec: &SessionCodec,
    user: &User,
) -> Result<(HeaderMap, SessionClaims), SessionError> {
    create_session_at(codec, user, Utc::now().timestamp(), *SESSION_LOGIN_MAX_AGE)
}

pub(crate) fn create_session_at(
    codec: &SessionCodec,
    user: &User,
    now: i64,
    max_age: i64,
) -> Result<(HeaderMap, SessionClaims), SessionError> {
    let claims = SessionClaims::for_user(user, now, max_age);
    let token = codec.encode(&claims)?;
    let headers = store_session_cookie(&token, expiry_datetime(claims.exp)?)?;
    tracing::debug!(exp = claims.exp, "Created session");
    Ok((headers, claims))
}

/// Re-signs a still-valid session with a slid expiry.
///
/// Identity claims and `iat` are preserved; the expiry never moves backwards.
pub fn refresh_session(
    codec: &SessionCodec,
    claims: &SessionClaims,
) -> Result<HeaderMap, SessionError> {
    refresh_session_at(codec, claims, Utc::now().timestamp(), *SESSION_REFRESH_MAX_AGE)
}

pub(crate) fn refresh_session_at(
    codec: &SessionCodec,
    claims: &SessionClaims,
    now: i64,
    window: i64,
) -> Result<HeaderMap, SessionError> {
    let refreshed = claims.refreshed(now, window);
    let token = codec.encode(&refreshed)?;
    store_session_cookie(&token, expiry_datetime(refreshed.exp)?)
}

/// Headers that end the current session. Safe to call without a session.
pub fn prepare_logout_response() -> Result<HeaderMap, SessionError> {
    clear_session_cookie()
}

/// Verified claims of the session cookie carried by `headers`, if any
pub fn get_session_from_headers(codec: &SessionCodec, headers: &HeaderMap) -> Option<SessionClaims> {
    read_session_cookie(headers).and_then(|token| codec.decode(token))
}
