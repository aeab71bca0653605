use chrono::{DateTime, Utc};
use http::header::{HeaderMap, SET_COOKIE};
use ring::rand::SecureRandom;
use thiserror::Error;

pub(crate) fn gen_random_bytes(len: usize) -> Result<Vec<u8>, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random bytes".to_string()))?;
    Ok(bytes)
}

/// Attributes of an outgoing `Set-Cookie` header
#[derive(Debug, Clone)]
pub(crate) struct CookieSpec<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub expires_at: DateTime<Utc>,
    pub max_age: i64,
    pub secure: bool,
}

pub(crate) fn format_cookie(spec: &CookieSpec<'_>) -> String {
    let expires = spec.expires_at.format("%a, %d %b %Y %H:%M:%S GMT");
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Expires={}; Max-Age={}",
        spec.name,
        spec.value,
        expires,
        spec.max_age.max(0)
    );
    if spec.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub(crate) fn header_set_cookie<'h>(
    headers: &'h mut HeaderMap,
    spec: &CookieSpec<'_>,
) -> Result<&'h HeaderMap, UtilError> {
    let cookie = format_cookie(spec);
    tracing::trace!(cookie_name = spec.name, max_age = spec.max_age, "Setting cookie");
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(headers)
}

/// Returns the value of the named cookie from a `Cookie` request header
pub(crate) fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k.trim() == name).then(|| v.trim())
        })
}

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use http::HeaderValue;

    #[test]
    fn test_gen_random_bytes_length_and_uniqueness() {
        let a = gen_random_bytes(32).unwrap();
        let b = gen_random_bytes(32).unwrap();

        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_format_cookie_attributes() {
        // Given a cookie spec
        let expires_at = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let spec = CookieSpec {
            name: "session",
            value: "abc",
            expires_at,
            max_age: 60,
            secure: false,
        };

        // When formatting
        let cookie = format_cookie(&spec);

        // Then all attributes are present and Secure is absent
        assert_eq!(
            cookie,
            "session=abc; HttpOnly; SameSite=Lax; Path=/; Expires=Wed, 02 Jan 2030 03:04:05 GMT; Max-Age=60"
        );
    }

    #[test]
    fn test_format_cookie_secure_and_negative_max_age() {
        let spec = CookieSpec {
            name: "session",
            value: "",
            expires_at: Utc.timestamp_opt(0, 0).unwrap(),
            max_age: -10,
            secure: true,
        };

        let cookie = format_cookie(&spec);

        assert!(cookie.ends_with("; Secure"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn test_header_set_cookie_appends() {
        let mut headers = HeaderMap::new();
        let spec = CookieSpec {
            name: "a",
            value: "1",
            expires_at: Utc::now(),
            max_age: 1,
            secure: false,
        };

        header_set_cookie(&mut headers, &spec).unwrap();
        header_set_cookie(&mut headers, &spec).unwrap();

        assert_eq!(headers.get_all(SET_COOKIE).iter().count(), 2);
    }

    #[test]
    fn test_header_set_cookie_rejects_invalid_value() {
        let mut headers = HeaderMap::new();
        let spec = CookieSpec {
            name: "a",
            value: "line\nbreak",
            expires_at: Utc::now(),
            max_age: 1,
            secure: false,
        };

        let result = header_set_cookie(&mut headers, &spec);

        assert!(matches!(result, Err(UtilError::Cookie(_))));
    }

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("theme=dark; session=tok.en.value; other=x"),
        );

        assert_eq!(cookie_value(&headers, "session"), Some("tok.en.value"));
        assert_eq!(cookie_value(&headers, "theme"), Some("dark"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_value_without_header() {
        let headers = HeaderMap::new();
        assert_eq!(cookie_value(&headers, "session"), None);
    }
}
