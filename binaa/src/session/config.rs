use std::env;
use std::sync::LazyLock;

use super::main::SessionCodec;
use crate::utils::gen_random_bytes;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("session".to_string())
});

/// Lifetime of a session created by a successful login, in seconds
pub static SESSION_LOGIN_MAX_AGE: LazyLock<i64> = LazyLock::new(|| {
    parse_seconds(std::env::var("SESSION_LOGIN_MAX_AGE").ok().as_deref(), 30 * 24 * 60 * 60)
});

/// Sliding window applied by the route guard on each authenticated visit, in seconds
pub static SESSION_REFRESH_MAX_AGE: LazyLock<i64> = LazyLock::new(|| {
    parse_seconds(std::env::var("SESSION_REFRESH_MAX_AGE").ok().as_deref(), 24 * 60 * 60)
});

/// Process-wide token codec, keyed once from `SESSION_SECRET`.
///
/// Without a configured secret a random key is generated, so sessions do not survive restarts.
pub static SESSION_CODEC: LazyLock<SessionCodec> =
    LazyLock::new(|| match env::var("SESSION_SECRET") {
        Ok(secret) if !secret.is_empty() => SessionCodec::new(secret.as_bytes()),
        _ => {
            tracing::warn!("SESSION_SECRET is not set; using a random per-process signing key");
            let key = gen_random_bytes(32).expect("Failed to generate session signing key");
            SessionCodec::new(&key)
        }
    });

fn parse_seconds(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds_defaults() {
        assert_eq!(parse_seconds(None, 86400), 86400);
        assert_eq!(parse_seconds(Some("abc"), 86400), 86400);
        assert_eq!(parse_seconds(Some("0"), 86400), 86400);
        assert_eq!(parse_seconds(Some("-5"), 86400), 86400);
    }

    #[test]
    fn test_parse_seconds_custom() {
        assert_eq!(parse_seconds(Some("3600"), 86400), 3600);
    }

    #[test]
    fn test_login_outlives_refresh_window() {
        // Defaults: 30 days for login, 1 day for the sliding refresh
        assert_eq!(parse_seconds(None, 30 * 24 * 60 * 60), 2_592_000);
        assert!(parse_seconds(None, 30 * 24 * 60 * 60) > parse_seconds(None, 24 * 60 * 60));
    }
}
