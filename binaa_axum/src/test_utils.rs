//! Shared setup and helpers for handler tests

use std::sync::Once;

use axum::{body::to_bytes, response::Response};
use binaa::{Role, SESSION_CODEC, SESSION_COOKIE_NAME, SessionClaims};
use chrono::Utc;

/// Loads `.env_test` once, starts from a fresh SQLite file and initializes the stores
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
        if let Some(path) = std::env::var("GENERIC_DATA_STORE_URL")
            .ok()
            .and_then(|url| url.strip_prefix("sqlite:").map(str::to_string))
            .filter(|path| !path.contains(":memory:"))
        {
            let _ = std::fs::remove_file(path);
        }
    });

    if let Err(e) = binaa::init().await {
        eprintln!("Warning: Failed to initialize stores: {e}");
    }
}

fn claims(id: &str, role: Role) -> SessionClaims {
    let now = Utc::now().timestamp();
    SessionClaims {
        id: id.to_string(),
        full_name: format!("Test {role}"),
        role,
        email: format!("{id}@example.com"),
        iat: now,
        exp: now + 3600,
    }
}

pub fn super_admin() -> SessionClaims {
    claims("test-super-admin", Role::SuperAdmin)
}

pub fn admin() -> SessionClaims {
    claims("test-admin", Role::Admin)
}

/// `Cookie` header value carrying a session for `claims`
pub fn session_cookie(claims: &SessionClaims) -> String {
    let token = SESSION_CODEC.encode(claims).unwrap();
    format!("{}={}", SESSION_COOKIE_NAME.as_str(), token)
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn read_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
