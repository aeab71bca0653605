//! Shared test setup for tests that touch the stores
//!
//! Storage functions create their tables on first use, so setup only loads the
//! test environment once and initializes each store.

use std::sync::Once;

/// Loads `.env_test` (falling back to `.env`) once per test binary, starts from an
/// empty SQLite file, and initializes the user and project stores.
///
/// ```rust,ignore
/// use crate::test_utils::init_test_environment;
///
/// #[tokio::test]
/// #[serial]
/// async fn my_test() {
///     init_test_environment().await;
/// }
/// ```
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        if let Some(db_path) = extract_sqlite_file_path() {
            // Missing file is fine
            let _ = std::fs::remove_file(&db_path);
        }
    });

    ensure_database_initialized().await;
}

async fn ensure_database_initialized() {
    use crate::projectdb::ProjectStore;
    use crate::userdb::UserStore;

    if let Err(e) = UserStore::init().await {
        eprintln!("Warning: Failed to initialize UserStore: {e}");
    }
    if let Err(e) = ProjectStore::init().await {
        eprintln!("Warning: Failed to initialize ProjectStore: {e}");
    }
}

/// File path of a SQLite database URL. `None` for other backends and in-memory databases.
fn extract_sqlite_file_path_from_url(url: &str) -> Option<String> {
    let path = url.strip_prefix("sqlite:")?;

    let path = match path.strip_prefix("file:") {
        Some(file_path) => file_path.split('?').next()?,
        None => path.strip_prefix("//").unwrap_or(path),
    };

    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Some(path.to_string())
}

fn extract_sqlite_file_path() -> Option<String> {
    std::env::var("GENERIC_DATA_STORE_URL")
        .ok()
        .and_then(|url| extract_sqlite_file_path_from_url(&url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sqlite_file_path_from_url() {
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:/tmp/test.db"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:./test.db"),
            Some("./test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:///tmp/test.db"),
            Some("/tmp/test.db".to_string())
        );

        // Query parameters are dropped
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:file:/tmp/test.db?mode=rwc"),
            Some("/tmp/test.db".to_string())
        );

        // In-memory and non-SQLite URLs have no file
        assert_eq!(extract_sqlite_file_path_from_url("sqlite::memory:"), None);
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:file::memory:?cache=shared"),
            None
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("postgresql://localhost/test"),
            None
        );
        assert_eq!(extract_sqlite_file_path_from_url(""), None);
    }
}
