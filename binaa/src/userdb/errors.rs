use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl UserError {
    /// Maps a failed insert or update, recognising the unique email constraint
    pub(crate) fn from_write(err: sqlx::Error, email: &str) -> Self {
        match err.as_database_error() {
            Some(db) if db.is_unique_violation() => UserError::DuplicateEmail(email.to_string()),
            _ => UserError::Storage(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for UserError {
    fn from(err: serde_json::Error) -> Self {
        UserError::InvalidData(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();

        let user_error = UserError::from(json_error);

        match user_error {
            UserError::InvalidData(msg) => {
                assert!(
                    msg.contains("expected value"),
                    "Error message should contain the original error"
                );
            }
            _ => panic!("Expected InvalidData variant"),
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(UserError::NotFound.to_string(), "User not found");
        assert_eq!(
            UserError::DuplicateEmail("a@b.co".to_string()).to_string(),
            "Email already registered: a@b.co"
        );
    }

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<UserError>();
    }
}
