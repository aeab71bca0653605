//! Error type returned by the coordination layer

use thiserror::Error;

use crate::forms::FieldError;
use crate::i18n::Message;
use crate::password::PasswordError;
use crate::projectdb::ProjectError;
use crate::session::SessionError;
use crate::userdb::UserError;

#[derive(Error, Debug, Clone)]
pub enum CoordinationError {
    /// One or more submitted fields were rejected
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Resource not found")]
    NotFound,

    /// The account exists but the password does not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Storage, signing or hashing failure. Details stay in the logs.
    #[error("Store error: {0}")]
    Store(String),
}

impl CoordinationError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::Validation(errors) => tracing::debug!(?errors, "Validation failed"),
            Self::NotFound => tracing::debug!("Resource not found"),
            Self::InvalidCredentials => tracing::warn!("Invalid credentials"),
            Self::Unauthorized => tracing::warn!("Unauthorized access"),
            Self::Forbidden => tracing::warn!("Forbidden"),
            Self::Conflict(message) => tracing::warn!("Conflict: {}", message),
            Self::PasswordMismatch => tracing::debug!("Passwords do not match"),
            Self::Store(message) => tracing::error!("Store error: {}", message),
        }
        self
    }

    /// The localized message shown to the user for this failure
    pub fn message(&self) -> Message {
        match self {
            Self::Validation(_) => Message::InvalidInput,
            Self::NotFound => Message::NotFound,
            Self::InvalidCredentials => Message::WrongPassword,
            Self::Unauthorized => Message::Unauthorized,
            Self::Forbidden => Message::Forbidden,
            Self::Conflict(_) => Message::EmailTaken,
            Self::PasswordMismatch => Message::PasswordMismatch,
            Self::Store(_) => Message::OperationFailed,
        }
    }
}

impl From<Vec<FieldError>> for CoordinationError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}

// Conversions from module errors log what they hide

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => Self::NotFound,
            UserError::DuplicateEmail(email) => Self::Conflict(email),
            UserError::Storage(_) | UserError::InvalidData(_) => {
                let error = Self::Store(err.to_string());
                tracing::error!("{}", error);
                error
            }
        }
    }
}

impl From<ProjectError> for CoordinationError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound => Self::NotFound,
            ProjectError::Storage(_) | ProjectError::InvalidData(_) => {
                let error = Self::Store(err.to_string());
                tracing::error!("{}", error);
                error
            }
        }
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = Self::Store(err.to_string());
        tracing::error!("{}", error);
        error
    }
}

impl From<PasswordError> for CoordinationError {
    fn from(err: PasswordError) -> Self {
        let error = Self::Store(err.to_string());
        tracing::error!("{}", error);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldReason;

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<CoordinationError>();
    }

    #[test]
    fn test_user_error_conversion() {
        assert!(matches!(
            CoordinationError::from(UserError::NotFound),
            CoordinationError::NotFound
        ));
        assert!(matches!(
            CoordinationError::from(UserError::DuplicateEmail("a@b.co".to_string())),
            CoordinationError::Conflict(email) if email == "a@b.co"
        ));
        assert!(matches!(
            CoordinationError::from(UserError::Storage("disk".to_string())),
            CoordinationError::Store(_)
        ));
    }

    #[test]
    fn test_project_error_conversion() {
        assert!(matches!(
            CoordinationError::from(ProjectError::NotFound),
            CoordinationError::NotFound
        ));
        assert!(matches!(
            CoordinationError::from(ProjectError::InvalidData("json".to_string())),
            CoordinationError::Store(_)
        ));
    }

    #[test]
    fn test_store_failures_hide_details_behind_generic_message() {
        let err = CoordinationError::from(SessionError::Token("key".to_string()));
        assert_eq!(err.message(), Message::OperationFailed);

        let err = CoordinationError::from(PasswordError::Hash("argon".to_string()));
        assert_eq!(err.message(), Message::OperationFailed);
    }

    #[test]
    fn test_messages() {
        let validation = CoordinationError::from(vec![FieldError::new(
            "email",
            FieldReason::InvalidEmail,
        )]);
        assert_eq!(validation.message(), Message::InvalidInput);
        assert_eq!(validation.to_string(), "Validation failed for 1 field(s)");
        assert_eq!(
            CoordinationError::InvalidCredentials.message(),
            Message::WrongPassword
        );
        assert_eq!(
            CoordinationError::Conflict("x".to_string()).message(),
            Message::EmailTaken
        );
        assert_eq!(
            CoordinationError::PasswordMismatch.log().message(),
            Message::PasswordMismatch
        );
    }
}
