use serde::Deserialize;

use super::errors::{FieldError, FieldErrors};
use super::fields::{email, min_chars};

pub(crate) const PASSWORD_MIN_CHARS: usize = 6;

/// Sign-in form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated sign-in credentials
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl LoginForm {
    pub fn validate(self) -> Result<Credentials, Vec<FieldError>> {
        let mut errors = FieldErrors::default();

        let email = errors.check(email("email", self.email.as_deref()));
        let password = errors.check(min_chars(
            "password",
            self.password.as_deref(),
            PASSWORD_MIN_CHARS,
        ));

        match (email, password) {
            (Some(email), Some(password)) => Ok(Credentials { email, password }),
            _ => Err(errors.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldReason;

    fn form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn test_valid_login() {
        let credentials = form("admin@binaa.sa", "secret1").validate().unwrap();
        assert_eq!(credentials.email, "admin@binaa.sa");
        assert_eq!(credentials.password, "secret1");
    }

    #[test]
    fn test_reports_every_invalid_field() {
        let errors = form("nope", "12345").validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("email", FieldReason::InvalidEmail),
                FieldError::new("password", FieldReason::TooShort { min: 6 }),
            ]
        );
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert!(errors.iter().all(|e| e.reason == FieldReason::Required));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_debug_hides_password() {
        let credentials = form("admin@binaa.sa", "secret1").validate().unwrap();
        assert!(!format!("{credentials:?}").contains("secret1"));
    }
}
