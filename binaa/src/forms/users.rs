use serde::Deserialize;

use crate::userdb::Role;

use super::auth::PASSWORD_MIN_CHARS;
use super::errors::{FieldError, FieldErrors, FieldReason};
use super::fields::{email, min_chars, required};

const FULL_NAME_MIN_CHARS: usize = 4;
const PHONE_MIN_CHARS: usize = 9;

/// Fields shared by the create and update forms, after validation
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub role: Role,
    pub verified: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateUserForm {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub verified: Option<String>,
}

#[derive(Clone)]
pub struct NewUserInput {
    pub profile: UserProfile,
    pub password: String,
}

impl std::fmt::Debug for NewUserInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUserInput")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateUserForm {
    pub id: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
    pub verified: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Clone)]
pub struct UserChanges {
    pub id: String,
    pub profile: UserProfile,
    /// New password, when one was given
    pub password: Option<String>,
    confirm_password: Option<String>,
}

impl std::fmt::Debug for UserChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserChanges")
            .field("id", &self.id)
            .field("profile", &self.profile)
            .field("password_changed", &self.password.is_some())
            .finish()
    }
}

impl UserChanges {
    /// Both password fields were filled in and they differ
    pub fn password_mismatch(&self) -> bool {
        matches!(
            (&self.password, &self.confirm_password),
            (Some(password), Some(confirm)) if password != confirm
        )
    }
}

/// Id-only form used for deletions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteForm {
    pub id: Option<String>,
}

impl DeleteForm {
    pub fn validate(self) -> Result<String, Vec<FieldError>> {
        required("id", self.id.as_deref()).map_err(|e| vec![e])
    }
}

fn role(value: Option<&str>) -> Result<Role, FieldError> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(Role::default()),
        Some(v) => Role::try_from(v.to_string())
            .map_err(|_| FieldError::new("role", FieldReason::InvalidRole)),
    }
}

fn profile(
    errors: &mut FieldErrors,
    email_value: Option<&str>,
    full_name: Option<&str>,
    phone_number: Option<&str>,
    role_value: Option<&str>,
    verified: Option<&str>,
) -> Option<UserProfile> {
    let email = errors.check(email("email", email_value));
    let full_name = errors.check(min_chars("fullName", full_name, FULL_NAME_MIN_CHARS));
    let phone_number = errors.check(min_chars("phoneNumber", phone_number, PHONE_MIN_CHARS));
    let role = errors.check(role(role_value));

    Some(UserProfile {
        email: email?,
        full_name: full_name?,
        phone_number: phone_number?,
        role: role?,
        verified: verified == Some("true"),
    })
}

impl CreateUserForm {
    pub fn validate(self) -> Result<NewUserInput, Vec<FieldError>> {
        let mut errors = FieldErrors::default();

        let profile = profile(
            &mut errors,
            self.email.as_deref(),
            self.full_name.as_deref(),
            self.phone_number.as_deref(),
            self.role.as_deref(),
            self.verified.as_deref(),
        );
        let password = errors.check(min_chars(
            "password",
            self.password.as_deref(),
            PASSWORD_MIN_CHARS,
        ));

        match (profile, password) {
            (Some(profile), Some(password)) if errors.is_empty() => {
                Ok(NewUserInput { profile, password })
            }
            _ => Err(errors.into_inner()),
        }
    }
}

impl UpdateUserForm {
    pub fn validate(self) -> Result<UserChanges, Vec<FieldError>> {
        let mut errors = FieldErrors::default();

        let id = errors.check(required("id", self.id.as_deref()));
        let profile = profile(
            &mut errors,
            self.email.as_deref(),
            self.full_name.as_deref(),
            self.phone_number.as_deref(),
            self.role.as_deref(),
            self.verified.as_deref(),
        );

        // Blank means "keep the current password"
        let password = self.password.filter(|p| !p.is_empty());
        if let Some(p) = &password {
            errors.check(min_chars("password", Some(p), PASSWORD_MIN_CHARS));
        }
        let confirm_password = self.confirm_password.filter(|p| !p.is_empty());

        match (id, profile) {
            (Some(id), Some(profile)) if errors.is_empty() => Ok(UserChanges {
                id,
                profile,
                password,
                confirm_password,
            }),
            _ => Err(errors.into_inner()),
        }
    }
}
