use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use super::errors::UserError;

/// Back-office role. Every account is at least an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "superAdmin")]
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SuperAdmin => "superAdmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "admin" => Ok(Role::Admin),
            "superAdmin" => Ok(Role::SuperAdmin),
            other => Err(UserError::InvalidData(format!("Unknown role: {other}"))),
        }
    }
}

/// A staff account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Login identifier, unique across accounts
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new unverified admin with a fresh id
    pub fn new(
        email: String,
        full_name: String,
        phone_number: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            full_name,
            phone_number,
            password_hash,
            role: Role::Admin,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Search field options for user lookup
#[derive(Debug, Clone)]
pub enum UserSearchField {
    Id(String),
    Email(String),
}

impl fmt::Display for UserSearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSearchField::Id(id) => write!(f, "id={id}"),
            UserSearchField::Email(email) => write!(f, "email={email}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User::new(
            "a@example.com".to_string(),
            "Ahmad Ali".to_string(),
            "0555555555".to_string(),
            "$argon2id$hash".to_string(),
        )
    }

    #[test]
    fn test_user_new_defaults() {
        let user = sample();

        assert_eq!(user.role, Role::Admin);
        assert!(!user.verified);
        assert_eq!(user.created_at, user.updated_at);
        assert!(uuid::Uuid::parse_str(&user.id).is_ok());
    }

    #[test]
    fn test_user_new_ids_are_unique() {
        assert_ne!(sample().id, sample().id);
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let json = serde_json::to_value(sample()).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["fullName"], "Ahmad Ali");
        assert_eq!(json["phoneNumber"], "0555555555");
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn test_user_deserializes_without_hash() {
        let json = serde_json::to_string(&sample()).unwrap();
        let user: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user.password_hash, "");
        assert_eq!(user.email, "a@example.com");
    }

    #[test]
    fn test_role_conversions() {
        assert_eq!(Role::try_from("admin".to_string()).unwrap(), Role::Admin);
        assert_eq!(
            Role::try_from("superAdmin".to_string()).unwrap(),
            Role::SuperAdmin
        );
        assert!(Role::try_from("root".to_string()).is_err());
        assert_eq!(Role::SuperAdmin.to_string(), "superAdmin");
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            "\"superAdmin\""
        );
    }

    #[test]
    fn test_search_field_display() {
        assert_eq!(UserSearchField::Id("x".to_string()).to_string(), "id=x");
        assert_eq!(
            UserSearchField::Email("e@x.io".to_string()).to_string(),
            "email=e@x.io"
        );
    }
}
