use serde::{Deserialize, Serialize};

use crate::userdb::{Role, User};

/// Identity carried inside a signed session token.
///
/// Times are seconds since the Unix epoch. `exp` is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub role: Role,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn for_user(user: &User, issued_at: i64, max_age: i64) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            email: user.email.clone(),
            iat: issued_at,
            exp: issued_at + max_age,
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }

    /// Same identity with the expiry slid forward to at least `now + window`.
    ///
    /// Never moves the expiry backwards and never touches the other claims.
    pub fn refreshed(&self, now: i64, window: i64) -> Self {
        Self {
            exp: self.exp.max(now + window),
            ..self.clone()
        }
    }
}
