use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum PasswordError {
    #[error("Failed to generate salt: {0}")]
    Salt(String),

    #[error("Failed to hash password: {0}")]
    Hash(String),
}
