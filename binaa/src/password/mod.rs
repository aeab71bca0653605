//! Salted one-way password hashing (Argon2id, PHC string format)

mod errors;

pub use errors::PasswordError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};

use crate::utils::gen_random_bytes;

const SALT_LEN: usize = 16;

/// Hashes a plaintext password with a fresh random salt.
///
/// Two calls with the same input produce different hashes.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    let bytes = gen_random_bytes(SALT_LEN).map_err(|e| PasswordError::Salt(e.to_string()))?;
    let salt = SaltString::encode_b64(&bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;

    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Checks a plaintext password against a stored hash.
///
/// An empty or malformed hash never verifies.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        tracing::debug!("Stored password hash is malformed");
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
