use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::session::errors::SessionError;
use crate::session::types::SessionClaims;

/// Signs and verifies session tokens (HS256) with one server-held key.
///
/// Verification failures of any kind decode to `None`; callers treat that as "no session".
#[derive(Clone)]
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCodec").finish_non_exhaustive()
    }
}

impl SessionCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn encode(&self, claims: &SessionClaims) -> Result<String, SessionError> {
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.encoding,
        )?)
    }

    pub fn decode(&self, token: &str) -> Option<SessionClaims> {
        self.decode_at(token, Utc::now().timestamp())
    }

    /// Decodes as of `now`; a token is valid strictly before its `exp`.
    pub fn decode_at(&self, token: &str, now: i64) -> Option<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation)
        {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                return None;
            }
        };

        if now >= claims.exp {
            tracing::debug!(user_id = %claims.id, exp = claims.exp, "Session token expired");
            return None;
        }

        Some(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::userdb::Role;
    use proptest::prelude::*;

    fn claims(iat: i64, exp: i64) -> SessionClaims {
        SessionClaims {
            id: "0b6f7c9a-1111-4e2b-9a1c-123456789abc".to_string(),
            full_name: "مدير الموقع".to_string(),
            role: Role::SuperAdmin,
            email: "admin@example.com".to_string(),
            iat,
            exp,
        }
    }

    #[test]
    fn test_round_trip_before_expiry() {
        let codec = SessionCodec::new(b"test-key");
        let original = claims(1_000, 2_000);

        let token = codec.encode(&original).unwrap();
        let decoded = codec.decode_at(&token, 1_500);

        assert_eq!(decoded, Some(original));
    }

    #[test]
    fn test_expiry_boundary() {
        let codec = SessionCodec::new(b"test-key");
        let token = codec.encode(&claims(1_000, 2_000)).unwrap();

        // One second before expiry the token is still valid
        assert!(codec.decode_at(&token, 1_999).is_some());
        // At and after expiry it is absent
        assert!(codec.decode_at(&token, 2_000).is_none());
        assert!(codec.decode_at(&token, 2_001).is_none());
    }

    #[test]
    fn test_decode_uses_current_time() {
        let codec = SessionCodec::new(b"test-key");
        let now = Utc::now().timestamp();

        let live = codec.encode(&claims(now, now + 60)).unwrap();
        let dead = codec.encode(&claims(now - 120, now - 60)).unwrap();

        assert!(codec.decode(&live).is_some());
        assert!(codec.decode(&dead).is_none());
    }

    #[test]
    fn test_wrong_key_is_absent() {
        let signer = SessionCodec::new(b"key-one");
        let verifier = SessionCodec::new(b"key-two");
        let token = signer.encode(&claims(1_000, 2_000)).unwrap();

        assert!(verifier.decode_at(&token, 1_500).is_none());
    }

    #[test]
    fn test_malformed_token_is_absent() {
        let codec = SessionCodec::new(b"test-key");
        assert!(codec.decode_at("", 0).is_none());
        assert!(codec.decode_at("not.a.jwt", 0).is_none());
        assert!(codec.decode_at("a.b", 0).is_none());
    }

    #[test]
    fn test_other_algorithm_is_absent() {
        // Same key, but signed with HS512
        let key = b"test-key";
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims(1_000, 2_000),
            &EncodingKey::from_secret(key),
        )
        .unwrap();

        assert!(SessionCodec::new(key).decode_at(&token, 1_500).is_none());
    }

    #[test]
    fn test_missing_exp_is_absent() {
        #[derive(serde::Serialize)]
        struct NoExp {
            id: String,
            #[serde(rename = "fullName")]
            full_name: String,
            role: Role,
            email: String,
            iat: i64,
        }

        let key = b"test-key";
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &NoExp {
                id: "u1".to_string(),
                full_name: "x".to_string(),
                role: Role::Admin,
                email: "x@example.com".to_string(),
                iat: 1_000,
            },
            &EncodingKey::from_secret(key),
        )
        .unwrap();

        assert!(SessionCodec::new(key).decode_at(&token, 1_001).is_none());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let codec = SessionCodec::new(b"super-secret");
        let debug = format!("{codec:?}");
        assert!(!debug.contains("super-secret"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn flipping_any_byte_invalidates(index in 0usize..1000, bit in 0u8..7) {
            let codec = SessionCodec::new(b"test-key");
            let token = codec.encode(&claims(1_000, 2_000)).unwrap();
            let mut bytes = token.into_bytes();
            let i = index % bytes.len();
            bytes[i] ^= 1 << bit;

            if let Ok(tampered) = String::from_utf8(bytes) {
                prop_assert!(codec.decode_at(&tampered, 1_500).is_none());
            }
        }
    }
}
