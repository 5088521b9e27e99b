// src/services/session.rs - Stateless signed session tokens
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

type Result<T> = std::result::Result<T, ServiceError>;

/// Claims embedded in a session token. `sub` is the user id; `exp` bounds
/// the token's lifetime server-side, independent of the cookie expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies the signed tokens that prove a user's identity.
/// There is no server-side session store; the token is self-contained.
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl SessionService {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    /// Produce a signed token encoding the given user id
    pub fn issue(&self, user_id: &Uuid) -> Result<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::InternalError(format!("Failed to sign session token: {}", e)))
    }

    /// Verify a token's signature and expiry and return the user id it
    /// encodes
    pub fn verify(&self, token: &str) -> Result<Uuid> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| ServiceError::Unauthorized(format!("Invalid session token: {}", e)))?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| ServiceError::Unauthorized("Malformed session subject".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> SessionService {
        SessionService::new("test_secret_key_32_bytes_long!!", 3600)
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue(&user_id).unwrap();
        let decoded = service.verify(&token).unwrap();

        assert_eq!(decoded, user_id);
    }

    #[test]
    fn tampered_token_fails() {
        let service = create_test_service();
        let token = service.issue(&Uuid::new_v4()).unwrap();

        let mut tampered = token.clone();
        tampered.push('x');

        assert!(service.verify(&tampered).is_err());
    }

    #[test]
    fn wrong_secret_fails() {
        let service = create_test_service();
        let other = SessionService::new("a_completely_different_secret!!!", 3600);

        let token = service.issue(&Uuid::new_v4()).unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn expired_token_fails() {
        // Past the default verification leeway
        let service = SessionService::new("test_secret_key_32_bytes_long!!", -120);
        let token = service.issue(&Uuid::new_v4()).unwrap();

        assert!(service.verify(&token).is_err());
    }
}
