//! JWT Token Service
//!
//! Handles JWT creation, validation, and claims management for user authentication.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer embedded in and required from every token
const ISSUER: &str = "auth-server";

/// Fixed token lifetime
const TOKEN_TTL_DAYS: i64 = 7;

/// JWT Claims structure containing user information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User unique identifier
    pub sub: Uuid,
    /// User email
    pub email: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token issuer
    pub iss: String,
}

/// JWT Service for token operations
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Create a new JWT service with the provided secret
    pub fn new(secret: &str) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generate a token for a user, expiring seven days from issuance
    pub fn create_token(&self, user_id: Uuid, email: String) -> Result<String> {
        let now = Utc::now();
        let expiration = now + Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: user_id,
            email,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: ISSUER.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .context("Failed to encode JWT token")
    }

    /// Validate signature, structure, issuer, and expiration of a token
    pub fn validate_token(&self, token: &str) -> Result<TokenData<Claims>> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Failed to validate JWT token")
    }

    /// Validate a token and return its claims
    pub fn decode_claims(&self, token: &str) -> Result<Claims> {
        let token_data = self.validate_token(token)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

    #[test]
    fn test_jwt_roundtrip() {
        let jwt_service = JwtService::new(SECRET);
        let user_id = Uuid::new_v4();
        let email = "test@example.com".to_string();

        let token = jwt_service.create_token(user_id, email.clone()).unwrap();
        let claims = jwt_service.decode_claims(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, email);
        assert_eq!(claims.iss, ISSUER);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let jwt_service = JwtService::new(SECRET);
        let token = jwt_service
            .create_token(Uuid::new_v4(), "test@example.com".to_string())
            .unwrap();

        // Flip one character inside the signature segment
        let mut bytes = token.into_bytes();
        let idx = bytes.len() - 5;
        bytes[idx] = if bytes[idx] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(jwt_service.validate_token(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let jwt_service = JwtService::new(SECRET);
        let other = JwtService::new("a-completely-different-signing-secret!!");

        let token = jwt_service
            .create_token(Uuid::new_v4(), "test@example.com".to_string())
            .unwrap();

        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt_service = JwtService::new(SECRET);
        let now = Utc::now();

        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            iat: (now - Duration::days(9)).timestamp(),
            exp: (now - Duration::days(2)).timestamp(),
            iss: ISSUER.to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(jwt_service.validate_token(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let jwt_service = JwtService::new(SECRET);
        let now = Utc::now();

        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(1)).timestamp(),
            iss: "someone-else".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(jwt_service.validate_token(&token).is_err());
    }
}
