// ABOUTME: JWT-based session issuance and validation
// ABOUTME: Generates and verifies 7-day bearer tokens scoped to a user id
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Authentication and Session Management
//!
//! [`AuthManager`] is the session-issuance capability: constructed once at
//! process start with the signing secret and passed by reference into the
//! services that need it. Tokens are HS256-signed JWTs with a bounded
//! validity window (7 days by default). Verification of incoming tokens is
//! the embedding layer's job, but the capability is provided here so both
//! sides agree on claims and algorithm.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::User;

/// JWT claims for user sessions
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Session token manager
///
/// Holds the signing secret and the token validity window.
#[derive(Clone)]
pub struct AuthManager {
    secret: Vec<u8>,
    token_expiry_days: i64,
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub const fn new(secret: Vec<u8>, token_expiry_days: i64) -> Self {
        Self {
            secret,
            token_expiry_days,
        }
    }

    /// Number of days an issued token stays valid
    #[must_use]
    pub const fn token_expiry_days(&self) -> i64 {
        self.token_expiry_days
    }

    /// Generate a session token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let expiry = now + Duration::days(self.token_expiry_days);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )?;

        Ok(token)
    }

    /// Validate a session token and return its claims
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is invalid, the token has expired,
    /// or the token is malformed
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("JWT validation failed: {:?}", e);
            e
        })?;

        Ok(token_data.claims)
    }

    /// Extract the user id from a validated token
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the subject is not a UUID
    pub fn user_id_from_token(&self, token: &str) -> Result<Uuid> {
        let claims = self.validate_token(token)?;
        Uuid::parse_str(&claims.sub)
            .with_context(|| format!("Invalid user id in token subject: {}", claims.sub))
    }
}

/// Generate a random JWT signing secret
///
/// # Errors
///
/// Returns an error if the system RNG fails - the server cannot operate
/// securely without a working RNG
pub fn generate_jwt_secret() -> Result<[u8; 64]> {
    use ring::rand::{SecureRandom, SystemRandom};

    let rng = SystemRandom::new();
    let mut secret = [0u8; 64];

    rng.fill(&mut secret).map_err(|e| {
        tracing::error!("Failed to generate JWT secret: {}", e);
        anyhow::anyhow!("System RNG failure - cannot generate JWT secret")
    })?;

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new(
            "Test User".into(),
            "test@example.com".into(),
            "hashed_password_123".into(),
        )
    }

    fn test_manager() -> AuthManager {
        AuthManager::new(b"test-secret-for-unit-tests".to_vec(), 7)
    }

    #[test]
    fn test_generate_and_validate_token() {
        let manager = test_manager();
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, "test@example.com");
        assert!(claims.exp > Utc::now().timestamp());
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_user_id_round_trip() {
        let manager = test_manager();
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        assert_eq!(manager.user_id_from_token(&token).unwrap(), user.id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = test_manager();
        let other = AuthManager::new(b"a-different-secret".to_vec(), 7);
        let token = manager.generate_token(&test_user()).unwrap();

        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let manager = test_manager();
        assert!(manager.validate_token("not.a.jwt").is_err());
    }

    #[test]
    fn test_generated_secret_is_not_all_zero() {
        let secret = generate_jwt_secret().unwrap();
        assert!(secret.iter().any(|&b| b != 0));
    }
}
