// ABOUTME: Registration and login service
// ABOUTME: Validates credentials, hashes passwords, and issues session tokens
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Account registration and login
//!
//! Password hashing and verification run on blocking threads: bcrypt is
//! intentionally slow as a brute-force throttle, and must not stall the
//! async executor.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing;

use crate::auth::AuthManager;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// Minimum accepted password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// User info returned with a session
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UserSummary {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

/// Successful registration or login response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Bearer token proving authenticated identity
    pub token: String,
    /// Token expiry, RFC 3339
    pub expires_at: String,
    /// The authenticated user
    pub user: UserSummary,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    database: Arc<Database>,
    auth_manager: Arc<AuthManager>,
}

impl AuthService {
    /// Create a new authentication service
    #[must_use]
    pub fn new(database: Arc<Database>, auth_manager: Arc<AuthManager>) -> Self {
        Self {
            database,
            auth_manager,
        }
    }

    /// Register a new user and issue a session token
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name, malformed email, or short
    /// password; `ResourceAlreadyExists` when the email is taken; a
    /// database error if persistence fails
    pub async fn register(&self, request: RegisterRequest) -> AppResult<SessionResponse> {
        tracing::info!("User registration attempt for email: {}", request.email);

        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Name must not be empty"));
        }
        if !Self::is_valid_email(&request.email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if !Self::is_valid_password(&request.password) {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        // Friendly pre-check; the UNIQUE constraint on users.email is the
        // arbiter under concurrent registration.
        if self.database.get_user_by_email(&request.email).await?.is_some() {
            return Err(AppError::already_exists("Email already registered"));
        }

        let password = request.password;
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))?;

        let user = User::new(name.to_owned(), request.email, password_hash);
        let user_id = self.database.create_user(&user).await?;

        tracing::info!("User registered successfully: {} ({})", user.email, user_id);

        self.issue_session(&user)
    }

    /// Authenticate a user and issue a fresh session token
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown email and `AuthInvalid`
    /// for a wrong password
    pub async fn login(&self, request: LoginRequest) -> AppResult<SessionResponse> {
        tracing::info!("User login attempt for email: {}", request.email);

        let Some(user) = self.database.get_user_by_email(&request.email).await? else {
            return Err(AppError::not_found("No account for that email"));
        };

        let password = request.password;
        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            tracing::warn!("Invalid password for user: {}", request.email);
            return Err(AppError::auth_invalid("Incorrect password"));
        }

        tracing::info!("User logged in successfully: {} ({})", user.email, user.id);

        self.issue_session(&user)
    }

    /// Generate a session token and assemble the response
    fn issue_session(&self, user: &User) -> AppResult<SessionResponse> {
        let token = self
            .auth_manager
            .generate_token(user)
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
        let expires_at = Utc::now() + Duration::days(self.auth_manager.token_expiry_days());

        Ok(SessionResponse {
            token,
            expires_at: expires_at.to_rfc3339(),
            user: UserSummary {
                id: user.id.to_string(),
                name: user.name.clone(),
                email: user.email.clone(),
            },
        })
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.')
    }

    /// Validate password strength
    #[must_use]
    pub const fn is_valid_password(password: &str) -> bool {
        password.len() >= MIN_PASSWORD_LENGTH
    }
}
