// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, and user creation helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for `fitamin_server`

use std::sync::{Arc, Once};

use anyhow::Result;
use fitamin_server::{auth::AuthManager, database::Database, models::User};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    Ok(Arc::new(Database::new("sqlite::memory:").await?))
}

/// Auth manager with a fixed secret and the default 7-day expiry
pub fn create_test_auth_manager() -> Arc<AuthManager> {
    Arc::new(AuthManager::new(
        b"integration-test-secret".to_vec(),
        7,
    ))
}

/// Insert a user directly, bypassing the registration flow
///
/// Uses the cheapest bcrypt cost so tests that only need an existing
/// account don't pay the production hashing cost.
pub async fn insert_test_user(database: &Database, email: &str) -> Result<User> {
    let password_hash = bcrypt::hash("test-password", 4)?;
    let user = User::new("Test User".into(), email.to_owned(), password_hash);
    database.create_user(&user).await?;
    Ok(user)
}

/// A user id guaranteed not to exist in a fresh database
pub fn unknown_user_id() -> Uuid {
    Uuid::new_v4()
}
