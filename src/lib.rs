// ABOUTME: Main library entry point for the Fitamin backend core
// ABOUTME: Exposes user accounts, health profiles, and BMI tracking services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitamin Server Core
//!
//! Backend core for the Fitamin health tracking application. The crate
//! authenticates users with email and password, stores per-user health
//! profiles, and computes and records Body Mass Index (BMI) history.
//!
//! The crate is transport-agnostic: an embedding application constructs the
//! capability objects once at startup and mounts the service operations on
//! whatever HTTP layer it uses.
//!
//! ## Architecture
//!
//! - **BMI engine** ([`bmi`]): pure computation and classification
//! - **Models** ([`models`]): stored user and BMI history records
//! - **Database** ([`database`]): SQLite-backed persistence and migrations
//! - **Services** ([`services`]): registration, login, profile, and history
//!   operations returning typed results
//! - **Auth** ([`auth`]): JWT session issuance and validation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitamin_server::auth::AuthManager;
//! use fitamin_server::config::ServerConfig;
//! use fitamin_server::database::Database;
//! use fitamin_server::services::auth::{AuthService, RegisterRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Arc::new(Database::new(&config.database_url).await?);
//!     let auth_manager = Arc::new(AuthManager::new(
//!         config.jwt_secret.clone(),
//!         config.token_expiry_days,
//!     ));
//!
//!     let auth = AuthService::new(database, auth_manager);
//!     let session = auth
//!         .register(RegisterRequest {
//!             name: "Test User".into(),
//!             email: "user@example.com".into(),
//!             password: "correct-horse".into(),
//!         })
//!         .await?;
//!     println!("registered {}", session.user.email);
//!     Ok(())
//! }
//! ```

/// JWT session issuance and validation
pub mod auth;

/// Pure BMI computation and classification
pub mod bmi;

/// Environment-based configuration
pub mod config;

/// SQLite persistence layer and migrations
pub mod database;

/// Unified error handling with standard error codes and HTTP status mapping
pub mod errors;

/// Logging configuration and structured output setup
pub mod logging;

/// Stored data models
pub mod models;

/// Service layer exposing the operation surface
pub mod services;
