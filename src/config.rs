// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads database, JWT, and logging settings from environment variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration management
//!
//! Configuration is environment-only: there is no config file. An embedding
//! application calls [`ServerConfig::from_env`] once at startup and passes
//! the resulting values into the capability constructors.

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use std::env;
use tracing::warn;

use crate::auth::generate_jwt_secret;

/// Default token validity window in days
pub const DEFAULT_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages and above
    #[default]
    Info,
    /// Debug detail
    Debug,
    /// Full trace output
    Trace,
}

impl LogLevel {
    /// Convert to a `tracing` level
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database connection string (`DATABASE_URL`)
    pub database_url: String,
    /// JWT signing secret (`JWT_SECRET`, base64)
    pub jwt_secret: Vec<u8>,
    /// Session token validity window (`TOKEN_EXPIRY_DAYS`)
    pub token_expiry_days: i64,
    /// Log level (`RUST_LOG`)
    pub log_level: LogLevel,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A missing `JWT_SECRET` is tolerated for development: a fresh secret
    /// is generated and a warning logged, which invalidates all sessions on
    /// restart.
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is present but not valid base64, if
    /// `TOKEN_EXPIRY_DAYS` is present but not a positive integer, or if
    /// secret generation fails
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:data/fitamin.db".into());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(encoded) => general_purpose::STANDARD
                .decode(encoded)
                .context("JWT_SECRET must be base64-encoded")?,
            Err(_) => {
                warn!("JWT_SECRET not set - generating an ephemeral secret; sessions will not survive a restart");
                generate_jwt_secret()?.to_vec()
            }
        };

        let token_expiry_days = match env::var("TOKEN_EXPIRY_DAYS") {
            Ok(value) => {
                let days: i64 = value
                    .parse()
                    .context("TOKEN_EXPIRY_DAYS must be an integer")?;
                anyhow::ensure!(days > 0, "TOKEN_EXPIRY_DAYS must be positive, got {days}");
                days
            }
            Err(_) => DEFAULT_TOKEN_EXPIRY_DAYS,
        };

        let log_level = env::var("RUST_LOG")
            .map(|value| LogLevel::from_str_or_default(&value))
            .unwrap_or_default();

        Ok(Self {
            database_url,
            jwt_secret,
            token_expiry_days,
            log_level,
        })
    }
}
