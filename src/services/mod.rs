// ABOUTME: Service layer exposing the operation surface of the core
// ABOUTME: Registration/login, profile read/update, and BMI history operations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Service layer
//!
//! Each service owns one slice of the operation surface and is a thin
//! struct over the injected capabilities ([`crate::database::Database`],
//! [`crate::auth::AuthManager`]). All operations return
//! [`crate::errors::AppResult`]; an HTTP layer maps those results onto
//! its transport.

/// Registration and login
pub mod auth;

/// BMI recording and history queries
pub mod bmi;

/// Profile read and partial update
pub mod profile;
