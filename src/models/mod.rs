// ABOUTME: Stored data models for the Fitamin core
// ABOUTME: User account records and immutable BMI history entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models shared across the database and service layers

mod bmi;
mod user;

pub use bmi::BmiRecord;
pub use user::User;
