// ABOUTME: User account model with health profile fields
// ABOUTME: Stored record plus helpers for derived BMI state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bmi::{self, BmiAssessment};

/// A user account with its health profile
///
/// The account fields (`name`, `email`, `password_hash`) are set at
/// registration; the profile fields are all optional and filled in through
/// partial updates. `password_hash` is opaque to everything except the
/// credential verification path and is never serialized outward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address, unique across all accounts
    pub email: String,
    /// Hashed password for authentication
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Age in years
    pub age: Option<i64>,
    /// Self-reported gender, free text
    pub gender: Option<String>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Current weight in kilograms
    pub current_weight_kg: Option<f64>,
    /// Target weight in kilograms
    pub target_weight_kg: Option<f64>,
    /// Free-text fitness goal
    pub fitness_goal: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Bumped on every accepted profile update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given name, email, and password hash
    ///
    /// All profile fields start unset.
    #[must_use]
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            age: None,
            gender: None,
            height_cm: None,
            current_weight_kg: None,
            target_weight_kg: None,
            fitness_goal: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Derive the current BMI assessment from the stored profile
    ///
    /// Returns `None` unless both height and current weight are present.
    /// The assessment is recomputed on every call and never persisted.
    #[must_use]
    pub fn bmi_assessment(&self) -> Option<BmiAssessment> {
        match (self.current_weight_kg, self.height_cm) {
            (Some(weight), Some(height)) => bmi::compute_bmi(weight, height).ok(),
            _ => None,
        }
    }
}
