// ABOUTME: Immutable BMI history record
// ABOUTME: One row per compute-and-save operation, never updated or deleted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bmi::BmiStatus;

/// One entry in a user's BMI history
///
/// Records are append-only: created by a single compute-and-save operation
/// and immutable afterwards. `user_id` references the owning account by
/// value; no cascade semantics are implied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiRecord {
    /// Unique record identifier, generated on persist
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Weight at measurement time, kilograms
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    /// Height at measurement time, centimeters
    #[serde(rename = "height")]
    pub height_cm: f64,
    /// Computed BMI, rounded to one decimal place
    pub bmi: f64,
    /// Classification of the computed BMI
    #[serde(rename = "bmi_status")]
    pub status: BmiStatus,
    /// Optional free-text note
    pub notes: Option<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl BmiRecord {
    /// Create a new record with a fresh id and the current timestamp
    #[must_use]
    pub fn new(
        user_id: Uuid,
        weight_kg: f64,
        height_cm: f64,
        bmi: f64,
        status: BmiStatus,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            weight_kg,
            height_cm,
            bmi,
            status,
            notes,
            created_at: Utc::now(),
        }
    }
}
