// ABOUTME: BMI recording and history service
// ABOUTME: Compute-and-save operations plus newest-first history queries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! BMI history operations
//!
//! `record_bmi` is the only write path: it runs the engine first and
//! persists nothing when the inputs are invalid. History is append-only;
//! no update or delete operation exists.

use std::sync::Arc;

use serde::Deserialize;
use tracing;
use uuid::Uuid;

use crate::bmi;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::BmiRecord;

/// BMI recording request
#[derive(Debug, Clone, Deserialize)]
pub struct RecordBmiRequest {
    /// Weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Optional free-text note
    #[serde(default)]
    pub notes: Option<String>,
}

/// BMI history service
#[derive(Clone)]
pub struct BmiService {
    database: Arc<Database>,
}

impl BmiService {
    /// Create a new BMI service
    #[must_use]
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Compute a BMI assessment and append it to the user's history
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the engine rejects the measurements
    /// (nothing is persisted), `ResourceNotFound` for an unknown user id,
    /// and a database error if the insert fails
    pub async fn record_bmi(
        &self,
        user_id: Uuid,
        request: RecordBmiRequest,
    ) -> AppResult<BmiRecord> {
        let assessment = bmi::compute_bmi(request.weight, request.height)?;

        if self.database.get_user(user_id).await?.is_none() {
            return Err(AppError::not_found("User"));
        }

        let record = BmiRecord::new(
            user_id,
            request.weight,
            request.height,
            assessment.bmi,
            assessment.status,
            request.notes,
        );
        self.database.insert_bmi_record(&record).await?;

        tracing::info!(
            "Recorded BMI {} ({}) for user {}",
            record.bmi,
            record.status,
            user_id
        );

        Ok(record)
    }

    /// Get the full BMI history for a user, newest first
    ///
    /// A user with no records gets an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn list_history(&self, user_id: Uuid) -> AppResult<Vec<BmiRecord>> {
        Ok(self.database.bmi_history_for_user(user_id).await?)
    }

    /// Get the most recent BMI record for a user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user has no history
    pub async fn latest(&self, user_id: Uuid) -> AppResult<BmiRecord> {
        self.database
            .latest_bmi_for_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("BMI record"))
    }
}
