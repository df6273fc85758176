// ABOUTME: Profile read and partial-update service
// ABOUTME: Validated atomic patches and profile views with derived BMI
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Profile operations
//!
//! A profile patch is validated in full before anything is written: one
//! invalid field rejects the whole request and the stored profile is left
//! untouched. The returned view carries a derived BMI, recomputed from the
//! stored height and current weight on every read and never persisted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing;
use uuid::Uuid;

use crate::bmi::BmiStatus;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// Accepted age range, years
const AGE_RANGE: std::ops::RangeInclusive<i64> = 1..=150;
/// Accepted height range, centimeters
const HEIGHT_RANGE: std::ops::RangeInclusive<f64> = 100.0..=250.0;
/// Accepted weight range, kilograms
const WEIGHT_RANGE: std::ops::RangeInclusive<f64> = 30.0..=300.0;

/// Partial profile update
///
/// Only the allow-listed fields below are ever applied; unknown fields in
/// the incoming JSON are silently ignored. A field that is absent leaves
/// the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    /// Display name
    pub name: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// Self-reported gender, free text
    pub gender: Option<String>,
    /// Height in centimeters
    #[serde(rename = "height")]
    pub height_cm: Option<f64>,
    /// Current weight in kilograms
    #[serde(rename = "currentWeight")]
    pub current_weight_kg: Option<f64>,
    /// Target weight in kilograms
    #[serde(rename = "targetWeight")]
    pub target_weight_kg: Option<f64>,
    /// Free-text fitness goal
    #[serde(rename = "fitnessGoal")]
    pub fitness_goal: Option<String>,
}

/// Full profile view with derived BMI state
#[derive(Debug, Serialize)]
pub struct ProfileView {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Age in years
    pub age: Option<i64>,
    /// Self-reported gender
    pub gender: Option<String>,
    /// Height in centimeters
    #[serde(rename = "height")]
    pub height_cm: Option<f64>,
    /// Current weight in kilograms
    #[serde(rename = "currentWeight")]
    pub current_weight_kg: Option<f64>,
    /// Target weight in kilograms
    #[serde(rename = "targetWeight")]
    pub target_weight_kg: Option<f64>,
    /// Free-text fitness goal
    #[serde(rename = "fitnessGoal")]
    pub fitness_goal: Option<String>,
    /// Derived BMI, present only when height and current weight are set
    pub bmi: Option<f64>,
    /// Classification of the derived BMI
    pub bmi_status: Option<BmiStatus>,
    /// Account creation time, RFC 3339
    #[serde(rename = "joinDate")]
    pub join_date: String,
    /// Account creation time, RFC 3339
    pub created_at: String,
    /// Last accepted profile update, RFC 3339
    pub updated_at: String,
}

impl ProfileView {
    /// Build a view from a stored user, deriving BMI state on the fly
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        let assessment = user.bmi_assessment();

        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age,
            gender: user.gender.clone(),
            height_cm: user.height_cm,
            current_weight_kg: user.current_weight_kg,
            target_weight_kg: user.target_weight_kg,
            fitness_goal: user.fitness_goal.clone(),
            bmi: assessment.map(|a| a.bmi),
            bmi_status: assessment.map(|a| a.status),
            join_date: user.created_at.to_rfc3339(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Profile service
#[derive(Clone)]
pub struct ProfileService {
    database: Arc<Database>,
}

impl ProfileService {
    /// Create a new profile service
    #[must_use]
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Get the full profile view for a user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user id
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<ProfileView> {
        let user = self
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok(ProfileView::from_user(&user))
    }

    /// Apply a partial profile update and return the fresh view
    ///
    /// The patch is validated in full first; any violation rejects the
    /// whole update with `InvalidInput` and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user id and
    /// `InvalidInput` when a present field fails validation
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        patch: ProfileUpdate,
    ) -> AppResult<ProfileView> {
        Self::validate_patch(&patch)?;

        let mut user = self
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Self::apply_patch(&mut user, patch);
        user.updated_at = chrono::Utc::now();

        self.database.update_user_profile(&user).await?;

        tracing::info!("Profile updated for user {}", user_id);

        Ok(ProfileView::from_user(&user))
    }

    /// Check every present field against its constraint
    fn validate_patch(patch: &ProfileUpdate) -> AppResult<()> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(AppError::invalid_input("Name must not be empty"));
            }
        }
        if let Some(age) = patch.age {
            if !AGE_RANGE.contains(&age) {
                return Err(AppError::invalid_input(format!(
                    "Age must be between {} and {}, got {age}",
                    AGE_RANGE.start(),
                    AGE_RANGE.end()
                )));
            }
        }
        if let Some(height) = patch.height_cm {
            if !height.is_finite() || !HEIGHT_RANGE.contains(&height) {
                return Err(AppError::invalid_input(format!(
                    "Height must be between {} and {} cm, got {height}",
                    HEIGHT_RANGE.start(),
                    HEIGHT_RANGE.end()
                )));
            }
        }
        if let Some(weight) = patch.current_weight_kg {
            if !weight.is_finite() || !WEIGHT_RANGE.contains(&weight) {
                return Err(AppError::invalid_input(format!(
                    "Current weight must be between {} and {} kg, got {weight}",
                    WEIGHT_RANGE.start(),
                    WEIGHT_RANGE.end()
                )));
            }
        }
        if let Some(weight) = patch.target_weight_kg {
            if !weight.is_finite() || !WEIGHT_RANGE.contains(&weight) {
                return Err(AppError::invalid_input(format!(
                    "Target weight must be between {} and {} kg, got {weight}",
                    WEIGHT_RANGE.start(),
                    WEIGHT_RANGE.end()
                )));
            }
        }
        Ok(())
    }

    /// Merge present fields into the stored user
    fn apply_patch(user: &mut User, patch: ProfileUpdate) {
        if let Some(name) = patch.name {
            user.name = name.trim().to_owned();
        }
        if let Some(age) = patch.age {
            user.age = Some(age);
        }
        if let Some(gender) = patch.gender {
            user.gender = Some(gender);
        }
        if let Some(height) = patch.height_cm {
            user.height_cm = Some(height);
        }
        if let Some(weight) = patch.current_weight_kg {
            user.current_weight_kg = Some(weight);
        }
        if let Some(weight) = patch.target_weight_kg {
            user.target_weight_kg = Some(weight);
        }
        if let Some(goal) = patch.fitness_goal {
            user.fitness_goal = Some(goal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_validation_ranges() {
        let valid = ProfileUpdate {
            age: Some(30),
            height_cm: Some(170.0),
            current_weight_kg: Some(70.0),
            target_weight_kg: Some(65.0),
            ..ProfileUpdate::default()
        };
        assert!(ProfileService::validate_patch(&valid).is_ok());

        for patch in [
            ProfileUpdate {
                age: Some(0),
                ..ProfileUpdate::default()
            },
            ProfileUpdate {
                age: Some(200),
                ..ProfileUpdate::default()
            },
            ProfileUpdate {
                height_cm: Some(99.9),
                ..ProfileUpdate::default()
            },
            ProfileUpdate {
                current_weight_kg: Some(301.0),
                ..ProfileUpdate::default()
            },
            ProfileUpdate {
                target_weight_kg: Some(29.0),
                ..ProfileUpdate::default()
            },
            ProfileUpdate {
                name: Some("   ".into()),
                ..ProfileUpdate::default()
            },
        ] {
            assert!(ProfileService::validate_patch(&patch).is_err());
        }
    }

    #[test]
    fn test_unknown_json_fields_ignored() {
        let patch: ProfileUpdate = serde_json::from_str(
            r#"{"age": 30, "isAdmin": true, "email": "evil@example.com"}"#,
        )
        .unwrap();
        assert_eq!(patch.age, Some(30));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_patch_uses_surface_field_names() {
        let patch: ProfileUpdate = serde_json::from_str(
            r#"{"height": 170, "currentWeight": 70.5, "targetWeight": 65, "fitnessGoal": "cut"}"#,
        )
        .unwrap();
        assert_eq!(patch.height_cm, Some(170.0));
        assert_eq!(patch.current_weight_kg, Some(70.5));
        assert_eq!(patch.target_weight_kg, Some(65.0));
        assert_eq!(patch.fitness_goal.as_deref(), Some("cut"));
    }
}
