// ABOUTME: Integration tests for profile reads and partial updates
// ABOUTME: Validates derivation, merge semantics, and atomic patch rejection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use fitamin_server::{
    bmi::BmiStatus,
    errors::ErrorCode,
    services::profile::{ProfileService, ProfileUpdate},
};

#[tokio::test]
async fn test_get_profile_for_new_user() {
    let database = common::create_test_database().await.unwrap();
    let user = common::insert_test_user(&database, "new@example.com")
        .await
        .unwrap();
    let service = ProfileService::new(database);

    let view = service.get_profile(user.id).await.unwrap();
    assert_eq!(view.email, "new@example.com");
    assert!(view.age.is_none());
    assert!(view.height_cm.is_none());
    assert!(view.bmi.is_none());
    assert!(view.bmi_status.is_none());
}

#[tokio::test]
async fn test_get_profile_unknown_user() {
    let database = common::create_test_database().await.unwrap();
    let service = ProfileService::new(database);

    let err = service
        .get_profile(common::unknown_user_id())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_get_profile_is_idempotent() {
    let database = common::create_test_database().await.unwrap();
    let user = common::insert_test_user(&database, "same@example.com")
        .await
        .unwrap();
    let service = ProfileService::new(database);

    let first = service.get_profile(user.id).await.unwrap();
    let second = service.get_profile(user.id).await.unwrap();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[tokio::test]
async fn test_update_merges_present_fields_only() {
    let database = common::create_test_database().await.unwrap();
    let user = common::insert_test_user(&database, "merge@example.com")
        .await
        .unwrap();
    let service = ProfileService::new(database);

    let first = ProfileUpdate {
        age: Some(28),
        gender: Some("female".into()),
        ..ProfileUpdate::default()
    };
    let view = service.update_profile(user.id, first).await.unwrap();
    assert_eq!(view.age, Some(28));
    assert_eq!(view.gender.as_deref(), Some("female"));
    assert_eq!(view.name, "Test User");

    // A later patch leaves absent fields untouched
    let second = ProfileUpdate {
        fitness_goal: Some("run a marathon".into()),
        ..ProfileUpdate::default()
    };
    let view = service.update_profile(user.id, second).await.unwrap();
    assert_eq!(view.age, Some(28));
    assert_eq!(view.gender.as_deref(), Some("female"));
    assert_eq!(view.fitness_goal.as_deref(), Some("run a marathon"));
    assert!(view.updated_at >= view.created_at);
}

#[tokio::test]
async fn test_update_derives_bmi_when_both_inputs_present() {
    let database = common::create_test_database().await.unwrap();
    let user = common::insert_test_user(&database, "derive@example.com")
        .await
        .unwrap();
    let service = ProfileService::new(database);

    let height_only = ProfileUpdate {
        height_cm: Some(170.0),
        ..ProfileUpdate::default()
    };
    let view = service.update_profile(user.id, height_only).await.unwrap();
    assert!(view.bmi.is_none());

    let weight_too = ProfileUpdate {
        current_weight_kg: Some(70.0),
        ..ProfileUpdate::default()
    };
    let view = service.update_profile(user.id, weight_too).await.unwrap();
    assert_eq!(view.bmi, Some(24.2));
    assert_eq!(view.bmi_status, Some(BmiStatus::Normal));
}

#[tokio::test]
async fn test_update_rejects_out_of_range_age() {
    let database = common::create_test_database().await.unwrap();
    let user = common::insert_test_user(&database, "range@example.com")
        .await
        .unwrap();
    let service = ProfileService::new(database);

    let patch = ProfileUpdate {
        age: Some(200),
        ..ProfileUpdate::default()
    };
    let err = service.update_profile(user.id, patch).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    // The stored profile is unchanged
    let view = service.get_profile(user.id).await.unwrap();
    assert!(view.age.is_none());
}

#[tokio::test]
async fn test_update_is_atomic_across_fields() {
    let database = common::create_test_database().await.unwrap();
    let user = common::insert_test_user(&database, "atomic@example.com")
        .await
        .unwrap();
    let service = ProfileService::new(database);

    // One invalid field rejects the whole patch, including the valid ones
    let patch = ProfileUpdate {
        age: Some(30),
        height_cm: Some(50.0),
        ..ProfileUpdate::default()
    };
    let err = service.update_profile(user.id, patch).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let view = service.get_profile(user.id).await.unwrap();
    assert!(view.age.is_none());
    assert!(view.height_cm.is_none());
}

#[tokio::test]
async fn test_update_unknown_user() {
    let database = common::create_test_database().await.unwrap();
    let service = ProfileService::new(database);

    let patch = ProfileUpdate {
        age: Some(30),
        ..ProfileUpdate::default()
    };
    let err = service
        .update_profile(common::unknown_user_id(), patch)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
