//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests call `IntoResponse` directly on `AppError` values; no router
//! or store is involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use condo_api::error::AppError;
use condo_core::auth::LoginError;
use condo_core::error::CoreError;
use condo_db::StoreError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Core errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Unit",
        id: "u42".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Unit with id u42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("plate is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "plate is required");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("Unit A-101 already exists".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret key material leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Login errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_credentials_returns_401() {
    let (status, json) = error_to_response(AppError::Login(LoginError::InvalidCredentials)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn inactive_account_returns_403() {
    let (status, json) = error_to_response(AppError::Login(LoginError::Inactive)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "ACCOUNT_INACTIVE");
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_not_found_returns_404() {
    let err = AppError::Store(StoreError::not_found("Vehicle", "v9"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Vehicle with id v9 not found");
}

#[tokio::test]
async fn remote_unique_violation_returns_409() {
    let err = AppError::Store(StoreError::Backend {
        status: 409,
        body: "duplicate key value violates unique constraint".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn taken_spot_returns_409() {
    let err = AppError::Store(StoreError::SpotTaken { id: "ps3".into() });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "SPOT_TAKEN");
}

#[tokio::test]
async fn remote_failure_returns_502_without_backend_body() {
    let err = AppError::Store(StoreError::Backend {
        status: 500,
        body: "relation \"units\" does not exist".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "STORE_UNAVAILABLE");
    assert!(!json["error"].as_str().unwrap().contains("relation"));
}

#[tokio::test]
async fn local_io_failure_returns_500() {
    let err = AppError::Store(StoreError::Io(std::io::Error::other("disk full")));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

// ---------------------------------------------------------------------------
// Rolled-back writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rolled_back_write_keeps_status_and_carries_restored_row() {
    let restored = serde_json::json!({ "id": "perm-staff-units", "canCreate": false });
    let err = AppError::rolled_back(
        StoreError::Backend {
            status: 503,
            body: "upstream down".into(),
        },
        &restored,
    );

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "STORE_UNAVAILABLE");
    assert_eq!(json["restored"], restored);
}
