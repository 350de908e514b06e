use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use condo_core::auth::LoginError;
use condo_core::error::CoreError;
use condo_db::StoreError;
use serde::Serialize;
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`LoginError`] for the two login
/// failures and [`StoreError`] for persistence failures. Implements
/// [`IntoResponse`] to produce consistent `{ "error", "code" }` JSON bodies.
/// A rolled-back write adds the restored record under `"restored"`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `condo_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed login attempt.
    #[error(transparent)]
    Login(#[from] LoginError),

    /// A persistence error from `condo_db`.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// A write failed and the tentative change was discarded.
    #[error("{error}")]
    RolledBack { error: Box<AppError>, restored: Value },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn rolled_back(error: impl Into<AppError>, restored: &impl Serialize) -> Self {
        Self::RolledBack {
            error: Box::new(error.into()),
            restored: serde_json::to_value(restored).unwrap_or(Value::Null),
        }
    }

    /// Status, machine-readable code and message for this error.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Login failures ---
            AppError::Login(err) => match err {
                LoginError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    err.to_string(),
                ),
                LoginError::Inactive => {
                    (StatusCode::FORBIDDEN, "ACCOUNT_INACTIVE", err.to_string())
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }

            AppError::RolledBack { error, .. } => error.parts(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let AppError::RolledBack { restored, .. } = self {
            body["restored"] = restored;
        }

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - A remote 409 (unique violation) maps to 409.
/// - A spot claimed by a concurrent entry maps to 409.
/// - Other remote failures map to 502 with a sanitized message.
/// - Local I/O and serialization failures map to 500.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        StoreError::Backend { status: 409, body } => {
            tracing::warn!(body = %body, "Remote backend rejected a duplicate");
            (
                StatusCode::CONFLICT,
                "CONFLICT",
                "Duplicate value violates a unique constraint".to_string(),
            )
        }
        StoreError::SpotTaken { .. } => (StatusCode::CONFLICT, "SPOT_TAKEN", err.to_string()),
        StoreError::Backend { .. } | StoreError::Request(_) => {
            tracing::error!(error = %err, "Remote store error");
            (
                StatusCode::BAD_GATEWAY,
                "STORE_UNAVAILABLE",
                "The data store could not complete the request".to_string(),
            )
        }
        StoreError::Io(_) | StoreError::Serialization(_) | StoreError::Seed(_) => {
            tracing::error!(error = %err, "Local store error");
            internal()
        }
    }
}
