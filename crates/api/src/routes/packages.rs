//! Route definitions for the `/packages` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::packages;
use crate::state::AppState;

/// Routes mounted at `/packages`.
///
/// ```text
/// GET  /              -> list
/// POST /              -> register
/// POST /{id}/pickup   -> pickup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(packages::list).post(packages::register))
        .route("/{id}/pickup", post(packages::pickup))
}
