//! Route definitions for the `/permissions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::permissions;
use crate::state::AppState;

/// Routes mounted at `/permissions`.
///
/// ```text
/// GET  /               -> list
/// GET  /grouped        -> grouped
/// POST /{id}/toggle    -> toggle_capability (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(permissions::list))
        .route("/grouped", get(permissions::grouped))
        .route("/{id}/toggle", post(permissions::toggle_capability))
}
