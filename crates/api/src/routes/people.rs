//! Route definitions for the `/people` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::people;
use crate::state::AppState;

/// Routes mounted at `/people`.
///
/// ```text
/// GET  /                      -> list
/// POST /                      -> create
/// PUT  /{id}                  -> update
/// PUT  /{id}/active           -> set_active
/// POST /{id}/reset-password   -> reset_password (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(people::list).post(people::create))
        .route("/{id}", put(people::update))
        .route("/{id}/active", put(people::set_active))
        .route("/{id}/reset-password", post(people::reset_password))
}
