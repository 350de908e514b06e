//! Route definitions for the `/units` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::units;
use crate::state::AppState;

/// Routes mounted at `/units`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// POST   /generate         -> generate
/// DELETE /{id}             -> delete
/// DELETE /blocks/{block}   -> delete_block
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(units::list).post(units::create))
        .route("/generate", post(units::generate))
        .route("/{id}", delete(units::delete))
        .route("/blocks/{block}", delete(units::delete_block))
}
