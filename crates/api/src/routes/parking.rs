//! Route definitions for the `/parking` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::parking;
use crate::state::AppState;

/// Routes mounted at `/parking`.
///
/// ```text
/// GET  /spots   -> list_spots
/// POST /entry   -> entry (logs, then allocates)
/// POST /exit    -> exit (logs, then releases)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/spots", get(parking::list_spots))
        .route("/entry", post(parking::entry))
        .route("/exit", post(parking::exit))
}
