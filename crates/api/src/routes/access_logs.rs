//! Route definitions for the `/access-logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::access_logs;
use crate::state::AppState;

/// Routes mounted at `/access-logs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(access_logs::list))
        .route("/analysis", get(access_logs::analysis))
}
