pub mod access_logs;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod packages;
pub mod parking;
pub mod people;
pub mod permissions;
pub mod roles;
pub mod units;
pub mod vehicles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/change-password            first-access password change
/// /auth/me                         current person
///
/// /dashboard/stats                 counters + recent activity
///
/// /units                           list, create
/// /units/generate                  bulk generation (POST)
/// /units/{id}                      delete
/// /units/blocks/{block}            delete a whole block
///
/// /people                          list, create
/// /people/{id}                     update
/// /people/{id}/active              activate / deactivate (PUT)
/// /people/{id}/reset-password      reset to default (admin only)
///
/// /vehicles                        list, create
/// /vehicles/{id}                   delete
///
/// /parking/spots                   list
/// /parking/entry                   gate entry (POST)
/// /parking/exit                    gate exit (POST)
///
/// /access-logs                     list, newest first
/// /access-logs/analysis            text analysis of recent logs
///
/// /packages                        list, register
/// /packages/{id}/pickup            mark delivered (POST)
///
/// /roles                           list, create (admin only)
/// /roles/{id}                      update, delete (admin only)
///
/// /permissions                     list
/// /permissions/grouped             rows grouped by role
/// /permissions/{id}/toggle         flip one capability (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, change password, me).
        .nest("/auth", auth::router())
        .nest("/dashboard", dashboard::router())
        .nest("/units", units::router())
        .nest("/people", people::router())
        .nest("/vehicles", vehicles::router())
        // Gate operations and the spot map.
        .nest("/parking", parking::router())
        .nest("/access-logs", access_logs::router())
        .nest("/packages", packages::router())
        // Role management and the permission matrix.
        .nest("/roles", roles::router())
        .nest("/permissions", permissions::router())
}
