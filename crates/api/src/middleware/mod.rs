//! Authentication and authorization extractors.
//!
//! - [`auth::SessionUser`] -- Any valid Bearer token of an active person,
//!   including one that still requires a password change.
//! - [`auth::AuthUser`] -- As above, for a person with no pending password
//!   change.
//! - [`rbac::RequireAdmin`] -- Requires an admin-kind role.
//! - [`rbac::authorize`] -- Checks one capability against the permission matrix.

pub mod auth;
pub mod rbac;
