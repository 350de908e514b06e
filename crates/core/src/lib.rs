//! Domain vocabulary and pure rules for the condominium manager.
//!
//! Nothing in this crate performs I/O. The persistence adapter lives in
//! `condo-db`; the HTTP surface lives in `condo-api`.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod gate;
pub mod models;
pub mod optimistic;
pub mod packages;
pub mod password;
pub mod people;
pub mod permissions;
pub mod roles;
pub mod types;
pub mod units;
