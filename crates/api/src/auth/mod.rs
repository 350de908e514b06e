//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Password hashing lives in `condo_core::password` so the login rules and
//! the fixture seeder share it.

pub mod jwt;
