//! Registration rules for people.

use crate::error::{require_non_blank, CoreError};
use crate::roles::is_resident;
use crate::types::EntityId;

/// Name and email are required on registration.
pub fn validate_registration(name: &str, email: &str) -> Result<(), CoreError> {
    require_non_blank("name", name)?;
    require_non_blank("email", email)?;
    if !email.contains('@') {
        return Err(CoreError::Validation(format!("Invalid email address '{email}'")));
    }
    Ok(())
}

/// Only residents are bound to a unit; any unit given for another role is
/// dropped.
pub fn unit_for_role(role_name: &str, unit_id: Option<EntityId>) -> Option<EntityId> {
    if is_resident(role_name) {
        unit_id.filter(|u| !u.trim().is_empty())
    } else {
        None
    }
}
