//! Well-known role names and their classification.
//!
//! Role rows are data (admins may create more), so a role name maps to a
//! [`RoleKind`] only when it is one of the well-known names below. The
//! fixture data seeds `ADMIN`, `STAFF` and `RESIDENT`.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_STAFF: &str = "STAFF";
pub const ROLE_RESIDENT: &str = "RESIDENT";
pub const ROLE_VISITOR: &str = "VISITOR";

/// Portuguese aliases still found in older data sets.
const RESIDENT_ALIASES: &[&str] = &["MORADOR"];
const ADMIN_ALIASES: &[&str] = &["ADMINISTRADOR", "SINDICO"];
const STAFF_ALIASES: &[&str] = &["PORTEIRO", "FUNCIONARIO"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Admin,
    Staff,
    Resident,
    Visitor,
}

impl RoleKind {
    /// Classify a role name, case-insensitively. Returns `None` for custom roles.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_uppercase();
        let name = upper.as_str();
        if name == ROLE_ADMIN || ADMIN_ALIASES.contains(&name) {
            Some(Self::Admin)
        } else if name == ROLE_STAFF || STAFF_ALIASES.contains(&name) {
            Some(Self::Staff)
        } else if name == ROLE_RESIDENT || RESIDENT_ALIASES.contains(&name) {
            Some(Self::Resident)
        } else if name == ROLE_VISITOR {
            Some(Self::Visitor)
        } else {
            None
        }
    }
}

/// True when the role name denotes an administrator (bypasses the matrix).
pub fn is_admin(role_name: &str) -> bool {
    RoleKind::from_name(role_name) == Some(RoleKind::Admin)
}

/// True when the role name denotes a resident (may be bound to a unit).
pub fn is_resident(role_name: &str) -> bool {
    RoleKind::from_name(role_name) == Some(RoleKind::Resident)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_well_known_names() {
        assert_eq!(RoleKind::from_name("ADMIN"), Some(RoleKind::Admin));
        assert_eq!(RoleKind::from_name("staff"), Some(RoleKind::Staff));
        assert_eq!(RoleKind::from_name("Morador"), Some(RoleKind::Resident));
        assert_eq!(RoleKind::from_name("VISITOR"), Some(RoleKind::Visitor));
    }

    #[test]
    fn custom_role_has_no_kind() {
        assert_eq!(RoleKind::from_name("GARDENER"), None);
        assert!(!is_admin("GARDENER"));
        assert!(!is_resident("GARDENER"));
    }
}
