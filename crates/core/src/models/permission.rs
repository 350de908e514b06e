//! Permission matrix rows: one per (role, resource) pair.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Screens / API areas guarded by the permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Dashboard,
    Units,
    People,
    Packages,
    Parking,
    AccessControl,
    RoleManagement,
}

impl Resource {
    /// Every resource, in display order.
    pub const ALL: [Resource; 7] = [
        Resource::Dashboard,
        Resource::Units,
        Resource::People,
        Resource::Packages,
        Resource::Parking,
        Resource::AccessControl,
        Resource::RoleManagement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Units => "units",
            Self::People => "people",
            Self::Packages => "packages",
            Self::Parking => "parking",
            Self::AccessControl => "access_control",
            Self::RoleManagement => "role_management",
        }
    }
}

/// One of the four boolean capabilities of a permission row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    View,
    Create,
    Edit,
    Delete,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::View,
        Capability::Create,
        Capability::Edit,
        Capability::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermission {
    pub id: EntityId,
    pub role_id: EntityId,
    /// Resolved from the role table for display; not persisted locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    pub resource: Resource,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl RolePermission {
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::View => self.can_view,
            Capability::Create => self.can_create,
            Capability::Edit => self.can_edit,
            Capability::Delete => self.can_delete,
        }
    }

    pub fn set(&mut self, capability: Capability, value: bool) {
        match capability {
            Capability::View => self.can_view = value,
            Capability::Create => self.can_create = value,
            Capability::Edit => self.can_edit = value,
            Capability::Delete => self.can_delete = value,
        }
    }
}

/// DTO for inserting a permission row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermission {
    pub role_id: EntityId,
    pub resource: Resource,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl NewPermission {
    /// A row granting nothing.
    pub fn deny_all(role_id: EntityId, resource: Resource) -> Self {
        Self::uniform(role_id, resource, false)
    }

    /// A row with all four capabilities set to `value`.
    pub fn uniform(role_id: EntityId, resource: Resource, value: bool) -> Self {
        Self {
            role_id,
            resource,
            can_view: value,
            can_create: value,
            can_edit: value,
            can_delete: value,
        }
    }

    pub fn into_permission(self, id: EntityId) -> RolePermission {
        RolePermission {
            id,
            role_id: self.role_id,
            role_name: None,
            resource: self.resource,
            can_view: self.can_view,
            can_create: self.can_create,
            can_edit: self.can_edit,
            can_delete: self.can_delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_touches_only_named_capability() {
        let mut row = NewPermission::deny_all("r1".into(), Resource::Packages).into_permission("p1".into());
        row.set(Capability::Edit, true);
        assert!(row.can_edit);
        assert!(!row.can_view && !row.can_create && !row.can_delete);
        assert!(row.allows(Capability::Edit));
    }

    #[test]
    fn resource_wire_names() {
        assert_eq!(
            serde_json::to_value(Resource::AccessControl).unwrap(),
            "access_control"
        );
        let parsed: Resource = serde_json::from_value(serde_json::json!("role_management")).unwrap();
        assert_eq!(parsed, Resource::RoleManagement);
        for resource in Resource::ALL {
            assert_eq!(serde_json::to_value(resource).unwrap(), resource.as_str());
        }
    }
}
