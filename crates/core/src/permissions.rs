//! Permission matrix rules: toggling, grouping and access checks.

use serde::Serialize;

use crate::models::{Capability, NewPermission, Resource, RolePermission};
use crate::types::EntityId;

/// Permission rows of one role.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissionGroup {
    pub role_id: EntityId,
    pub role_name: Option<String>,
    pub permissions: Vec<RolePermission>,
}

/// The row with exactly one capability flipped, plus the new value.
pub fn toggle(row: &RolePermission, capability: Capability) -> (RolePermission, bool) {
    let value = !row.allows(capability);
    let mut next = row.clone();
    next.set(capability, value);
    (next, value)
}

/// Group rows by role id, roles in first-seen order, rows in input order.
pub fn group_by_role(rows: &[RolePermission]) -> Vec<RolePermissionGroup> {
    let mut groups: Vec<RolePermissionGroup> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|g| g.role_id == row.role_id) {
            Some(group) => group.permissions.push(row.clone()),
            None => groups.push(RolePermissionGroup {
                role_id: row.role_id.clone(),
                role_name: row.role_name.clone(),
                permissions: vec![row.clone()],
            }),
        }
    }
    groups
}

/// Whether `role_id` holds `capability` on `resource`. Missing rows deny.
pub fn is_allowed(
    rows: &[RolePermission],
    role_id: &str,
    resource: Resource,
    capability: Capability,
) -> bool {
    rows.iter()
        .find(|r| r.role_id == role_id && r.resource == resource)
        .is_some_and(|r| r.allows(capability))
}

/// One deny-all row per resource, for a newly created role.
pub fn default_rows_for_role(role_id: &str) -> Vec<NewPermission> {
    Resource::ALL
        .iter()
        .map(|&resource| NewPermission::deny_all(role_id.to_string(), resource))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, role: &str, resource: Resource) -> RolePermission {
        NewPermission::deny_all(role.into(), resource).into_permission(id.into())
    }

    #[test]
    fn toggle_changes_only_one_flag() {
        let original = row("p1", "r1", Resource::Packages);
        let (next, value) = toggle(&original, Capability::Edit);
        assert!(value);
        assert!(next.can_edit);
        assert_eq!(next.can_view, original.can_view);
        assert_eq!(next.can_create, original.can_create);
        assert_eq!(next.can_delete, original.can_delete);

        let (back, value) = toggle(&next, Capability::Edit);
        assert!(!value);
        assert_eq!(back, original);
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let rows = vec![
            row("1", "staff", Resource::Units),
            row("2", "resident", Resource::Units),
            row("3", "staff", Resource::Parking),
        ];
        let groups = group_by_role(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].role_id, "staff");
        assert_eq!(groups[0].permissions.len(), 2);
        assert_eq!(groups[1].role_id, "resident");
    }

    #[test]
    fn missing_row_denies() {
        let mut rows = vec![row("1", "staff", Resource::Units)];
        rows[0].can_view = true;
        assert!(is_allowed(&rows, "staff", Resource::Units, Capability::View));
        assert!(!is_allowed(&rows, "staff", Resource::Units, Capability::Delete));
        assert!(!is_allowed(&rows, "staff", Resource::Parking, Capability::View));
    }

    #[test]
    fn default_rows_cover_every_resource() {
        let rows = default_rows_for_role("r9");
        assert_eq!(rows.len(), Resource::ALL.len());
        assert!(rows.iter().all(|r| !r.can_view && r.role_id == "r9"));
    }
}
