//! Role definition model.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// A row from the roles table. People reference roles by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinition {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// DTO for creating a role.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRole {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewRole {
    pub fn into_role(self, id: EntityId) -> RoleDefinition {
        RoleDefinition {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

/// Partial update for a role. `description: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl RoleUpdate {
    pub fn apply(&self, role: &mut RoleDefinition) {
        if let Some(name) = &self.name {
            role.name = name.clone();
        }
        if let Some(description) = &self.description {
            role.description = description.clone();
        }
    }
}
