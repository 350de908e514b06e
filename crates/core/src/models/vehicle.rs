//! Registered vehicle model.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: EntityId,
    /// Licence plate, the identifier used at the gate. Not unique.
    pub plate: String,
    pub model: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<EntityId>,
    /// Free-text owner for vehicles that belong to non-registered people.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<EntityId>,
}

/// DTO for inserting a vehicle.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVehicle {
    pub plate: String,
    pub model: String,
    pub color: String,
    #[serde(default)]
    pub owner_id: Option<EntityId>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub unit_id: Option<EntityId>,
}

impl NewVehicle {
    pub fn into_vehicle(self, id: EntityId) -> Vehicle {
        Vehicle {
            id,
            plate: self.plate,
            model: self.model,
            color: self.color,
            owner_id: self.owner_id,
            owner_name: self.owner_name,
            unit_id: self.unit_id,
        }
    }
}
