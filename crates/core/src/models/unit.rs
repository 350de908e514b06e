//! Residential unit model.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// One address inside the condominium: a block plus an apartment number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: EntityId,
    pub block: String,
    pub number: String,
    pub floor: i32,
}

/// DTO for inserting a unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUnit {
    pub block: String,
    pub number: String,
    pub floor: i32,
}

impl NewUnit {
    pub fn into_unit(self, id: EntityId) -> Unit {
        Unit {
            id,
            block: self.block,
            number: self.number,
            floor: self.floor,
        }
    }
}
