//! Parking spot model and occupancy transitions.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Category a spot is reserved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotType {
    Resident,
    Visitor,
    Disabled,
}

impl SpotType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resident => "RESIDENT",
            Self::Visitor => "VISITOR",
            Self::Disabled => "DISABLED",
        }
    }
}

/// A single parking spot.
///
/// Invariant: `current_vehicle_id` is only present while `is_occupied` is
/// true. Mutations go through [`SpotUpdate`] which preserves this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    pub id: EntityId,
    pub code: String,
    pub is_occupied: bool,
    /// Plate (or vehicle id) of the occupant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_vehicle_id: Option<String>,
    #[serde(rename = "type")]
    pub spot_type: SpotType,
}

/// Occupancy change for one spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotUpdate {
    /// Mark the spot occupied by the given plate / vehicle id.
    Occupy { vehicle: String },
    /// Free the spot and forget its occupant.
    Release,
}

impl SpotUpdate {
    pub fn occupy(vehicle: impl Into<String>) -> Self {
        Self::Occupy {
            vehicle: vehicle.into(),
        }
    }

    /// Apply this change to a spot in place.
    pub fn apply(&self, spot: &mut ParkingSpot) {
        match self {
            Self::Occupy { vehicle } => {
                spot.is_occupied = true;
                spot.current_vehicle_id = Some(vehicle.clone());
            }
            Self::Release => {
                spot.is_occupied = false;
                spot.current_vehicle_id = None;
            }
        }
    }
}
