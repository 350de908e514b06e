//! Package delivery model.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

/// Lifecycle of a package. Only `WaitingPickup -> Delivered` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStatus {
    WaitingPickup,
    Delivered,
}

impl PackageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WaitingPickup => "WAITING_PICKUP",
            Self::Delivered => "DELIVERED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: EntityId,
    /// Carrier tracking code or a short description of the item.
    pub tracking_code: String,
    pub received_at: Timestamp,
    pub received_by_staff_id: EntityId,
    pub unit_id: EntityId,
    pub recipient_name: String,
    /// Where the package is held, e.g. "Reception - Shelf A".
    pub location: String,
    pub status: PackageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picked_up_at: Option<Timestamp>,
}

/// DTO for registering a package. New packages always start as
/// [`PackageStatus::WaitingPickup`].
#[derive(Debug, Clone)]
pub struct NewPackage {
    pub tracking_code: String,
    pub received_at: Timestamp,
    pub received_by_staff_id: EntityId,
    pub unit_id: EntityId,
    pub recipient_name: String,
    pub location: String,
}

impl NewPackage {
    pub fn into_package(self, id: EntityId) -> Package {
        Package {
            id,
            tracking_code: self.tracking_code,
            received_at: self.received_at,
            received_by_staff_id: self.received_by_staff_id,
            unit_id: self.unit_id,
            recipient_name: self.recipient_name,
            location: self.location,
            status: PackageStatus::WaitingPickup,
            picked_up_at: None,
        }
    }
}

/// Partial update for a package. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageUpdate {
    pub status: Option<PackageStatus>,
    pub picked_up_at: Option<Timestamp>,
    pub location: Option<String>,
}

impl PackageUpdate {
    pub fn apply(&self, package: &mut Package) {
        if let Some(status) = self.status {
            package.status = status;
        }
        if let Some(at) = self.picked_up_at {
            package.picked_up_at = Some(at);
        }
        if let Some(location) = &self.location {
            package.location = location.clone();
        }
    }
}
