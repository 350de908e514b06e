//! Gate access log model. Logs are append-only.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessType {
    Entry,
    Exit,
}

impl AccessType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "ENTRY",
            Self::Exit => "EXIT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLog {
    pub id: EntityId,
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub access_type: AccessType,
    pub vehicle_plate: String,
    pub is_registered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// DTO for appending a log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessLog {
    pub timestamp: Timestamp,
    pub access_type: AccessType,
    pub vehicle_plate: String,
    pub is_registered: bool,
    pub spot_id: Option<EntityId>,
    pub notes: Option<String>,
}

impl NewAccessLog {
    pub fn into_log(self, id: EntityId) -> AccessLog {
        AccessLog {
            id,
            timestamp: self.timestamp,
            access_type: self.access_type,
            vehicle_plate: self.vehicle_plate,
            is_registered: self.is_registered,
            spot_id: self.spot_id,
            notes: self.notes,
        }
    }
}

/// Sort logs newest first.
pub fn sort_newest_first(logs: &mut [AccessLog]) {
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
