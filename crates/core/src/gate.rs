//! Gate entry / exit rules and first-fit spot allocation.
//!
//! Both operations are planned here from a snapshot of vehicles and spots;
//! the caller persists the resulting spot updates and log entry.

use serde::{Deserialize, Serialize};

use crate::error::{require_non_blank, CoreError};
use crate::models::{AccessType, NewAccessLog, ParkingSpot, SpotType, SpotUpdate, Vehicle};
use crate::types::{EntityId, Timestamp};

/// Who is arriving at the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Resident,
    Visitor,
    Service,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resident => "RESIDENT",
            Self::Visitor => "VISITOR",
            Self::Service => "SERVICE",
        }
    }

    /// Spot category this entry may occupy. Service vehicles share the
    /// visitor pool; disabled spots are never auto-allocated.
    pub fn parking_category(self) -> SpotType {
        match self {
            Self::Resident => SpotType::Resident,
            Self::Visitor | Self::Service => SpotType::Visitor,
        }
    }
}

/// Outcome of the allocation step of a gate entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    Assigned { spot_id: EntityId, spot_code: String },
    /// No free spot of the required category; the entry is still logged.
    NoCapacity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPlan {
    pub allocation: Allocation,
    /// Spot change to persist when a spot was assigned.
    pub spot_update: Option<(EntityId, SpotUpdate)>,
    pub log: NewAccessLog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitPlan {
    /// Spots whose occupant matched; each gets [`SpotUpdate::Release`].
    pub released: Vec<EntityId>,
    pub log: NewAccessLog,
}

/// Canonical plate form: trimmed and upper-cased.
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

/// Whether any registered vehicle carries this plate.
pub fn is_registered(vehicles: &[Vehicle], plate: &str) -> bool {
    let plate = normalize_plate(plate);
    vehicles.iter().any(|v| normalize_plate(&v.plate) == plate)
}

/// First free spot of the given category, in stored order.
pub fn find_free_spot(spots: &[ParkingSpot], category: SpotType) -> Option<&ParkingSpot> {
    spots
        .iter()
        .find(|s| !s.is_occupied && s.spot_type == category)
}

/// Plan a gate entry. Plate and unit are required; allocation failure is
/// not an error.
pub fn plan_entry(
    plate: &str,
    unit_id: &str,
    entry_type: EntryType,
    vehicles: &[Vehicle],
    spots: &[ParkingSpot],
    now: Timestamp,
) -> Result<EntryPlan, CoreError> {
    require_non_blank("plate", plate)?;
    require_non_blank("unit_id", unit_id)?;

    let plate = normalize_plate(plate);
    let registered = is_registered(vehicles, &plate);

    let (allocation, spot_update) = match find_free_spot(spots, entry_type.parking_category()) {
        Some(spot) => (
            Allocation::Assigned {
                spot_id: spot.id.clone(),
                spot_code: spot.code.clone(),
            },
            Some((spot.id.clone(), SpotUpdate::occupy(plate.clone()))),
        ),
        None => (Allocation::NoCapacity, None),
    };

    let spot_id = match &allocation {
        Allocation::Assigned { spot_id, .. } => Some(spot_id.clone()),
        Allocation::NoCapacity => None,
    };

    let log = NewAccessLog {
        timestamp: now,
        access_type: AccessType::Entry,
        vehicle_plate: plate,
        is_registered: registered,
        spot_id,
        notes: Some(format!(
            "Unit: {} | Type: {}",
            unit_id.trim(),
            entry_type.as_str()
        )),
    };

    Ok(EntryPlan {
        allocation,
        spot_update,
        log,
    })
}

/// Plan a gate exit. Every spot held by the given plate / vehicle id is
/// released; the EXIT log is appended even when nothing matched.
pub fn plan_exit(
    plate_or_id: &str,
    vehicles: &[Vehicle],
    spots: &[ParkingSpot],
    now: Timestamp,
) -> Result<ExitPlan, CoreError> {
    require_non_blank("plate", plate_or_id)?;

    let raw = plate_or_id.trim();
    let plate = normalize_plate(raw);

    let released: Vec<EntityId> = spots
        .iter()
        .filter(|s| {
            s.current_vehicle_id
                .as_deref()
                .is_some_and(|occupant| occupant == raw || occupant == plate)
        })
        .map(|s| s.id.clone())
        .collect();

    let log = NewAccessLog {
        timestamp: now,
        access_type: AccessType::Exit,
        vehicle_plate: plate.clone(),
        is_registered: is_registered(vehicles, &plate),
        spot_id: released.first().cloned(),
        notes: None,
    };

    Ok(ExitPlan { released, log })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn spots(resident: usize, visitor: usize) -> Vec<ParkingSpot> {
        (0..resident + visitor)
            .map(|i| ParkingSpot {
                id: format!("ps{i}"),
                code: format!("V-{}", i + 1),
                is_occupied: false,
                current_vehicle_id: None,
                spot_type: if i < resident {
                    SpotType::Resident
                } else {
                    SpotType::Visitor
                },
            })
            .collect()
    }

    fn vehicle(plate: &str) -> Vehicle {
        Vehicle {
            id: "v1".into(),
            plate: plate.into(),
            model: "Corolla".into(),
            color: "Silver".into(),
            owner_id: None,
            owner_name: None,
            unit_id: None,
        }
    }

    #[test]
    fn resident_entry_takes_first_free_resident_spot() {
        let mut s = spots(3, 2);
        s[0].is_occupied = true;
        let plan = plan_entry("abc-1234", "u1", EntryType::Resident, &[], &s, Utc::now()).unwrap();

        assert_matches!(plan.allocation, Allocation::Assigned { ref spot_id, .. } if spot_id == "ps1");
        assert_eq!(plan.spot_update, Some(("ps1".into(), SpotUpdate::occupy("ABC-1234"))));
        assert_eq!(plan.log.spot_id.as_deref(), Some("ps1"));
        assert_eq!(plan.log.access_type, AccessType::Entry);
    }

    #[test]
    fn visitor_and_service_only_take_visitor_spots() {
        let s = spots(3, 2);
        for entry_type in [EntryType::Visitor, EntryType::Service] {
            let plan = plan_entry("XYZ-1", "u1", entry_type, &[], &s, Utc::now()).unwrap();
            assert_matches!(plan.allocation, Allocation::Assigned { ref spot_id, .. } if spot_id == "ps3");
        }
    }

    #[test]
    fn disabled_spots_are_never_allocated() {
        let mut s = spots(1, 0);
        s[0].spot_type = SpotType::Disabled;
        let plan = plan_entry("X", "u1", EntryType::Resident, &[], &s, Utc::now()).unwrap();
        assert_eq!(plan.allocation, Allocation::NoCapacity);
    }

    #[test]
    fn full_category_still_produces_a_log() {
        let mut s = spots(2, 1);
        s[0].is_occupied = true;
        s[1].is_occupied = true;
        let plan = plan_entry("ABC-1234", "u1", EntryType::Resident, &[], &s, Utc::now()).unwrap();

        assert_eq!(plan.allocation, Allocation::NoCapacity);
        assert!(plan.spot_update.is_none());
        assert!(plan.log.spot_id.is_none());
        assert_eq!(plan.log.notes.as_deref(), Some("Unit: u1 | Type: RESIDENT"));
    }

    #[test]
    fn registration_flag_comes_from_vehicle_list() {
        let s = spots(1, 1);
        let vehicles = [vehicle("ABC-1234")];
        let known = plan_entry(" abc-1234 ", "u1", EntryType::Resident, &vehicles, &s, Utc::now()).unwrap();
        assert!(known.log.is_registered);
        let unknown = plan_entry("ZZZ-0000", "u1", EntryType::Visitor, &vehicles, &s, Utc::now()).unwrap();
        assert!(!unknown.log.is_registered);
    }

    #[test]
    fn entry_requires_plate_and_unit() {
        let s = spots(1, 1);
        assert_matches!(
            plan_entry("  ", "u1", EntryType::Resident, &[], &s, Utc::now()),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            plan_entry("ABC", "", EntryType::Resident, &[], &s, Utc::now()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn exit_releases_every_matching_spot() {
        let mut s = spots(3, 0);
        SpotUpdate::occupy("ABC-1234").apply(&mut s[0]);
        SpotUpdate::occupy("ABC-1234").apply(&mut s[2]);
        SpotUpdate::occupy("OTHER").apply(&mut s[1]);

        let plan = plan_exit("abc-1234", &[], &s, Utc::now()).unwrap();
        assert_eq!(plan.released, vec!["ps0".to_string(), "ps2".to_string()]);
        assert_eq!(plan.log.spot_id.as_deref(), Some("ps0"));
        assert_eq!(plan.log.access_type, AccessType::Exit);
    }

    #[test]
    fn exit_without_match_still_logs() {
        let s = spots(2, 2);
        let plan = plan_exit("NOPE-0000", &[], &s, Utc::now()).unwrap();
        assert!(plan.released.is_empty());
        assert!(plan.log.spot_id.is_none());
        assert_eq!(plan.log.vehicle_plate, "NOPE-0000");
    }
}
