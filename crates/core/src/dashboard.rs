//! Dashboard statistics, computed as single-pass reductions.

use serde::Serialize;

use crate::models::{Package, PackageStatus, ParkingSpot, Person, SpotType};
use crate::roles::is_resident;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_spots: usize,
    pub occupied_spots: usize,
    /// Occupied share of all spots, in percent (0 when there are no spots).
    pub occupancy_rate: f64,
    pub pending_packages: usize,
    /// Visitor spots currently occupied.
    pub active_visitors: usize,
    pub total_residents: usize,
}

pub fn compute_stats(spots: &[ParkingSpot], packages: &[Package], people: &[Person]) -> DashboardStats {
    let (occupied_spots, active_visitors) = spots
        .iter()
        .filter(|s| s.is_occupied)
        .fold((0, 0), |(occupied, visitors), s| {
            let visitor = usize::from(s.spot_type == SpotType::Visitor);
            (occupied + 1, visitors + visitor)
        });

    let pending_packages = packages
        .iter()
        .filter(|p| p.status == PackageStatus::WaitingPickup)
        .count();

    let total_residents = people
        .iter()
        .filter(|p| p.role_name.as_deref().is_some_and(is_resident))
        .count();

    let occupancy_rate = if spots.is_empty() {
        0.0
    } else {
        occupied_spots as f64 * 100.0 / spots.len() as f64
    };

    DashboardStats {
        total_spots: spots.len(),
        occupied_spots,
        occupancy_rate,
        pending_packages,
        active_visitors,
        total_residents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewPerson;

    fn spot(i: usize, occupied: bool, spot_type: SpotType) -> ParkingSpot {
        ParkingSpot {
            id: format!("ps{i}"),
            code: format!("V-{i}"),
            is_occupied: occupied,
            current_vehicle_id: occupied.then(|| format!("P{i}")),
            spot_type,
        }
    }

    #[test]
    fn empty_inputs_give_zeroes() {
        let stats = compute_stats(&[], &[], &[]);
        assert_eq!(stats.total_spots, 0);
        assert_eq!(stats.occupancy_rate, 0.0);
    }

    #[test]
    fn counts_occupancy_visitors_and_residents() {
        let spots = vec![
            spot(0, true, SpotType::Resident),
            spot(1, true, SpotType::Visitor),
            spot(2, false, SpotType::Visitor),
            spot(3, false, SpotType::Resident),
        ];
        let mut resident = NewPerson::default().into_person("p1".into());
        resident.role_name = Some("RESIDENT".into());
        let mut staff = NewPerson::default().into_person("p2".into());
        staff.role_name = Some("STAFF".into());

        let stats = compute_stats(&spots, &[], &[resident, staff]);
        assert_eq!(stats.occupied_spots, 2);
        assert_eq!(stats.active_visitors, 1);
        assert_eq!(stats.occupancy_rate, 50.0);
        assert_eq!(stats.total_residents, 1);
    }
}
