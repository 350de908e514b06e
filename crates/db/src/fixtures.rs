//! Demo data used to seed an empty local store.

use chrono::Duration;
use condo_core::auth::DEFAULT_PASSWORD;
use condo_core::models::{
    AccessLog, AccessType, NewPermission, Package, PackageStatus, ParkingSpot, Person, Resource,
    RoleDefinition, RolePermission, SpotType, Unit, Vehicle,
};
use condo_core::password::hash_password;
use condo_core::roles::{ROLE_ADMIN, ROLE_RESIDENT, ROLE_STAFF};
use condo_core::types::Timestamp;

use crate::error::{StoreError, StoreResult};
use crate::local::Snapshot;

pub const ADMIN_ROLE_ID: &str = "role-admin";
pub const STAFF_ROLE_ID: &str = "role-staff";
pub const RESIDENT_ROLE_ID: &str = "role-resident";

const PARKING_SPOTS: usize = 20;
const RESIDENT_SPOTS: usize = 15;
const OCCUPANT_PLATES: [&str; 5] = ["ABC-1234", "XYZ-9876", "QWE-4321", "RTY-5678", "UIO-2468"];

/// Build the seed snapshot. Both credentialed users get [`DEFAULT_PASSWORD`].
pub fn generate(now: Timestamp) -> StoreResult<Snapshot> {
    let password_hash =
        hash_password(DEFAULT_PASSWORD).map_err(|e| StoreError::Seed(e.to_string()))?;

    Ok(Snapshot {
        units: units(),
        people: people(&password_hash),
        vehicles: vehicles(),
        parking_spots: parking_spots(),
        packages: vec![Package {
            id: "pkg1".into(),
            tracking_code: "AMZ-999".into(),
            received_at: now,
            received_by_staff_id: "p4".into(),
            unit_id: "u1".into(),
            recipient_name: "Roberto Santos".into(),
            location: "Portaria - Estante A".into(),
            status: PackageStatus::WaitingPickup,
            picked_up_at: None,
        }],
        logs: vec![
            AccessLog {
                id: "l1".into(),
                timestamp: now - Duration::hours(1),
                access_type: AccessType::Entry,
                vehicle_plate: "ABC-1234".into(),
                is_registered: true,
                spot_id: Some("ps0".into()),
                notes: None,
            },
            AccessLog {
                id: "l2".into(),
                timestamp: now - Duration::hours(2),
                access_type: AccessType::Exit,
                vehicle_plate: "XYZ-9876".into(),
                is_registered: true,
                spot_id: None,
                notes: None,
            },
        ],
        roles: roles(),
        permissions: permissions(),
    })
}

fn units() -> Vec<Unit> {
    [("u1", "A", "101", 1), ("u2", "A", "102", 1), ("u3", "A", "201", 2), ("u4", "B", "101", 1)]
        .into_iter()
        .map(|(id, block, number, floor)| Unit {
            id: id.into(),
            block: block.into(),
            number: number.into(),
            floor,
        })
        .collect()
}

fn roles() -> Vec<RoleDefinition> {
    vec![
        RoleDefinition {
            id: ADMIN_ROLE_ID.into(),
            name: ROLE_ADMIN.into(),
            description: Some("Full access to every area".into()),
        },
        RoleDefinition {
            id: STAFF_ROLE_ID.into(),
            name: ROLE_STAFF.into(),
            description: Some("Front desk and gate operators".into()),
        },
        RoleDefinition {
            id: RESIDENT_ROLE_ID.into(),
            name: ROLE_RESIDENT.into(),
            description: Some("Unit residents".into()),
        },
    ]
}

fn permissions() -> Vec<RolePermission> {
    let mut rows = Vec::new();
    for resource in Resource::ALL {
        rows.push(NewPermission::uniform(ADMIN_ROLE_ID.into(), resource, true));
    }
    for resource in Resource::ALL {
        let mut row = NewPermission::deny_all(STAFF_ROLE_ID.into(), resource);
        match resource {
            Resource::Dashboard | Resource::Units => row.can_view = true,
            Resource::People | Resource::Packages | Resource::Parking => {
                row.can_view = true;
                row.can_create = true;
                row.can_edit = true;
            }
            Resource::AccessControl | Resource::RoleManagement => {}
        }
        rows.push(row);
    }
    for resource in Resource::ALL {
        let mut row = NewPermission::deny_all(RESIDENT_ROLE_ID.into(), resource);
        row.can_view = matches!(resource, Resource::Dashboard | Resource::Packages);
        rows.push(row);
    }

    rows.into_iter()
        .map(|row| {
            let id = format!("perm-{}-{}", row.role_id.trim_start_matches("role-"), row.resource.as_str());
            row.into_permission(id)
        })
        .collect()
}

fn people(password_hash: &str) -> Vec<Person> {
    let person = |id: &str, name: &str, role_id: &str, email: &str, phone: &str| Person {
        id: id.into(),
        name: name.into(),
        role_id: role_id.into(),
        role_name: None,
        email: email.into(),
        phone: phone.into(),
        unit_id: None,
        avatar_url: None,
        username: None,
        password_hash: None,
        must_change_password: false,
        active: true,
    };

    vec![
        Person {
            username: Some("admin".into()),
            password_hash: Some(password_hash.into()),
            avatar_url: Some("https://picsum.photos/200".into()),
            ..person("p1", "Ana Silva", ADMIN_ROLE_ID, "admin@condominio.com.br", "(11) 99999-0101")
        },
        Person {
            unit_id: Some("u1".into()),
            avatar_url: Some("https://picsum.photos/201".into()),
            ..person("p2", "Roberto Santos", RESIDENT_ROLE_ID, "roberto@email.com", "(11) 99999-0102")
        },
        Person {
            unit_id: Some("u2".into()),
            avatar_url: Some("https://picsum.photos/202".into()),
            ..person("p3", "Carlos Dias", RESIDENT_ROLE_ID, "carlos@email.com", "(11) 99999-0103")
        },
        Person {
            username: Some("diana".into()),
            password_hash: Some(password_hash.into()),
            avatar_url: Some("https://picsum.photos/203".into()),
            ..person("p4", "Diana Prince", STAFF_ROLE_ID, "staff@condominio.com.br", "(11) 99999-0199")
        },
    ]
}

fn vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            id: "v1".into(),
            plate: "ABC-1234".into(),
            model: "Toyota Corolla".into(),
            color: "Silver".into(),
            owner_id: Some("p2".into()),
            owner_name: None,
            unit_id: Some("u1".into()),
        },
        Vehicle {
            id: "v2".into(),
            plate: "XYZ-9876".into(),
            model: "Honda Civic".into(),
            color: "Black".into(),
            owner_id: Some("p3".into()),
            owner_name: None,
            unit_id: Some("u2".into()),
        },
    ]
}

fn parking_spots() -> Vec<ParkingSpot> {
    (0..PARKING_SPOTS)
        .map(|i| {
            let occupant = OCCUPANT_PLATES.get(i).map(|plate| plate.to_string());
            ParkingSpot {
                id: format!("ps{i}"),
                code: format!("V-{}", i + 1),
                is_occupied: occupant.is_some(),
                current_vehicle_id: occupant,
                spot_type: if i < RESIDENT_SPOTS {
                    SpotType::Resident
                } else {
                    SpotType::Visitor
                },
            }
        })
        .collect()
}
