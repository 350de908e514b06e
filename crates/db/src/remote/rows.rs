//! Table row types for the remote backend.
//!
//! Columns are snake_case. Each table gets an explicit read row, an insert
//! body (no id, the backend assigns it) and, where the table is mutable, a
//! patch body that only serializes the columns being changed.

use condo_core::models::{
    AccessLog, AccessType, NewAccessLog, NewPackage, NewPerson, NewPermission, NewRole, NewUnit,
    NewVehicle, Package, PackageStatus, PackageUpdate, ParkingSpot, Person, PersonUpdate,
    Resource, RoleDefinition, RolePermission, RoleUpdate, SpotType, SpotUpdate, Unit, Vehicle,
};
use condo_core::types::Timestamp;
use serde::{Deserialize, Serialize};

pub const UNITS: &str = "units";
pub const PEOPLE: &str = "people";
pub const VEHICLES: &str = "vehicles";
pub const PARKING_SPOTS: &str = "parking_spots";
pub const PACKAGES: &str = "packages";
pub const ACCESS_LOGS: &str = "access_logs";
pub const ROLES: &str = "roles";
pub const ROLE_PERMISSIONS: &str = "role_permissions";

/// Select clause that embeds the role name through the `role_id` foreign key.
pub const WITH_ROLE_NAME: &str = "*,roles(name)";

/// Embedded `roles(name)` object.
#[derive(Debug, Deserialize)]
pub struct RoleName {
    pub name: String,
}

// ---------------------------------------------------------------------------
// units
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UnitRow {
    pub id: String,
    pub block: String,
    pub number: String,
    pub floor: i32,
}

impl From<UnitRow> for Unit {
    fn from(row: UnitRow) -> Self {
        Self {
            id: row.id,
            block: row.block,
            number: row.number,
            floor: row.floor,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnitInsert {
    pub block: String,
    pub number: String,
    pub floor: i32,
}

impl From<NewUnit> for UnitInsert {
    fn from(unit: NewUnit) -> Self {
        Self {
            block: unit.block,
            number: unit.number,
            floor: unit.floor,
        }
    }
}

// ---------------------------------------------------------------------------
// people
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PersonRow {
    pub id: String,
    pub name: String,
    pub role_id: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub unit_id: Option<String>,
    pub avatar_url: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    #[serde(default)]
    pub must_change_password: Option<bool>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub roles: Option<RoleName>,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            role_id: row.role_id,
            role_name: row.roles.map(|r| r.name),
            email: row.email,
            phone: row.phone.unwrap_or_default(),
            unit_id: row.unit_id,
            avatar_url: row.avatar_url,
            username: row.username,
            password_hash: row.password_hash,
            must_change_password: row.must_change_password.unwrap_or(false),
            active: row.active.unwrap_or(true),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersonInsert {
    pub name: String,
    pub role_id: String,
    pub email: String,
    pub phone: String,
    pub unit_id: Option<String>,
    pub avatar_url: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub must_change_password: bool,
    pub active: bool,
}

impl From<NewPerson> for PersonInsert {
    fn from(p: NewPerson) -> Self {
        Self {
            name: p.name,
            role_id: p.role_id,
            email: p.email,
            phone: p.phone,
            unit_id: p.unit_id,
            avatar_url: p.avatar_url,
            username: p.username,
            password_hash: p.password_hash,
            must_change_password: p.must_change_password,
            active: p.active,
        }
    }
}

/// `Some(None)` on a nullable column serializes as `null` and clears it.
#[derive(Debug, Default, Serialize)]
pub struct PersonPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub must_change_password: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl From<PersonUpdate> for PersonPatch {
    fn from(u: PersonUpdate) -> Self {
        Self {
            name: u.name,
            role_id: u.role_id,
            email: u.email,
            phone: u.phone,
            unit_id: u.unit_id,
            avatar_url: u.avatar_url,
            username: u.username,
            password_hash: u.password_hash,
            must_change_password: u.must_change_password,
            active: u.active,
        }
    }
}

// ---------------------------------------------------------------------------
// vehicles
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VehicleRow {
    pub id: String,
    pub plate: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub unit_id: Option<String>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Self {
            id: row.id,
            plate: row.plate,
            model: row.model.unwrap_or_default(),
            color: row.color.unwrap_or_default(),
            owner_id: row.owner_id,
            owner_name: row.owner_name,
            unit_id: row.unit_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleInsert {
    pub plate: String,
    pub model: String,
    pub color: String,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub unit_id: Option<String>,
}

impl From<NewVehicle> for VehicleInsert {
    fn from(v: NewVehicle) -> Self {
        Self {
            plate: v.plate,
            model: v.model,
            color: v.color,
            owner_id: v.owner_id,
            owner_name: v.owner_name,
            unit_id: v.unit_id,
        }
    }
}

// ---------------------------------------------------------------------------
// parking_spots
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SpotRow {
    pub id: String,
    pub code: String,
    pub is_occupied: bool,
    pub current_vehicle_id: Option<String>,
    #[serde(rename = "type")]
    pub spot_type: SpotType,
}

impl From<SpotRow> for ParkingSpot {
    fn from(row: SpotRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            is_occupied: row.is_occupied,
            current_vehicle_id: row.current_vehicle_id,
            spot_type: row.spot_type,
        }
    }
}

/// Both columns are always written so a release clears the occupant.
#[derive(Debug, Serialize)]
pub struct SpotPatch {
    pub is_occupied: bool,
    pub current_vehicle_id: Option<String>,
}

impl From<SpotUpdate> for SpotPatch {
    fn from(update: SpotUpdate) -> Self {
        match update {
            SpotUpdate::Occupy { vehicle } => Self {
                is_occupied: true,
                current_vehicle_id: Some(vehicle),
            },
            SpotUpdate::Release => Self {
                is_occupied: false,
                current_vehicle_id: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// packages
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PackageRow {
    pub id: String,
    pub tracking_code: String,
    pub received_at: Timestamp,
    pub received_by_staff_id: String,
    pub unit_id: String,
    pub recipient_name: String,
    #[serde(default)]
    pub location: Option<String>,
    pub status: PackageStatus,
    pub picked_up_at: Option<Timestamp>,
}

impl From<PackageRow> for Package {
    fn from(row: PackageRow) -> Self {
        Self {
            id: row.id,
            tracking_code: row.tracking_code,
            received_at: row.received_at,
            received_by_staff_id: row.received_by_staff_id,
            unit_id: row.unit_id,
            recipient_name: row.recipient_name,
            location: row.location.unwrap_or_default(),
            status: row.status,
            picked_up_at: row.picked_up_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PackageInsert {
    pub tracking_code: String,
    pub received_at: Timestamp,
    pub received_by_staff_id: String,
    pub unit_id: String,
    pub recipient_name: String,
    pub location: String,
    pub status: PackageStatus,
}

impl From<NewPackage> for PackageInsert {
    fn from(p: NewPackage) -> Self {
        Self {
            tracking_code: p.tracking_code,
            received_at: p.received_at,
            received_by_staff_id: p.received_by_staff_id,
            unit_id: p.unit_id,
            recipient_name: p.recipient_name,
            location: p.location,
            status: PackageStatus::WaitingPickup,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct PackagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PackageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picked_up_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl From<PackageUpdate> for PackagePatch {
    fn from(u: PackageUpdate) -> Self {
        Self {
            status: u.status,
            picked_up_at: u.picked_up_at,
            location: u.location,
        }
    }
}

// ---------------------------------------------------------------------------
// access_logs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AccessLogRow {
    pub id: String,
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub access_type: AccessType,
    pub vehicle_plate: String,
    pub is_registered: bool,
    pub spot_id: Option<String>,
    pub notes: Option<String>,
}

impl From<AccessLogRow> for AccessLog {
    fn from(row: AccessLogRow) -> Self {
        Self {
            id: row.id,
            timestamp: row.timestamp,
            access_type: row.access_type,
            vehicle_plate: row.vehicle_plate,
            is_registered: row.is_registered,
            spot_id: row.spot_id,
            notes: row.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccessLogInsert {
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub access_type: AccessType,
    pub vehicle_plate: String,
    pub is_registered: bool,
    pub spot_id: Option<String>,
    pub notes: Option<String>,
}

impl From<NewAccessLog> for AccessLogInsert {
    fn from(l: NewAccessLog) -> Self {
        Self {
            timestamp: l.timestamp,
            access_type: l.access_type,
            vehicle_plate: l.vehicle_plate,
            is_registered: l.is_registered,
            spot_id: l.spot_id,
            notes: l.notes,
        }
    }
}

// ---------------------------------------------------------------------------
// roles
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RoleRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<RoleRow> for RoleDefinition {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoleInsert {
    pub name: String,
    pub description: Option<String>,
}

impl From<NewRole> for RoleInsert {
    fn from(r: NewRole) -> Self {
        Self {
            name: r.name,
            description: r.description,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct RolePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl From<RoleUpdate> for RolePatch {
    fn from(u: RoleUpdate) -> Self {
        Self {
            name: u.name,
            description: u.description,
        }
    }
}

// ---------------------------------------------------------------------------
// role_permissions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PermissionRow {
    pub id: String,
    pub role_id: String,
    pub resource: Resource,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    #[serde(default)]
    pub roles: Option<RoleName>,
}

impl From<PermissionRow> for RolePermission {
    fn from(row: PermissionRow) -> Self {
        Self {
            id: row.id,
            role_id: row.role_id,
            role_name: row.roles.map(|r| r.name),
            resource: row.resource,
            can_view: row.can_view,
            can_create: row.can_create,
            can_edit: row.can_edit,
            can_delete: row.can_delete,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PermissionInsert {
    pub role_id: String,
    pub resource: Resource,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl From<NewPermission> for PermissionInsert {
    fn from(p: NewPermission) -> Self {
        Self {
            role_id: p.role_id,
            resource: p.resource,
            can_view: p.can_view,
            can_create: p.can_create,
            can_edit: p.can_edit,
            can_delete: p.can_delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn person_row_reads_joined_role_name() {
        let row: PersonRow = serde_json::from_value(json!({
            "id": "p1",
            "name": "Ana Silva",
            "role_id": "r1",
            "email": "admin@condominio.com.br",
            "phone": null,
            "unit_id": null,
            "avatar_url": null,
            "username": "admin",
            "password_hash": "$argon2id$...",
            "must_change_password": null,
            "roles": { "name": "ADMIN" }
        }))
        .unwrap();

        let person = Person::from(row);
        assert_eq!(person.role_name.as_deref(), Some("ADMIN"));
        assert_eq!(person.phone, "");
        assert!(!person.must_change_password);
        assert!(person.active);
    }

    #[test]
    fn person_patch_only_sends_changed_columns() {
        let patch = PersonPatch::from(PersonUpdate {
            active: Some(false),
            unit_id: Some(None),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(patch).unwrap(),
            json!({ "active": false, "unit_id": null })
        );
    }

    #[test]
    fn spot_release_clears_occupant() {
        let patch = SpotPatch::from(SpotUpdate::Release);
        assert_eq!(
            serde_json::to_value(patch).unwrap(),
            json!({ "is_occupied": false, "current_vehicle_id": null })
        );
    }

    #[test]
    fn permission_row_maps_resource() {
        let row: PermissionRow = serde_json::from_value(json!({
            "id": "x",
            "role_id": "r2",
            "resource": "access_control",
            "can_view": true,
            "can_create": false,
            "can_edit": false,
            "can_delete": false,
            "roles": { "name": "STAFF" }
        }))
        .unwrap();
        let perm = RolePermission::from(row);
        assert_eq!(perm.resource, Resource::AccessControl);
        assert_eq!(perm.role_name.as_deref(), Some("STAFF"));
    }

    #[test]
    fn access_log_insert_uses_type_column() {
        let insert = AccessLogInsert::from(NewAccessLog {
            timestamp: chrono::Utc::now(),
            access_type: AccessType::Entry,
            vehicle_plate: "ABC-1234".into(),
            is_registered: true,
            spot_id: Some("ps0".into()),
            notes: None,
        });
        let value = serde_json::to_value(insert).unwrap();
        assert_eq!(value["type"], "ENTRY");
        assert!(value.get("id").is_none());
    }
}
