//! The data-access contract shared by the local and remote stores.

use async_trait::async_trait;
use condo_core::models::{
    AccessLog, Capability, NewAccessLog, NewPackage, NewPerson, NewRole, NewUnit, NewVehicle,
    Package, PackageUpdate, ParkingSpot, Person, PersonUpdate, RoleDefinition, RolePermission,
    RoleUpdate, SpotUpdate, Unit, Vehicle,
};

use crate::error::StoreResult;

/// Per-entity CRUD used by the HTTP handlers.
///
/// Both implementations honour the same semantics: updates of a missing id
/// fail with [`StoreError::NotFound`](crate::StoreError::NotFound), people
/// and permission rows come back with their role name resolved, packages
/// are listed newest first and access logs by timestamp descending.
#[async_trait]
pub trait CondoStore: Send + Sync {
    // Units
    async fn list_units(&self) -> StoreResult<Vec<Unit>>;
    async fn add_unit(&self, unit: NewUnit) -> StoreResult<Unit>;
    /// Insert many units in one write.
    async fn add_units(&self, units: Vec<NewUnit>) -> StoreResult<Vec<Unit>>;
    async fn delete_unit(&self, id: &str) -> StoreResult<()>;
    /// Delete every unit of a block, returning how many were removed.
    async fn delete_block(&self, block: &str) -> StoreResult<usize>;

    // People
    async fn list_people(&self) -> StoreResult<Vec<Person>>;
    async fn find_person(&self, id: &str) -> StoreResult<Option<Person>>;
    /// Exact, case-sensitive username match.
    async fn find_person_by_username(&self, username: &str) -> StoreResult<Option<Person>>;
    async fn add_person(&self, person: NewPerson) -> StoreResult<Person>;
    async fn update_person(&self, id: &str, update: PersonUpdate) -> StoreResult<Person>;

    // Vehicles
    async fn list_vehicles(&self) -> StoreResult<Vec<Vehicle>>;
    async fn add_vehicle(&self, vehicle: NewVehicle) -> StoreResult<Vehicle>;
    async fn delete_vehicle(&self, id: &str) -> StoreResult<()>;

    // Parking
    /// Spots in stored order; allocation scans in this order.
    async fn list_parking_spots(&self) -> StoreResult<Vec<ParkingSpot>>;
    async fn update_parking_spot(&self, id: &str, update: SpotUpdate) -> StoreResult<ParkingSpot>;

    // Packages
    async fn list_packages(&self) -> StoreResult<Vec<Package>>;
    async fn find_package(&self, id: &str) -> StoreResult<Option<Package>>;
    async fn add_package(&self, package: NewPackage) -> StoreResult<Package>;
    async fn update_package(&self, id: &str, update: PackageUpdate) -> StoreResult<Package>;

    // Access logs (append-only)
    async fn list_access_logs(&self) -> StoreResult<Vec<AccessLog>>;
    async fn add_access_log(&self, log: NewAccessLog) -> StoreResult<AccessLog>;

    // Roles
    async fn list_roles(&self) -> StoreResult<Vec<RoleDefinition>>;
    async fn find_role(&self, id: &str) -> StoreResult<Option<RoleDefinition>>;
    /// Insert a role together with one all-false permission row per resource.
    async fn add_role(&self, role: NewRole) -> StoreResult<RoleDefinition>;
    async fn update_role(&self, id: &str, update: RoleUpdate) -> StoreResult<RoleDefinition>;
    /// Delete a role and its permission rows.
    async fn delete_role(&self, id: &str) -> StoreResult<()>;

    // Permissions
    async fn list_permissions(&self) -> StoreResult<Vec<RolePermission>>;
    async fn find_permission(&self, id: &str) -> StoreResult<Option<RolePermission>>;
    /// Write exactly one capability column of one row.
    async fn update_permission(
        &self,
        id: &str,
        capability: Capability,
        value: bool,
    ) -> StoreResult<RolePermission>;
}
