//! File-backed store: one JSON snapshot holding every list.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use condo_core::models::{
    sort_newest_first, AccessLog, Capability, NewAccessLog, NewPackage, NewPerson, NewRole,
    NewUnit, NewVehicle, Package, PackageUpdate, ParkingSpot, Person, PersonUpdate,
    RoleDefinition, RolePermission, RoleUpdate, SpotUpdate, Unit, Vehicle,
};
use condo_core::permissions::default_rows_for_role;
use condo_core::types::new_id;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::fixtures;
use crate::store::CondoStore;

/// Fixed storage key; the snapshot file is `<key>.json`.
pub const STORAGE_KEY: &str = "condo_manager_db_v1";

/// The whole local database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub units: Vec<Unit>,
    pub people: Vec<Person>,
    pub vehicles: Vec<Vehicle>,
    pub parking_spots: Vec<ParkingSpot>,
    pub packages: Vec<Package>,
    pub logs: Vec<AccessLog>,
    #[serde(default)]
    pub roles: Vec<RoleDefinition>,
    #[serde(default)]
    pub permissions: Vec<RolePermission>,
}

impl Snapshot {
    fn role_name(&self, role_id: &str) -> Option<String> {
        self.roles
            .iter()
            .find(|r| r.id == role_id)
            .map(|r| r.name.clone())
    }

    fn resolve_person(&self, person: &Person) -> Person {
        Person {
            role_name: self.role_name(&person.role_id).or_else(|| person.role_name.clone()),
            ..person.clone()
        }
    }

    fn resolve_permission(&self, row: &RolePermission) -> RolePermission {
        RolePermission {
            role_name: self.role_name(&row.role_id),
            ..row.clone()
        }
    }
}

/// Store backed by a single JSON file.
///
/// Every call reads the whole snapshot, changes one list and rewrites the
/// file. Calls are serialized by an async mutex and delayed by `latency`.
pub struct LocalStore {
    path: PathBuf,
    latency: Duration,
    lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(data_dir: impl Into<PathBuf>, latency: Duration) -> Self {
        Self {
            path: data_dir.into().join(format!("{STORAGE_KEY}.json")),
            latency,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Load the snapshot, seeding it from fixtures when the file is absent.
    async fn load(&self) -> StoreResult<Snapshot> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "Seeding local store from fixtures");
                let snapshot = fixtures::generate(Utc::now())?;
                self.save(&snapshot).await?;
                Ok(snapshot)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a sibling temp file, then rename over the snapshot.
    async fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T + Send) -> StoreResult<T> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let snapshot = self.load().await?;
        Ok(f(&snapshot))
    }

    async fn write<T>(
        &self,
        f: impl FnOnce(&mut Snapshot) -> StoreResult<T> + Send,
    ) -> StoreResult<T> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let mut snapshot = self.load().await?;
        let out = f(&mut snapshot)?;
        self.save(&snapshot).await?;
        Ok(out)
    }
}

#[async_trait]
impl CondoStore for LocalStore {
    async fn list_units(&self) -> StoreResult<Vec<Unit>> {
        self.read(|s| s.units.clone()).await
    }

    async fn add_unit(&self, unit: NewUnit) -> StoreResult<Unit> {
        self.write(|s| {
            let unit = unit.into_unit(new_id());
            s.units.push(unit.clone());
            Ok(unit)
        })
        .await
    }

    async fn add_units(&self, units: Vec<NewUnit>) -> StoreResult<Vec<Unit>> {
        self.write(|s| {
            let units: Vec<Unit> = units.into_iter().map(|u| u.into_unit(new_id())).collect();
            s.units.extend(units.iter().cloned());
            Ok(units)
        })
        .await
    }

    async fn delete_unit(&self, id: &str) -> StoreResult<()> {
        self.write(|s| {
            let before = s.units.len();
            s.units.retain(|u| u.id != id);
            if s.units.len() == before {
                return Err(StoreError::not_found("Unit", id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_block(&self, block: &str) -> StoreResult<usize> {
        self.write(|s| {
            let before = s.units.len();
            s.units.retain(|u| u.block != block);
            Ok(before - s.units.len())
        })
        .await
    }

    async fn list_people(&self) -> StoreResult<Vec<Person>> {
        self.read(|s| s.people.iter().map(|p| s.resolve_person(p)).collect())
            .await
    }

    async fn find_person(&self, id: &str) -> StoreResult<Option<Person>> {
        self.read(|s| {
            s.people
                .iter()
                .find(|p| p.id == id)
                .map(|p| s.resolve_person(p))
        })
        .await
    }

    async fn find_person_by_username(&self, username: &str) -> StoreResult<Option<Person>> {
        self.read(|s| {
            s.people
                .iter()
                .find(|p| p.username.as_deref() == Some(username))
                .map(|p| s.resolve_person(p))
        })
        .await
    }

    async fn add_person(&self, person: NewPerson) -> StoreResult<Person> {
        self.write(|s| {
            let person = person.into_person(new_id());
            s.people.push(person.clone());
            Ok(s.resolve_person(&person))
        })
        .await
    }

    async fn update_person(&self, id: &str, update: PersonUpdate) -> StoreResult<Person> {
        self.write(|s| {
            let person = s
                .people
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::not_found("Person", id))?;
            update.apply(person);
            let person = person.clone();
            Ok(s.resolve_person(&person))
        })
        .await
    }

    async fn list_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        self.read(|s| s.vehicles.clone()).await
    }

    async fn add_vehicle(&self, vehicle: NewVehicle) -> StoreResult<Vehicle> {
        self.write(|s| {
            let vehicle = vehicle.into_vehicle(new_id());
            s.vehicles.push(vehicle.clone());
            Ok(vehicle)
        })
        .await
    }

    async fn delete_vehicle(&self, id: &str) -> StoreResult<()> {
        self.write(|s| {
            let before = s.vehicles.len();
            s.vehicles.retain(|v| v.id != id);
            if s.vehicles.len() == before {
                return Err(StoreError::not_found("Vehicle", id));
            }
            Ok(())
        })
        .await
    }

    async fn list_parking_spots(&self) -> StoreResult<Vec<ParkingSpot>> {
        self.read(|s| s.parking_spots.clone()).await
    }

    async fn update_parking_spot(&self, id: &str, update: SpotUpdate) -> StoreResult<ParkingSpot> {
        self.write(|s| {
            let spot = s
                .parking_spots
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::not_found("ParkingSpot", id))?;
            if spot.is_occupied && matches!(update, SpotUpdate::Occupy { .. }) {
                return Err(StoreError::SpotTaken { id: id.to_string() });
            }
            update.apply(spot);
            Ok(spot.clone())
        })
        .await
    }

    async fn list_packages(&self) -> StoreResult<Vec<Package>> {
        self.read(|s| {
            let mut packages = s.packages.clone();
            packages.sort_by(|a, b| b.received_at.cmp(&a.received_at));
            packages
        })
        .await
    }

    async fn find_package(&self, id: &str) -> StoreResult<Option<Package>> {
        self.read(|s| s.packages.iter().find(|p| p.id == id).cloned())
            .await
    }

    async fn add_package(&self, package: NewPackage) -> StoreResult<Package> {
        self.write(|s| {
            let package = package.into_package(new_id());
            s.packages.insert(0, package.clone());
            Ok(package)
        })
        .await
    }

    async fn update_package(&self, id: &str, update: PackageUpdate) -> StoreResult<Package> {
        self.write(|s| {
            let package = s
                .packages
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::not_found("Package", id))?;
            update.apply(package);
            Ok(package.clone())
        })
        .await
    }

    async fn list_access_logs(&self) -> StoreResult<Vec<AccessLog>> {
        self.read(|s| {
            let mut logs = s.logs.clone();
            sort_newest_first(&mut logs);
            logs
        })
        .await
    }

    async fn add_access_log(&self, log: NewAccessLog) -> StoreResult<AccessLog> {
        self.write(|s| {
            let log = log.into_log(new_id());
            s.logs.insert(0, log.clone());
            Ok(log)
        })
        .await
    }

    async fn list_roles(&self) -> StoreResult<Vec<RoleDefinition>> {
        self.read(|s| s.roles.clone()).await
    }

    async fn find_role(&self, id: &str) -> StoreResult<Option<RoleDefinition>> {
        self.read(|s| s.roles.iter().find(|r| r.id == id).cloned())
            .await
    }

    async fn add_role(&self, role: NewRole) -> StoreResult<RoleDefinition> {
        self.write(|s| {
            let role = role.into_role(new_id());
            s.permissions.extend(
                default_rows_for_role(&role.id)
                    .into_iter()
                    .map(|row| row.into_permission(new_id())),
            );
            s.roles.push(role.clone());
            Ok(role)
        })
        .await
    }

    async fn update_role(&self, id: &str, update: RoleUpdate) -> StoreResult<RoleDefinition> {
        self.write(|s| {
            let role = s
                .roles
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| StoreError::not_found("Role", id))?;
            update.apply(role);
            Ok(role.clone())
        })
        .await
    }

    async fn delete_role(&self, id: &str) -> StoreResult<()> {
        self.write(|s| {
            let before = s.roles.len();
            s.roles.retain(|r| r.id != id);
            if s.roles.len() == before {
                return Err(StoreError::not_found("Role", id));
            }
            s.permissions.retain(|p| p.role_id != id);
            Ok(())
        })
        .await
    }

    async fn list_permissions(&self) -> StoreResult<Vec<RolePermission>> {
        self.read(|s| s.permissions.iter().map(|p| s.resolve_permission(p)).collect())
            .await
    }

    async fn find_permission(&self, id: &str) -> StoreResult<Option<RolePermission>> {
        self.read(|s| {
            s.permissions
                .iter()
                .find(|p| p.id == id)
                .map(|p| s.resolve_permission(p))
        })
        .await
    }

    async fn update_permission(
        &self,
        id: &str,
        capability: Capability,
        value: bool,
    ) -> StoreResult<RolePermission> {
        self.write(|s| {
            let row = s
                .permissions
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::not_found("RolePermission", id))?;
            row.set(capability, value);
            let row = row.clone();
            Ok(s.resolve_permission(&row))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use condo_core::models::{AccessType, PackageStatus, Resource};

    use super::*;

    fn store(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::new(dir.path(), Duration::ZERO)
    }

    #[tokio::test]
    async fn seeds_on_first_access() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        assert!(!store.path().exists());

        let units = store.list_units().await.unwrap();
        assert_eq!(units.len(), 4);
        assert!(store.path().exists());
        assert_eq!(store.path().file_name().unwrap(), "condo_manager_db_v1.json");
    }

    #[tokio::test]
    async fn writes_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        store(&dir)
            .add_unit(NewUnit {
                block: "C".into(),
                number: "301".into(),
                floor: 3,
            })
            .await
            .unwrap();

        let units = store(&dir).list_units().await.unwrap();
        assert_eq!(units.len(), 5);
        assert!(units.iter().any(|u| u.block == "C" && u.number == "301"));
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        std::fs::write(store.path(), b"{ not json").unwrap();

        assert_matches!(store.list_units().await, Err(StoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn people_come_back_with_role_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let admin = store.find_person_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.role_name.as_deref(), Some("ADMIN"));
        assert!(store.find_person_by_username("Admin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_person_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let err = store
            .update_person("nope", PersonUpdate::default())
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::NotFound { entity: "Person", .. });
    }

    #[tokio::test]
    async fn logs_are_listed_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store
            .add_access_log(NewAccessLog {
                timestamp: Utc::now(),
                access_type: AccessType::Exit,
                vehicle_plate: "NEW-0001".into(),
                is_registered: false,
                spot_id: None,
                notes: None,
            })
            .await
            .unwrap();

        let logs = store.list_access_logs().await.unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].vehicle_plate, "NEW-0001");
        assert!(logs.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn role_lifecycle_manages_permission_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let role = store
            .add_role(NewRole {
                name: "SECURITY".into(),
                description: None,
            })
            .await
            .unwrap();
        let rows: Vec<_> = store
            .list_permissions()
            .await
            .unwrap()
            .into_iter()
            .filter(|p| p.role_id == role.id)
            .collect();
        assert_eq!(rows.len(), Resource::ALL.len());
        assert!(rows.iter().all(|r| !r.can_view && r.role_name.as_deref() == Some("SECURITY")));

        store.delete_role(&role.id).await.unwrap();
        let remaining = store.list_permissions().await.unwrap();
        assert!(remaining.iter().all(|p| p.role_id != role.id));
    }

    #[tokio::test]
    async fn update_permission_writes_one_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let before = store.find_permission("perm-staff-units").await.unwrap().unwrap();
        let after = store
            .update_permission("perm-staff-units", Capability::Delete, true)
            .await
            .unwrap();
        assert!(after.can_delete);
        assert_eq!(after.can_view, before.can_view);
        assert_eq!(after.can_create, before.can_create);
        assert_eq!(after.can_edit, before.can_edit);
    }

    #[tokio::test]
    async fn update_permission_leaves_other_rows_alone() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let before = store.list_permissions().await.unwrap();
        store
            .update_permission("perm-staff-units", Capability::Create, true)
            .await
            .unwrap();
        let after = store.list_permissions().await.unwrap();

        assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(&after) {
            assert_eq!(old.id, new.id);
            if old.id == "perm-staff-units" {
                let expected = RolePermission {
                    can_create: true,
                    ..old.clone()
                };
                assert_eq!(new, &expected);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[tokio::test]
    async fn occupying_a_taken_spot_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        // ps0 is occupied in the seed data.
        let err = store
            .update_parking_spot("ps0", SpotUpdate::occupy("NEW-0001"))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::SpotTaken { ref id } if id == "ps0");

        let spot = store.list_parking_spots().await.unwrap().remove(0);
        assert_eq!(spot.current_vehicle_id.as_deref(), Some("ABC-1234"));

        store.update_parking_spot("ps0", SpotUpdate::Release).await.unwrap();
        let spot = store
            .update_parking_spot("ps0", SpotUpdate::occupy("NEW-0001"))
            .await
            .unwrap();
        assert_eq!(spot.current_vehicle_id.as_deref(), Some("NEW-0001"));
    }

    #[tokio::test]
    async fn package_update_applies_status() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let updated = store
            .update_package(
                "pkg1",
                PackageUpdate {
                    status: Some(PackageStatus::Delivered),
                    picked_up_at: Some(Utc::now()),
                    location: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, PackageStatus::Delivered);
        assert!(updated.picked_up_at.is_some());
    }

    #[tokio::test]
    async fn delete_block_reports_count() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        assert_eq!(store.delete_block("A").await.unwrap(), 3);
        assert_eq!(store.delete_block("A").await.unwrap(), 0);
        assert_eq!(store.list_units().await.unwrap().len(), 1);
    }
}
