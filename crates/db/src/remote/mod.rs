//! Store backed by a PostgREST-style table API.
//!
//! One table-scoped request per call against `{base_url}/rest/v1/{table}`.
//! Inserts and updates ask for `return=representation` so the persisted row
//! is read back. Non-2xx answers become [`StoreError::Backend`]; nothing is
//! retried.

pub mod rows;

use async_trait::async_trait;
use condo_core::models::{
    AccessLog, Capability, NewAccessLog, NewPackage, NewPerson, NewRole, NewUnit, NewVehicle,
    Package, PackageUpdate, ParkingSpot, Person, PersonUpdate, RoleDefinition, RolePermission,
    RoleUpdate, SpotUpdate, Unit, Vehicle,
};
use condo_core::permissions::default_rows_for_role;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::store::CondoStore;
use rows::*;

/// HTTP client for the remote tables.
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl RemoteStore {
    /// * `base_url` - project URL, e.g. `https://xyz.supabase.co`.
    /// * `key` - API key sent as both `apikey` and bearer token.
    pub fn new(base_url: String, key: String) -> StoreResult<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_url, key))
    }

    pub fn with_client(client: reqwest::Client, base_url: String, key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    // ---- table helpers ----

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> StoreResult<Vec<T>> {
        let response = self.request(Method::GET, table).query(query).send().await?;
        Self::parse_response(table, response).await
    }

    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        column: &str,
        value: &str,
    ) -> StoreResult<Option<T>> {
        let rows = self
            .select(
                table,
                &[
                    ("select", select.to_string()),
                    (column, eq(value)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> StoreResult<Vec<T>> {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        Self::parse_response(table, response).await
    }

    async fn insert_one<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> StoreResult<T> {
        self.insert::<B, T>(table, body)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Backend {
                status: 200,
                body: format!("insert into {table} returned no row"),
            })
    }

    /// PATCH one row by id; an empty representation means the id is unknown.
    async fn update_one<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        entity: &'static str,
        id: &str,
        select: &str,
        body: &B,
    ) -> StoreResult<T> {
        let filters = [("id", eq(id)), ("select", select.to_string())];
        self.update_where(table, &filters, body)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::not_found(entity, id))
    }

    /// PATCH every row matching `filters`, returning the updated rows.
    async fn update_where<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        body: &B,
    ) -> StoreResult<Vec<T>> {
        let response = self
            .request(Method::PATCH, table)
            .query(filters)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        Self::parse_response(table, response).await
    }

    /// DELETE rows where `column = value`, returning how many went away.
    async fn delete_where(&self, table: &str, column: &str, value: &str) -> StoreResult<usize> {
        let response = self
            .request(Method::DELETE, table)
            .query(&[(column, eq(value)), ("select", "id".to_string())])
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let rows: Vec<serde_json::Value> = Self::parse_response(table, response).await?;
        Ok(rows.len())
    }

    async fn delete_by_id(&self, table: &str, entity: &'static str, id: &str) -> StoreResult<()> {
        match self.delete_where(table, "id", id).await? {
            0 => Err(StoreError::not_found(entity, id)),
            _ => Ok(()),
        }
    }

    // ---- response helpers ----

    async fn ensure_success(
        table: &str,
        response: reqwest::Response,
    ) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(table, status = status.as_u16(), body = %body, "Remote table request failed");
            return Err(StoreError::Backend {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        table: &str,
        response: reqwest::Response,
    ) -> StoreResult<T> {
        let response = Self::ensure_success(table, response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// PostgREST equality filter value.
fn eq(value: &str) -> String {
    format!("eq.{value}")
}

fn all_columns() -> (&'static str, String) {
    ("select", "*".to_string())
}

fn with_role_name() -> (&'static str, String) {
    ("select", WITH_ROLE_NAME.to_string())
}

fn into_models<R, M: From<R>>(rows: Vec<R>) -> Vec<M> {
    rows.into_iter().map(M::from).collect()
}

#[async_trait]
impl CondoStore for RemoteStore {
    async fn list_units(&self) -> StoreResult<Vec<Unit>> {
        let rows: Vec<UnitRow> = self.select(UNITS, &[all_columns()]).await?;
        Ok(into_models(rows))
    }

    async fn add_unit(&self, unit: NewUnit) -> StoreResult<Unit> {
        let row: UnitRow = self.insert_one(UNITS, &UnitInsert::from(unit)).await?;
        Ok(row.into())
    }

    async fn add_units(&self, units: Vec<NewUnit>) -> StoreResult<Vec<Unit>> {
        if units.is_empty() {
            return Ok(Vec::new());
        }
        let body: Vec<UnitInsert> = units.into_iter().map(UnitInsert::from).collect();
        let rows: Vec<UnitRow> = self.insert(UNITS, &body).await?;
        Ok(into_models(rows))
    }

    async fn delete_unit(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id(UNITS, "Unit", id).await
    }

    async fn delete_block(&self, block: &str) -> StoreResult<usize> {
        self.delete_where(UNITS, "block", block).await
    }

    async fn list_people(&self) -> StoreResult<Vec<Person>> {
        let rows: Vec<PersonRow> = self.select(PEOPLE, &[with_role_name()]).await?;
        Ok(into_models(rows))
    }

    async fn find_person(&self, id: &str) -> StoreResult<Option<Person>> {
        let row: Option<PersonRow> = self.select_one(PEOPLE, WITH_ROLE_NAME, "id", id).await?;
        Ok(row.map(Person::from))
    }

    async fn find_person_by_username(&self, username: &str) -> StoreResult<Option<Person>> {
        let row: Option<PersonRow> = self
            .select_one(PEOPLE, WITH_ROLE_NAME, "username", username)
            .await?;
        Ok(row.map(Person::from))
    }

    async fn add_person(&self, person: NewPerson) -> StoreResult<Person> {
        let inserted: PersonRow = self.insert_one(PEOPLE, &PersonInsert::from(person)).await?;
        // The insert representation carries no join; re-read for the role name.
        let id = inserted.id.clone();
        Ok(self
            .find_person(&id)
            .await?
            .unwrap_or_else(|| inserted.into()))
    }

    async fn update_person(&self, id: &str, update: PersonUpdate) -> StoreResult<Person> {
        let row: PersonRow = self
            .update_one(PEOPLE, "Person", id, WITH_ROLE_NAME, &PersonPatch::from(update))
            .await?;
        Ok(row.into())
    }

    async fn list_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        let rows: Vec<VehicleRow> = self.select(VEHICLES, &[all_columns()]).await?;
        Ok(into_models(rows))
    }

    async fn add_vehicle(&self, vehicle: NewVehicle) -> StoreResult<Vehicle> {
        let row: VehicleRow = self
            .insert_one(VEHICLES, &VehicleInsert::from(vehicle))
            .await?;
        Ok(row.into())
    }

    async fn delete_vehicle(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id(VEHICLES, "Vehicle", id).await
    }

    async fn list_parking_spots(&self) -> StoreResult<Vec<ParkingSpot>> {
        let rows: Vec<SpotRow> = self.select(PARKING_SPOTS, &[all_columns()]).await?;
        Ok(into_models(rows))
    }

    async fn update_parking_spot(&self, id: &str, update: SpotUpdate) -> StoreResult<ParkingSpot> {
        let occupy = matches!(update, SpotUpdate::Occupy { .. });
        let mut filters = vec![("id", eq(id)), ("select", "*".to_string())];
        if occupy {
            filters.push(("is_occupied", eq("false")));
        }

        let rows: Vec<SpotRow> = self
            .update_where(PARKING_SPOTS, &filters, &SpotPatch::from(update))
            .await?;
        if let Some(row) = rows.into_iter().next() {
            return Ok(row.into());
        }

        // Nothing matched: either the id is unknown or the spot was already taken.
        let exists = self
            .select_one::<serde_json::Value>(PARKING_SPOTS, "id", "id", id)
            .await?
            .is_some();
        if occupy && exists {
            Err(StoreError::SpotTaken { id: id.to_string() })
        } else {
            Err(StoreError::not_found("ParkingSpot", id))
        }
    }

    async fn list_packages(&self) -> StoreResult<Vec<Package>> {
        let rows: Vec<PackageRow> = self
            .select(
                PACKAGES,
                &[all_columns(), ("order", "received_at.desc".to_string())],
            )
            .await?;
        Ok(into_models(rows))
    }

    async fn find_package(&self, id: &str) -> StoreResult<Option<Package>> {
        let row: Option<PackageRow> = self.select_one(PACKAGES, "*", "id", id).await?;
        Ok(row.map(Package::from))
    }

    async fn add_package(&self, package: NewPackage) -> StoreResult<Package> {
        let row: PackageRow = self
            .insert_one(PACKAGES, &PackageInsert::from(package))
            .await?;
        Ok(row.into())
    }

    async fn update_package(&self, id: &str, update: PackageUpdate) -> StoreResult<Package> {
        let row: PackageRow = self
            .update_one(PACKAGES, "Package", id, "*", &PackagePatch::from(update))
            .await?;
        Ok(row.into())
    }

    async fn list_access_logs(&self) -> StoreResult<Vec<AccessLog>> {
        let rows: Vec<AccessLogRow> = self
            .select(
                ACCESS_LOGS,
                &[all_columns(), ("order", "timestamp.desc".to_string())],
            )
            .await?;
        Ok(into_models(rows))
    }

    async fn add_access_log(&self, log: NewAccessLog) -> StoreResult<AccessLog> {
        let row: AccessLogRow = self
            .insert_one(ACCESS_LOGS, &AccessLogInsert::from(log))
            .await?;
        Ok(row.into())
    }

    async fn list_roles(&self) -> StoreResult<Vec<RoleDefinition>> {
        let rows: Vec<RoleRow> = self
            .select(ROLES, &[all_columns(), ("order", "name.asc".to_string())])
            .await?;
        Ok(into_models(rows))
    }

    async fn find_role(&self, id: &str) -> StoreResult<Option<RoleDefinition>> {
        let row: Option<RoleRow> = self.select_one(ROLES, "*", "id", id).await?;
        Ok(row.map(RoleDefinition::from))
    }

    async fn add_role(&self, role: NewRole) -> StoreResult<RoleDefinition> {
        let row: RoleRow = self.insert_one(ROLES, &RoleInsert::from(role)).await?;
        let defaults: Vec<PermissionInsert> = default_rows_for_role(&row.id)
            .into_iter()
            .map(PermissionInsert::from)
            .collect();
        let _: Vec<serde_json::Value> = self.insert(ROLE_PERMISSIONS, &defaults).await?;
        tracing::debug!(role_id = %row.id, rows = defaults.len(), "Seeded permission rows for new role");
        Ok(row.into())
    }

    async fn update_role(&self, id: &str, update: RoleUpdate) -> StoreResult<RoleDefinition> {
        let row: RoleRow = self
            .update_one(ROLES, "Role", id, "*", &RolePatch::from(update))
            .await?;
        Ok(row.into())
    }

    async fn delete_role(&self, id: &str) -> StoreResult<()> {
        self.delete_where(ROLE_PERMISSIONS, "role_id", id).await?;
        self.delete_by_id(ROLES, "Role", id).await
    }

    async fn list_permissions(&self) -> StoreResult<Vec<RolePermission>> {
        let rows: Vec<PermissionRow> = self.select(ROLE_PERMISSIONS, &[with_role_name()]).await?;
        Ok(into_models(rows))
    }

    async fn find_permission(&self, id: &str) -> StoreResult<Option<RolePermission>> {
        let row: Option<PermissionRow> = self
            .select_one(ROLE_PERMISSIONS, WITH_ROLE_NAME, "id", id)
            .await?;
        Ok(row.map(RolePermission::from))
    }

    async fn update_permission(
        &self,
        id: &str,
        capability: Capability,
        value: bool,
    ) -> StoreResult<RolePermission> {
        let mut body = serde_json::Map::new();
        body.insert(
            format!("can_{}", capability.as_str()),
            serde_json::Value::Bool(value),
        );
        let row: PermissionRow = self
            .update_one(ROLE_PERMISSIONS, "RolePermission", id, WITH_ROLE_NAME, &body)
            .await?;
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_urls_ignore_trailing_slash() {
        let store = RemoteStore::with_client(
            reqwest::Client::new(),
            "https://db.example.com/".into(),
            "anon".into(),
        );
        assert_eq!(
            store.table_url(PARKING_SPOTS),
            "https://db.example.com/rest/v1/parking_spots"
        );
    }

    #[test]
    fn equality_filter() {
        assert_eq!(eq("u1"), "eq.u1");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_request_error() {
        let store = RemoteStore::with_client(
            reqwest::Client::new(),
            "http://127.0.0.1:9".into(),
            "anon".into(),
        );
        let err = store.list_units().await.unwrap_err();
        assert!(matches!(err, StoreError::Request(_)));
    }
}
