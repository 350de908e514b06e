//! Person model (residents, staff, admins) and DTOs.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

fn default_active() -> bool {
    true
}

/// Full person record as persisted.
///
/// Contains the password hash -- NEVER return this to API callers directly.
/// Use [`PersonResponse`] for external-facing output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: EntityId,
    pub name: String,
    pub role_id: EntityId,
    /// Resolved role name (e.g. `"ADMIN"`, `"RESIDENT"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    pub email: String,
    pub phone: String,
    /// Only set for residents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Argon2id PHC string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub must_change_password: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Safe person representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: EntityId,
    pub name: String,
    pub role_id: EntityId,
    pub role_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub unit_id: Option<EntityId>,
    pub avatar_url: Option<String>,
    pub username: Option<String>,
    pub must_change_password: bool,
    pub active: bool,
}

impl From<&Person> for PersonResponse {
    fn from(p: &Person) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            role_id: p.role_id.clone(),
            role_name: p.role_name.clone(),
            email: p.email.clone(),
            phone: p.phone.clone(),
            unit_id: p.unit_id.clone(),
            avatar_url: p.avatar_url.clone(),
            username: p.username.clone(),
            must_change_password: p.must_change_password,
            active: p.active,
        }
    }
}

/// DTO for inserting a person. The password, if any, is already hashed.
#[derive(Debug, Clone, Default)]
pub struct NewPerson {
    pub name: String,
    pub role_id: EntityId,
    pub email: String,
    pub phone: String,
    pub unit_id: Option<EntityId>,
    pub avatar_url: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub must_change_password: bool,
    pub active: bool,
}

impl NewPerson {
    pub fn into_person(self, id: EntityId) -> Person {
        Person {
            id,
            name: self.name,
            role_id: self.role_id,
            role_name: None,
            email: self.email,
            phone: self.phone,
            unit_id: self.unit_id,
            avatar_url: self.avatar_url,
            username: self.username,
            password_hash: self.password_hash,
            must_change_password: self.must_change_password,
            active: self.active,
        }
    }
}

/// Partial update for a person. `None` leaves a field untouched; for the
/// nullable fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonUpdate {
    pub name: Option<String>,
    pub role_id: Option<EntityId>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub unit_id: Option<Option<EntityId>>,
    pub avatar_url: Option<Option<String>>,
    pub username: Option<Option<String>>,
    pub password_hash: Option<String>,
    pub must_change_password: Option<bool>,
    pub active: Option<bool>,
}

impl PersonUpdate {
    pub fn apply(&self, person: &mut Person) {
        if let Some(v) = &self.name {
            person.name = v.clone();
        }
        if let Some(v) = &self.role_id {
            person.role_id = v.clone();
        }
        if let Some(v) = &self.email {
            person.email = v.clone();
        }
        if let Some(v) = &self.phone {
            person.phone = v.clone();
        }
        if let Some(v) = &self.unit_id {
            person.unit_id = v.clone();
        }
        if let Some(v) = &self.avatar_url {
            person.avatar_url = v.clone();
        }
        if let Some(v) = &self.username {
            person.username = v.clone();
        }
        if let Some(v) = &self.password_hash {
            person.password_hash = Some(v.clone());
        }
        if let Some(v) = self.must_change_password {
            person.must_change_password = v;
        }
        if let Some(v) = self.active {
            person.active = v;
        }
    }
}
