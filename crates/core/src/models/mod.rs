//! Entity records and their create / patch types.
//!
//! Each submodule contains:
//! - A `Serialize` + `Deserialize` entity struct (camelCase on the wire and
//!   in the local snapshot)
//! - A `New*` struct for inserts
//! - A patch type for updates where the entity is mutable

pub mod access_log;
pub mod package;
pub mod parking;
pub mod permission;
pub mod person;
pub mod role;
pub mod unit;
pub mod vehicle;

pub use access_log::{sort_newest_first, AccessLog, AccessType, NewAccessLog};
pub use package::{NewPackage, Package, PackageStatus, PackageUpdate};
pub use parking::{ParkingSpot, SpotType, SpotUpdate};
pub use permission::{Capability, NewPermission, Resource, RolePermission};
pub use person::{NewPerson, Person, PersonResponse, PersonUpdate};
pub use role::{NewRole, RoleDefinition, RoleUpdate};
pub use unit::{NewUnit, Unit};
pub use vehicle::{NewVehicle, Vehicle};
