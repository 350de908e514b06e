//! Package registration validation and the pickup transition.

use crate::error::{require_non_blank, CoreError};
use crate::models::{NewPackage, Package, PackageStatus, PackageUpdate};
use crate::types::Timestamp;

/// All fields of a registration are required.
pub fn validate_new_package(input: &NewPackage) -> Result<(), CoreError> {
    require_non_blank("tracking_code", &input.tracking_code)?;
    require_non_blank("recipient_name", &input.recipient_name)?;
    require_non_blank("location", &input.location)?;
    require_non_blank("unit_id", &input.unit_id)?;
    Ok(())
}

/// Update that marks a package delivered, or `None` when it already is.
pub fn pickup_update(package: &Package, now: Timestamp) -> Option<PackageUpdate> {
    match package.status {
        PackageStatus::WaitingPickup => Some(PackageUpdate {
            status: Some(PackageStatus::Delivered),
            picked_up_at: Some(now),
            location: None,
        }),
        PackageStatus::Delivered => None,
    }
}
