//! Bulk unit generation and (block, number) uniqueness checks.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::models::{NewUnit, Unit};

/// Apartment numbers are `floor * 100 + seq`, so a floor holds at most 99.
pub const MAX_APTS_PER_FLOOR: u32 = 99;

/// Upper bound on floors per generation request.
pub const MAX_FLOORS: u32 = 200;

/// Split a comma-separated block list: trimmed, upper-cased, empties and
/// repeats dropped, first-seen order kept.
pub fn parse_block_names(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    input
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Synthesize `blocks x floors x apts_per_floor` units.
///
/// Floors are numbered from 1 and apartments within a floor from 1, giving
/// numbers like 101..1xx, 201..2xx.
pub fn generate_units(
    blocks_input: &str,
    floors: u32,
    apts_per_floor: u32,
) -> Result<Vec<NewUnit>, CoreError> {
    let blocks = parse_block_names(blocks_input);
    if blocks.is_empty() {
        return Err(CoreError::Validation(
            "At least one block name is required".into(),
        ));
    }
    if floors == 0 || floors > MAX_FLOORS {
        return Err(CoreError::Validation(format!(
            "floors must be between 1 and {MAX_FLOORS}"
        )));
    }
    if apts_per_floor == 0 || apts_per_floor > MAX_APTS_PER_FLOOR {
        return Err(CoreError::Validation(format!(
            "apts_per_floor must be between 1 and {MAX_APTS_PER_FLOOR}"
        )));
    }

    let mut units = Vec::with_capacity(blocks.len() * (floors * apts_per_floor) as usize);
    for block in &blocks {
        for floor in 1..=floors {
            for seq in 1..=apts_per_floor {
                units.push(NewUnit {
                    block: block.clone(),
                    number: (floor * 100 + seq).to_string(),
                    floor: floor as i32,
                });
            }
        }
    }
    Ok(units)
}

/// Reject new units whose (block, number) already exists, or that repeat
/// within the batch.
pub fn ensure_unique(existing: &[Unit], new_units: &[NewUnit]) -> Result<(), CoreError> {
    let mut taken: HashSet<(String, String)> = existing
        .iter()
        .map(|u| (u.block.to_uppercase(), u.number.clone()))
        .collect();

    let mut duplicates = Vec::new();
    for unit in new_units {
        let key = (unit.block.to_uppercase(), unit.number.clone());
        if !taken.insert(key) {
            duplicates.push(format!("{}-{}", unit.block, unit.number));
        }
    }

    if duplicates.is_empty() {
        return Ok(());
    }
    duplicates.truncate(10);
    Err(CoreError::Conflict(format!(
        "Units already exist: {}",
        duplicates.join(", ")
    )))
}
