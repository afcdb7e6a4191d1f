//! Record operations over an in-memory list of heroes.
//!
//! Lookups are first match in document order. The list is never sorted.

use crate::error::StoreError;

use super::types::Hero;

/// Result of [`upsert_power`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new hero was appended.
    Created,
    /// The power was appended to an existing hero.
    Extended,
}

/// Find the index of the first hero stored under (name, universe).
pub fn find_index(records: &[Hero], name: &str, universe: &str) -> Option<usize> {
    records.iter().position(|hero| hero.matches(name, universe))
}

/// Append a power to the matching hero, creating the hero if absent.
pub fn upsert_power(
    records: &mut Vec<Hero>,
    name: &str,
    universe: &str,
    power: &str,
) -> UpsertOutcome {
    match find_index(records, name, universe) {
        Some(index) => {
            records[index].super_powers.push(power.to_string());
            UpsertOutcome::Extended
        }
        None => {
            records.push(Hero::new(name, universe, power));
            UpsertOutcome::Created
        }
    }
}

/// Move a hero to a new key, keeping its powers.
///
/// Fails with `NotFound` when nothing is stored under the current key and
/// with `DuplicateKey` when a different hero already holds the new key.
pub fn rename_record<'a>(
    records: &'a mut [Hero],
    current_name: &str,
    current_universe: &str,
    new_name: &str,
    new_universe: &str,
) -> Result<&'a Hero, StoreError> {
    let index =
        find_index(records, current_name, current_universe).ok_or_else(|| StoreError::NotFound {
            name: current_name.to_string(),
            universe: current_universe.to_string(),
        })?;

    if let Some(existing) = find_index(records, new_name, new_universe) {
        if existing != index {
            return Err(StoreError::DuplicateKey {
                name: new_name.to_string(),
                universe: new_universe.to_string(),
            });
        }
    }

    let hero = &mut records[index];
    hero.super_hero_name = new_name.to_string();
    hero.universe = new_universe.to_string();
    Ok(hero)
}

/// Remove the first hero stored under (name, universe).
///
/// Returns `true` if a hero was removed.
pub fn delete_record(records: &mut Vec<Hero>, name: &str, universe: &str) -> bool {
    match find_index(records, name, universe) {
        Some(index) => {
            records.remove(index);
            true
        }
        None => false,
    }
}
