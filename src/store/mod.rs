//! Hero record store.
//!
//! This module handles:
//! - Hero record types and the composite (name, universe) key
//! - Pure record operations over an in-memory list of heroes
//! - The on-disk JSON document and its read-modify-write cycle

pub mod document;
pub mod records;
pub mod types;

pub use document::{HeroStore, StoreOp};
pub use records::{delete_record, find_index, rename_record, upsert_power, UpsertOutcome};
pub use types::Hero;
