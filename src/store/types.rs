//! Hero record types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A stored hero, keyed by name and universe.
///
/// Records written by older versions may lack either key field; those
/// load as empty strings. Keys this type does not know are carried in
/// `extra` so rewriting the document keeps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    /// Hero name, first half of the key.
    #[serde(default)]
    pub super_hero_name: String,
    /// Universe, second half of the key.
    #[serde(default)]
    pub universe: String,
    /// Powers in submission order.
    #[serde(default)]
    pub super_powers: Vec<String>,
    /// Any other keys found on the stored record.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Hero {
    /// Create a hero with a single power.
    pub fn new(
        name: impl Into<String>,
        universe: impl Into<String>,
        power: impl Into<String>,
    ) -> Self {
        Self {
            super_hero_name: name.into(),
            universe: universe.into(),
            super_powers: vec![power.into()],
            extra: BTreeMap::new(),
        }
    }

    /// Check whether this hero is stored under the given key.
    pub fn matches(&self, name: &str, universe: &str) -> bool {
        self.super_hero_name == name && self.universe == universe
    }
}
