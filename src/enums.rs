//! Bidirectional name/code tables for item attributes.
//!
//! Each table holds both directions built together from one dataset. Datasets
//! list entries as `"Name": code` and/or `"code": "Name"`; whichever direction
//! a dataset omits is filled in from the other so lookups succeed both ways.

use crate::catalog::identity::parse_code;
use crate::source::Dataset;
use anyhow::{Result, bail};
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute dimensions backed by an enum dataset.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EnumKind {
    Quality,
    Wear,
    Killstreak,
    Texture,
    Effect,
    /// Defindex to item display name.
    ItemName,
}

impl EnumKind {
    pub const ALL: [EnumKind; 6] = [
        EnumKind::Quality,
        EnumKind::Wear,
        EnumKind::Killstreak,
        EnumKind::Texture,
        EnumKind::Effect,
        EnumKind::ItemName,
    ];

    pub fn dataset(self) -> Dataset {
        match self {
            EnumKind::Quality => Dataset::Qualities,
            EnumKind::Wear => Dataset::Wears,
            EnumKind::Killstreak => Dataset::Killstreaks,
            EnumKind::Texture => Dataset::Textures,
            EnumKind::Effect => Dataset::Effects,
            EnumKind::ItemName => Dataset::ItemNames,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnumKind::Quality => "quality",
            EnumKind::Wear => "wear",
            EnumKind::Killstreak => "killstreak",
            EnumKind::Texture => "texture",
            EnumKind::Effect => "effect",
            EnumKind::ItemName => "item_name",
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// One attribute dimension, addressable by name or by code.
pub struct EnumTable {
    by_name: BTreeMap<String, u32>,
    by_code: BTreeMap<u32, String>,
}

impl EnumTable {
    /// Build from `(code, name)` pairs; the first pair wins on collisions.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        let mut table = EnumTable::default();
        for (code, name) in pairs {
            let name = name.into();
            table.by_name.entry(name.clone()).or_insert(code);
            table.by_code.entry(code).or_insert(name);
        }
        table
    }

    /// Parse a dataset object into a table.
    ///
    /// Code-keyed entries seed `by_code` and name-keyed entries seed
    /// `by_name`, so explicit entries always win over back-filled ones.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(entries) = value.as_object() else {
            bail!("enum dataset must be a JSON object");
        };

        let mut table = EnumTable::default();
        for (key, entry) in entries {
            match (parse_code(key), entry) {
                (Some(code), Value::String(name)) => {
                    table.by_code.entry(code).or_insert_with(|| name.clone());
                }
                (_, entry) => {
                    let Some(code) = entry_code(entry) else {
                        bail!("enum entry '{key}' has unsupported value {entry}");
                    };
                    table.by_name.entry(key.clone()).or_insert(code);
                }
            }
        }

        for (name, code) in &table.by_name {
            table.by_code.entry(*code).or_insert_with(|| name.clone());
        }
        for (code, name) in &table.by_code {
            table.by_name.entry(name.clone()).or_insert(*code);
        }
        Ok(table)
    }

    pub fn code(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, code: u32) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Iterates `(code, name)` in code order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.by_code.iter().map(|(code, name)| (*code, name.as_str()))
    }
}

// Paint kit datasets store codes as strings ("300"), the rest as numbers.
fn entry_code(entry: &Value) -> Option<u32> {
    match entry {
        Value::Number(number) => number.as_u64().and_then(|code| u32::try_from(code).ok()),
        Value::String(text) => parse_code(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn both_directions_from_mixed_dataset() {
        let table = EnumTable::from_value(&json!({
            "Normal": 0,
            "0": "Normal",
            "Unique": 6,
            "6": "Unique",
            "Strange": 11
        }))
        .unwrap();

        assert_eq!(table.code("Unique"), Some(6));
        assert_eq!(table.name(6), Some("Unique"));
        assert_eq!(table.name(11), Some("Strange"));
        assert_eq!(table.len(), 3);
        for (code, name) in table.iter() {
            assert_eq!(table.code(name), Some(code));
            assert_eq!(table.name(table.code(name).unwrap()), Some(name));
        }
    }

    #[test]
    fn string_codes_are_accepted() {
        let table = EnumTable::from_value(&json!({
            "Night Terror": "300",
            "Carpet Bomber Mk.II": "301"
        }))
        .unwrap();
        assert_eq!(table.code("Night Terror"), Some(300));
        assert_eq!(table.name(301), Some("Carpet Bomber Mk.II"));
    }

    #[test]
    fn code_keyed_only_dataset_fills_name_direction() {
        let table = EnumTable::from_value(&json!({
            "5021": "Mann Co. Supply Crate Key",
            "5022": "Mann Co. Supply Crate",
            "5041": "Mann Co. Supply Crate"
        }))
        .unwrap();
        assert_eq!(table.code("Mann Co. Supply Crate Key"), Some(5021));
        // Lowest code wins for repeated names.
        assert_eq!(table.code("Mann Co. Supply Crate"), Some(5022));
        assert_eq!(table.name(5041), Some("Mann Co. Supply Crate"));
    }

    #[test]
    fn explicit_entries_beat_back_filled_ones() {
        let table = EnumTable::from_value(&json!({
            "1": "Genuine",
            "Genuine": 1,
            "Vintage": 1
        }))
        .unwrap();
        assert_eq!(table.name(1), Some("Genuine"));
        assert_eq!(table.code("Vintage"), Some(1));
    }

    #[test]
    fn rejects_malformed_datasets() {
        assert!(EnumTable::from_value(&json!(["Unique"])).is_err());
        let err = EnumTable::from_value(&json!({ "Unique": true })).unwrap_err();
        assert!(err.to_string().contains("'Unique'"));
        assert!(EnumTable::from_value(&json!({ "Bad": -1 })).is_err());
    }

    #[test]
    fn from_pairs_keeps_first_entry() {
        let table = EnumTable::from_pairs([(1, "Factory New"), (1, "Mint"), (2, "Minimal Wear")]);
        assert_eq!(table.name(1), Some("Factory New"));
        assert_eq!(table.code("Mint"), Some(1));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn every_kind_maps_to_its_dataset() {
        let datasets: Vec<Dataset> = EnumKind::ALL.iter().map(|kind| kind.dataset()).collect();
        assert_eq!(datasets.len(), 6);
        assert_eq!(EnumKind::Texture.dataset(), Dataset::Textures);
        assert_eq!(EnumKind::ItemName.as_str(), "item_name");
    }
}
