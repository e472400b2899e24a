//! Curated exceptions that short-circuit name resolution.
//!
//! Some display names map to several definitions where the general search
//! would pick the wrong one for trading purposes (promotional copies, legacy
//! currency items). These tables pin the answer. They ship built in and can be
//! replaced by an `overrides.json` next to the datasets.

use crate::catalog::identity::{Defindex, parse_code};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUILTIN_DEFINDEXES: &[(&str, u32)] = &[
    ("Mann Co. Supply Crate Key", 5021),
    ("Scrap Metal", 5000),
    ("Reclaimed Metal", 5001),
    ("Refined Metal", 5002),
    ("Name Tag", 5020),
    ("Description Tag", 5044),
    ("Tour of Duty Ticket", 725),
    ("Lugermorph", 160),
    ("Big Kill", 161),
];

const BUILTIN_NAMES: &[(u32, &str)] = &[
    (5021, "Mann Co. Supply Crate Key"),
    (20002, "Specialized Killstreak Fabricator"),
    (20003, "Professional Killstreak Fabricator"),
];

#[derive(Debug, Default, Deserialize)]
struct OverridesFile {
    #[serde(default)]
    defindexes: BTreeMap<String, Defindex>,
    #[serde(default)]
    names: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// Name→defindex and defindex→name exceptions consulted before any search.
pub struct Overrides {
    name_to_defindex: BTreeMap<String, Defindex>,
    defindex_to_name: BTreeMap<Defindex, String>,
}

impl Overrides {
    /// The tables compiled into the crate.
    pub fn builtin() -> Self {
        Self {
            name_to_defindex: BUILTIN_DEFINDEXES
                .iter()
                .map(|(name, defindex)| (name.to_string(), Defindex(*defindex)))
                .collect(),
            defindex_to_name: BUILTIN_NAMES
                .iter()
                .map(|(defindex, name)| (Defindex(*defindex), name.to_string()))
                .collect(),
        }
    }

    pub fn new(
        name_to_defindex: BTreeMap<String, Defindex>,
        defindex_to_name: BTreeMap<Defindex, String>,
    ) -> Self {
        Self {
            name_to_defindex,
            defindex_to_name,
        }
    }

    /// Load `{"defindexes": {name: defindex}, "names": {defindex: name}}`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file: OverridesFile =
            serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;

        let mut defindex_to_name = BTreeMap::new();
        for (key, name) in file.names {
            let Some(code) = parse_code(&key) else {
                bail!("{}: names key '{key}' is not a defindex", path.display());
            };
            defindex_to_name.insert(Defindex(code), name);
        }

        Ok(Self {
            name_to_defindex: file.defindexes,
            defindex_to_name,
        })
    }

    pub fn defindex(&self, name: &str) -> Option<Defindex> {
        self.name_to_defindex.get(name).copied()
    }

    pub fn name(&self, defindex: Defindex) -> Option<&str> {
        self.defindex_to_name.get(&defindex).map(String::as_str)
    }
}
