//! Deserializable representation of the `items` dataset.
//!
//! Raw records carry dozens of fields in the upstream schema; only the ones the
//! resolver reads are modeled, and `SchemaItem` is the stripped record the
//! index keeps. Validation against `schema/items.schema.json` happens before
//! deserialization so a malformed dataset reports every offending entry.

use crate::catalog::identity::Defindex;
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

const ITEMS_SCHEMA: &str = include_str!("../../schema/items.schema.json");

// Raw names that collide on backpack.tf between the two crafted fabricator tiers.
const PROFESSIONAL_FABRICATOR: Defindex = Defindex(20003);
const SPECIALIZED_FABRICATOR: Defindex = Defindex(20002);

const UPGRADEABLE_PREFIX: &str = "Upgradeable ";

#[derive(Clone, Debug, Deserialize)]
/// One entry of the `items` dataset, limited to the fields resolution needs.
pub struct RawSchemaItem {
    pub name: String,
    #[serde(default)]
    pub proper_name: bool,
    pub defindex: Defindex,
    pub item_class: String,
    pub item_type_name: String,
    pub item_name: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// Minimal immutable record stored in the catalog index.
pub struct SchemaItem {
    /// Internal schema name, e.g. `Upgradeable TF_WEAPON_ROCKETLAUNCHER`.
    pub name: String,
    pub proper_name: bool,
    pub defindex: Defindex,
    pub item_class: String,
    pub item_type_name: String,
    /// Display name as shown to players.
    pub item_name: String,
}

impl From<RawSchemaItem> for SchemaItem {
    fn from(raw: RawSchemaItem) -> Self {
        SchemaItem {
            name: raw.name,
            proper_name: raw.proper_name,
            defindex: raw.defindex,
            item_class: raw.item_class,
            item_type_name: raw.item_type_name,
            item_name: raw.item_name,
        }
    }
}

impl SchemaItem {
    /// Key the index is sorted and searched by.
    ///
    /// Kits are named after the item type they apply, and the two crafted
    /// fabricator tiers get fixed names. Build and query must both go through
    /// here or the sort order breaks.
    pub fn resolved_name(&self) -> &str {
        if self.item_name == "Kit" {
            &self.item_type_name
        } else if self.defindex == PROFESSIONAL_FABRICATOR {
            "Professional Killstreak Fabricator"
        } else if self.defindex == SPECIALIZED_FABRICATOR {
            "Specialized Killstreak Fabricator"
        } else {
            &self.item_name
        }
    }

    /// True when the internal name embeds the upper-cased item class, which
    /// marks stock weapons that share a display name with their upgradeable
    /// variant.
    pub fn has_upgradeable(&self) -> bool {
        self.name.contains(&self.item_class.to_uppercase())
    }

    /// True when the internal name names the upgradeable variant itself.
    pub fn is_upgradeable(&self) -> bool {
        self.name.starts_with(UPGRADEABLE_PREFIX)
    }

    /// Records that win a name lookup outright, without falling back.
    pub(crate) fn is_immediate_match(&self) -> bool {
        !self.has_upgradeable() || self.is_upgradeable()
    }
}

/// Validate, deserialize and strip the `items` dataset.
pub fn parse_items(value: Value) -> Result<Vec<SchemaItem>> {
    validate_items(&value)?;
    let raw: Vec<RawSchemaItem> =
        serde_json::from_value(value).context("deserializing items dataset")?;
    Ok(raw.into_iter().map(SchemaItem::from).collect())
}

/// Read and parse an `items` dataset file.
pub fn load_items_from_path(path: &Path) -> Result<Vec<SchemaItem>> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    parse_items(value).with_context(|| format!("loading {}", path.display()))
}

fn validate_items(value: &Value) -> Result<()> {
    let schema: Value =
        serde_json::from_str(ITEMS_SCHEMA).context("parsing embedded items schema")?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| anyhow!("compiling items schema: {err}"))?;

    if let Err(errors) = compiled.validate(value) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("items dataset failed schema validation:\n{}", details);
    }
    Ok(())
}
