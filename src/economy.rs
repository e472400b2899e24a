//! Item economy metadata (`items_game`) keyed by defindex.
//!
//! Only the `static_attrs` of each item are kept; the resolver reads the crate
//! series number from them and nothing else.

use crate::catalog::identity::{Defindex, parse_code};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Static attribute carrying the supply crate series number.
pub const CRATE_SERIES_ATTRIBUTE: &str = "set supply crate series";

#[derive(Debug, Deserialize)]
struct RawItemsGame {
    items: BTreeMap<String, RawEconomyItem>,
}

#[derive(Debug, Deserialize)]
struct RawEconomyItem {
    #[serde(default)]
    static_attrs: Option<Map<String, Value>>,
}

#[derive(Clone, Debug, Default)]
/// Static attributes of each economy item definition.
pub struct EconomyMetadata {
    items: BTreeMap<Defindex, Map<String, Value>>,
}

impl EconomyMetadata {
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawItemsGame =
            serde_json::from_value(value).context("deserializing items_game dataset")?;

        let mut items = BTreeMap::new();
        for (key, item) in raw.items {
            // items_game carries prefab-style entries such as "default".
            let Some(code) = parse_code(&key) else {
                debug!(key = %key, "skipping non-numeric items_game entry");
                continue;
            };
            items.insert(Defindex(code), item.static_attrs.unwrap_or_default());
        }
        Ok(Self { items })
    }

    pub fn contains(&self, defindex: Defindex) -> bool {
        self.items.contains_key(&defindex)
    }

    pub fn static_attr(&self, defindex: Defindex, attribute: &str) -> Option<&Value> {
        self.items.get(&defindex)?.get(attribute)
    }

    /// Crate series number of `defindex`, or 0 when absent or unparseable.
    pub fn series_number(&self, defindex: Defindex) -> u32 {
        self.static_attr(defindex, CRATE_SERIES_ATTRIBUTE)
            .and_then(integer_prefix)
            .unwrap_or(0)
    }
}

/// Leading decimal integer of a string attribute, or an integral number.
///
/// Mirrors how the attribute is consumed downstream: `"12"`, `" 12"` and
/// `"12.0"` all mean series 12. Negative values are not valid series.
fn integer_prefix(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|float| float.is_finite() && *float >= 0.0)
                    .map(|float| float.trunc() as u64)
            })
            .and_then(|int| u32::try_from(int).ok()),
        Value::String(text) => {
            let trimmed = text.trim_start();
            let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
            let digits = trimmed
                .find(|c: char| !c.is_ascii_digit())
                .map_or(trimmed, |end| &trimmed[..end]);
            digits.parse().ok()
        }
        _ => None,
    }
}
