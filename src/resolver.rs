//! Resolution operations consumed by item description parsers and formatters.
//!
//! `Schema` owns one catalog index, the override tables and one lazy slot per
//! enum dataset. The index is built in the constructor because nothing works
//! without it; enum tables and economy metadata load on first use.

use crate::catalog::{CatalogIndex, Defindex, EnumValue, ItemRef, SchemaItem, parse_items};
use crate::economy::EconomyMetadata;
use crate::enums::{EnumKind, EnumTable};
use crate::lazy_table::LazyTable;
use crate::overrides::Overrides;
use crate::source::{Dataset, DirectorySource, SchemaSource};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Optional override file looked up next to the datasets.
pub const OVERRIDES_FILE: &str = "overrides.json";

struct EnumTables {
    quality: LazyTable<EnumTable>,
    wear: LazyTable<EnumTable>,
    killstreak: LazyTable<EnumTable>,
    texture: LazyTable<EnumTable>,
    effect: LazyTable<EnumTable>,
    item_name: LazyTable<EnumTable>,
}

impl EnumTables {
    const fn new() -> Self {
        Self {
            quality: LazyTable::new(),
            wear: LazyTable::new(),
            killstreak: LazyTable::new(),
            texture: LazyTable::new(),
            effect: LazyTable::new(),
            item_name: LazyTable::new(),
        }
    }

    fn slot(&self, kind: EnumKind) -> &LazyTable<EnumTable> {
        match kind {
            EnumKind::Quality => &self.quality,
            EnumKind::Wear => &self.wear,
            EnumKind::Killstreak => &self.killstreak,
            EnumKind::Texture => &self.texture,
            EnumKind::Effect => &self.effect,
            EnumKind::ItemName => &self.item_name,
        }
    }
}

/// Item schema resolver.
pub struct Schema<S = DirectorySource> {
    source: S,
    overrides: Overrides,
    index: CatalogIndex,
    tables: EnumTables,
    economy: LazyTable<EconomyMetadata>,
}

impl Schema<DirectorySource> {
    /// Open the datasets under `dir`, honoring `overrides.json` when present.
    pub fn open(dir: &Path) -> Result<Self> {
        let overrides_path = dir.join(OVERRIDES_FILE);
        let overrides = if overrides_path.is_file() {
            Overrides::load(&overrides_path)?
        } else {
            Overrides::builtin()
        };
        Schema::with_overrides(DirectorySource::new(dir), overrides)
    }

    /// Open the data directory located by [`crate::find_data_dir`].
    pub fn open_default() -> Result<Self> {
        Self::open(&crate::find_data_dir()?)
    }
}

impl<S: SchemaSource> Schema<S> {
    /// Build the catalog index from `source` with the built-in overrides.
    pub fn new(source: S) -> Result<Self> {
        Self::with_overrides(source, Overrides::builtin())
    }

    /// Build the catalog index from `source`.
    ///
    /// Fails when the items dataset is missing, malformed, empty or carries
    /// duplicate defindexes; a resolver without its index cannot answer
    /// anything.
    pub fn with_overrides(source: S, overrides: Overrides) -> Result<Self> {
        let raw = source
            .load(Dataset::Items)
            .context("loading items dataset")?;
        let items = parse_items(raw)?;
        let index = CatalogIndex::build(items)?;
        info!(items = index.len(), "schema index ready");

        Ok(Self {
            source,
            overrides,
            index,
            tables: EnumTables::new(),
            economy: LazyTable::new(),
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Materialize every lazy dataset now instead of on first use.
    pub fn preload(&self) -> Result<()> {
        for kind in EnumKind::ALL {
            self.table(kind)?;
        }
        self.economy()?;
        Ok(())
    }

    /// The enum table for `kind`, loading it on first access.
    ///
    /// A failed load is not remembered; the next call tries again.
    pub fn table(&self, kind: EnumKind) -> Result<&EnumTable> {
        self.tables.slot(kind).get_or_try_init(|| {
            let loaded = self
                .source
                .load(kind.dataset())
                .and_then(|value| EnumTable::from_value(&value))
                .with_context(|| format!("loading {} table", kind.as_str()));
            match &loaded {
                Ok(table) => info!(table = kind.as_str(), entries = table.len(), "loaded enum table"),
                Err(err) => {
                    let detail = format!("{err:#}");
                    warn!(table = kind.as_str(), error = %detail, "enum table load failed");
                }
            }
            loaded
        })
    }

    /// Economy metadata, loading it on first access.
    pub fn economy(&self) -> Result<&EconomyMetadata> {
        self.economy.get_or_try_init(|| {
            let loaded = self
                .source
                .load(Dataset::ItemsGame)
                .and_then(EconomyMetadata::from_value)
                .context("loading items_game metadata");
            if let Err(err) = &loaded {
                let detail = format!("{err:#}");
                warn!(error = %detail, "items_game load failed");
            }
            loaded
        })
    }

    /// Display name for an item.
    ///
    /// Names pass through untouched. Defindexes go through the override table
    /// first, then the item-name table.
    pub fn name_of<'a>(&'a self, item: impl Into<ItemRef<'a>>) -> Result<Option<&'a str>> {
        let defindex = match item.into() {
            ItemRef::Name(name) => return Ok(Some(name)),
            ItemRef::Defindex(defindex) => defindex,
        };
        if let Some(name) = self.overrides.name(defindex) {
            return Ok(Some(name));
        }
        Ok(self.table(EnumKind::ItemName)?.name(defindex.0))
    }

    /// Defindex for an item; `None` when no catalog entry carries the name.
    pub fn defindex_of<'a>(&self, item: impl Into<ItemRef<'a>>) -> Option<Defindex> {
        match item.into() {
            ItemRef::Defindex(defindex) => Some(defindex),
            ItemRef::Name(name) => self
                .overrides
                .defindex(name)
                .or_else(|| self.index.search(name)),
        }
    }

    /// Full catalog record for `name`, found by linear scan.
    pub fn item_of(&self, name: &str) -> Option<&SchemaItem> {
        match self.overrides.defindex(name) {
            Some(defindex) => self.index.item_with_defindex(defindex),
            None => self.index.item_named(name),
        }
    }

    /// Whether the item is a uniquely named ("The ...") definition.
    pub fn is_unique_named_item<'a>(&self, item: impl Into<ItemRef<'a>>) -> Result<bool> {
        let item = item.into();
        let name = match item {
            ItemRef::Name(name) => name,
            ItemRef::Defindex(_) => match self.name_of(item)? {
                Some(name) => name,
                None => return Ok(false),
            },
        };
        Ok(self.item_of(name).is_some_and(|record| record.proper_name))
    }

    /// Supply crate series of an item; 0 when the item is unknown, has no
    /// series attribute, or the attribute is not a number.
    pub fn series_number_of<'a>(&self, item: impl Into<ItemRef<'a>>) -> Result<u32> {
        let Some(defindex) = self.defindex_of(item) else {
            debug!("series lookup for unknown item name");
            return Ok(0);
        };
        Ok(self.economy()?.series_number(defindex))
    }

    /// Code for an enum value; codes pass through without loading the table.
    pub fn code_of<'a>(&self, kind: EnumKind, value: impl Into<EnumValue<'a>>) -> Result<Option<u32>> {
        match value.into() {
            EnumValue::Code(code) => Ok(Some(code)),
            EnumValue::Name(name) => Ok(self.table(kind)?.code(name)),
        }
    }

    /// Name for an enum value; names pass through without loading the table.
    pub fn enum_name_of<'a>(
        &'a self,
        kind: EnumKind,
        value: impl Into<EnumValue<'a>>,
    ) -> Result<Option<&'a str>> {
        match value.into() {
            EnumValue::Name(name) => Ok(Some(name)),
            EnumValue::Code(code) => Ok(self.table(kind)?.name(code)),
        }
    }

    pub fn quality_of<'a>(&self, value: impl Into<EnumValue<'a>>) -> Result<Option<u32>> {
        self.code_of(EnumKind::Quality, value)
    }

    pub fn quality_name_of<'a>(&'a self, value: impl Into<EnumValue<'a>>) -> Result<Option<&'a str>> {
        self.enum_name_of(EnumKind::Quality, value)
    }

    pub fn wear_of<'a>(&self, value: impl Into<EnumValue<'a>>) -> Result<Option<u32>> {
        self.code_of(EnumKind::Wear, value)
    }

    pub fn wear_name_of<'a>(&'a self, value: impl Into<EnumValue<'a>>) -> Result<Option<&'a str>> {
        self.enum_name_of(EnumKind::Wear, value)
    }

    pub fn killstreak_of<'a>(&self, value: impl Into<EnumValue<'a>>) -> Result<Option<u32>> {
        self.code_of(EnumKind::Killstreak, value)
    }

    pub fn killstreak_name_of<'a>(
        &'a self,
        value: impl Into<EnumValue<'a>>,
    ) -> Result<Option<&'a str>> {
        self.enum_name_of(EnumKind::Killstreak, value)
    }

    pub fn texture_of<'a>(&self, value: impl Into<EnumValue<'a>>) -> Result<Option<u32>> {
        self.code_of(EnumKind::Texture, value)
    }

    pub fn texture_name_of<'a>(&'a self, value: impl Into<EnumValue<'a>>) -> Result<Option<&'a str>> {
        self.enum_name_of(EnumKind::Texture, value)
    }

    pub fn effect_of<'a>(&self, value: impl Into<EnumValue<'a>>) -> Result<Option<u32>> {
        self.code_of(EnumKind::Effect, value)
    }

    pub fn effect_name_of<'a>(&'a self, value: impl Into<EnumValue<'a>>) -> Result<Option<&'a str>> {
        self.enum_name_of(EnumKind::Effect, value)
    }
}
