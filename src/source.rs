//! Where raw datasets come from.
//!
//! The resolver only needs parsed JSON values; `SchemaSource` is the seam
//! between it and whatever produced the data. `DirectorySource` reads one file
//! per dataset, `MemorySource` holds values supplied by the caller.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Datasets the resolver reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Dataset {
    Items,
    ItemNames,
    Qualities,
    Wears,
    Killstreaks,
    Textures,
    Effects,
    ItemsGame,
}

impl Dataset {
    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::Items => "items.json",
            Dataset::ItemNames => "item-names.json",
            Dataset::Qualities => "qualities.json",
            Dataset::Wears => "wears.json",
            Dataset::Killstreaks => "killstreaks.json",
            Dataset::Textures => "paint-kits.json",
            Dataset::Effects => "effects.json",
            Dataset::ItemsGame => "items-game.json",
        }
    }
}

/// Supplies parsed datasets on demand.
pub trait SchemaSource {
    fn load(&self, dataset: Dataset) -> Result<Value>;
}

#[derive(Clone, Debug)]
/// Reads `<root>/<dataset file>` for each dataset.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, dataset: Dataset) -> PathBuf {
        self.root.join(dataset.file_name())
    }
}

impl SchemaSource for DirectorySource {
    fn load(&self, dataset: Dataset) -> Result<Value> {
        let path = self.path_of(dataset);
        let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))
    }
}

#[derive(Clone, Debug, Default)]
/// Datasets held in memory.
pub struct MemorySource {
    datasets: BTreeMap<Dataset, Value>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dataset: Dataset, value: Value) -> Self {
        self.datasets.insert(dataset, value);
        self
    }

    pub fn insert(&mut self, dataset: Dataset, value: Value) {
        self.datasets.insert(dataset, value);
    }
}

impl SchemaSource for MemorySource {
    fn load(&self, dataset: Dataset) -> Result<Value> {
        self.datasets
            .get(&dataset)
            .cloned()
            .ok_or_else(|| anyhow!("dataset {} not provided", dataset.file_name()))
    }
}

impl<S: SchemaSource + ?Sized> SchemaSource for &S {
    fn load(&self, dataset: Dataset) -> Result<Value> {
        (**self).load(dataset)
    }
}
