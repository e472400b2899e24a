#![allow(dead_code)]

use anyhow::{Context, Result};
use fastschema::{Dataset, DirectorySource, SchemaSource};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("schema")
}

/// Copy the fixture datasets into a scratch directory tests can mutate.
pub fn scratch_fixtures() -> Result<TempDir> {
    let dir = TempDir::new().context("failed to allocate scratch dir")?;
    for entry in fs::read_dir(fixture_dir())? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            fs::copy(&path, dir.path().join(entry.file_name()))
                .with_context(|| format!("copying {}", path.display()))?;
        }
    }
    Ok(dir)
}

pub fn write_json(dir: &Path, dataset: Dataset, value: &Value) -> Result<()> {
    let path = dir.join(dataset.file_name());
    fs::write(&path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// Directory source that records how often each dataset is read.
pub struct CountingSource {
    inner: DirectorySource,
    loads: Mutex<BTreeMap<Dataset, usize>>,
}

impl CountingSource {
    pub fn new(root: &Path) -> Self {
        Self {
            inner: DirectorySource::new(root),
            loads: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn loads(&self, dataset: Dataset) -> usize {
        let loads = self.loads.lock().unwrap_or_else(|err| err.into_inner());
        loads.get(&dataset).copied().unwrap_or(0)
    }
}

impl SchemaSource for CountingSource {
    fn load(&self, dataset: Dataset) -> Result<Value> {
        {
            let mut loads = self.loads.lock().unwrap_or_else(|err| err.into_inner());
            *loads.entry(dataset).or_insert(0) += 1;
        }
        self.inner.load(dataset)
    }
}
