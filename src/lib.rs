//! Item schema resolver for TF2 item descriptions.
//!
//! The crate turns the static item schema into a sorted index and answers the
//! lookups item description parsers need: item name to defindex and back,
//! quality/wear/killstreak/texture/effect names to codes and back, whether an
//! item is uniquely named, and the supply crate series of an item. Public
//! functions here form the contract consumers depend on: data directory
//! discovery, the `Schema` resolver, and the dataset source seam.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod economy;
pub mod enums;
pub mod overrides;
pub mod resolver;
pub mod source;

mod lazy_table;

pub use catalog::{CatalogIndex, Defindex, EnumValue, ItemRef, RawSchemaItem, SchemaItem};
pub use economy::{CRATE_SERIES_ATTRIBUTE, EconomyMetadata};
pub use enums::{EnumKind, EnumTable};
pub use overrides::Overrides;
pub use resolver::{OVERRIDES_FILE, Schema};
pub use source::{Dataset, DirectorySource, MemorySource, SchemaSource};

/// Environment variable naming the dataset directory.
pub const DATA_DIR_ENV: &str = "FASTSCHEMA_DATA_DIR";

/// Returns true when `candidate` holds at least the items dataset.
fn is_data_dir(candidate: &Path) -> bool {
    candidate.join(Dataset::Items.file_name()).is_file()
}

fn data_dir_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !is_data_dir(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

/// Locate the dataset directory.
///
/// Honors `FASTSCHEMA_DATA_DIR` if it points at a directory with
/// `items.json`, then falls back to the build-time hint (`<crate>/data` unless
/// overridden when building).
pub fn find_data_dir() -> Result<PathBuf> {
    if let Ok(env_dir) = env::var(DATA_DIR_ENV) {
        if let Some(dir) = data_dir_from_hint(&env_dir) {
            return Ok(dir);
        }
    }

    if let Some(hint) = option_env!("FASTSCHEMA_DATA_HINT") {
        if let Some(dir) = data_dir_from_hint(hint) {
            return Ok(dir);
        }
    }

    bail!(
        "Unable to locate schema datasets. Set {DATA_DIR_ENV} to a directory containing {}.",
        Dataset::Items.file_name()
    );
}
