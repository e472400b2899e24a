//! Item catalog wiring.
//!
//! This module wraps the `items` dataset so the resolver can load a validated
//! snapshot and search it by display name. Types here mirror the dataset
//! fields; callers use `CatalogIndex` for name lookups and `ItemRef` to pass
//! either a defindex or a name.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{Defindex, EnumValue, ItemRef};
pub use index::CatalogIndex;
pub use model::{RawSchemaItem, SchemaItem};

pub use model::{load_items_from_path, parse_items};
