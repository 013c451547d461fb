//! Storage adapters for the Trailmark engine.
//!
//! Responsibilities:
//! - Load target catalogs from CSV files.
//! - Persist the hidden gem registry as JSON.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `trailmark-core`).
//! - Route filesystem access through `trailmark-fs`.
//!
//! Invariants:
//! - A loaded catalog has already passed every `trailmark-core` check.
//! - The gem file is replaced atomically on save.

mod catalog_csv;
mod gem_store;

pub use catalog_csv::{CATALOG_COLUMNS, CatalogLoadError, load_catalog, parse_catalog};
pub use gem_store::{GemStore, GemStoreError};
