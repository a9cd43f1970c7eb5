//! Item catalog loader.

use std::path::Path;

use anyhow::Context;
use combat_core::ItemConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemConfig>,
}

/// Loader for consumable items from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item definitions from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an `ItemCatalog`
    ///
    /// # Returns
    ///
    /// Returns the items in file order.
    /// Read and parse errors name `path`.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemConfig>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parses an item catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemConfig>> {
        let catalog: ItemCatalog =
            ron::from_str(content).context("failed to parse item catalog RON")?;
        Ok(catalog.items)
    }
}
