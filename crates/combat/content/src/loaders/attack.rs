//! Basic attack loader.

use std::path::Path;

use anyhow::Context;
use combat_core::AttackConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for the effect list every basic attack assigns.
pub struct AttackLoader;

impl AttackLoader {
    /// Load the basic attack from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing the `AttackConfig`
    ///
    /// # Returns
    ///
    /// Returns the basic attack definition.
    /// Read and parse errors name `path`.
    pub fn load(path: &Path) -> LoadResult<AttackConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<AttackConfig> {
        let attack: AttackConfig =
            ron::from_str(content).context("failed to parse attack RON")?;
        Ok(attack)
    }
}
