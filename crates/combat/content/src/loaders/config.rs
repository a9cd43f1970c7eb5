//! Combat tuning loader.

use std::path::Path;

use anyhow::Context;
use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`CombatConfig`] from TOML files.
///
/// Every key is optional; missing keys keep their defaults.
pub struct CombatConfigLoader;

impl CombatConfigLoader {
    /// Load combat tuning from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing CombatConfig
    ///
    /// # Returns
    ///
    /// Returns a [`CombatConfig`] with defaults for every missing key.
    /// Read and parse errors name `path`.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig =
            toml::from_str(content).context("failed to parse combat config TOML")?;
        Ok(config)
    }
}
