//! Skill catalog loader.

use std::path::Path;

use anyhow::Context;
use combat_core::SkillConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillConfig>,
}

/// Loader for skill definitions from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill definitions from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a `SkillCatalog`
    ///
    /// # Returns
    ///
    /// Returns the skills in file order.
    /// Read and parse errors name `path`.
    pub fn load(path: &Path) -> LoadResult<Vec<SkillConfig>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parses a skill catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<SkillConfig>> {
        let catalog: SkillCatalog =
            ron::from_str(content).context("failed to parse skill catalog RON")?;
        Ok(catalog.skills)
    }
}
