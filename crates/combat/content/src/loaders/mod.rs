//! Loaders that turn RON/TOML text into combat-core configuration.
//!
//! Each loader offers `parse` for in-memory text and `load` for a file path.

pub mod attack;
pub mod config;
pub mod execution;
pub mod factory;
pub mod item;
pub mod skill;
pub mod status;

pub use attack::AttackLoader;
pub use config::CombatConfigLoader;
pub use execution::ExecutionLoader;
pub use factory::{ContentBundle, ContentLoader};
pub use item::ItemLoader;
pub use skill::SkillLoader;
pub use status::StatusLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
