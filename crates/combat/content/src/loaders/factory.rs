//! Assembles a validated content bundle from a data directory or the
//! embedded defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use combat_core::{
    AttackConfig, CombatConfig, CombatWorld, ConfigCatalog, ExecutionConfig, ItemConfig,
    SkillConfig, StatusConfig,
};

use crate::loaders::{
    AttackLoader, CombatConfigLoader, ExecutionLoader, ItemLoader, LoadResult, SkillLoader,
    StatusLoader,
};

const SKILLS: &str = "skills.ron";
const STATUSES: &str = "statuses.ron";
const ITEMS: &str = "items.ron";
const EXECUTIONS: &str = "executions.ron";
const ATTACK: &str = "attack.ron";
const CONFIG: &str = "combat.toml";

mod embedded {
    pub const SKILLS: &str = include_str!("../../data/skills.ron");
    pub const STATUSES: &str = include_str!("../../data/statuses.ron");
    pub const ITEMS: &str = include_str!("../../data/items.ron");
    pub const EXECUTIONS: &str = include_str!("../../data/executions.ron");
    pub const ATTACK: &str = include_str!("../../data/attack.ron");
    pub const CONFIG: &str = include_str!("../../data/combat.toml");
}

/// Everything a [`CombatWorld`] needs from content.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub catalog: ConfigCatalog,
    pub config: CombatConfig,
}

impl ContentBundle {
    /// Builds a world over this content with the default RNG and host.
    pub fn into_world(self) -> CombatWorld {
        CombatWorld::new(self.config, Arc::new(self.catalog))
    }
}

#[derive(Debug, Clone)]
enum Source {
    Embedded,
    Directory(PathBuf),
}

/// Content loader over a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml      (optional)
/// ├── attack.ron       (optional)
/// ├── skills.ron
/// ├── executions.ron
/// ├── statuses.ron     (optional)
/// └── items.ron        (optional)
/// ```
#[derive(Debug, Clone)]
pub struct ContentLoader {
    source: Source,
}

impl ContentLoader {
    /// Loader over the data files compiled into this crate.
    pub fn embedded() -> Self {
        Self {
            source: Source::Embedded,
        }
    }

    /// Creates a loader pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing the content files
    pub fn from_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Directory(data_dir.into()),
        }
    }

    /// Returns the data directory path, if loading from disk.
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.source {
            Source::Embedded => None,
            Source::Directory(dir) => Some(dir),
        }
    }

    /// Loads, assembles and validates every content file.
    ///
    /// # Returns
    ///
    /// Returns a [`ContentBundle`] whose catalog passed
    /// [`ConfigCatalog::validate`]. Errors name the file that failed, or
    /// carry the validation error under "content validation failed".
    pub fn load(&self) -> LoadResult<ContentBundle> {
        let parts = match &self.source {
            Source::Embedded => Parts {
                skills: SkillLoader::parse(embedded::SKILLS).context("embedded skills.ron")?,
                statuses: StatusLoader::parse(embedded::STATUSES)
                    .context("embedded statuses.ron")?,
                items: ItemLoader::parse(embedded::ITEMS).context("embedded items.ron")?,
                executions: ExecutionLoader::parse(embedded::EXECUTIONS)
                    .context("embedded executions.ron")?,
                attack: AttackLoader::parse(embedded::ATTACK).context("embedded attack.ron")?,
                config: CombatConfigLoader::parse(embedded::CONFIG)
                    .context("embedded combat.toml")?,
            },
            Source::Directory(dir) => Parts {
                skills: SkillLoader::load(&dir.join(SKILLS))?,
                statuses: optional(dir, STATUSES, StatusLoader::load)?.unwrap_or_default(),
                items: optional(dir, ITEMS, ItemLoader::load)?.unwrap_or_default(),
                executions: ExecutionLoader::load(&dir.join(EXECUTIONS))?,
                attack: optional(dir, ATTACK, AttackLoader::load)?.unwrap_or_default(),
                config: optional(dir, CONFIG, CombatConfigLoader::load)?.unwrap_or_default(),
            },
        };
        let bundle = parts.assemble()?;
        tracing::info!(
            target: "content::loader",
            source = %self.describe(),
            skills = bundle.catalog.skills().count(),
            statuses = bundle.catalog.statuses().count(),
            items = bundle.catalog.items().count(),
            executions = bundle.catalog.executions().count(),
            "content loaded"
        );
        Ok(bundle)
    }

    fn describe(&self) -> String {
        match &self.source {
            Source::Embedded => "embedded".to_owned(),
            Source::Directory(dir) => dir.display().to_string(),
        }
    }
}

/// Parsed files before they are merged into one catalog.
struct Parts {
    skills: Vec<SkillConfig>,
    statuses: Vec<StatusConfig>,
    items: Vec<ItemConfig>,
    executions: Vec<ExecutionConfig>,
    attack: AttackConfig,
    config: CombatConfig,
}

impl Parts {
    fn assemble(self) -> LoadResult<ContentBundle> {
        let mut catalog = ConfigCatalog::new();
        for execution in self.executions {
            catalog.add_execution(execution).context(EXECUTIONS)?;
        }
        for skill in self.skills {
            catalog.add_skill(skill).context(SKILLS)?;
        }
        for status in self.statuses {
            catalog.add_status(status).context(STATUSES)?;
        }
        for item in self.items {
            catalog.add_item(item).context(ITEMS)?;
        }
        catalog.set_attack(self.attack);
        catalog.validate().context("content validation failed")?;
        Ok(ContentBundle {
            catalog,
            config: self.config,
        })
    }
}

/// Loads `file` from `dir` when it exists.
fn optional<T>(
    dir: &Path,
    file: &str,
    load: impl FnOnce(&Path) -> LoadResult<T>,
) -> LoadResult<Option<T>> {
    let path = dir.join(file);
    if !path.exists() {
        tracing::debug!(target: "content::loader", path = %path.display(), "not found, using defaults");
        return Ok(None);
    }
    load(&path).map(Some)
}
