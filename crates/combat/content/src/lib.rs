//! Data-driven combat content and its loaders.
//!
//! Content lives in RON catalogs and a TOML tuning file:
//! - Skills (`skills.ron`)
//! - Statuses (`statuses.ron`)
//! - Consumable items (`items.ron`)
//! - Skill execution timelines (`executions.ron`)
//! - The basic attack's effect list (`attack.ron`)
//! - Combat tuning (`combat.toml`)
//!
//! [`ContentLoader`] reads a directory laid out like `data/` in this crate, or
//! the copy embedded at compile time, and validates the assembled catalog
//! before handing it to the world.

pub mod loaders;

pub use loaders::{
    AttackLoader, CombatConfigLoader, ContentBundle, ContentLoader, ExecutionLoader, ItemLoader,
    LoadResult, SkillLoader, StatusLoader,
};
