//! Status catalog loader.

use std::path::Path;

use anyhow::Context;
use combat_core::StatusConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Status catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCatalog {
    pub statuses: Vec<StatusConfig>,
}

/// Loader for status definitions from RON files.
pub struct StatusLoader;

impl StatusLoader {
    /// Load status definitions from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a `StatusCatalog`
    ///
    /// # Returns
    ///
    /// Returns the statuses in file order.
    /// Read and parse errors name `path`.
    pub fn load(path: &Path) -> LoadResult<Vec<StatusConfig>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<StatusConfig>> {
        let catalog: StatusCatalog =
            ron::from_str(content).context("failed to parse status catalog RON")?;
        Ok(catalog.statuses)
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{ActionControl, AttributeKind, StatusId};

    use super::*;

    #[test]
    fn parses_flags_modifiers_and_periodic_effects() {
        let statuses = StatusLoader::parse(
            r#"(
                statuses: [
                    (
                        id: 7,
                        name: "Shock",
                        duration_ms: 1500,
                        action_control: "SPELL_FORBID | ITEM_FORBID",
                        modifiers: [(attribute: Attack, value: -4.0)],
                        periodic: Some((
                            interval_ms: 500,
                            effects: [Damage((formula: Constant(2.0)))],
                        )),
                    ),
                ],
            )"#,
        )
        .unwrap();

        let shock = &statuses[0];
        assert_eq!(shock.id, StatusId(7));
        assert_eq!(shock.max_stack, 1);
        assert!(!shock.can_stack);
        assert_eq!(
            shock.action_control,
            ActionControl::SPELL_FORBID | ActionControl::ITEM_FORBID
        );
        assert_eq!(shock.modifiers[0].attribute, AttributeKind::Attack);
        assert_eq!(shock.periodic.as_ref().unwrap().interval_ms, 500);
    }
}
