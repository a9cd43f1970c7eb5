//! Skill execution timeline loader.

use std::path::Path;

use anyhow::Context;
use combat_core::ExecutionConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Execution catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionCatalog {
    pub executions: Vec<ExecutionConfig>,
}

/// Loader for execution timelines from RON files.
///
/// Clip order and windows are checked later by
/// [`combat_core::ConfigCatalog::validate`], once every file is in.
pub struct ExecutionLoader;

impl ExecutionLoader {
    /// Load execution timelines from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an `ExecutionCatalog`
    ///
    /// # Returns
    ///
    /// Returns the execution timelines, unvalidated.
    /// Read and parse errors name `path`.
    pub fn load(path: &Path) -> LoadResult<Vec<ExecutionConfig>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parses an execution catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<ExecutionConfig>> {
        let catalog: ExecutionCatalog =
            ron::from_str(content).context("failed to parse execution catalog RON")?;
        Ok(catalog.executions)
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{
        ActionEventData, ClipKind, ColliderShape, CollisionMoveType, EffectSelection,
    };

    use super::*;

    #[test]
    fn parses_every_clip_kind() {
        let executions = ExecutionLoader::parse(
            r#"(
                executions: [
                    (
                        id: "lance",
                        total_time_ms: 900,
                        clips: [
                            (start_ms: 0, end_ms: 300, kind: Animation("lance_cast")),
                            (start_ms: 0, end_ms: 100, kind: Audio("lance_hum")),
                            (start_ms: 100, end_ms: 900, kind: CollisionExecute((
                                shape: Sphere(radius: 0.5),
                                move_type: PathFly,
                                path: [(0.0, 0.0, 0.0), (2.0, 0.0, 4.0), (0.0, 0.0, 8.0)],
                                effects: Indices([0]),
                            ))),
                            (start_ms: 500, end_ms: 500, kind: ActionEvent(AssignEffect(All))),
                            (start_ms: 600, end_ms: 600, kind: ActionEvent(TriggerNewExecution("lance"))),
                            (start_ms: 700, end_ms: 900, kind: Particle("frost")),
                        ],
                    ),
                ],
            )"#,
        )
        .unwrap();

        let clips = &executions[0].clips;
        assert_eq!(clips.len(), 6);
        let ClipKind::CollisionExecute(collision) = &clips[2].kind else {
            panic!("expected a collision clip, got {:?}", clips[2].kind);
        };
        assert_eq!(collision.shape, ColliderShape::Sphere { radius: 0.5 });
        assert_eq!(collision.move_type, CollisionMoveType::PathFly);
        assert_eq!(collision.path.len(), 3);
        assert_eq!(collision.effects, EffectSelection::Indices(vec![0]));
        assert_eq!(
            clips[4].kind,
            ClipKind::ActionEvent(ActionEventData::TriggerNewExecution("lance".into()))
        );
    }
}
