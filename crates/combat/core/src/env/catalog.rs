//! Authored content lookups.

use std::collections::BTreeMap;

use super::error::ConfigError;
use crate::ability::{AttackConfig, ItemConfig, SkillConfig};
use crate::effect::Effect;
use crate::execution::{ActionEventData, ClipKind, ExecutionConfig};
use crate::ids::{ItemId, SkillId, StatusId};
use crate::status::StatusConfig;

/// Read-only access to skill, status, item and execution definitions.
pub trait ConfigOracle: Send + Sync {
    fn skill(&self, id: SkillId) -> Option<&SkillConfig>;

    fn status(&self, id: StatusId) -> Option<&StatusConfig>;

    fn item(&self, id: ItemId) -> Option<&ItemConfig>;

    fn execution(&self, id: &str) -> Option<&ExecutionConfig>;

    fn attack(&self) -> &AttackConfig;
}

/// In-memory content catalog keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigCatalog {
    skills: BTreeMap<SkillId, SkillConfig>,
    statuses: BTreeMap<StatusId, StatusConfig>,
    items: BTreeMap<ItemId, ItemConfig>,
    executions: BTreeMap<String, ExecutionConfig>,
    attack: AttackConfig,
}

impl ConfigCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_skill(&mut self, skill: SkillConfig) -> Result<(), ConfigError> {
        if self.skills.contains_key(&skill.id) {
            return Err(ConfigError::Duplicate {
                kind: "skill",
                id: skill.id.to_string(),
            });
        }
        self.skills.insert(skill.id, skill);
        Ok(())
    }

    pub fn add_status(&mut self, status: StatusConfig) -> Result<(), ConfigError> {
        if self.statuses.contains_key(&status.id) {
            return Err(ConfigError::Duplicate {
                kind: "status",
                id: status.id.to_string(),
            });
        }
        self.statuses.insert(status.id, status);
        Ok(())
    }

    pub fn add_item(&mut self, item: ItemConfig) -> Result<(), ConfigError> {
        if self.items.contains_key(&item.id) {
            return Err(ConfigError::Duplicate {
                kind: "item",
                id: item.id.to_string(),
            });
        }
        self.items.insert(item.id, item);
        Ok(())
    }

    pub fn add_execution(&mut self, execution: ExecutionConfig) -> Result<(), ConfigError> {
        if self.executions.contains_key(&execution.id) {
            return Err(ConfigError::Duplicate {
                kind: "execution",
                id: execution.id.clone(),
            });
        }
        self.executions.insert(execution.id.clone(), execution);
        Ok(())
    }

    pub fn set_attack(&mut self, attack: AttackConfig) {
        self.attack = attack;
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillConfig> {
        self.skills.values()
    }

    pub fn statuses(&self) -> impl Iterator<Item = &StatusConfig> {
        self.statuses.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemConfig> {
        self.items.values()
    }

    pub fn executions(&self) -> impl Iterator<Item = &ExecutionConfig> {
        self.executions.values()
    }

    /// Checks every cross-reference and clip list; stops at the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for execution in self.executions.values() {
            self.validate_execution(execution)?;
        }
        let mut acyclic = Vec::new();
        for execution in self.executions.values() {
            self.validate_immediate_triggers(execution, &mut Vec::new(), &mut acyclic)?;
        }
        for skill in self.skills.values() {
            let execution = self
                .executions
                .get(&skill.execution)
                .ok_or_else(|| ConfigError::UnknownExecution(skill.execution.clone()))?;
            self.validate_effects(&skill.effects)?;
            self.validate_selections(skill, execution, &mut Vec::new())?;
        }
        for status in self.statuses.values() {
            if status.can_stack && status.max_stack == 0 {
                return Err(ConfigError::InvalidStack(status.id));
            }
            if let Some(periodic) = &status.periodic {
                if periodic.interval_ms == 0 {
                    return Err(ConfigError::ZeroInterval(status.id));
                }
                self.validate_effects(&periodic.effects)?;
            }
        }
        for item in self.items.values() {
            self.validate_effects(&item.effects)?;
        }
        self.validate_effects(&self.attack.effects)
    }

    fn validate_execution(&self, execution: &ExecutionConfig) -> Result<(), ConfigError> {
        if execution.clips.is_empty() {
            return Err(ConfigError::EmptyClips(execution.id.clone()));
        }
        let mut previous_start = 0;
        for (index, clip) in execution.clips.iter().enumerate() {
            if clip.start_ms < previous_start {
                return Err(ConfigError::UnsortedClips {
                    execution: execution.id.clone(),
                    index,
                });
            }
            previous_start = clip.start_ms;
            // A clip starting exactly at the end still fires on the final frame.
            if clip.start_ms > execution.total_time_ms {
                return Err(ConfigError::ClipAfterEnd {
                    execution: execution.id.clone(),
                    index,
                    start_ms: clip.start_ms,
                    total_time_ms: execution.total_time_ms,
                });
            }
            if clip.end_ms < clip.start_ms {
                return Err(ConfigError::InvalidClipWindow {
                    execution: execution.id.clone(),
                    index,
                    start_ms: clip.start_ms,
                    end_ms: clip.end_ms,
                });
            }
            match &clip.kind {
                ClipKind::CollisionExecute(data)
                    if data.move_type.uses_path() && data.path.len() < 2 =>
                {
                    return Err(ConfigError::PathTooShort {
                        execution: execution.id.clone(),
                        index,
                        points: data.path.len(),
                    });
                }
                ClipKind::ActionEvent(ActionEventData::TriggerNewExecution(next))
                    if !self.executions.contains_key(next) =>
                {
                    return Err(ConfigError::UnknownExecution(next.clone()));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Depth-first walk over 0ms `TriggerNewExecution` edges. Such a chain
    /// begins every execution in one call, so it must not loop back.
    fn validate_immediate_triggers<'a>(
        &'a self,
        execution: &'a ExecutionConfig,
        path: &mut Vec<&'a str>,
        acyclic: &mut Vec<&'a str>,
    ) -> Result<(), ConfigError> {
        let id = execution.id.as_str();
        if acyclic.contains(&id) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|seen| *seen == id) {
            let mut cycle: Vec<String> =
                path[start..].iter().map(|seen| (*seen).to_owned()).collect();
            cycle.push(id.to_owned());
            return Err(ConfigError::TriggerCycle {
                execution: id.to_owned(),
                cycle,
            });
        }
        path.push(id);
        for next in execution.immediate_triggers() {
            if let Some(next) = self.executions.get(next) {
                self.validate_immediate_triggers(next, path, acyclic)?;
            }
        }
        path.pop();
        acyclic.push(id);
        Ok(())
    }

    /// Effect indices selected by clips must exist on every skill playing them,
    /// including executions reached through `TriggerNewExecution`.
    fn validate_selections<'a>(
        &'a self,
        skill: &SkillConfig,
        execution: &'a ExecutionConfig,
        visited: &mut Vec<&'a str>,
    ) -> Result<(), ConfigError> {
        if visited.contains(&execution.id.as_str()) {
            return Ok(());
        }
        visited.push(execution.id.as_str());
        for clip in &execution.clips {
            let selection = match &clip.kind {
                ClipKind::ActionEvent(ActionEventData::AssignEffect(selection)) => selection,
                ClipKind::CollisionExecute(data) => &data.effects,
                ClipKind::ActionEvent(ActionEventData::TriggerNewExecution(next)) => {
                    if let Some(next) = self.executions.get(next) {
                        self.validate_selections(skill, next, visited)?;
                    }
                    continue;
                }
                _ => continue,
            };
            if let Some(index) = selection.max_index()
                && index >= skill.effects.len()
            {
                return Err(ConfigError::EffectIndexOutOfRange {
                    skill: skill.id,
                    execution: execution.id.clone(),
                    index,
                    available: skill.effects.len(),
                });
            }
        }
        Ok(())
    }

    fn validate_effects(&self, effects: &[Effect]) -> Result<(), ConfigError> {
        for effect in effects {
            if let Some(status) = effect.status()
                && !self.statuses.contains_key(&status)
            {
                return Err(ConfigError::UnknownStatus(status));
            }
            if let Effect::Damage(damage) = effect
                && let Some(falloff) = &damage.falloff
            {
                for (field, value) in [
                    ("falloff.reduce_percent", falloff.reduce_percent),
                    ("falloff.min_percent", falloff.min_percent),
                ] {
                    if !(0.0..=100.0).contains(&value) {
                        return Err(ConfigError::OutOfRange {
                            field,
                            value,
                            max: 100.0,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn require_skill(&self, id: SkillId) -> Result<&SkillConfig, ConfigError> {
        self.skill(id).ok_or(ConfigError::UnknownSkill(id))
    }
}

impl ConfigOracle for ConfigCatalog {
    fn skill(&self, id: SkillId) -> Option<&SkillConfig> {
        self.skills.get(&id)
    }

    fn status(&self, id: StatusId) -> Option<&StatusConfig> {
        self.statuses.get(&id)
    }

    fn item(&self, id: ItemId) -> Option<&ItemConfig> {
        self.items.get(&id)
    }

    fn execution(&self, id: &str) -> Option<&ExecutionConfig> {
        self.executions.get(id)
    }

    fn attack(&self) -> &AttackConfig {
        &self.attack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{AddStatusEffect, EffectSelection};
    use crate::error::CombatFault;
    use crate::execution::{CollisionExecuteData, ExecuteClip};
    use crate::hit_volume::{ColliderShape, CollisionMoveType};

    fn execution(clips: Vec<ExecuteClip>) -> ExecutionConfig {
        ExecutionConfig {
            id: "cast".into(),
            total_time_ms: 1_000,
            clips,
        }
    }

    fn assign(start_ms: u64, selection: EffectSelection) -> ExecuteClip {
        ExecuteClip {
            start_ms,
            end_ms: start_ms + 100,
            kind: ClipKind::ActionEvent(ActionEventData::AssignEffect(selection)),
        }
    }

    fn skill(effects: Vec<Effect>) -> SkillConfig {
        SkillConfig {
            id: SkillId(1),
            name: "bolt".into(),
            cooldown_ms: 0,
            execution: "cast".into(),
            effects,
        }
    }

    #[test]
    fn rejects_unknown_execution_reference() {
        let mut catalog = ConfigCatalog::new();
        catalog.add_skill(skill(vec![])).unwrap();
        assert_eq!(
            catalog.validate(),
            Err(ConfigError::UnknownExecution("cast".into()))
        );
    }

    #[test]
    fn rejects_unsorted_and_inverted_clips() {
        let mut catalog = ConfigCatalog::new();
        catalog
            .add_execution(execution(vec![
                assign(300, EffectSelection::All),
                assign(100, EffectSelection::All),
            ]))
            .unwrap();
        assert!(matches!(
            catalog.validate(),
            Err(ConfigError::UnsortedClips { index: 1, .. })
        ));

        let mut inverted = assign(200, EffectSelection::All);
        inverted.end_ms = 50;
        let mut catalog = ConfigCatalog::new();
        catalog.add_execution(execution(vec![inverted])).unwrap();
        assert!(matches!(
            catalog.validate(),
            Err(ConfigError::InvalidClipWindow { start_ms: 200, end_ms: 50, .. })
        ));
    }

    #[test]
    fn rejects_short_paths() {
        let clip = ExecuteClip {
            start_ms: 0,
            end_ms: 500,
            kind: ClipKind::CollisionExecute(CollisionExecuteData {
                shape: ColliderShape::Sphere { radius: 1.0 },
                move_type: CollisionMoveType::PathFly,
                path: vec![[0.0, 0.0, 1.0]],
                effects: EffectSelection::All,
            }),
        };
        let mut catalog = ConfigCatalog::new();
        catalog.add_execution(execution(vec![clip])).unwrap();
        assert!(matches!(
            catalog.validate(),
            Err(ConfigError::PathTooShort { points: 1, .. })
        ));
    }

    #[test]
    fn rejects_missing_status_and_bad_selection() {
        let mut catalog = ConfigCatalog::new();
        catalog
            .add_execution(execution(vec![assign(0, EffectSelection::Indices(vec![1]))]))
            .unwrap();
        catalog
            .add_skill(skill(vec![Effect::AddStatus(AddStatusEffect {
                status: StatusId(4),
                duration_ms: None,
                params: Default::default(),
            })]))
            .unwrap();
        assert_eq!(catalog.validate(), Err(ConfigError::UnknownStatus(StatusId(4))));

        catalog
            .add_status(StatusConfig::new(StatusId(4), "slow", 1_000))
            .unwrap();
        assert!(matches!(
            catalog.validate(),
            Err(ConfigError::EffectIndexOutOfRange { index: 1, available: 1, .. })
        ));
    }

    fn trigger(id: &str, start_ms: u64, next: &str) -> ExecutionConfig {
        ExecutionConfig {
            id: id.into(),
            total_time_ms: 500,
            clips: vec![ExecuteClip {
                start_ms,
                end_ms: start_ms + 100,
                kind: ClipKind::ActionEvent(ActionEventData::TriggerNewExecution(next.into())),
            }],
        }
    }

    #[test]
    fn duplicates_are_rejected_on_insert() {
        let mut catalog = ConfigCatalog::new();
        catalog
            .add_execution(execution(vec![assign(0, EffectSelection::All)]))
            .unwrap();
        assert!(matches!(
            catalog.add_execution(execution(vec![])),
            Err(ConfigError::Duplicate { kind: "execution", .. })
        ));
        assert!(catalog.validate().is_ok());
        assert!(catalog.require_skill(SkillId(3)).is_err());
    }

    #[test]
    fn rejects_empty_clip_lists() {
        let mut catalog = ConfigCatalog::new();
        catalog.add_execution(execution(vec![])).unwrap();
        assert_eq!(
            catalog.validate(),
            Err(ConfigError::EmptyClips("cast".into()))
        );
    }

    #[test]
    fn rejects_clips_starting_after_the_end() {
        let mut catalog = ConfigCatalog::new();
        catalog
            .add_execution(ExecutionConfig {
                id: "cast".into(),
                total_time_ms: 0,
                clips: vec![assign(500, EffectSelection::All)],
            })
            .unwrap();
        let error = catalog.validate().unwrap_err();
        assert_eq!(
            error,
            ConfigError::ClipAfterEnd {
                execution: "cast".into(),
                index: 0,
                start_ms: 500,
                total_time_ms: 0,
            }
        );
        assert_eq!(error.error_code(), "CONFIG_CLIP_AFTER_END");

        let mut catalog = ConfigCatalog::new();
        catalog
            .add_execution(execution(vec![assign(1_000, EffectSelection::All)]))
            .unwrap();
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn rejects_immediate_trigger_cycles() {
        let mut catalog = ConfigCatalog::new();
        catalog.add_execution(trigger("loop", 0, "loop")).unwrap();
        assert_eq!(
            catalog.validate(),
            Err(ConfigError::TriggerCycle {
                execution: "loop".into(),
                cycle: vec!["loop".into(), "loop".into()],
            })
        );

        let mut catalog = ConfigCatalog::new();
        catalog.add_execution(trigger("a", 0, "b")).unwrap();
        catalog.add_execution(trigger("b", 0, "c")).unwrap();
        catalog.add_execution(trigger("c", 0, "a")).unwrap();
        assert!(matches!(
            catalog.validate(),
            Err(ConfigError::TriggerCycle { cycle, .. }) if cycle.len() == 4
        ));
    }

    #[test]
    fn delayed_or_acyclic_triggers_pass() {
        let mut catalog = ConfigCatalog::new();
        catalog.add_execution(trigger("loop", 200, "loop")).unwrap();
        assert!(catalog.validate().is_ok());

        let mut catalog = ConfigCatalog::new();
        catalog.add_execution(trigger("a", 0, "c")).unwrap();
        catalog.add_execution(trigger("b", 0, "c")).unwrap();
        catalog.add_execution(trigger("c", 300, "a")).unwrap();
        assert!(catalog.validate().is_ok());
    }
}
