//! Skill execution timelines and basic attack executions.

use super::CombatWorld;
use crate::action::{ActionError, ActionKind, ActionPhase, ActionPhaseError};
use crate::effect::{EffectOrigin, EffectSource};
use crate::env::ConfigError;
use crate::error::CombatError;
use crate::execution::{
    ActionEventData, AttackExecution, ClipKind, PresentationCue, SkillExecution, SpellInput,
};
use crate::ids::{AttackId, ExecutionId, ParticipantId, SkillId};
use crate::point::{ActionPointType, PointPayload};

impl CombatWorld {
    /// Starts the execution authored under `key`.
    ///
    /// A spelled execution occupies the owner's spelling slot until it ends;
    /// a `child` one (started by another execution's clip) does not. Clips
    /// starting at 0 fire before this returns, so children begun that way
    /// nest at most `max_dispatch_depth` deep.
    pub(crate) fn begin_execution(
        &mut self,
        owner: ParticipantId,
        skill: SkillId,
        level: u32,
        key: &str,
        input: SpellInput,
        child: bool,
    ) -> Result<ExecutionId, ActionError> {
        if child && self.execution_depth >= self.config.max_dispatch_depth {
            tracing::warn!(
                target: "combat::execution",
                %owner,
                key,
                depth = self.execution_depth,
                "execution nesting exceeded"
            );
            return Err(ActionError::ExecutionDepth {
                execution: key.to_owned(),
                depth: self.execution_depth,
            });
        }
        let configs = self.configs();
        let config = configs
            .execution(key)
            .ok_or_else(|| ConfigError::UnknownExecution(key.to_owned()))?
            .clone();
        let id = ExecutionId(self.ids.allocate());

        let participant = self.require_mut(owner)?;
        if !child {
            if let Some(current) = participant.spelling() {
                return Err(ActionError::AlreadySpelling {
                    participant: owner,
                    execution: current,
                });
            }
            participant.set_spelling(Some(id));
            if let Some(ability) = participant.abilities.skill_mut(skill) {
                ability.set_spelling(true);
            }
        }

        let mut execution = SkillExecution::new(id, owner, skill, level, input, config, self.now);
        execution.child = child;
        self.executions.insert(id, execution);
        tracing::debug!(
            target: "combat::execution",
            %owner,
            %skill,
            execution = %id,
            key,
            child,
            "execution begun"
        );

        self.trigger(owner, ActionPointType::BeginExecute, &mut PointPayload::Execution(id));
        self.execution_depth += 1;
        self.process_execution(id);
        self.execution_depth -= 1;
        Ok(id)
    }

    /// Ends and disposes an execution; false when it already ended.
    ///
    /// `EndExecute` fires while the execution can still be looked up, after
    /// the owner's spelling slot has been released.
    pub fn end_execution(&mut self, id: ExecutionId) -> bool {
        let Some(execution) = self.executions.get_mut(&id) else {
            return false;
        };
        if !execution.begin_ending() {
            return false;
        }
        let (owner, skill, child) = (execution.owner, execution.skill, execution.child);
        let elapsed_ms = execution.elapsed(self.now);
        if !child && let Some(participant) = self.participants.get_mut(&owner) {
            if participant.spelling() == Some(id) {
                participant.set_spelling(None);
            }
            if let Some(ability) = participant.abilities.skill_mut(skill) {
                ability.set_spelling(false);
            }
        }
        tracing::debug!(
            target: "combat::execution",
            %owner,
            execution = %id,
            elapsed_ms,
            "execution ended"
        );
        self.trigger(owner, ActionPointType::EndExecute, &mut PointPayload::Execution(id));

        if let Some(mut execution) = self.executions.remove(&id) {
            execution.clear_targets();
        }
        true
    }

    pub(super) fn update_executions(&mut self) {
        let ids: Vec<ExecutionId> = self.executions.keys().copied().collect();
        for id in ids {
            self.process_execution(id);
        }
    }

    /// Fires every clip whose window was entered, then ends the execution
    /// once its total time has elapsed.
    fn process_execution(&mut self, id: ExecutionId) {
        let now = self.now;
        let Some(execution) = self.executions.get_mut(&id) else {
            return;
        };
        if execution.is_ending() {
            return;
        }
        for index in execution.take_due_clips(now) {
            if self.executions.get(&id).is_none_or(SkillExecution::is_ending) {
                return;
            }
            if let Err(error) = self.fire_clip(id, index) {
                self.record_scheduled_fault("execution clip", error);
            }
        }
        if self
            .executions
            .get(&id)
            .is_some_and(|execution| !execution.is_ending() && execution.is_finished(now))
        {
            self.end_execution(id);
        }
    }

    fn fire_clip(&mut self, id: ExecutionId, index: usize) -> Result<(), CombatError> {
        let Some(execution) = self.executions.get(&id) else {
            return Ok(());
        };
        let Some(clip) = execution.clip(index).cloned() else {
            return Ok(());
        };
        let (owner, skill, level) = (execution.owner, execution.skill, execution.level);
        let input = execution.input.clone();
        tracing::trace!(
            target: "combat::execution",
            execution = %id,
            index,
            clip = clip.kind.name(),
            "clip entered"
        );

        match &clip.kind {
            ClipKind::ActionEvent(ActionEventData::AssignEffect(selection)) => {
                let configs = self.configs();
                let config = configs
                    .skill(skill)
                    .ok_or(ConfigError::UnknownSkill(skill))?;
                for (target_index, target) in input.targets.iter().enumerate() {
                    for effect in selection.select(&config.effects) {
                        if !self.participants.contains_key(target) {
                            break;
                        }
                        let source = EffectSource::new(EffectOrigin::Skill(skill))
                            .with_level(level)
                            .with_execution(id)
                            .with_target_index(target_index as u32);
                        if let Err(error) = self.assign_effect(owner, *target, effect.clone(), source)
                        {
                            self.record_scheduled_fault("clip effect", error);
                        }
                    }
                }
            }
            ClipKind::ActionEvent(ActionEventData::TriggerNewExecution(key)) => {
                self.begin_execution(owner, skill, level, key, input, true)
                    .map_err(|error| {
                        ActionPhaseError::new(ActionKind::SpellSkill, ActionPhase::Apply, error)
                    })?;
            }
            ClipKind::CollisionExecute(data) => {
                self.spawn_hit_volume(id, &clip, data)?;
            }
            ClipKind::Animation(_) | ClipKind::Audio(_) | ClipKind::Particle(_) => {
                if let Some(cue) = PresentationCue::from_clip(&clip) {
                    self.host.play_cue(owner, &cue);
                }
            }
        }
        Ok(())
    }

    /// Starts a basic attack; with no windup it resolves immediately.
    pub(crate) fn begin_attack(
        &mut self,
        creator: ParticipantId,
        target: ParticipantId,
    ) -> Result<AttackId, ActionError> {
        self.require(creator)?;
        self.require(target)?;
        let id = AttackId(self.ids.allocate());
        let attack = AttackExecution::new(
            id,
            creator,
            target,
            self.now,
            self.config.attack_windup_ms,
            self.config.attack_recovery_ms,
        );
        self.attacks.insert(id, attack);
        tracing::debug!(
            target: "combat::execution",
            attacker = %creator,
            receiver = %target,
            attack = %id,
            "attack begun"
        );
        self.process_attack(id);
        Ok(id)
    }

    pub(super) fn update_attacks(&mut self) {
        let ids: Vec<AttackId> = self.attacks.keys().copied().collect();
        for id in ids {
            self.process_attack(id);
        }
    }

    fn process_attack(&mut self, id: AttackId) {
        let now = self.now;
        if self.attacks.get(&id).is_some_and(|attack| attack.is_due(now))
            && let Err(error) = self.apply_attack(id)
        {
            self.record_scheduled_fault("attack effect", error);
        }
        if self
            .attacks
            .get(&id)
            .is_some_and(|attack| attack.is_finished(now))
        {
            self.attacks.remove(&id);
            tracing::trace!(target: "combat::execution", attack = %id, "attack ended");
        }
    }

    /// Fires the attack-effect points and, unless a listener blocked the
    /// attack, assigns the attack ability's effects to the target.
    fn apply_attack(&mut self, id: AttackId) -> Result<(), CombatError> {
        let Some(attack) = self.attacks.get_mut(&id) else {
            return Ok(());
        };
        attack.mark_applied();
        let (creator, target) = (attack.creator, attack.target);

        self.trigger(
            creator,
            ActionPointType::PreGiveAttackEffect,
            &mut PointPayload::Attack(id),
        );
        self.trigger(
            target,
            ActionPointType::PreReceiveAttackEffect,
            &mut PointPayload::Attack(id),
        );

        let Some(attack) = self.attacks.get(&id) else {
            return Ok(());
        };
        if attack.is_blocked() {
            tracing::debug!(target: "combat::execution", attack = %id, "attack effect blocked");
            return Ok(());
        }
        if !self.participants.contains_key(&creator) || !self.participants.contains_key(&target) {
            return Ok(());
        }

        let configs = self.configs();
        for effect in &configs.attack().effects {
            self.assign_effect(
                creator,
                target,
                effect.clone(),
                EffectSource::new(EffectOrigin::Attack),
            )?;
        }
        Ok(())
    }
}
