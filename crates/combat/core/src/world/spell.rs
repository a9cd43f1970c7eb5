//! Caller-facing entry points. Each returns `Ok(None)` when the responsible
//! ability is disabled (or the skill is not ready) and nothing happened.

use super::CombatWorld;
use crate::action::{AssignOutcome, drive};
use crate::effect::{Effect, EffectSource};
use crate::env::ConfigError;
use crate::error::CombatError;
use crate::execution::SpellInput;
use crate::ids::{AttackId, ExecutionId, ItemId, ParticipantId, SkillId};

impl CombatWorld {
    /// Spells a learned skill and starts its execution.
    ///
    /// `PostSpell` fires on a later tick, once the execution has ended.
    pub fn spell_skill(
        &mut self,
        caster: ParticipantId,
        skill: SkillId,
        input: SpellInput,
    ) -> Result<Option<ExecutionId>, CombatError> {
        if self.configs.skill(skill).is_none() {
            return Err(ConfigError::UnknownSkill(skill).into());
        }
        let participant = self
            .participants
            .get(&caster)
            .ok_or(CombatError::UnknownParticipant(caster))?;
        let ability = participant
            .abilities
            .skill(skill)
            .ok_or(CombatError::SkillNotLearned {
                participant: caster,
                skill,
            })?;

        if !ability.is_ready(self.now) {
            tracing::debug!(
                target: "combat::world",
                %caster,
                %skill,
                remaining_ms = ability.cooldown_remaining(self.now),
                "skill on cooldown"
            );
            return Ok(None);
        }
        if let Some(execution) = participant.spelling() {
            tracing::debug!(target: "combat::world", %caster, %execution, "caster busy");
            return Ok(None);
        }

        let target = input.targets.first().copied().unwrap_or(caster);
        let Some(action) = participant.abilities.spell_skill.try_make_action(target) else {
            tracing::debug!(target: "combat::world", %caster, "spell ability disabled");
            return Ok(None);
        };
        let execution = action.with_skill(skill, input).spell(self)?;
        Ok(Some(execution))
    }

    /// Starts a basic attack against `target`.
    pub fn spell_attack(
        &mut self,
        attacker: ParticipantId,
        target: ParticipantId,
    ) -> Result<Option<AttackId>, CombatError> {
        if !self.participants.contains_key(&target) {
            return Err(CombatError::UnknownParticipant(target));
        }
        let participant = self
            .participants
            .get(&attacker)
            .ok_or(CombatError::UnknownParticipant(attacker))?;
        let Some(action) = participant.abilities.spell_attack.try_make_action(target) else {
            tracing::debug!(target: "combat::world", %attacker, "attack ability disabled");
            return Ok(None);
        };
        Ok(Some(drive(action, self)?))
    }

    /// Uses one charge of a held item on `target`.
    pub fn spell_item(
        &mut self,
        user: ParticipantId,
        item: ItemId,
        target: ParticipantId,
    ) -> Result<Option<Vec<AssignOutcome>>, CombatError> {
        if self.configs.item(item).is_none() {
            return Err(ConfigError::UnknownItem(item).into());
        }
        if !self.participants.contains_key(&target) {
            return Err(CombatError::UnknownParticipant(target));
        }
        let participant = self
            .participants
            .get(&user)
            .ok_or(CombatError::UnknownParticipant(user))?;
        if participant.abilities.item_count(item) == 0 {
            return Err(CombatError::ItemNotHeld {
                participant: user,
                item,
            });
        }
        let Some(action) = participant.abilities.spell_item.try_make_action(target) else {
            tracing::debug!(target: "combat::world", %user, "item ability disabled");
            return Ok(None);
        };
        Ok(Some(drive(action.with_item(item), self)?))
    }

    /// Assigns a single effect through the creator's effect-assign ability.
    pub fn assign_effect(
        &mut self,
        creator: ParticipantId,
        target: ParticipantId,
        effect: Effect,
        source: EffectSource,
    ) -> Result<Option<AssignOutcome>, CombatError> {
        if !self.participants.contains_key(&target) {
            return Err(CombatError::UnknownParticipant(target));
        }
        let participant = self
            .participants
            .get(&creator)
            .ok_or(CombatError::UnknownParticipant(creator))?;
        let Some(action) = participant.abilities.effect_assign.try_make_action(target) else {
            return Ok(None);
        };
        Ok(Some(drive(action.with_effect(effect, source), self)?))
    }
}
