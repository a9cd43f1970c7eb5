use super::{ActionError, ActionKind, ActionPhase, ActionPhaseError};
use crate::ability::{AbilityAction, AbilityRef};
use crate::env::ConfigError;
use crate::execution::SpellInput;
use crate::ids::{ExecutionId, ParticipantId, SkillId};
use crate::point::{ActionPointType, PointPayload};
use crate::world::CombatWorld;

/// Lifecycle of a skill spell. Unlike the synchronous actions it waits on
/// its execution across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellPhase {
    Created,
    /// Waiting for the execution to be disposed.
    Pending(ExecutionId),
    Finished,
}

/// Spells a skill: fires `PreSpell`, starts the skill execution and fires
/// `PostSpell` once that execution has ended.
#[derive(Clone, Debug)]
pub struct SpellSkillAction {
    pub ability: AbilityRef,
    pub creator: ParticipantId,
    pub target: ParticipantId,
    pub skill: Option<SkillId>,
    pub input: SpellInput,
    phase: SpellPhase,
}

impl SpellSkillAction {
    #[must_use]
    pub fn with_skill(mut self, skill: SkillId, input: SpellInput) -> Self {
        self.skill = Some(skill);
        self.input = input;
        self
    }

    pub fn phase(&self) -> SpellPhase {
        self.phase
    }

    pub fn execution(&self) -> Option<ExecutionId> {
        match self.phase {
            SpellPhase::Pending(execution) => Some(execution),
            SpellPhase::Created | SpellPhase::Finished => None,
        }
    }

    /// Starts the execution and parks the action in the world until it ends.
    pub(crate) fn spell(mut self, world: &mut CombatWorld) -> Result<ExecutionId, ActionPhaseError> {
        debug_assert_eq!(self.phase, SpellPhase::Created, "skill spelled twice");
        let fail = |phase: ActionPhase| {
            move |error: ActionError| ActionPhaseError::new(ActionKind::SpellSkill, phase, error)
        };

        let skill = self
            .skill
            .ok_or(ActionError::MissingEffect(ActionKind::SpellSkill))
            .map_err(fail(ActionPhase::PreProcess))?;
        let configs = world.configs();
        let config = configs
            .skill(skill)
            .ok_or(ActionError::Config(ConfigError::UnknownSkill(skill)))
            .map_err(fail(ActionPhase::PreProcess))?;

        world.trigger(
            self.creator,
            ActionPointType::PreSpell,
            &mut PointPayload::SpellSkill(&mut self),
        );

        let caster = world
            .require(self.creator)
            .map_err(fail(ActionPhase::Apply))?;
        let level = caster
            .abilities
            .skill(skill)
            .map_or(1, |ability| ability.level());
        let execution = world
            .begin_execution(
                self.creator,
                skill,
                level,
                &config.execution,
                self.input.clone(),
                false,
            )
            .map_err(fail(ActionPhase::Apply))?;

        let now = world.now();
        if let Some(ability) = world
            .participant_mut(self.creator)
            .and_then(|caster| caster.abilities.skill_mut(skill))
        {
            ability.start_cooldown(now, config.cooldown_ms);
        }

        tracing::debug!(
            target: "combat::action",
            caster = %self.creator,
            %skill,
            %execution,
            "skill spelled"
        );
        self.phase = SpellPhase::Pending(execution);
        world.push_pending_spell(self);
        Ok(execution)
    }

    /// Finishes the spell once its execution is gone; returns true when done.
    pub(crate) fn poll(&mut self, world: &mut CombatWorld) -> bool {
        let SpellPhase::Pending(execution) = self.phase else {
            return true;
        };
        if world.execution(execution).is_some() {
            return false;
        }
        world.trigger(
            self.creator,
            ActionPointType::PostSpell,
            &mut PointPayload::SpellSkill(self),
        );
        self.phase = SpellPhase::Finished;
        tracing::trace!(
            target: "combat::action",
            caster = %self.creator,
            %execution,
            "spell finished"
        );
        true
    }
}

impl AbilityAction for SpellSkillAction {
    const KIND: ActionKind = ActionKind::SpellSkill;

    fn from_ability(ability: AbilityRef, target: ParticipantId) -> Self {
        Self {
            ability,
            creator: ability.owner,
            target,
            skill: None,
            input: SpellInput::default(),
            phase: SpellPhase::Created,
        }
    }
}
