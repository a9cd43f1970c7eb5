use super::{ActionError, ActionKind, ActionPhase, CombatAction};
use crate::ability::{AbilityAction, AbilityRef};
use crate::effect::{CureEffect, EffectSource, FormulaInputs};
use crate::ids::ParticipantId;
use crate::point::{ActionPointType, PointPayload};
use crate::world::CombatWorld;

/// Restores health to the target.
///
/// Healing a target at full health changes nothing, but the `Post*` points
/// still fire.
#[derive(Clone, Debug)]
pub struct CureAction {
    pub ability: AbilityRef,
    pub creator: ParticipantId,
    pub target: ParticipantId,
    pub source: Option<EffectSource>,
    pub effect: Option<CureEffect>,
    pub cure_value: u32,
    /// Health actually restored.
    pub healed: u32,
    phase: ActionPhase,
}

impl CureAction {
    #[must_use]
    pub fn with_effect(mut self, effect: CureEffect, source: EffectSource) -> Self {
        self.effect = Some(effect);
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_value(mut self, cure_value: u32) -> Self {
        self.cure_value = cure_value;
        self
    }
}

impl AbilityAction for CureAction {
    const KIND: ActionKind = ActionKind::Cure;

    fn from_ability(ability: AbilityRef, target: ParticipantId) -> Self {
        Self {
            ability,
            creator: ability.owner,
            target,
            source: None,
            effect: None,
            cure_value: 0,
            healed: 0,
            phase: ActionPhase::Created,
        }
    }
}

impl CombatAction for CureAction {
    type Outcome = u32;

    fn phase(&self) -> ActionPhase {
        self.phase
    }

    fn set_phase(&mut self, phase: ActionPhase) {
        self.phase = phase;
    }

    fn pre_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        let Some(effect) = &self.effect else {
            world.require(self.target)?;
            return Ok(());
        };
        let creator = world.require(self.creator)?;
        let target = world.require(self.target)?;
        let inputs = FormulaInputs {
            caster_attack: creator.attack(),
            target_defense: target.defense(),
            target_max_health: target.health.max(),
            level: self.source.map_or(1, |source| source.level),
        };
        self.cure_value = effect.formula.amount(&inputs);
        Ok(())
    }

    fn apply(&mut self, world: &mut CombatWorld) -> Result<u32, ActionError> {
        let target = world.require_mut(self.target)?;
        if !target.health.is_full() {
            self.healed = target.health.restore(self.cure_value);
        }
        tracing::debug!(
            target: "combat::action",
            creator = %self.creator,
            receiver = %self.target,
            value = self.cure_value,
            healed = self.healed,
            "cure applied"
        );
        Ok(self.healed)
    }

    fn post_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        world.trigger(
            self.creator,
            ActionPointType::PostGiveCure,
            &mut PointPayload::Cure(self),
        );
        world.trigger(
            self.target,
            ActionPointType::PostReceiveCure,
            &mut PointPayload::Cure(self),
        );
        Ok(())
    }
}
