use super::{ActionError, ActionKind, ActionPhase, CombatAction};
use crate::ability::{AbilityAction, AbilityRef};
use crate::effect::{
    DamageEffect, DamagePipeline, DamageSource, EffectSource, FormulaInputs, ValueFormula,
};
use crate::ids::ParticipantId;
use crate::point::{ActionPointType, PointPayload};
use crate::world::CombatWorld;

/// Removes health from the target.
///
/// Without an effect the action resolves as a basic melee hit:
/// `ceil(max(1, attack - defense))`.
#[derive(Clone, Debug)]
pub struct DamageAction {
    pub ability: AbilityRef,
    pub creator: ParticipantId,
    pub target: ParticipantId,
    pub source: Option<EffectSource>,
    pub effect: Option<DamageEffect>,
    pub damage_source: DamageSource,
    /// Final amount; listeners on the `Pre*` points may rewrite it.
    pub damage_value: u32,
    pub critical: bool,
    pub pipeline: DamagePipeline,
    phase: ActionPhase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageOutcome {
    pub dealt: u32,
    pub critical: bool,
    pub killed: bool,
}

impl DamageAction {
    #[must_use]
    pub fn with_effect(mut self, effect: DamageEffect, source: EffectSource) -> Self {
        self.damage_source = source.origin.damage_source();
        self.effect = Some(effect);
        self.source = Some(source);
        self
    }
}

impl AbilityAction for DamageAction {
    const KIND: ActionKind = ActionKind::Damage;

    fn from_ability(ability: AbilityRef, target: ParticipantId) -> Self {
        Self {
            ability,
            creator: ability.owner,
            target,
            source: None,
            effect: None,
            damage_source: DamageSource::Attack,
            damage_value: 0,
            critical: false,
            pipeline: DamagePipeline::default(),
            phase: ActionPhase::Created,
        }
    }
}

impl CombatAction for DamageAction {
    type Outcome = DamageOutcome;

    fn phase(&self) -> ActionPhase {
        self.phase
    }

    fn set_phase(&mut self, phase: ActionPhase) {
        self.phase = phase;
    }

    fn pre_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        let creator = world.require(self.creator)?;
        let target = world.require(self.target)?;
        let inputs = FormulaInputs {
            caster_attack: creator.attack(),
            target_defense: target.defense(),
            target_max_health: target.health.max(),
            level: self.source.map_or(1, |source| source.level),
        };
        let critical_probability = creator.critical_probability();

        let (base, can_crit, falloff) = match &self.effect {
            Some(effect) => (effect.formula.evaluate(&inputs), effect.can_crit, effect.falloff),
            None => (ValueFormula::Melee.evaluate(&inputs), false, None),
        };
        let rolls_crit = self.damage_source == DamageSource::Attack || can_crit;
        self.critical = rolls_crit && world.rng().roll_chance(critical_probability);

        let target_index = self.source.map_or(0, |source| source.target_index);
        self.pipeline = DamagePipeline::new(base)
            .critical(self.critical, world.config().critical_multiplier)
            .falloff(falloff.as_ref(), target_index);
        self.damage_value = self.pipeline.value();

        world.trigger(
            self.creator,
            ActionPointType::PreCauseDamage,
            &mut PointPayload::Damage(self),
        );
        world.trigger(
            self.target,
            ActionPointType::PreReceiveDamage,
            &mut PointPayload::Damage(self),
        );
        Ok(())
    }

    fn apply(&mut self, world: &mut CombatWorld) -> Result<DamageOutcome, ActionError> {
        let target = world.require_mut(self.target)?;
        let was_dead = target.is_dead();
        let dealt = target.health.reduce(self.damage_value);
        let killed = !was_dead && target.is_dead();
        tracing::debug!(
            target: "combat::action",
            creator = %self.creator,
            receiver = %self.target,
            source = %self.damage_source,
            value = self.damage_value,
            dealt,
            critical = self.critical,
            "damage applied"
        );
        if killed {
            tracing::info!(
                target: "combat::action",
                participant = %self.target,
                killer = %self.creator,
                "participant died"
            );
            world.host().participant_died(self.target, self.creator);
        }
        Ok(DamageOutcome {
            dealt,
            critical: self.critical,
            killed,
        })
    }

    fn post_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        world.trigger(
            self.creator,
            ActionPointType::PostCauseDamage,
            &mut PointPayload::Damage(self),
        );
        world.trigger(
            self.target,
            ActionPointType::PostReceiveDamage,
            &mut PointPayload::Damage(self),
        );
        Ok(())
    }
}
