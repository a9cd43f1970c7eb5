use super::{
    ActionError, ActionKind, ActionPhase, AddStatusOutcome, CombatAction, DamageOutcome, drive,
};
use crate::ability::{AbilityAction, AbilityRef};
use crate::effect::{Effect, EffectKind, EffectOrigin, EffectSource};
use crate::ids::ParticipantId;
use crate::point::{ActionPointType, PointPayload};
use crate::world::CombatWorld;

/// Binds one authored effect to one target and drives the concrete action
/// it stands for.
#[derive(Clone, Debug)]
pub struct EffectAssignAction {
    pub ability: AbilityRef,
    pub creator: ParticipantId,
    pub target: ParticipantId,
    pub effect: Option<Effect>,
    pub source: EffectSource,
    pub outcome: Option<AssignOutcome>,
    phase: ActionPhase,
}

/// What the assigned effect resolved into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOutcome {
    Damage(DamageOutcome),
    Cure(u32),
    Status(AddStatusOutcome),
    /// Number of status instances removed.
    Removed(usize),
    /// Handled by `AssignEffect`/`ReceiveEffect` listeners.
    Custom,
    /// The creator's ability for this effect kind is disabled.
    Disabled(ActionKind),
}

impl EffectAssignAction {
    #[must_use]
    pub fn with_effect(mut self, effect: Effect, source: EffectSource) -> Self {
        self.effect = Some(effect);
        self.source = source;
        self
    }

    pub fn effect_kind(&self) -> Option<EffectKind> {
        self.effect.as_ref().map(Effect::kind)
    }
}

impl AbilityAction for EffectAssignAction {
    const KIND: ActionKind = ActionKind::EffectAssign;

    fn from_ability(ability: AbilityRef, target: ParticipantId) -> Self {
        Self {
            ability,
            creator: ability.owner,
            target,
            effect: None,
            source: EffectSource::new(EffectOrigin::Attack),
            outcome: None,
            phase: ActionPhase::Created,
        }
    }
}

impl CombatAction for EffectAssignAction {
    type Outcome = AssignOutcome;

    fn phase(&self) -> ActionPhase {
        self.phase
    }

    fn set_phase(&mut self, phase: ActionPhase) {
        self.phase = phase;
    }

    fn pre_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        if self.effect.is_none() {
            return Err(ActionError::MissingEffect(Self::KIND));
        }
        world.require(self.creator)?;
        world.require(self.target)?;
        Ok(())
    }

    /// Dispatch table from effect kind to concrete action.
    fn apply(&mut self, world: &mut CombatWorld) -> Result<AssignOutcome, ActionError> {
        let effect = self
            .effect
            .clone()
            .ok_or(ActionError::MissingEffect(Self::KIND))?;
        let (creator, target, source) = (self.creator, self.target, self.source);
        let abilities = &world.require(creator)?.abilities;

        let outcome = match effect {
            Effect::Damage(damage) => match abilities.damage.try_make_action(target) {
                Some(action) => {
                    AssignOutcome::Damage(drive(action.with_effect(damage, source), world)?)
                }
                None => AssignOutcome::Disabled(ActionKind::Damage),
            },
            Effect::Cure(cure) => match abilities.cure.try_make_action(target) {
                Some(action) => AssignOutcome::Cure(drive(action.with_effect(cure, source), world)?),
                None => AssignOutcome::Disabled(ActionKind::Cure),
            },
            Effect::AddStatus(status) => match abilities.add_status.try_make_action(target) {
                Some(action) => {
                    AssignOutcome::Status(drive(action.with_effect(status, source), world)?)
                }
                None => AssignOutcome::Disabled(ActionKind::AddStatus),
            },
            Effect::RemoveStatus(remove) => {
                AssignOutcome::Removed(world.remove_statuses_of(target, remove.status))
            }
            Effect::ClearAllStatus => AssignOutcome::Removed(world.clear_statuses(target)),
            Effect::Custom(_) => AssignOutcome::Custom,
        };
        self.outcome = Some(outcome);
        Ok(outcome)
    }

    fn post_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        world.trigger(
            self.creator,
            ActionPointType::AssignEffect,
            &mut PointPayload::EffectAssign(self),
        );
        world.trigger(
            self.target,
            ActionPointType::ReceiveEffect,
            &mut PointPayload::EffectAssign(self),
        );
        Ok(())
    }
}
