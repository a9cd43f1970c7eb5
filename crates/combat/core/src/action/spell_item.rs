use super::{ActionError, ActionKind, ActionPhase, AssignOutcome, CombatAction, drive};
use crate::ability::{AbilityAction, AbilityRef};
use crate::effect::{EffectOrigin, EffectSource};
use crate::env::ConfigError;
use crate::ids::{ItemId, ParticipantId};
use crate::point::{ActionPointType, PointPayload};
use crate::world::CombatWorld;

/// Consumes one item charge and assigns each of the item's effects to the
/// target.
#[derive(Clone, Debug)]
pub struct SpellItemAction {
    pub ability: AbilityRef,
    pub creator: ParticipantId,
    pub target: ParticipantId,
    pub item: Option<ItemId>,
    phase: ActionPhase,
}

impl SpellItemAction {
    #[must_use]
    pub fn with_item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }
}

impl AbilityAction for SpellItemAction {
    const KIND: ActionKind = ActionKind::SpellItem;

    fn from_ability(ability: AbilityRef, target: ParticipantId) -> Self {
        Self {
            ability,
            creator: ability.owner,
            target,
            item: None,
            phase: ActionPhase::Created,
        }
    }
}

impl CombatAction for SpellItemAction {
    type Outcome = Vec<AssignOutcome>;

    fn phase(&self) -> ActionPhase {
        self.phase
    }

    fn set_phase(&mut self, phase: ActionPhase) {
        self.phase = phase;
    }

    fn pre_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        let item = self.item.ok_or(ActionError::MissingEffect(Self::KIND))?;
        if world.configs().item(item).is_none() {
            return Err(ConfigError::UnknownItem(item).into());
        }
        world.require(self.target)?;
        world.trigger(
            self.creator,
            ActionPointType::PreGiveItem,
            &mut PointPayload::SpellItem(self),
        );
        world.trigger(
            self.target,
            ActionPointType::PreReceiveItem,
            &mut PointPayload::SpellItem(self),
        );
        Ok(())
    }

    fn apply(&mut self, world: &mut CombatWorld) -> Result<Vec<AssignOutcome>, ActionError> {
        let item = self.item.ok_or(ActionError::MissingEffect(Self::KIND))?;
        let configs = world.configs();
        let config = configs.item(item).ok_or(ConfigError::UnknownItem(item))?;
        world.require_mut(self.creator)?.abilities.consume_item(item);

        let source = EffectSource::new(EffectOrigin::Item(item));
        let mut outcomes = Vec::with_capacity(config.effects.len());
        for effect in &config.effects {
            let assigner = &world.require(self.creator)?.abilities.effect_assign;
            let Some(action) = assigner.try_make_action(self.target) else {
                outcomes.push(AssignOutcome::Disabled(ActionKind::EffectAssign));
                continue;
            };
            outcomes.push(drive(action.with_effect(effect.clone(), source), world)?);
        }
        tracing::debug!(
            target: "combat::action",
            creator = %self.creator,
            receiver = %self.target,
            %item,
            effects = outcomes.len(),
            "item used"
        );
        Ok(outcomes)
    }

    fn post_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        world.trigger(
            self.creator,
            ActionPointType::PostGiveItem,
            &mut PointPayload::SpellItem(self),
        );
        world.trigger(
            self.target,
            ActionPointType::PostReceiveItem,
            &mut PointPayload::SpellItem(self),
        );
        Ok(())
    }
}
