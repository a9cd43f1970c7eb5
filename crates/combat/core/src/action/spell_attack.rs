use super::{ActionError, ActionKind, ActionPhase, CombatAction};
use crate::ability::{AbilityAction, AbilityRef};
use crate::ids::{AttackId, ParticipantId};
use crate::point::{ActionPointType, PointPayload};
use crate::world::CombatWorld;

/// Starts a basic attack execution against the target.
#[derive(Clone, Debug)]
pub struct SpellAttackAction {
    pub ability: AbilityRef,
    pub creator: ParticipantId,
    pub target: ParticipantId,
    pub attack: Option<AttackId>,
    phase: ActionPhase,
}

impl AbilityAction for SpellAttackAction {
    const KIND: ActionKind = ActionKind::SpellAttack;

    fn from_ability(ability: AbilityRef, target: ParticipantId) -> Self {
        Self {
            ability,
            creator: ability.owner,
            target,
            attack: None,
            phase: ActionPhase::Created,
        }
    }
}

impl CombatAction for SpellAttackAction {
    type Outcome = AttackId;

    fn phase(&self) -> ActionPhase {
        self.phase
    }

    fn set_phase(&mut self, phase: ActionPhase) {
        self.phase = phase;
    }

    fn pre_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        world.require(self.target)?;
        world.trigger(
            self.creator,
            ActionPointType::PreGiveAttack,
            &mut PointPayload::SpellAttack(self),
        );
        world.trigger(
            self.target,
            ActionPointType::PreReceiveAttack,
            &mut PointPayload::SpellAttack(self),
        );
        Ok(())
    }

    fn apply(&mut self, world: &mut CombatWorld) -> Result<AttackId, ActionError> {
        let attack = world.begin_attack(self.creator, self.target)?;
        self.attack = Some(attack);
        Ok(attack)
    }

    fn post_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        world.trigger(
            self.creator,
            ActionPointType::PostGiveAttack,
            &mut PointPayload::SpellAttack(self),
        );
        world.trigger(
            self.target,
            ActionPointType::PostReceiveAttack,
            &mut PointPayload::SpellAttack(self),
        );
        Ok(())
    }
}
