use super::{ActionError, ActionKind, ActionPhase, CombatAction, drive};
use crate::ability::{AbilityAction, AbilityRef};
use crate::ids::{AttackId, ParticipantId};
use crate::point::{ActionPointType, ListenerError, PointPayload};
use crate::world::CombatWorld;

/// Marks an in-flight basic attack as blocked.
///
/// Created by the blocker's ability while the attack fires
/// `PreReceiveAttackEffect`; the creator is the blocker and the target is
/// the attacker.
#[derive(Clone, Debug)]
pub struct AttackBlockAction {
    pub ability: AbilityRef,
    pub creator: ParticipantId,
    pub target: ParticipantId,
    pub attack: Option<AttackId>,
    phase: ActionPhase,
}

impl AttackBlockAction {
    #[must_use]
    pub fn with_attack(mut self, attack: AttackId) -> Self {
        self.attack = Some(attack);
        self
    }
}

impl AbilityAction for AttackBlockAction {
    const KIND: ActionKind = ActionKind::AttackBlock;

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

impl CombatAction for AttackBlockAction {
    type Outcome = AttackId;

    fn phase(&self) -> ActionPhase {
        self.phase
    }

    fn set_phase(&mut self, phase: ActionPhase) {
        self.phase = phase;
    }

    fn apply(&mut self, world: &mut CombatWorld) -> Result<AttackId, ActionError> {
        let attack = self
            .attack
            .ok_or(ActionError::MissingEffect(Self::KIND))?;
        world
            .attack_mut(attack)
            .ok_or(ActionError::AttackMissing(attack))?
            .set_blocked();
        tracing::debug!(
            target: "combat::action",
            blocker = %self.creator,
            attacker = %self.target,
            %attack,
            "attack blocked"
        );
        Ok(attack)
    }

    fn post_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        world.trigger(
            self.creator,
            ActionPointType::PostGiveBlock,
            &mut PointPayload::AttackBlock(self),
        );
        world.trigger(
            self.target,
            ActionPointType::PostReceiveBlock,
            &mut PointPayload::AttackBlock(self),
        );
        Ok(())
    }
}

/// `PreReceiveAttackEffect` handler installed for participants that can block.
pub(crate) fn intercept_attack(
    world: &mut CombatWorld,
    blocker: ParticipantId,
    attack: AttackId,
) -> Result<(), ListenerError> {
    let Some(execution) = world.attack(attack) else {
        return Ok(());
    };
    if execution.is_blocked() || execution.target != blocker {
        return Ok(());
    }
    let attacker = execution.creator;
    let Some(participant) = world.participant(blocker) else {
        return Ok(());
    };
    let probability = participant.block_probability();
    let Some(action) = participant.abilities.attack_block.try_make_action(attacker) else {
        return Ok(());
    };
    if !world.rng().roll_basis_points(probability) {
        return Ok(());
    }
    drive(action.with_attack(attack), world)?;
    Ok(())
}
