use super::{ActionError, ActionKind, ActionPhase, CombatAction};
use crate::ability::{AbilityAction, AbilityRef};
use crate::effect::{AddStatusEffect, EffectSource};
use crate::env::ConfigError;
use crate::ids::{ParticipantId, StatusInstanceId};
use crate::point::{ActionPointType, PointPayload};
use crate::status::{Status, StatusConfig};
use crate::world::CombatWorld;

/// Attaches a status to the target, or refreshes one it already holds.
#[derive(Clone, Debug)]
pub struct AddStatusAction {
    pub ability: AbilityRef,
    pub creator: ParticipantId,
    pub target: ParticipantId,
    pub source: Option<EffectSource>,
    pub effect: Option<AddStatusEffect>,
    /// Instance created or refreshed by this action.
    pub status: Option<StatusInstanceId>,
    config: Option<StatusConfig>,
    refreshed: bool,
    phase: ActionPhase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddStatusOutcome {
    Applied(StatusInstanceId),
    /// An existing instance had its timer reset; no `Post*` points fire.
    Refreshed(StatusInstanceId),
}

impl AddStatusAction {
    #[must_use]
    pub fn with_effect(mut self, effect: AddStatusEffect, source: EffectSource) -> Self {
        self.effect = Some(effect);
        self.source = Some(source);
        self
    }

    pub fn is_refresh(&self) -> bool {
        self.refreshed
    }
}

impl AbilityAction for AddStatusAction {
    const KIND: ActionKind = ActionKind::AddStatus;

    fn from_ability(ability: AbilityRef, target: ParticipantId) -> Self {
        Self {
            ability,
            creator: ability.owner,
            target,
            source: None,
            effect: None,
            status: None,
            config: None,
            refreshed: false,
            phase: ActionPhase::Created,
        }
    }
}

impl CombatAction for AddStatusAction {
    type Outcome = AddStatusOutcome;

    fn phase(&self) -> ActionPhase {
        self.phase
    }

    fn set_phase(&mut self, phase: ActionPhase) {
        self.phase = phase;
    }

    fn pre_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        let effect = self
            .effect
            .as_ref()
            .ok_or(ActionError::MissingEffect(Self::KIND))?;
        world.require(self.target)?;
        let configs = world.configs();
        let config = configs
            .status(effect.status)
            .ok_or(ConfigError::UnknownStatus(effect.status))?;
        self.config = Some(config.clone());
        Ok(())
    }

    fn apply(&mut self, world: &mut CombatWorld) -> Result<AddStatusOutcome, ActionError> {
        let (Some(effect), Some(config)) = (&self.effect, &self.config) else {
            return Err(ActionError::MissingEffect(Self::KIND));
        };
        let now = world.now();
        let duration_ms = effect.duration_ms.unwrap_or(config.duration_ms);
        let level = self.source.map_or(1, |source| source.level);
        let instance = world.allocate_status_instance();
        let target = world.require_mut(self.target)?;

        let refresh_limit = if config.can_stack {
            config.max_stack as usize
        } else {
            1
        };
        if target.statuses.count_of(config.id) >= refresh_limit
            && let Some(existing) = target.statuses.oldest_mut(config.id)
        {
            existing.duration_ms = duration_ms;
            existing.reset_timer(now);
            let refreshed = existing.instance;
            self.refreshed = true;
            self.status = Some(refreshed);
            tracing::debug!(
                target: "combat::status",
                status = %config.id,
                instance = %refreshed,
                holder = %self.target,
                duration_ms,
                "status refreshed"
            );
            return Ok(AddStatusOutcome::Refreshed(refreshed));
        }

        let mut status = Status::start(instance, config, self.creator, level, duration_ms, now);
        status.params = effect.params.clone();
        target
            .statuses
            .insert(status)
            .map_err(|_| ActionError::StatusCapacity(self.target))?;
        target.refresh_action_control();
        self.status = Some(instance);
        tracing::debug!(
            target: "combat::status",
            status = %config.id,
            instance = %instance,
            holder = %self.target,
            duration_ms,
            level,
            "status applied"
        );
        Ok(AddStatusOutcome::Applied(instance))
    }

    fn post_process(&mut self, world: &mut CombatWorld) -> Result<(), ActionError> {
        if self.refreshed {
            return Ok(());
        }
        world.trigger(
            self.creator,
            ActionPointType::PostGiveStatus,
            &mut PointPayload::AddStatus(self),
        );
        world.trigger(
            self.target,
            ActionPointType::PostReceiveStatus,
            &mut PointPayload::AddStatus(self),
        );
        Ok(())
    }
}
