use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use super::config::{ActionControl, StatusConfig};
use crate::config::CombatConfig;
use crate::ids::{Millis, ParticipantId, StatusId, StatusInstanceId};
use crate::participant::{AttributeKind, AttributeModifier};

/// One live status on a participant.
#[derive(Clone, Debug, PartialEq)]
pub struct Status {
    pub instance: StatusInstanceId,
    pub config: StatusId,
    pub creator: ParticipantId,
    pub level: u32,
    pub duration_ms: Millis,
    pub ends_at: Millis,
    pub next_tick_at: Option<Millis>,
    pub params: BTreeMap<String, f32>,
    pub modifiers: Vec<AttributeModifier>,
    pub action_control: ActionControl,
}

impl Status {
    /// Builds an instance and starts its timer at `now`.
    pub fn start(
        instance: StatusInstanceId,
        config: &StatusConfig,
        creator: ParticipantId,
        level: u32,
        duration_ms: Millis,
        now: Millis,
    ) -> Self {
        Self {
            instance,
            config: config.id,
            creator,
            level,
            duration_ms,
            ends_at: now.saturating_add(duration_ms),
            next_tick_at: config
                .periodic
                .as_ref()
                .map(|periodic| now.saturating_add(periodic.interval_ms)),
            params: BTreeMap::new(),
            modifiers: config.modifiers.clone(),
            action_control: config.action_control,
        }
    }

    pub fn reset_timer(&mut self, now: Millis) {
        self.ends_at = now.saturating_add(self.duration_ms);
    }

    pub fn remaining(&self, now: Millis) -> Millis {
        self.ends_at.saturating_sub(now)
    }

    pub fn is_expired(&self, now: Millis) -> bool {
        now >= self.ends_at
    }
}

/// Live statuses of one participant, in application order.
#[derive(Clone, Debug, Default)]
pub struct StatusSet {
    statuses: ArrayVec<Status, { CombatConfig::MAX_STATUSES }>,
}

impl StatusSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.statuses.iter()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn get(&self, instance: StatusInstanceId) -> Option<&Status> {
        self.statuses.iter().find(|status| status.instance == instance)
    }

    pub fn get_mut(&mut self, instance: StatusInstanceId) -> Option<&mut Status> {
        self.statuses
            .iter_mut()
            .find(|status| status.instance == instance)
    }

    pub fn has(&self, config: StatusId) -> bool {
        self.statuses.iter().any(|status| status.config == config)
    }

    pub fn count_of(&self, config: StatusId) -> usize {
        self.statuses
            .iter()
            .filter(|status| status.config == config)
            .count()
    }

    /// Earliest-applied instance of `config`.
    pub fn oldest_mut(&mut self, config: StatusId) -> Option<&mut Status> {
        self.statuses
            .iter_mut()
            .find(|status| status.config == config)
    }

    /// Appends a status, handing it back when the set is full.
    pub fn insert(&mut self, status: Status) -> Result<(), Status> {
        self.statuses
            .try_push(status)
            .map_err(|error| error.element())
    }

    pub fn remove(&mut self, instance: StatusInstanceId) -> Option<Status> {
        let index = self
            .statuses
            .iter()
            .position(|status| status.instance == instance)?;
        Some(self.statuses.remove(index))
    }

    pub fn instances_of(&self, config: StatusId) -> Vec<StatusInstanceId> {
        self.statuses
            .iter()
            .filter(|status| status.config == config)
            .map(|status| status.instance)
            .collect()
    }

    pub fn instances(&self) -> Vec<StatusInstanceId> {
        self.statuses.iter().map(|status| status.instance).collect()
    }

    pub fn expired(&self, now: Millis) -> Vec<StatusInstanceId> {
        self.statuses
            .iter()
            .filter(|status| status.is_expired(now))
            .map(|status| status.instance)
            .collect()
    }

    /// Instances whose periodic effect is due at `now`.
    pub fn due_ticks(&self, now: Millis) -> Vec<StatusInstanceId> {
        self.statuses
            .iter()
            .filter(|status| status.next_tick_at.is_some_and(|at| at <= now))
            .map(|status| status.instance)
            .collect()
    }

    /// Union of the action controls of every live status.
    pub fn action_control(&self) -> ActionControl {
        self.statuses
            .iter()
            .fold(ActionControl::empty(), |acc, status| acc | status.action_control)
    }

    /// Summed modifier value for one attribute.
    pub fn modifier_total(&self, attribute: AttributeKind) -> f32 {
        self.statuses
            .iter()
            .flat_map(|status| status.modifiers.iter())
            .filter(|modifier| modifier.attribute == attribute)
            .map(|modifier| modifier.value)
            .sum()
    }
}
