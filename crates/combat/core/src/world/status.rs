//! Status removal, expiry and periodic effects.

use super::CombatWorld;
use crate::effect::{EffectOrigin, EffectSource};
use crate::ids::{ParticipantId, StatusId, StatusInstanceId};
use crate::point::{ActionPointType, PointPayload};
use crate::status::Status;

impl CombatWorld {
    /// Removes one status instance and fires `PostRemoveStatus` on its
    /// holder.
    pub fn remove_status(
        &mut self,
        holder: ParticipantId,
        instance: StatusInstanceId,
    ) -> Option<Status> {
        let participant = self.participants.get_mut(&holder)?;
        let status = participant.statuses.remove(instance)?;
        participant.refresh_action_control();
        tracing::debug!(
            target: "combat::status",
            %holder,
            status = %status.config,
            %instance,
            "status removed"
        );
        self.trigger(
            holder,
            ActionPointType::PostRemoveStatus,
            &mut PointPayload::RemovedStatus(&status),
        );
        Some(status)
    }

    /// Removes every instance of `status`; returns how many were removed.
    pub fn remove_statuses_of(&mut self, holder: ParticipantId, status: StatusId) -> usize {
        let instances = match self.participants.get(&holder) {
            Some(participant) => participant.statuses.instances_of(status),
            None => return 0,
        };
        instances
            .into_iter()
            .filter_map(|instance| self.remove_status(holder, instance))
            .count()
    }

    pub fn clear_statuses(&mut self, holder: ParticipantId) -> usize {
        let instances = match self.participants.get(&holder) {
            Some(participant) => participant.statuses.instances(),
            None => return 0,
        };
        instances
            .into_iter()
            .filter_map(|instance| self.remove_status(holder, instance))
            .count()
    }

    /// Runs due periodic effects, then removes expired statuses.
    ///
    /// A tick scheduled at or before a status's end still fires on the frame
    /// the status expires.
    pub(super) fn update_statuses(&mut self) {
        let now = self.now;
        let holders: Vec<ParticipantId> = self.participants.keys().copied().collect();
        for holder in holders {
            let due = match self.participants.get(&holder) {
                Some(participant) => participant.statuses.due_ticks(now),
                None => continue,
            };
            for instance in due {
                self.tick_status(holder, instance);
            }

            let expired = match self.participants.get(&holder) {
                Some(participant) => participant.statuses.expired(now),
                None => continue,
            };
            for instance in expired {
                self.remove_status(holder, instance);
            }
        }
    }

    fn tick_status(&mut self, holder: ParticipantId, instance: StatusInstanceId) {
        let now = self.now;
        let configs = self.configs();
        let Some(status) = self
            .participants
            .get_mut(&holder)
            .and_then(|participant| participant.statuses.get_mut(instance))
        else {
            return;
        };
        let Some(periodic) = configs
            .status(status.config)
            .and_then(|config| config.periodic.as_ref())
        else {
            status.next_tick_at = None;
            return;
        };

        let interval = periodic.interval_ms.max(1);
        let mut ticks = 0;
        while let Some(at) = status.next_tick_at {
            if at > now || at > status.ends_at {
                break;
            }
            ticks += 1;
            status.next_tick_at = Some(at.saturating_add(interval));
        }
        let (config, creator, level) = (status.config, status.creator, status.level);
        let creator = if self.participants.contains_key(&creator) {
            creator
        } else {
            holder
        };

        tracing::trace!(
            target: "combat::status",
            %holder,
            status = %config,
            ticks,
            "periodic effect"
        );
        for _ in 0..ticks {
            for effect in &periodic.effects {
                if self.participants.get(&holder).is_none_or(|p| p.is_dead()) {
                    return;
                }
                let source = EffectSource::new(EffectOrigin::Status(config)).with_level(level);
                if let Err(error) = self.assign_effect(creator, holder, effect.clone(), source) {
                    self.record_scheduled_fault("status periodic effect", error);
                }
            }
        }
    }
}
