//! Hit-volume lifecycle and contact resolution.

use super::CombatWorld;
use crate::effect::{EffectOrigin, EffectSource};
use crate::env::ConfigError;
use crate::error::CombatError;
use crate::execution::{CollisionExecuteData, ExecuteClip};
use crate::hit_volume::{HitVolume, SpawnRequest, VolumeOrigin, VolumeStep};
use crate::ids::{ExecutionId, HitVolumeId, ParticipantId};
use crate::participant::Participant;

impl CombatWorld {
    /// Places a collider for a `CollisionExecute` clip.
    ///
    /// Returns `None` when the strategy cannot be placed, e.g. a homing
    /// volume whose execution has no live target.
    pub(super) fn spawn_hit_volume(
        &mut self,
        execution: ExecutionId,
        clip: &ExecuteClip,
        data: &CollisionExecuteData,
    ) -> Result<Option<HitVolumeId>, CombatError> {
        let Some(running) = self.executions.get(&execution) else {
            return Ok(None);
        };
        let origin = VolumeOrigin {
            owner: running.owner,
            skill: running.skill,
            level: running.level,
            execution,
        };
        let caster = self
            .participants
            .get(&origin.owner)
            .ok_or(CombatError::UnknownParticipant(origin.owner))?;
        let target = running
            .input
            .targets
            .iter()
            .find_map(|target| self.participants.get(target))
            .map(|target| (target.id, target.position()));
        let request = SpawnRequest {
            caster: caster.pose,
            input_point: running.input.point,
            input_direction: running.input.direction,
            target,
            clip_duration_ms: clip.duration_ms(),
            path: &data.path,
        };
        let Some(placement) = data.move_type.plan(&request, &self.config) else {
            tracing::warn!(
                target: "combat::hit_volume",
                %execution,
                move_type = %data.move_type,
                "no target to fly toward, volume not spawned"
            );
            return Ok(None);
        };

        let id = HitVolumeId(self.ids.allocate());
        let volume = HitVolume::new(
            id,
            origin,
            data.shape,
            data.move_type,
            data.effects.clone(),
            placement,
            self.now,
        );
        self.host.spawn_collider(id, &volume.shape, volume.pose());
        tracing::debug!(
            target: "combat::hit_volume",
            volume = %id,
            owner = %volume.owner,
            move_type = %volume.move_type,
            expires_at = volume.expires_at(),
            "hit volume spawned"
        );
        self.volumes.insert(id, volume);
        Ok(Some(id))
    }

    /// Disposes a volume; false when it is already gone.
    pub fn despawn_hit_volume(&mut self, id: HitVolumeId) -> bool {
        if self.volumes.remove(&id).is_none() {
            return false;
        }
        self.host.despawn_collider(id);
        tracing::trace!(target: "combat::hit_volume", volume = %id, "hit volume disposed");
        true
    }

    pub(super) fn update_hit_volumes(&mut self) {
        let now = self.now;
        let ids: Vec<HitVolumeId> = self.volumes.keys().copied().collect();
        for id in ids {
            let target_position = self
                .volumes
                .get(&id)
                .and_then(HitVolume::locked_target)
                .and_then(|target| self.participants.get(&target))
                .map(Participant::position);
            let Some(volume) = self.volumes.get_mut(&id) else {
                continue;
            };
            match volume.advance(now, target_position) {
                VolumeStep::Active => {
                    let pose = volume.pose();
                    self.host.move_collider(id, pose);
                }
                VolumeStep::Arrived | VolumeStep::Expired => {
                    self.despawn_hit_volume(id);
                }
            }
        }
    }

    /// First-contact callback for the physics layer.
    ///
    /// Assigns the volume's selected skill effects to `participant` and
    /// returns true, or returns false when the participant is the caster or
    /// was already struck by this volume.
    pub fn report_contact(
        &mut self,
        volume: HitVolumeId,
        participant: ParticipantId,
    ) -> Result<bool, CombatError> {
        if !self.participants.contains_key(&participant) {
            return Err(CombatError::UnknownParticipant(participant));
        }
        let hit = self
            .volumes
            .get_mut(&volume)
            .ok_or(CombatError::UnknownHitVolume(volume))?;
        let Some(index) = hit.record_strike(participant) else {
            return Ok(false);
        };
        let (owner, skill, level, execution) = (hit.owner, hit.skill, hit.level, hit.execution);
        let selection = hit.effects.clone();

        let configs = self.configs();
        let config = configs
            .skill(skill)
            .ok_or(ConfigError::UnknownSkill(skill))?;
        tracing::debug!(
            target: "combat::hit_volume",
            %volume,
            %owner,
            struck = %participant,
            index,
            "contact"
        );
        for effect in selection.select(&config.effects) {
            let source = EffectSource::new(EffectOrigin::Skill(skill))
                .with_level(level)
                .with_execution(execution)
                .with_target_index(index);
            self.assign_effect(owner, participant, effect.clone(), source)?;
        }
        Ok(true)
    }

    /// Overlap probe for runs without a physics layer: reports every live
    /// participant touching a volume's shape. Returns the number of new
    /// contacts.
    pub fn probe_contacts(&mut self) -> usize {
        let mut contacts = Vec::new();
        for volume in self.volumes.values() {
            let pose = volume.pose();
            for participant in self.participants.values() {
                if !participant.is_dead()
                    && volume.can_strike(participant.id)
                    && volume
                        .shape
                        .overlaps_sphere(&pose, participant.position(), participant.radius)
                {
                    contacts.push((volume.id, participant.id));
                }
            }
        }

        let mut struck = 0;
        for (volume, participant) in contacts {
            if !self.volumes.contains_key(&volume) || !self.participants.contains_key(&participant)
            {
                continue;
            }
            match self.report_contact(volume, participant) {
                Ok(true) => struck += 1,
                Ok(false) => {}
                Err(error) => self.record_scheduled_fault("hit volume contact", error),
            }
        }
        struck
    }
}
