//! Hit volumes (ability items): transient colliders spawned by collision
//! clips.
//!
//! A volume is placed and moved by one of six [`CollisionMoveType`]
//! strategies. First contact with a participant is reported through
//! [`crate::CombatWorld::report_contact`], which assigns the clip's selected
//! skill effects to the struck participant.

mod bezier;
mod shape;
mod strategy;

pub use bezier::{SampledPath, evaluate as bezier_point};
pub use shape::{ColliderShape, Pose};
pub use strategy::{CollisionMoveType, Motion, Placement, SpawnRequest};

use glam::Vec3;

use crate::effect::EffectSelection;
use crate::ids::{ExecutionId, HitVolumeId, Millis, ParticipantId, SkillId};

/// Outcome of advancing a volume by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeStep {
    Active,
    Arrived,
    Expired,
}

/// One spawned collider and everything needed to resolve its hits.
#[derive(Clone, Debug)]
pub struct HitVolume {
    pub id: HitVolumeId,
    pub owner: ParticipantId,
    pub skill: SkillId,
    pub level: u32,
    pub execution: ExecutionId,
    pub shape: ColliderShape,
    pub move_type: CollisionMoveType,
    pub effects: EffectSelection,
    pose: Pose,
    motion: Motion,
    spawned_at: Millis,
    expires_at: Millis,
    dispose_on_arrival: bool,
    struck: Vec<ParticipantId>,
}

/// Who spawned a volume and which skill effects it carries.
#[derive(Clone, Debug)]
pub struct VolumeOrigin {
    pub owner: ParticipantId,
    pub skill: SkillId,
    pub level: u32,
    pub execution: ExecutionId,
}

impl HitVolume {
    pub fn new(
        id: HitVolumeId,
        origin: VolumeOrigin,
        shape: ColliderShape,
        move_type: CollisionMoveType,
        effects: EffectSelection,
        placement: Placement,
        now: Millis,
    ) -> Self {
        Self {
            id,
            owner: origin.owner,
            skill: origin.skill,
            level: origin.level,
            execution: origin.execution,
            shape,
            move_type,
            effects,
            pose: placement.pose,
            motion: placement.motion,
            spawned_at: now,
            expires_at: now.saturating_add(placement.lifetime_ms),
            dispose_on_arrival: placement.dispose_on_arrival,
            struck: Vec::new(),
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn expires_at(&self) -> Millis {
        self.expires_at
    }

    /// Participant a homing volume is locked on.
    pub fn locked_target(&self) -> Option<ParticipantId> {
        match self.motion {
            Motion::Homing { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn struck(&self) -> &[ParticipantId] {
        &self.struck
    }

    /// Whether `participant` may still be hit by this volume.
    pub fn can_strike(&self, participant: ParticipantId) -> bool {
        participant != self.owner && !self.struck.contains(&participant)
    }

    /// Records a first contact, returning the 0-based strike order.
    pub(crate) fn record_strike(&mut self, participant: ParticipantId) -> Option<u32> {
        if !self.can_strike(participant) {
            return None;
        }
        self.struck.push(participant);
        Some((self.struck.len() - 1) as u32)
    }

    /// Moves the volume to its position at `now`.
    ///
    /// `target_position` refreshes a homing volume's destination; pass `None`
    /// once the target is gone to keep flying toward its last known position.
    pub(crate) fn advance(&mut self, now: Millis, target_position: Option<Vec3>) -> VolumeStep {
        let elapsed = now.saturating_sub(self.spawned_at);
        let progress = |duration_ms: Millis| {
            if duration_ms == 0 {
                1.0
            } else {
                (elapsed as f32 / duration_ms as f32).min(1.0)
            }
        };

        let mut arrived = false;
        match &mut self.motion {
            Motion::Fixed => {}
            Motion::Homing {
                origin,
                last_known,
                duration_ms,
                ..
            } => {
                if let Some(position) = target_position {
                    *last_known = position;
                }
                let t = progress(*duration_ms);
                self.pose.position = origin.lerp(*last_known, t);
                if let Some(rotation) = Pose::facing(*last_known - self.pose.position) {
                    self.pose.rotation = rotation;
                }
            }
            Motion::Linear {
                origin,
                destination,
                duration_ms,
            } => {
                let t = progress(*duration_ms);
                self.pose.position = origin.lerp(*destination, t);
                arrived = t >= 1.0;
            }
            Motion::Path { path, duration_ms } => {
                let t = progress(*duration_ms);
                self.pose.position = path.position_at(t);
                if let Some(rotation) = Pose::facing(path.heading_at(t)) {
                    self.pose.rotation = rotation;
                }
            }
        }

        if arrived && self.dispose_on_arrival {
            VolumeStep::Arrived
        } else if now >= self.expires_at {
            VolumeStep::Expired
        } else {
            VolumeStep::Active
        }
    }
}
