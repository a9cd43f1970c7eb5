//! Placement and motion for each hit-volume movement type.

use glam::Vec3;
use strum::Display;

use super::bezier::SampledPath;
use super::shape::Pose;
use crate::config::CombatConfig;
use crate::ids::{Millis, ParticipantId};

/// How a collision clip's hit volume is placed and moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionMoveType {
    /// Stationary at the input point for the clip duration.
    SelectedPosition,
    /// Stationary at the caster, oriented along the input direction.
    SelectedDirection,
    /// Homes on the first input target over the clip duration.
    TargetFly,
    /// Flies straight ahead a fixed distance, then disposes on arrival.
    ForwardFly,
    /// Follows the authored Bezier path turned to the caster's facing.
    PathFly,
    /// Follows the authored Bezier path turned to the input direction.
    SelectedDirectionPathFly,
}

/// Runtime motion state of a hit volume.
#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
    Fixed,
    Homing {
        origin: Vec3,
        target: ParticipantId,
        last_known: Vec3,
        duration_ms: Millis,
    },
    Linear {
        origin: Vec3,
        destination: Vec3,
        duration_ms: Millis,
    },
    Path {
        path: SampledPath,
        duration_ms: Millis,
    },
}

/// Inputs gathered when a collision clip fires.
#[derive(Clone, Copy, Debug)]
pub struct SpawnRequest<'a> {
    pub caster: Pose,
    pub input_point: Option<Vec3>,
    pub input_direction: Option<Vec3>,
    pub target: Option<(ParticipantId, Vec3)>,
    pub clip_duration_ms: Millis,
    /// Control points in caster-local space.
    pub path: &'a [[f32; 3]],
}

/// Initial pose, motion and lifetime chosen by a strategy.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub pose: Pose,
    pub motion: Motion,
    pub lifetime_ms: Millis,
    pub dispose_on_arrival: bool,
}

impl CollisionMoveType {
    /// Whether the strategy needs an authored control-point path.
    pub fn uses_path(self) -> bool {
        matches!(self, Self::PathFly | Self::SelectedDirectionPathFly)
    }

    /// Places a hit volume; `None` when a homing volume has no target.
    pub fn plan(self, request: &SpawnRequest<'_>, config: &CombatConfig) -> Option<Placement> {
        let caster = request.caster;
        let aimed = request
            .input_direction
            .and_then(Pose::facing)
            .unwrap_or(caster.rotation);
        let fixed = |pose: Pose| Placement {
            pose,
            motion: Motion::Fixed,
            lifetime_ms: request.clip_duration_ms,
            dispose_on_arrival: false,
        };

        let placement = match self {
            Self::SelectedPosition => {
                let position = request.input_point.unwrap_or(caster.position);
                fixed(Pose::new(position, caster.rotation))
            }
            Self::SelectedDirection => fixed(Pose::new(caster.position, aimed)),
            Self::TargetFly => {
                let (target, position) = request.target?;
                let rotation =
                    Pose::facing(position - caster.position).unwrap_or(caster.rotation);
                Placement {
                    pose: Pose::new(caster.position, rotation),
                    motion: Motion::Homing {
                        origin: caster.position,
                        target,
                        last_known: position,
                        duration_ms: request.clip_duration_ms,
                    },
                    lifetime_ms: request.clip_duration_ms,
                    dispose_on_arrival: false,
                }
            }
            Self::ForwardFly => {
                let heading = aimed * Vec3::Z;
                Placement {
                    pose: Pose::new(caster.position, aimed),
                    motion: Motion::Linear {
                        origin: caster.position,
                        destination: caster.position + heading * config.forward_fly_distance,
                        duration_ms: config.forward_fly_duration_ms,
                    },
                    lifetime_ms: config.forward_fly_duration_ms,
                    dispose_on_arrival: true,
                }
            }
            Self::PathFly | Self::SelectedDirectionPathFly => {
                let turn = if self == Self::PathFly {
                    caster.rotation
                } else {
                    aimed
                };
                let world: Vec<Vec3> = request
                    .path
                    .iter()
                    .map(|point| caster.position + turn * Vec3::from_array(*point))
                    .collect();
                let path = SampledPath::sample(&world, config.effective_path_segments());
                let start = path.position_at(0.0);
                let rotation = Pose::facing(path.heading_at(0.0)).unwrap_or(turn);
                Placement {
                    pose: Pose::new(start, rotation),
                    motion: Motion::Path {
                        path,
                        duration_ms: request.clip_duration_ms,
                    },
                    lifetime_ms: request.clip_duration_ms,
                    dispose_on_arrival: false,
                }
            }
        };
        Some(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn request<'a>(path: &'a [[f32; 3]]) -> SpawnRequest<'a> {
        SpawnRequest {
            caster: Pose::new(Vec3::new(1.0, 0.0, 1.0), Quat::IDENTITY),
            input_point: Some(Vec3::new(5.0, 0.0, 5.0)),
            input_direction: Some(Vec3::X),
            target: Some((ParticipantId(2), Vec3::new(1.0, 0.0, 11.0))),
            clip_duration_ms: 400,
            path,
        }
    }

    #[test]
    fn selected_position_stays_put_for_clip() {
        let placement = CollisionMoveType::SelectedPosition
            .plan(&request(&[]), &CombatConfig::default())
            .unwrap();
        assert_eq!(placement.pose.position, Vec3::new(5.0, 0.0, 5.0));
        assert_eq!(placement.motion, Motion::Fixed);
        assert_eq!(placement.lifetime_ms, 400);
    }

    #[test]
    fn selected_direction_faces_input() {
        let placement = CollisionMoveType::SelectedDirection
            .plan(&request(&[]), &CombatConfig::default())
            .unwrap();
        assert_eq!(placement.pose.position, Vec3::new(1.0, 0.0, 1.0));
        assert!(placement.pose.forward().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn target_fly_requires_target() {
        let mut req = request(&[]);
        let placement = CollisionMoveType::TargetFly
            .plan(&req, &CombatConfig::default())
            .unwrap();
        assert!(matches!(placement.motion, Motion::Homing { target: ParticipantId(2), .. }));
        req.target = None;
        assert!(CollisionMoveType::TargetFly
            .plan(&req, &CombatConfig::default())
            .is_none());
    }

    #[test]
    fn forward_fly_uses_fixed_distance_and_time() {
        let placement = CollisionMoveType::ForwardFly
            .plan(&request(&[]), &CombatConfig::default())
            .unwrap();
        let Motion::Linear {
            destination,
            duration_ms,
            ..
        } = placement.motion
        else {
            panic!("forward fly should move linearly");
        };
        assert!(destination.abs_diff_eq(Vec3::new(31.0, 0.0, 1.0), 1e-4));
        assert_eq!(duration_ms, 1_000);
        assert!(placement.dispose_on_arrival);
    }

    #[test]
    fn path_fly_turns_with_caster_or_input() {
        let path = [[0.0, 0.0, 0.0], [0.0, 0.0, 10.0]];
        let caster_facing = CollisionMoveType::PathFly
            .plan(&request(&path), &CombatConfig::default())
            .unwrap();
        let aimed = CollisionMoveType::SelectedDirectionPathFly
            .plan(&request(&path), &CombatConfig::default())
            .unwrap();
        let (Motion::Path { path: a, .. }, Motion::Path { path: b, .. }) =
            (&caster_facing.motion, &aimed.motion)
        else {
            panic!("path strategies should follow a path");
        };
        assert_eq!(a.segments(), 10);
        assert!(a.position_at(1.0).abs_diff_eq(Vec3::new(1.0, 0.0, 11.0), 1e-4));
        assert!(b.position_at(1.0).abs_diff_eq(Vec3::new(11.0, 0.0, 1.0), 1e-4));
    }
}
