use strum::Display;

use crate::effect::EffectSelection;
use crate::hit_volume::{ColliderShape, CollisionMoveType};
use crate::ids::Millis;

/// Authored timeline played by a skill execution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionConfig {
    pub id: String,
    pub total_time_ms: Millis,

    /// Clips ordered by start time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub clips: Vec<ExecuteClip>,
}

impl ExecutionConfig {
    /// Executions started by clips at 0ms, which begin in the same call as
    /// this one.
    pub fn immediate_triggers(&self) -> impl Iterator<Item = &str> {
        self.clips.iter().filter_map(|clip| match &clip.kind {
            ClipKind::ActionEvent(ActionEventData::TriggerNewExecution(next))
                if clip.start_ms == 0 =>
            {
                Some(next.as_str())
            }
            _ => None,
        })
    }
}

/// One time-windowed sub-event of an execution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecuteClip {
    pub start_ms: Millis,
    pub end_ms: Millis,
    pub kind: ClipKind,
}

impl ExecuteClip {
    pub fn duration_ms(&self) -> Millis {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClipKind {
    ActionEvent(ActionEventData),
    CollisionExecute(CollisionExecuteData),
    Animation(String),
    Audio(String),
    Particle(String),
}

impl ClipKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ActionEvent(_) => "action_event",
            Self::CollisionExecute(_) => "collision_execute",
            Self::Animation(_) => "animation",
            Self::Audio(_) => "audio",
            Self::Particle(_) => "particle",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionEventData {
    /// Assign the selected skill effects to every recorded input target.
    AssignEffect(EffectSelection),
    /// Start another execution with the same skill and input.
    TriggerNewExecution(String),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionExecuteData {
    pub shape: ColliderShape,
    pub move_type: CollisionMoveType,

    /// Bezier control points in caster-local space, for path strategies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub path: Vec<[f32; 3]>,

    /// Skill effects assigned on contact.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: EffectSelection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum CueKind {
    Animation,
    Audio,
    Particle,
}

/// Presentation request forwarded to the host when a cue clip fires.
#[derive(Clone, Debug, PartialEq)]
pub struct PresentationCue {
    pub kind: CueKind,
    pub asset: String,
    pub duration_ms: Millis,
}

impl PresentationCue {
    /// Cue described by `clip`, if it is a presentation clip.
    pub fn from_clip(clip: &ExecuteClip) -> Option<Self> {
        let (kind, asset) = match &clip.kind {
            ClipKind::Animation(asset) => (CueKind::Animation, asset),
            ClipKind::Audio(asset) => (CueKind::Audio, asset),
            ClipKind::Particle(asset) => (CueKind::Particle, asset),
            ClipKind::ActionEvent(_) | ClipKind::CollisionExecute(_) => return None,
        };
        Some(Self {
            kind,
            asset: asset.clone(),
            duration_ms: clip.duration_ms(),
        })
    }
}
