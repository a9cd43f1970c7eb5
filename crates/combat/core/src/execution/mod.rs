//! Multi-frame executions: skill clip playback and basic attacks.

mod attack;
mod clip;
mod skill;

pub use attack::AttackExecution;
pub use clip::{
    ActionEventData, ClipKind, CollisionExecuteData, CueKind, ExecuteClip, ExecutionConfig,
    PresentationCue,
};
pub use skill::{SkillExecution, SpellInput};
