use crate::error::{CombatFault, ErrorSeverity};
use crate::ids::{ItemId, SkillId, StatusId};

/// Content that is missing, duplicated, or malformed.
///
/// Raised by [`super::ConfigCatalog::validate`] at load time and by catalog
/// lookups at assign time.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown skill {0}")]
    UnknownSkill(SkillId),

    #[error("unknown status {0}")]
    UnknownStatus(StatusId),

    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    #[error("unknown execution `{0}`")]
    UnknownExecution(String),

    #[error("{kind} `{id}` is defined more than once")]
    Duplicate { kind: &'static str, id: String },

    #[error("execution `{0}` has no clips")]
    EmptyClips(String),

    #[error("execution `{execution}`: clip {index} starts before the clip preceding it")]
    UnsortedClips { execution: String, index: usize },

    #[error("execution `{execution}`: clip {index} ends at {end_ms}ms before it starts at {start_ms}ms")]
    InvalidClipWindow {
        execution: String,
        index: usize,
        start_ms: u64,
        end_ms: u64,
    },

    #[error(
        "execution `{execution}`: clip {index} starts at {start_ms}ms, after the execution ends at {total_time_ms}ms"
    )]
    ClipAfterEnd {
        execution: String,
        index: usize,
        start_ms: u64,
        total_time_ms: u64,
    },

    #[error(
        "execution `{execution}` restarts itself through 0ms TriggerNewExecution clips: {}",
        .cycle.join(" -> ")
    )]
    TriggerCycle {
        execution: String,
        cycle: Vec<String>,
    },

    #[error("execution `{execution}`: clip {index} needs at least two path points, found {points}")]
    PathTooShort {
        execution: String,
        index: usize,
        points: usize,
    },

    #[error("skill {skill}: execution `{execution}` selects effect {index} but only {available} exist")]
    EffectIndexOutOfRange {
        skill: SkillId,
        execution: String,
        index: usize,
        available: usize,
    },

    #[error("status {0} is stackable with a max stack of zero")]
    InvalidStack(StatusId),

    #[error("status {0} has a periodic effect with a zero interval")]
    ZeroInterval(StatusId),

    #[error("{field} must lie in [0, {max}], found {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        max: f32,
    },
}

impl CombatFault for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSkill(_) => "CONFIG_UNKNOWN_SKILL",
            Self::UnknownStatus(_) => "CONFIG_UNKNOWN_STATUS",
            Self::UnknownItem(_) => "CONFIG_UNKNOWN_ITEM",
            Self::UnknownExecution(_) => "CONFIG_UNKNOWN_EXECUTION",
            Self::Duplicate { .. } => "CONFIG_DUPLICATE",
            Self::EmptyClips(_) => "CONFIG_EMPTY_CLIPS",
            Self::UnsortedClips { .. } => "CONFIG_UNSORTED_CLIPS",
            Self::ClipAfterEnd { .. } => "CONFIG_CLIP_AFTER_END",
            Self::TriggerCycle { .. } => "CONFIG_TRIGGER_CYCLE",
            Self::InvalidClipWindow { .. } => "CONFIG_INVALID_CLIP_WINDOW",
            Self::PathTooShort { .. } => "CONFIG_PATH_TOO_SHORT",
            Self::EffectIndexOutOfRange { .. } => "CONFIG_EFFECT_INDEX_OUT_OF_RANGE",
            Self::InvalidStack(_) => "CONFIG_INVALID_STACK",
            Self::ZeroInterval(_) => "CONFIG_ZERO_INTERVAL",
            Self::OutOfRange { .. } => "CONFIG_OUT_OF_RANGE",
        }
    }
}
