//! Common error infrastructure for combat-core.
//!
//! Domain errors live next to the code that raises them ([`crate::ConfigError`]
//! in `env`, [`crate::ActionError`] in `action`, [`crate::ListenerError`] in
//! `point`). This module holds the shared severity classification and the
//! umbrella [`CombatError`] returned by world entry points.

use crate::action::ActionPhaseError;
use crate::env::ConfigError;
use crate::ids::{HitVolumeId, ItemId, ParticipantId, SkillId};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request may succeed later (target gone, skill busy)
/// - **Validation**: the request or content is invalid and should not be retried
/// - **Internal**: state inconsistency that indicates a bug
/// - **Fatal**: the world cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common classification trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatFault: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors surfaced by [`crate::CombatWorld`] entry points.
#[derive(Clone, Debug, thiserror::Error)]
pub enum CombatError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Action(#[from] ActionPhaseError),

    #[error("participant {0} is not registered")]
    UnknownParticipant(ParticipantId),

    #[error("hit volume {0} is not active")]
    UnknownHitVolume(HitVolumeId),

    #[error("participant {participant} has not learned {skill}")]
    SkillNotLearned {
        participant: ParticipantId,
        skill: SkillId,
    },

    #[error("participant {participant} carries no {item}")]
    ItemNotHeld {
        participant: ParticipantId,
        item: ItemId,
    },
}

impl CombatFault for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(error) => error.severity(),
            Self::Action(error) => error.severity(),
            Self::UnknownParticipant(_) | Self::UnknownHitVolume(_) => ErrorSeverity::Recoverable,
            Self::SkillNotLearned { .. } | Self::ItemNotHeld { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(error) => error.error_code(),
            Self::Action(error) => error.error_code(),
            Self::UnknownParticipant(_) => "COMBAT_UNKNOWN_PARTICIPANT",
            Self::UnknownHitVolume(_) => "COMBAT_UNKNOWN_HIT_VOLUME",
            Self::SkillNotLearned { .. } => "COMBAT_SKILL_NOT_LEARNED",
            Self::ItemNotHeld { .. } => "COMBAT_ITEM_NOT_HELD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_helpers() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }

    #[test]
    fn unknown_participant_is_recoverable() {
        let error = CombatError::UnknownParticipant(ParticipantId(7));
        assert_eq!(error.severity(), ErrorSeverity::Recoverable);
        assert_eq!(error.error_code(), "COMBAT_UNKNOWN_PARTICIPANT");
        assert_eq!(error.to_string(), "participant participant#7 is not registered");
    }

    #[test]
    fn config_errors_keep_their_code() {
        let error = CombatError::from(ConfigError::UnknownSkill(SkillId(9)));
        assert_eq!(error.error_code(), "CONFIG_UNKNOWN_SKILL");
        assert_eq!(error.severity(), ErrorSeverity::Validation);
    }
}
