use super::{ActionKind, ActionPhaseError};
use crate::env::ConfigError;
use crate::error::{CombatFault, ErrorSeverity};
use crate::ids::{AttackId, ExecutionId, ParticipantId};

/// Errors raised while an action resolves.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ActionError {
    #[error("participant {0} is not registered")]
    ParticipantMissing(ParticipantId),

    #[error("attack {0} is no longer running")]
    AttackMissing(AttackId),

    #[error("{0} action was driven without its effect")]
    MissingEffect(ActionKind),

    #[error("participant {0} cannot hold another status")]
    StatusCapacity(ParticipantId),

    #[error("participant {participant} is already spelling {execution}")]
    AlreadySpelling {
        participant: ParticipantId,
        execution: ExecutionId,
    },

    #[error("execution `{execution}` nested {depth} deep, not started")]
    ExecutionDepth { execution: String, depth: u32 },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Nested(Box<ActionPhaseError>),
}

impl From<ActionPhaseError> for ActionError {
    fn from(error: ActionPhaseError) -> Self {
        Self::Nested(Box::new(error))
    }
}

impl CombatFault for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ParticipantMissing(_) | Self::AttackMissing(_) | Self::StatusCapacity(_) => {
                ErrorSeverity::Recoverable
            }
            Self::MissingEffect(_) | Self::AlreadySpelling { .. } => ErrorSeverity::Internal,
            Self::ExecutionDepth { .. } => ErrorSeverity::Validation,
            Self::Config(error) => error.severity(),
            Self::Nested(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ParticipantMissing(_) => "ACTION_PARTICIPANT_MISSING",
            Self::AttackMissing(_) => "ACTION_ATTACK_MISSING",
            Self::MissingEffect(_) => "ACTION_MISSING_EFFECT",
            Self::StatusCapacity(_) => "ACTION_STATUS_CAPACITY",
            Self::AlreadySpelling { .. } => "ACTION_ALREADY_SPELLING",
            Self::ExecutionDepth { .. } => "ACTION_EXECUTION_DEPTH",
            Self::Config(error) => error.error_code(),
            Self::Nested(error) => error.error_code(),
        }
    }
}
