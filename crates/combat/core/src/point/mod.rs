//! ActionPoint bus: per-participant interception points.
//!
//! Every resolution step is bracketed by a pair of points, one on the
//! creator and one on the target. Gameplay code registers handlers on a
//! participant through [`crate::CombatWorld::listen`]; handlers receive the
//! world and a mutable [`PointPayload`] so they may alter the in-flight
//! action or start new ones.

mod bus;

pub use bus::{ActionPointBus, ListenerFn};

use strum::{AsRefStr, Display, EnumIter};

use crate::action::{
    ActionPhaseError, AddStatusAction, AttackBlockAction, CureAction, DamageAction,
    EffectAssignAction, SpellAttackAction, SpellItemAction, SpellSkillAction,
};
use crate::error::{CombatError, CombatFault, ErrorSeverity};
use crate::ids::{AttackId, ExecutionId, ListenerId, Millis, ParticipantId};
use crate::status::Status;

/// Named interception point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, EnumIter)]
pub enum ActionPointType {
    PreGiveAttack,
    PreReceiveAttack,
    PostGiveAttack,
    PostReceiveAttack,

    PreGiveAttackEffect,
    PreReceiveAttackEffect,

    PostGiveBlock,
    PostReceiveBlock,

    PreCauseDamage,
    PreReceiveDamage,
    PostCauseDamage,
    PostReceiveDamage,

    PostGiveCure,
    PostReceiveCure,

    PostGiveStatus,
    PostReceiveStatus,
    PostRemoveStatus,

    AssignEffect,
    ReceiveEffect,

    PreGiveItem,
    PreReceiveItem,
    PostGiveItem,
    PostReceiveItem,

    PreSpell,
    PostSpell,

    BeginExecute,
    EndExecute,
}

/// What a point was triggered with.
///
/// Actions are lent mutably so handlers can rewrite them before the next
/// phase runs. Long-lived executions are referenced by id; look them up
/// through the world.
#[derive(Debug)]
pub enum PointPayload<'a> {
    Damage(&'a mut DamageAction),
    Cure(&'a mut CureAction),
    AddStatus(&'a mut AddStatusAction),
    RemovedStatus(&'a Status),
    AttackBlock(&'a mut AttackBlockAction),
    EffectAssign(&'a mut EffectAssignAction),
    SpellAttack(&'a mut SpellAttackAction),
    SpellItem(&'a mut SpellItemAction),
    SpellSkill(&'a mut SpellSkillAction),
    Attack(AttackId),
    Execution(ExecutionId),
}

impl PointPayload<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Damage(_) => "damage",
            Self::Cure(_) => "cure",
            Self::AddStatus(_) => "add_status",
            Self::RemovedStatus(_) => "removed_status",
            Self::AttackBlock(_) => "attack_block",
            Self::EffectAssign(_) => "effect_assign",
            Self::SpellAttack(_) => "spell_attack",
            Self::SpellItem(_) => "spell_item",
            Self::SpellSkill(_) => "spell_skill",
            Self::Attack(_) => "attack",
            Self::Execution(_) => "execution",
        }
    }
}

/// Error returned by a point handler.
///
/// Never reaches the action being resolved; the world logs it and records a
/// [`Fault`].
#[derive(Clone, Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("listener rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Action(#[from] ActionPhaseError),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

impl ListenerError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}

impl CombatFault for ListenerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected(_) => ErrorSeverity::Recoverable,
            Self::Action(error) => error.severity(),
            Self::Combat(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "LISTENER_REJECTED",
            Self::Action(error) => error.error_code(),
            Self::Combat(error) => error.error_code(),
        }
    }
}

/// A failure isolated by the world instead of being propagated.
///
/// Drained with [`crate::CombatWorld::drain_faults`].
#[derive(Clone, Debug)]
pub enum Fault {
    /// A handler returned an error; the remaining handlers still ran.
    Listener {
        at: Millis,
        participant: ParticipantId,
        point: ActionPointType,
        listener: ListenerId,
        error: ListenerError,
    },

    /// A trigger was skipped because dispatches nested too deeply.
    DispatchDepth {
        at: Millis,
        participant: ParticipantId,
        point: ActionPointType,
        depth: u32,
    },

    /// Work scheduled by the clock (clips, attacks, periodic statuses) failed.
    Scheduled {
        at: Millis,
        context: &'static str,
        error: CombatError,
    },
}

impl Fault {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Listener { error, .. } => error.severity(),
            Self::DispatchDepth { .. } => ErrorSeverity::Internal,
            Self::Scheduled { error, .. } => error.severity(),
        }
    }
}
