//! Identifier newtypes shared across the combat core.
//!
//! Runtime identifiers (participants, executions, hit volumes, status
//! instances, listeners) are handed out by [`crate::CombatWorld`] from a
//! monotonically increasing counter and are never reused. Content identifiers
//! (skills, statuses, items) are authored in configuration.

use core::fmt;

/// Simulation time in milliseconds.
pub type Millis = u64;

macro_rules! runtime_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

macro_rules! content_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

runtime_id!(
    /// A combatant registered with the world.
    ParticipantId,
    "participant"
);
runtime_id!(
    /// A running [`crate::SkillExecution`].
    ExecutionId,
    "execution"
);
runtime_id!(
    /// A running [`crate::AttackExecution`].
    AttackId,
    "attack"
);
runtime_id!(
    /// A spawned hit volume.
    HitVolumeId,
    "volume"
);
runtime_id!(
    /// One applied status instance on a participant.
    StatusInstanceId,
    "status"
);
runtime_id!(
    /// A registration on an action point.
    ListenerId,
    "listener"
);

content_id!(
    /// Authored skill identifier.
    SkillId,
    "skill"
);
content_id!(
    /// Authored status identifier.
    StatusId,
    "status-config"
);
content_id!(
    /// Authored consumable item identifier.
    ItemId,
    "item"
);

/// Monotonic allocator for runtime identifiers.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub(crate) fn allocate(&mut self) -> u32 {
        self.next = self.next.wrapping_add(1);
        self.next
    }
}
