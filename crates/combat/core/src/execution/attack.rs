use crate::ids::{AttackId, Millis, ParticipantId};

/// Timed basic attack started by a `SpellAttackAction`.
///
/// Effects are applied once after the windup unless a block intercepts
/// them; the execution ends after the recovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackExecution {
    pub id: AttackId,
    pub creator: ParticipantId,
    pub target: ParticipantId,
    apply_at: Millis,
    end_at: Millis,
    applied: bool,
    blocked: bool,
}

impl AttackExecution {
    pub fn new(
        id: AttackId,
        creator: ParticipantId,
        target: ParticipantId,
        now: Millis,
        windup_ms: Millis,
        recovery_ms: Millis,
    ) -> Self {
        let apply_at = now.saturating_add(windup_ms);
        Self {
            id,
            creator,
            target,
            apply_at,
            end_at: apply_at.saturating_add(recovery_ms),
            applied: false,
            blocked: false,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn set_blocked(&mut self) {
        self.blocked = true;
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub(crate) fn mark_applied(&mut self) {
        debug_assert!(!self.applied, "attack {} applied twice", self.id);
        self.applied = true;
    }

    pub fn is_due(&self, now: Millis) -> bool {
        !self.applied && now >= self.apply_at
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        self.applied && now >= self.end_at
    }
}
