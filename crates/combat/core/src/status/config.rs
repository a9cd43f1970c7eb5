use bitflags::bitflags;

use crate::effect::Effect;
use crate::ids::{Millis, StatusId};
use crate::participant::AttributeModifier;

bitflags! {
    /// Abilities a status suppresses while active.
    ///
    /// Each bit toggles the `enabled` flag of the matching ability, so the
    /// ability's own gate stays the only check callers need.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ActionControl: u8 {
        const SPELL_FORBID  = 1 << 0;
        const ATTACK_FORBID = 1 << 1;
        const ITEM_FORBID   = 1 << 2;
    }
}

/// Authored status definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusConfig {
    pub id: StatusId,
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub can_stack: bool,

    #[cfg_attr(feature = "serde", serde(default = "StatusConfig::default_max_stack"))]
    pub max_stack: u32,

    /// Default lifetime; an `AddStatus` effect may override it.
    pub duration_ms: Millis,

    #[cfg_attr(feature = "serde", serde(default))]
    pub periodic: Option<PeriodicEffect>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<AttributeModifier>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub action_control: ActionControl,
}

impl StatusConfig {
    pub fn new(id: StatusId, name: impl Into<String>, duration_ms: Millis) -> Self {
        Self {
            id,
            name: name.into(),
            can_stack: false,
            max_stack: Self::default_max_stack(),
            duration_ms,
            periodic: None,
            modifiers: Vec::new(),
            action_control: ActionControl::empty(),
        }
    }

    const fn default_max_stack() -> u32 {
        1
    }

    #[must_use]
    pub fn stackable(mut self, max_stack: u32) -> Self {
        self.can_stack = true;
        self.max_stack = max_stack;
        self
    }

    #[must_use]
    pub fn with_periodic(mut self, interval_ms: Millis, effects: Vec<Effect>) -> Self {
        self.periodic = Some(PeriodicEffect {
            interval_ms,
            effects,
        });
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, modifier: AttributeModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    #[must_use]
    pub fn with_action_control(mut self, control: ActionControl) -> Self {
        self.action_control = control;
        self
    }
}

/// Effects assigned to the holder every `interval_ms` while the status lives.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodicEffect {
    pub interval_ms: Millis,
    pub effects: Vec<Effect>,
}
