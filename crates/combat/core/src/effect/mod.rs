//! Effect definitions and the context they are assigned under.
//!
//! An [`Effect`] is authored data. When a skill clip, attack or status
//! assigns one, it travels inside an `EffectAssignAction` together with an
//! [`EffectSource`] describing who produced it.

mod damage;
mod formula;

use std::collections::BTreeMap;

use strum::{AsRefStr, Display};

pub use damage::{DamageEffect, DamagePipeline, DamageSource, DamageStage, DamageStep, TargetFalloff};
pub use formula::{FormulaInputs, ValueFormula};

use crate::ids::{ExecutionId, ItemId, Millis, SkillId, StatusId};

/// Atomic effect authored on skills, items, attacks and periodic statuses.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    Damage(DamageEffect),
    Cure(CureEffect),
    AddStatus(AddStatusEffect),
    RemoveStatus(RemoveStatusEffect),
    ClearAllStatus,
    /// Carries no built-in behaviour; listeners on `AssignEffect` and
    /// `ReceiveEffect` implement it.
    Custom(CustomEffect),
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Damage(_) => EffectKind::Damage,
            Self::Cure(_) => EffectKind::Cure,
            Self::AddStatus(_) => EffectKind::AddStatus,
            Self::RemoveStatus(_) => EffectKind::RemoveStatus,
            Self::ClearAllStatus => EffectKind::ClearAllStatus,
            Self::Custom(_) => EffectKind::Custom,
        }
    }

    /// Status referenced by this effect, if any.
    pub fn status(&self) -> Option<StatusId> {
        match self {
            Self::AddStatus(effect) => Some(effect.status),
            Self::RemoveStatus(effect) => Some(effect.status),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum EffectKind {
    Damage,
    Cure,
    AddStatus,
    RemoveStatus,
    ClearAllStatus,
    Custom,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CureEffect {
    pub formula: ValueFormula,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddStatusEffect {
    pub status: StatusId,

    /// Overrides the status' default duration.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_ms: Option<Millis>,

    /// Free-form parameters copied onto the status instance.
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: BTreeMap<String, f32>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveStatusEffect {
    pub status: StatusId,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomEffect {
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub params: BTreeMap<String, f32>,
}

/// What kind of content produced an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectOrigin {
    Attack,
    Skill(SkillId),
    Item(ItemId),
    Status(StatusId),
}

impl EffectOrigin {
    pub fn damage_source(&self) -> DamageSource {
        match self {
            Self::Attack => DamageSource::Attack,
            Self::Skill(_) | Self::Item(_) => DamageSource::Skill,
            Self::Status(_) => DamageSource::Buff,
        }
    }
}

/// Provenance carried from an effect assignment into the action it spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectSource {
    pub origin: EffectOrigin,

    /// Ability level the effect scales with.
    pub level: u32,

    /// Skill execution the effect was assigned from, if any.
    pub execution: Option<ExecutionId>,

    /// 0-based order of the target among those struck by the same source.
    pub target_index: u32,
}

impl EffectSource {
    pub fn new(origin: EffectOrigin) -> Self {
        Self {
            origin,
            level: 1,
            execution: None,
            target_index: 0,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_execution(mut self, execution: ExecutionId) -> Self {
        self.execution = Some(execution);
        self
    }

    #[must_use]
    pub fn with_target_index(mut self, target_index: u32) -> Self {
        self.target_index = target_index;
        self
    }
}

/// Which of a skill's effects a clip assigns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectSelection {
    #[default]
    All,
    Indices(Vec<usize>),
}

impl EffectSelection {
    /// Selected effects in declaration order; out-of-range indices are skipped.
    pub fn select<'a>(&'a self, effects: &'a [Effect]) -> impl Iterator<Item = &'a Effect> + 'a {
        let indices: Vec<usize> = match self {
            Self::All => (0..effects.len()).collect(),
            Self::Indices(indices) => indices.clone(),
        };
        indices.into_iter().filter_map(move |index| effects.get(index))
    }

    /// Largest index referenced, for validation.
    pub fn max_index(&self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::Indices(indices) => indices.iter().copied().max(),
        }
    }
}
