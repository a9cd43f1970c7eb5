use crate::effect::{DamageEffect, Effect, ValueFormula};
use crate::ids::ItemId;

/// Authored consumable item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemConfig {
    pub id: ItemId,
    pub name: String,
    pub effects: Vec<Effect>,
}

/// Effects every basic attack assigns to its target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackConfig {
    pub effects: Vec<Effect>,
}

impl Default for AttackConfig {
    /// A single melee damage effect.
    fn default() -> Self {
        Self {
            effects: vec![Effect::Damage(DamageEffect {
                formula: ValueFormula::Melee,
                can_crit: false,
                falloff: None,
            })],
        }
    }
}
