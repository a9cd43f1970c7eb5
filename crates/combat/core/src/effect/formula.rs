//! Value formulas for damage and cure amounts.
//!
//! ```ignore
//! // 120% caster attack plus 5 per skill level
//! ValueFormula::Sum(vec![
//!     ValueFormula::CasterAttack { percent: 120.0 },
//!     ValueFormula::PerLevel { base: 0.0, per_level: 5.0 },
//! ])
//! ```

/// Formula for calculating an effect amount.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueFormula {
    /// Fixed amount.
    Constant(f32),

    /// `max(1, caster attack - target defense)`.
    Melee,

    /// Percentage of the caster's attack.
    CasterAttack { percent: f32 },

    /// Percentage of the target's maximum health.
    TargetMaxHealth { percent: f32 },

    /// `base + per_level * (level - 1)`.
    PerLevel { base: f32, per_level: f32 },

    /// Sum of multiple formulas.
    Sum(Vec<ValueFormula>),
}

/// Snapshot of everything a formula may read.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FormulaInputs {
    pub caster_attack: f32,
    pub target_defense: f32,
    pub target_max_health: u32,
    pub level: u32,
}

impl ValueFormula {
    pub fn evaluate(&self, inputs: &FormulaInputs) -> f32 {
        match self {
            Self::Constant(value) => *value,
            Self::Melee => (inputs.caster_attack - inputs.target_defense).max(1.0),
            Self::CasterAttack { percent } => inputs.caster_attack * percent / 100.0,
            Self::TargetMaxHealth { percent } => inputs.target_max_health as f32 * percent / 100.0,
            Self::PerLevel { base, per_level } => {
                base + per_level * inputs.level.saturating_sub(1) as f32
            }
            Self::Sum(parts) => parts.iter().map(|part| part.evaluate(inputs)).sum(),
        }
    }

    /// Evaluates and rounds up to a whole, non-negative amount.
    pub fn amount(&self, inputs: &FormulaInputs) -> u32 {
        round_up(self.evaluate(inputs))
    }
}

pub(crate) fn round_up(value: f32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> FormulaInputs {
        FormulaInputs {
            caster_attack: 20.0,
            target_defense: 5.0,
            target_max_health: 200,
            level: 3,
        }
    }

    #[test]
    fn melee_never_drops_below_one() {
        let weak = FormulaInputs {
            caster_attack: 2.0,
            target_defense: 50.0,
            ..inputs()
        };
        assert_eq!(ValueFormula::Melee.amount(&weak), 1);
        assert_eq!(ValueFormula::Melee.amount(&inputs()), 15);
    }

    #[test]
    fn sums_percentages_and_levels() {
        let formula = ValueFormula::Sum(vec![
            ValueFormula::CasterAttack { percent: 150.0 },
            ValueFormula::TargetMaxHealth { percent: 10.0 },
            ValueFormula::PerLevel {
                base: 1.0,
                per_level: 2.0,
            },
        ]);
        // 30 + 20 + 5
        assert_eq!(formula.amount(&inputs()), 55);
    }

    #[test]
    fn rounds_up_and_clamps_negative() {
        assert_eq!(ValueFormula::Constant(10.2).amount(&inputs()), 11);
        assert_eq!(ValueFormula::Constant(-4.0).amount(&inputs()), 0);
    }
}
