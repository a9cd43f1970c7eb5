//! Damage effect data and the ordered damage modifier pipeline.

use strum::Display;

use super::formula::{ValueFormula, round_up};

/// Where a damage instance came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSource {
    Attack,
    Skill,
    Buff,
}

/// Damage reduction for each successive target struck by the same source.
///
/// Values are percentages: the n-th target (0-based) takes
/// `max(min_percent, 100 - reduce_percent * n)` percent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetFalloff {
    pub reduce_percent: f32,
    pub min_percent: f32,
}

impl TargetFalloff {
    pub fn factor(&self, target_index: u32) -> f32 {
        let percent = 100.0 - self.reduce_percent * target_index as f32;
        percent.max(self.min_percent).clamp(0.0, 100.0) / 100.0
    }
}

/// Damage effect definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEffect {
    pub formula: ValueFormula,

    /// Roll for a critical strike even when the source is not a basic attack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub can_crit: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub falloff: Option<TargetFalloff>,
}

/// One stage of the damage modifier pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum DamageStage {
    Base,
    Critical,
    TargetFalloff,
}

/// Value after a stage ran.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageStep {
    pub stage: DamageStage,
    pub value: u32,
}

/// Applies `Base -> Critical -> TargetFalloff` in that order.
///
/// Every stage rounds up, and the recorded steps let callers and tests see
/// what each stage contributed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DamagePipeline {
    steps: Vec<DamageStep>,
}

impl DamagePipeline {
    pub fn new(base: f32) -> Self {
        Self {
            steps: vec![DamageStep {
                stage: DamageStage::Base,
                value: round_up(base),
            }],
        }
    }

    #[must_use]
    pub fn critical(mut self, critical: bool, multiplier: f32) -> Self {
        if critical {
            let value = round_up(self.value() as f32 * multiplier);
            self.steps.push(DamageStep {
                stage: DamageStage::Critical,
                value,
            });
        }
        self
    }

    #[must_use]
    pub fn falloff(mut self, falloff: Option<&TargetFalloff>, target_index: u32) -> Self {
        if let Some(falloff) = falloff
            && target_index > 0
        {
            let value = round_up(self.value() as f32 * falloff.factor(target_index));
            self.steps.push(DamageStep {
                stage: DamageStage::TargetFalloff,
                value,
            });
        }
        self
    }

    pub fn value(&self) -> u32 {
        self.steps.last().map_or(0, |step| step.value)
    }

    pub fn steps(&self) -> &[DamageStep] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_rounds_up() {
        let pipeline = DamagePipeline::new(20.0).critical(true, 1.5);
        assert_eq!(pipeline.value(), 30);
        let odd = DamagePipeline::new(15.0).critical(true, 1.5);
        assert_eq!(odd.value(), 23);
    }

    #[test]
    fn stages_run_in_order() {
        let falloff = TargetFalloff {
            reduce_percent: 25.0,
            min_percent: 40.0,
        };
        let pipeline = DamagePipeline::new(20.0)
            .critical(true, 1.5)
            .falloff(Some(&falloff), 1);
        let stages: Vec<_> = pipeline.steps().iter().map(|step| step.stage).collect();
        assert_eq!(
            stages,
            [
                DamageStage::Base,
                DamageStage::Critical,
                DamageStage::TargetFalloff
            ]
        );
        // 30 * 0.75
        assert_eq!(pipeline.value(), 23);
    }

    #[test]
    fn falloff_floors_at_minimum() {
        let falloff = TargetFalloff {
            reduce_percent: 30.0,
            min_percent: 20.0,
        };
        assert_eq!(falloff.factor(0), 1.0);
        assert!((falloff.factor(5) - 0.2).abs() < f32::EPSILON);
        let pipeline = DamagePipeline::new(100.0).falloff(Some(&falloff), 0);
        assert_eq!(pipeline.steps().len(), 1);
    }
}
