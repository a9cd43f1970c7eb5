use crate::effect::Effect;
use crate::ids::{Millis, SkillId};

/// Authored skill definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillConfig {
    pub id: SkillId,
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_ms: Millis,

    /// Key of the execution played when the skill is spelled.
    pub execution: String,

    /// Effects that clips select from by index.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

/// A learned skill on one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillAbility {
    skill: SkillId,
    level: u32,
    spelling: bool,
    ready_at: Millis,
}

impl SkillAbility {
    pub fn new(skill: SkillId, level: u32) -> Self {
        Self {
            skill,
            level: level.max(1),
            spelling: false,
            ready_at: 0,
        }
    }

    pub fn skill(&self) -> SkillId {
        self.skill
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    pub fn is_spelling(&self) -> bool {
        self.spelling
    }

    pub(crate) fn set_spelling(&mut self, spelling: bool) {
        self.spelling = spelling;
    }

    pub fn is_ready(&self, now: Millis) -> bool {
        now >= self.ready_at
    }

    pub fn cooldown_remaining(&self, now: Millis) -> Millis {
        self.ready_at.saturating_sub(now)
    }

    pub(crate) fn start_cooldown(&mut self, now: Millis, cooldown_ms: Millis) {
        self.ready_at = now.saturating_add(cooldown_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_gates_readiness() {
        let mut ability = SkillAbility::new(SkillId(1), 0);
        assert_eq!(ability.level(), 1);
        assert!(ability.is_ready(0));
        ability.start_cooldown(100, 500);
        assert!(!ability.is_ready(599));
        assert_eq!(ability.cooldown_remaining(350), 250);
        assert!(ability.is_ready(600));
    }
}
