use glam::Vec3;

use super::clip::{ExecuteClip, ExecutionConfig};
use crate::ids::{ExecutionId, Millis, ParticipantId, SkillId};

/// Targets, point and direction chosen when a skill was spelled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpellInput {
    pub targets: Vec<ParticipantId>,
    pub point: Option<Vec3>,
    pub direction: Option<Vec3>,
}

impl SpellInput {
    pub fn target(target: ParticipantId) -> Self {
        Self {
            targets: vec![target],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_point(mut self, point: Vec3) -> Self {
        self.point = Some(point);
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Timed clip playback for one skill use.
///
/// Clips fire once, when the playhead first reaches their start time. The
/// execution ends when elapsed time reaches the authored total.
#[derive(Clone, Debug)]
pub struct SkillExecution {
    pub id: ExecutionId,
    pub owner: ParticipantId,
    pub skill: SkillId,
    pub level: u32,
    pub input: SpellInput,
    /// Started by a `TriggerNewExecution` clip rather than by a spell.
    pub child: bool,
    config: ExecutionConfig,
    started_at: Millis,
    fired: Vec<bool>,
    ending: bool,
}

impl SkillExecution {
    pub fn new(
        id: ExecutionId,
        owner: ParticipantId,
        skill: SkillId,
        level: u32,
        input: SpellInput,
        config: ExecutionConfig,
        now: Millis,
    ) -> Self {
        let fired = vec![false; config.clips.len()];
        Self {
            id,
            owner,
            skill,
            level,
            input,
            child: false,
            config,
            started_at: now,
            fired,
            ending: false,
        }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    pub fn started_at(&self) -> Millis {
        self.started_at
    }

    pub fn elapsed(&self, now: Millis) -> Millis {
        now.saturating_sub(self.started_at)
    }

    pub fn clip(&self, index: usize) -> Option<&ExecuteClip> {
        self.config.clips.get(index)
    }

    /// Marks and returns every unfired clip whose start has been reached.
    pub(crate) fn take_due_clips(&mut self, now: Millis) -> Vec<usize> {
        let elapsed = self.elapsed(now);
        let mut due = Vec::new();
        for (index, clip) in self.config.clips.iter().enumerate() {
            if !self.fired[index] && clip.start_ms <= elapsed {
                self.fired[index] = true;
                due.push(index);
            }
        }
        due
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        self.elapsed(now) >= self.config.total_time_ms
    }

    /// True while `EndExecute` is being dispatched for this execution.
    pub fn is_ending(&self) -> bool {
        self.ending
    }

    /// Marks the execution as ending; false when it already was.
    pub(crate) fn begin_ending(&mut self) -> bool {
        !std::mem::replace(&mut self.ending, true)
    }

    pub(crate) fn clear_targets(&mut self) {
        self.input.targets.clear();
    }
}
