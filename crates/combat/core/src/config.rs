//! Tunable constants for combat resolution.

use crate::ids::Millis;

/// Combat-wide tuning knobs.
///
/// Loaded from `combat.toml` by the content crate; every field has a default
/// so partial files are accepted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Delay between starting a basic attack and applying its effects.
    pub attack_windup_ms: Millis,

    /// Delay between applying a basic attack and ending it.
    pub attack_recovery_ms: Millis,

    /// Maximum nesting of action point dispatches before a cascade is cut.
    pub max_dispatch_depth: u32,

    /// Damage multiplier applied on a critical strike (rounded up).
    pub critical_multiplier: f32,

    /// Distance travelled by forward-flying hit volumes.
    pub forward_fly_distance: f32,

    /// Flight time of forward-flying hit volumes.
    pub forward_fly_duration_ms: Millis,

    /// Number of linear segments a Bezier path is sampled into.
    pub path_segments: usize,
}

impl CombatConfig {
    pub const DEFAULT_MAX_DISPATCH_DEPTH: u32 = 16;
    pub const DEFAULT_CRITICAL_MULTIPLIER: f32 = 1.5;
    pub const DEFAULT_FORWARD_FLY_DISTANCE: f32 = 30.0;
    pub const DEFAULT_FORWARD_FLY_DURATION_MS: Millis = 1_000;
    pub const DEFAULT_PATH_SEGMENTS: usize = 10;

    /// Maximum concurrent status instances held by one participant.
    pub const MAX_STATUSES: usize = 32;

    /// Upper bound for [`Self::path_segments`].
    pub const MAX_PATH_SEGMENTS: usize = 64;

    pub fn new() -> Self {
        Self {
            attack_windup_ms: 0,
            attack_recovery_ms: 0,
            max_dispatch_depth: Self::DEFAULT_MAX_DISPATCH_DEPTH,
            critical_multiplier: Self::DEFAULT_CRITICAL_MULTIPLIER,
            forward_fly_distance: Self::DEFAULT_FORWARD_FLY_DISTANCE,
            forward_fly_duration_ms: Self::DEFAULT_FORWARD_FLY_DURATION_MS,
            path_segments: Self::DEFAULT_PATH_SEGMENTS,
        }
    }

    #[must_use]
    pub fn with_attack_timing(mut self, windup_ms: Millis, recovery_ms: Millis) -> Self {
        self.attack_windup_ms = windup_ms;
        self.attack_recovery_ms = recovery_ms;
        self
    }

    #[must_use]
    pub fn with_max_dispatch_depth(mut self, depth: u32) -> Self {
        self.max_dispatch_depth = depth;
        self
    }

    /// Segment count clamped to `1..=MAX_PATH_SEGMENTS`.
    pub fn effective_path_segments(&self) -> usize {
        self.path_segments.clamp(1, Self::MAX_PATH_SEGMENTS)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
