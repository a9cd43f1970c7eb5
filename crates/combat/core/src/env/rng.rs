//! RNG oracle for critical and block rolls.
//!
//! All implementations must be deterministic: given the same seed they
//! produce the same sequence, so a recorded fight replays identically.

use std::collections::VecDeque;

/// Source of randomness consumed by combat rolls.
pub trait RngOracle {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Succeeds with probability `chance`, clamped to `[0, 1]`.
    fn roll_chance(&mut self, chance: f32) -> bool {
        if chance <= 0.0 {
            return false;
        }
        if chance >= 1.0 {
            return true;
        }
        self.next_unit() < chance
    }

    /// Succeeds with probability `basis_points / 10000`.
    fn roll_basis_points(&mut self, basis_points: u32) -> bool {
        self.roll_chance(basis_points as f32 / 10_000.0)
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for PcgRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }
}

/// Replays a fixed list of unit rolls, then a fallback value forever.
///
/// Used to force crit and block outcomes in tests and recorded replays.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    rolls: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRng {
    pub fn new(rolls: impl IntoIterator<Item = f32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 0.999,
        }
    }

    /// A generator whose every roll fails unless the chance is 1.
    pub fn never() -> Self {
        Self::new([])
    }

    /// A generator whose every roll succeeds unless the chance is 0.
    pub fn always() -> Self {
        Self::new([]).with_fallback(0.0)
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_unit() * u32::MAX as f32) as u32
    }

    fn next_unit(&mut self) -> f32 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic_per_seed() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::new(42);
        let mut c = PcgRng::new(43);
        let seq_a: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let seq_b: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        let seq_c: Vec<u32> = (0..8).map(|_| c.next_u32()).collect();
        assert_eq!(seq_a, seq_b);
        assert_ne!(seq_a, seq_c);
    }

    #[test]
    fn unit_rolls_stay_in_range() {
        let mut rng = PcgRng::new(7);
        for _ in 0..1_000 {
            let roll = rng.next_unit();
            assert!((0.0..1.0).contains(&roll));
        }
    }

    #[test]
    fn certain_chances_skip_the_generator() {
        let mut rng = ScriptedRng::new([0.0]);
        assert!(!rng.roll_chance(0.0));
        assert!(rng.roll_basis_points(10_000));
        // the scripted roll is still queued
        assert!(rng.roll_chance(0.01));
    }

    #[test]
    fn scripted_rolls_then_fallback() {
        let mut rng = ScriptedRng::new([0.1, 0.9]);
        assert!(rng.roll_chance(0.5));
        assert!(!rng.roll_chance(0.5));
        assert!(!rng.roll_chance(0.5));
        let mut lucky = ScriptedRng::always();
        assert!(lucky.roll_basis_points(1));
    }
}
