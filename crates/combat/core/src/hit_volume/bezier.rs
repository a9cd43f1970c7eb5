//! Bezier paths sampled into equal-time linear segments.

use glam::Vec3;

/// Point on the Bezier curve defined by `points` at `t` in `[0, 1]`.
pub fn evaluate(points: &[Vec3], t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let mut scratch: Vec<Vec3> = points.to_vec();
    let Some(mut len) = scratch.len().checked_sub(1) else {
        return Vec3::ZERO;
    };
    // de Casteljau
    while len > 0 {
        for i in 0..len {
            scratch[i] = scratch[i].lerp(scratch[i + 1], t);
        }
        len -= 1;
    }
    scratch[0]
}

/// A curve flattened to `segments + 1` points, each segment taking an equal
/// share of the flight time.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledPath {
    points: Vec<Vec3>,
}

impl SampledPath {
    pub fn sample(control_points: &[Vec3], segments: usize) -> Self {
        let segments = segments.max(1);
        let points = (0..=segments)
            .map(|step| evaluate(control_points, step as f32 / segments as f32))
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Position after `progress` of the flight time has elapsed.
    pub fn position_at(&self, progress: f32) -> Vec3 {
        let segments = self.segments();
        if segments == 0 {
            return self.points.first().copied().unwrap_or(Vec3::ZERO);
        }
        let scaled = progress.clamp(0.0, 1.0) * segments as f32;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f32;
        self.points[index].lerp(self.points[index + 1], local)
    }

    /// Direction of the segment active at `progress`.
    pub fn heading_at(&self, progress: f32) -> Vec3 {
        let segments = self.segments();
        if segments == 0 {
            return Vec3::ZERO;
        }
        let index = ((progress.clamp(0.0, 1.0) * segments as f32).floor() as usize).min(segments - 1);
        self.points[index + 1] - self.points[index]
    }
}
