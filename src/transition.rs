//! Before/after animation between two segment lists.

use std::time::Duration;

use crate::layout::Segment;

/// A running interpolation from the previously drawn segments towards the
/// current layout.
#[derive(Debug, Clone)]
pub struct Transition {
    from: Vec<Segment>,
    elapsed: f32,
    duration: f32,
}

impl Transition {
    pub fn new(from: Vec<Segment>, duration: Duration) -> Self {
        Self {
            from,
            elapsed: 0.0,
            duration: duration.as_secs_f32(),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Eased progress in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0) as f64;
        t * t * (3.0 - 2.0 * t)
    }

    pub fn frame(&self, to: &[Segment]) -> Vec<Segment> {
        interpolate(&self.from, to, self.progress())
    }
}

/// Blend `from` into `to` at `t`.
///
/// Segments are matched by label. A segment with no counterpart grows out of
/// its start point; segments that disappear are dropped immediately.
pub fn interpolate(from: &[Segment], to: &[Segment], t: f64) -> Vec<Segment> {
    to.iter()
        .map(|target| match from.iter().find(|s| s.label == target.label) {
            Some(source) => Segment {
                start: source.start.lerp(target.start, t),
                end: source.end.lerp(target.end, t),
                ..target.clone()
            },
            None => Segment {
                end: target.start.lerp(target.end, t),
                ..target.clone()
            },
        })
        .collect()
}
