use std::time::Duration;

use crate::{animation::ease::Ease, foundation::core::ArcBounds};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for ArcBounds {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            x0: f64::lerp(&a.x0, &b.x0, t),
            x1: f64::lerp(&a.x1, &b.x1, t),
            y0: f64::lerp(&a.y0, &b.y0, t),
            y1: f64::lerp(&a.y1, &b.y1, t),
        }
    }
}

/// Start and end value of one animated field, snapshotted when a transition begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T> {
    /// Value at progress `0`.
    pub from: T,
    /// Value at progress `1`.
    pub to: T,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// Tween between two values.
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }

    /// Value at eased progress `e`. Progress at or past the endpoints returns them verbatim.
    pub fn sample(&self, e: f64) -> T {
        if e <= 0.0 {
            return self.from.clone();
        }
        if e >= 1.0 {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, e)
    }
}

/// Timing of a single transition on the host clock.
///
/// Times are offsets from an arbitrary host epoch; the clock never reads wall time itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionClock {
    start: Duration,
    duration: Duration,
    ease: Ease,
}

impl TransitionClock {
    /// Clock starting at `start` and lasting `duration`.
    pub fn new(start: Duration, duration: Duration, ease: Ease) -> Self {
        Self {
            start,
            duration,
            ease,
        }
    }

    /// Host time at which the transition began.
    pub fn start(&self) -> Duration {
        self.start
    }

    /// Total transition length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in `[0, 1]`. Times before `start` count as `0`; a zero-length clock is
    /// always complete.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased progress at `now`.
    pub fn eased(&self, now: Duration) -> f64 {
        self.ease.apply(self.progress(now))
    }

    /// Whether the transition has reached its end at `now`.
    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
