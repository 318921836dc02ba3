//! Retargetable scalar animation using iced_anim curves
//!
//! The reveal sequence animates the same value with different curves and
//! durations (the worm grows quickly, then shrinks over ten seconds), so each
//! retarget starts a new segment from the current value.
//!
//! A tween never reads the wall clock. Segments start at the instant passed
//! to [`Tween::animate_to`] and progress only through [`Tween::tick`], so the
//! caller's clock fully determines the animation.

use std::time::{Duration, Instant};

use iced_anim::transition::Easing;

/// A single animated `f32`
#[derive(Debug, Clone)]
pub struct Tween {
    value: f32,
    from: f32,
    to: f32,
    easing: Easing,
    started: Option<Instant>,
}

impl Tween {
    /// Create a tween resting at `value`
    pub fn new(value: f32) -> Self {
        Self {
            value,
            from: value,
            to: value,
            easing: Easing::EASE,
            started: None,
        }
    }

    /// Animate from the value at `now` to `target`
    pub fn animate_to(&mut self, target: f32, easing: Easing, duration: Duration, now: Instant) {
        if self.to == target {
            return;
        }

        // Settle the running segment at the retarget instant first
        self.tick(now);

        self.from = self.value;
        self.to = target;
        self.easing = easing.with_duration(duration);

        if duration.is_zero() {
            self.value = target;
            self.started = None;
        } else {
            self.started = Some(now);
        }
    }

    /// Jump to `value` without animating
    pub fn snap_to(&mut self, value: f32) {
        *self = Self::new(value);
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value the tween is heading towards
    #[cfg(test)]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Check if animation is in progress
    pub fn is_animating(&self) -> bool {
        self.started.is_some()
    }

    /// Tick the animation forward in time
    /// Must be called on each animation frame to update values
    pub fn tick(&mut self, now: Instant) {
        let Some(started) = self.started else {
            return;
        };

        let elapsed = now.saturating_duration_since(started).as_secs_f32();
        let progress = (elapsed / self.easing.duration.as_secs_f32()).clamp(0.0, 1.0);

        if progress >= 1.0 {
            self.value = self.to;
            self.started = None;
        } else {
            let eased = self.easing.curve.value(progress);
            self.value = self.from + (self.to - self.from) * eased;
        }
    }
}
