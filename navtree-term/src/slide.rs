//! Time-boxed slide of a child container's rows.

use std::time::{Duration, Instant};

/// Easing function for slides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    /// Rows appear top to bottom.
    Down,
    /// Rows disappear bottom to top.
    Up,
}

/// A running slide.
#[derive(Debug, Clone, Copy)]
pub struct Slide {
    pub direction: SlideDirection,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Slide {
    pub fn new(direction: SlideDirection, start: Instant, duration: Duration) -> Self {
        Self {
            direction,
            start,
            duration,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Eased progress at `now`, from 0.0 to 1.0.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.easing.apply(t.clamp(0.0, 1.0) as f32)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// How many of `total` rows are on screen at `now`.
    pub fn visible_rows(&self, total: usize, now: Instant) -> usize {
        let shown = match self.direction {
            SlideDirection::Down => self.progress(now),
            SlideDirection::Up => 1.0 - self.progress(now),
        };
        ((total as f32) * shown).round().clamp(0.0, total as f32) as usize
    }
}
