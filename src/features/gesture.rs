//! Drag gesture to slider progress mapping
//!
//! The slider reports the vertical translation of the pointer since the
//! press. The tracker turns that into an accumulated offset and a progress
//! value, damping the part of the drag that runs past either end.
//!
//! ## Progress formula
//!
//! ```text
//! offset > max:  (max + (offset - max) * strength) / max
//! offset < 0:    (offset * strength) / max
//! otherwise:     offset / max
//! ```
//!
//! The result is capped at [`SOFT_CEILING`].

use super::settings::{CounterMode, SliderSettings};

/// Highest progress the slider ever reports
pub const SOFT_CEILING: f32 = 1.05;

/// Map an accumulated drag offset to slider progress
pub fn progress_for(offset: f32, max_height: f32, strength: f32) -> f32 {
    let damped = if offset > max_height {
        max_height + (offset - max_height) * strength
    } else if offset < 0.0 {
        offset * strength
    } else {
        offset
    };

    (damped / max_height).min(SOFT_CEILING)
}

/// Result of a single progress recomputation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    pub progress: f32,
    /// Threshold crossings to add to the counter
    pub crossings: u32,
}

/// Tracks offset and progress across drag gestures
#[derive(Debug, Clone)]
pub struct DragTracker {
    max_height: f32,
    strength: f32,
    mode: CounterMode,
    offset: f32,
    last_offset: f32,
    progress: f32,
    /// Whether the previous recomputation was past the top
    overshooting: bool,
}

impl DragTracker {
    pub fn new(settings: &SliderSettings) -> Self {
        Self {
            max_height: settings.max_height,
            strength: settings.overshoot_strength,
            mode: settings.counter_mode,
            offset: 0.0,
            last_offset: 0.0,
            progress: 0.0,
            overshooting: false,
        }
    }

    /// Pointer moved; `translation_y` is screen-space, so dragging up is negative
    pub fn drag_changed(&mut self, translation_y: f32) -> DragUpdate {
        self.offset = -translation_y + self.last_offset;
        self.recompute()
    }

    /// Pointer released; settle inside the track and commit the offset
    pub fn drag_ended(&mut self) -> DragUpdate {
        self.offset = self.offset.clamp(0.0, self.max_height);
        let update = self.recompute();
        self.overshooting = false;
        self.last_offset = self.offset;
        update
    }

    fn recompute(&mut self) -> DragUpdate {
        let over = self.offset > self.max_height;
        let crossings = match self.mode {
            CounterMode::Edge => u32::from(over && !self.overshooting),
            CounterMode::Polling => u32::from(over),
        };
        self.overshooting = over;
        self.progress = progress_for(self.offset, self.max_height, self.strength);

        DragUpdate {
            progress: self.progress,
            crossings,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn last_offset(&self) -> f32 {
        self.last_offset
    }
}
