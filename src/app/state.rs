// src/app/state.rs
//! Application state definitions

use std::sync::Arc;
use std::time::Instant;

use iced::Size;

use crate::features::{Choreography, Clock, DragTracker, Settings};
use crate::ui::animation::Tween;

/// Main application state
pub struct App {
    /// Settings, clock, gesture tracking and the reveal sequence
    pub core: CoreState,
    /// Animated view values
    pub ui: UiState,
}

/// Logic state, independent of rendering
pub struct CoreState {
    pub settings: Settings,
    pub clock: Arc<dyn Clock>,
    pub drag: DragTracker,
    pub choreography: Choreography,
}

impl CoreState {
    pub fn new(settings: Settings, clock: Arc<dyn Clock>) -> Self {
        let drag = DragTracker::new(&settings.slider);
        let choreography = Choreography::new(&settings.choreography);

        Self {
            settings,
            clock,
            drag,
            choreography,
        }
    }
}

/// UI state (tweens driven by gestures and sequence cues)
#[derive(Debug)]
pub struct UiState {
    /// Displayed slider progress
    pub fill: Tween,
    /// Slider scale, 0 once eaten
    pub slider_scale: Tween,
    /// Worm scale
    pub worm_scale: Tween,
    /// Worm mount transition; fades the worm out during the reset
    pub worm_presence: Tween,
    /// Title scale
    pub title_scale: Tween,
    /// When the worm appeared, for the teeth animation
    pub worm_started: Option<Instant>,
    /// Last known window size, updated from `WindowResized`
    pub window_size: Size,
}

impl UiState {
    pub fn new(window_size: Size) -> Self {
        Self {
            fill: Tween::new(0.0),
            slider_scale: Tween::new(1.0),
            worm_scale: Tween::new(0.0),
            worm_presence: Tween::new(0.0),
            title_scale: Tween::new(0.0),
            worm_started: None,
            window_size,
        }
    }

    /// Check if any tween is still moving
    pub fn has_active_animations(&self) -> bool {
        self.fill.is_animating()
            || self.slider_scale.is_animating()
            || self.worm_scale.is_animating()
            || self.worm_presence.is_animating()
            || self.title_scale.is_animating()
    }

    /// Advance all tweens
    pub fn tick(&mut self, now: Instant) {
        self.fill.tick(now);
        self.slider_scale.tick(now);
        self.worm_scale.tick(now);
        self.worm_presence.tick(now);
        self.title_scale.tick(now);
    }

    /// Jump every sequence-driven value back to its idle look
    pub fn restore_idle(&mut self) {
        self.slider_scale.snap_to(1.0);
        self.worm_scale.snap_to(0.0);
        self.worm_presence.snap_to(0.0);
        self.title_scale.snap_to(0.0);
        self.worm_started = None;
    }

    /// Whether the worm should be in the view tree
    pub fn worm_mounted(&self) -> bool {
        self.worm_started.is_some() && self.worm_presence.value() > 0.01
    }

    /// Side of the square worm: the shorter window edge
    pub fn worm_diameter(&self) -> f32 {
        self.window_size.width.min(self.window_size.height).max(0.0)
    }

    /// Seconds since the worm appeared
    pub fn worm_elapsed(&self, now: Instant) -> f32 {
        self.worm_started
            .map(|started| now.saturating_duration_since(started).as_secs_f32())
            .unwrap_or(0.0)
    }
}
