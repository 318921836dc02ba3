//! Animation helpers for Ambrosia
//!
//! This module wraps `iced_anim` easing curves into retargetable tweens that
//! the reveal sequence drives with its own durations, curves and clock.
//!
//! # Usage
//!
//! ```rust
//! use crate::ui::animation::prelude::*;
//!
//! let mut scale = Tween::new(0.0);
//! scale.animate_to(1.0, presets::grow(), Duration::from_millis(500), now);
//! scale.tick(now + Duration::from_millis(250));
//! ```

pub mod prelude;
mod tween;

pub use tween::Tween;
