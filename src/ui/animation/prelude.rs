//! Animation prelude - commonly used types re-exported for convenience
//!
//! # Usage
//!
//! ```rust
//! use crate::ui::animation::prelude::*;
//! ```

pub use super::Tween;
pub use iced_anim::transition::Easing;

/// Curves used by the reveal sequence
pub mod presets {
    use super::*;

    /// Slider fill following the finger
    pub fn drag_follow() -> Easing {
        Easing::EASE_IN
    }

    /// Worm popping to full size
    pub fn grow() -> Easing {
        Easing::EASE
    }

    /// Slider being eaten
    pub fn eaten() -> Easing {
        Easing::EASE_OUT
    }

    /// Long fades for the title and the reset
    pub fn smooth() -> Easing {
        Easing::EASE_IN_OUT
    }
}
