//! Theme for Ambrosia
//! Warm yellow backdrop, frosted slider, dark worm

use iced::color;
use iced::gradient::Linear;
use iced::widget::container;
use iced::{Background, Color, Degrees, Gradient};

// ============================================================================
// Color Palette
// ============================================================================

pub const BACKDROP_YELLOW: Color = color!(0xffcc00);
pub const BACKDROP_ORANGE: Color = color!(0xff9500);

/// Frosted track behind the fill
pub const SLIDER_TRACK: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.35);
/// Filled part of the slider
pub const SLIDER_FILL: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.8);

pub const WORM_BODY: Color = color!(0xa2845e);
pub const WORM_HAZE: Color = Color::from_rgba(0.56, 0.56, 0.58, 0.4);
pub const WORM_MOUTH: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.7);
pub const WORM_TEETH: Color = Color::BLACK;

pub const TITLE: Color = Color::BLACK;

/// Multiply a color's alpha
pub fn with_opacity(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity.clamp(0.0, 1.0),
        ..color
    }
}

// ============================================================================
// Container Styles
// ============================================================================

/// Full-screen gradient running from the lower left corner towards the bottom
pub fn backdrop_gradient() -> Gradient {
    Gradient::Linear(
        Linear::new(Degrees(135.0))
            .add_stop(0.0, BACKDROP_YELLOW)
            .add_stop(0.5, BACKDROP_YELLOW)
            .add_stop(1.0, BACKDROP_ORANGE),
    )
}

/// Backdrop container style
pub fn backdrop(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Gradient(backdrop_gradient())),
        ..Default::default()
    }
}
