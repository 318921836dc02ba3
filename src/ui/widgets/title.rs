//! Title revealed at the end of the sequence
//!
//! iced text cannot be transformed, so the scale-in is approximated by
//! growing the font size.

use iced::font::Weight;
use iced::widget::{Space, container, text};
use iced::{Element, Fill, Font};

use crate::ui::theme;

/// Font size at full scale
pub const TITLE_SIZE: f32 = 28.0;

/// Scales below this are not drawn at all
const MIN_VISIBLE_SCALE: f32 = 0.01;

/// Font size for a given reveal scale, or `None` when it should not be drawn
pub fn scaled_size(scale: f32) -> Option<f32> {
    (scale > MIN_VISIBLE_SCALE).then(|| TITLE_SIZE * scale.min(1.0))
}

/// Bold title centered horizontally near the top of the window
pub fn view<'a, Message: 'a>(title: &'a str, scale: f32) -> Element<'a, Message> {
    let Some(size) = scaled_size(scale) else {
        return Space::new().width(0).height(0).into();
    };

    container(
        text(title)
            .size(size)
            .font(Font {
                weight: Weight::Bold,
                ..Font::DEFAULT
            })
            .color(theme::TITLE),
    )
    .center_x(Fill)
    .padding([64, 16])
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_at_zero_scale() {
        assert_eq!(scaled_size(0.0), None);
        assert_eq!(scaled_size(0.005), None);
    }

    #[test]
    fn grows_with_scale() {
        assert_eq!(scaled_size(0.5), Some(14.0));
        assert_eq!(scaled_size(1.0), Some(TITLE_SIZE));
        assert_eq!(scaled_size(1.5), Some(TITLE_SIZE));
    }
}
