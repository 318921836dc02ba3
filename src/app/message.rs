//! Application messages

use iced::keyboard::{Key, Modifiers};

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // ============ Slider ============
    /// Slider dragged; vertical translation since the press, negative upwards
    SliderDragged(f32),
    /// Pointer released from the slider
    SliderReleased,

    // ============ Sequence ============
    /// Frame or interval tick driving tweens and the reveal sequence
    AnimationTick,

    // ============ Window ============
    /// Window resized to the new logical size
    WindowResized(iced::Size),

    // ============ Keyboard ============
    /// Key pressed with modifiers
    KeyPressed(Key, Modifiers),
}
