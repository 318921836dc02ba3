//! Drag slider primitive
//!
//! A tall rounded bar whose dark fill rises with progress. It does not map
//! positions to values itself: it reports the vertical translation since the
//! press and lets the caller decide what that means, so overshoot past either
//! end can be damped outside the widget.

use iced::advanced::layout::{self, Layout};
use iced::advanced::renderer;
use iced::advanced::widget::{self, Widget};
use iced::advanced::{Clipboard, Shell};
use iced::border::Radius;
use iced::event::Event;
use iced::{Background, Border, Color, Element, Length, Point, Rectangle, Size, Theme};
use iced::{mouse, touch};

use crate::ui::theme;

/// Outline and fill rectangles of the slider for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderFrame {
    pub outline: Rectangle,
    pub fill: Rectangle,
}

/// Lay out the slider inside its slot
///
/// Past the top the outline stretches upwards with progress; below zero it
/// stretches downwards. The fill always grows from the outline's bottom.
/// Both rectangles are then scaled around the slot's center.
pub fn slider_frame(slot: Rectangle, progress: f32, scale: f32) -> SliderFrame {
    let max_height = slot.height;

    let outline = if progress >= 0.0 {
        let height = max_height * progress.max(1.0);
        Rectangle {
            x: slot.x,
            y: slot.y + slot.height - height,
            width: slot.width,
            height,
        }
    } else {
        Rectangle {
            height: max_height * (1.0 - progress),
            ..slot
        }
    };

    let fill_height = progress.max(0.0) * max_height;
    let fill = Rectangle {
        y: outline.y + outline.height - fill_height,
        height: fill_height,
        ..outline
    };

    let center = slot.center();
    SliderFrame {
        outline: scale_around(outline, center, scale),
        fill: scale_around(fill, center, scale),
    }
}

fn scale_around(rect: Rectangle, center: Point, scale: f32) -> Rectangle {
    let scale = scale.max(0.0);
    Rectangle {
        x: center.x + (rect.x - center.x) * scale,
        y: center.y + (rect.y - center.y) * scale,
        width: rect.width * scale,
        height: rect.height * scale,
    }
}

/// A draggable fill slider
pub struct DragSlider<'a, Message> {
    progress: f32,
    scale: f32,
    width: f32,
    height: f32,
    corner_radius: f32,
    on_drag: Box<dyn Fn(f32) -> Message + 'a>,
    on_release: Option<Message>,
    track_color: Color,
    fill_color: Color,
}

impl<'a, Message> DragSlider<'a, Message> {
    /// Creates a new drag slider
    ///
    /// `on_drag` receives the vertical translation since the press, negative
    /// when dragging up.
    pub fn new<F>(progress: f32, on_drag: F) -> Self
    where
        F: Fn(f32) -> Message + 'a,
    {
        Self {
            progress,
            scale: 1.0,
            width: 90.0,
            height: 180.0,
            corner_radius: 25.0,
            on_drag: Box::new(on_drag),
            on_release: None,
            track_color: theme::SLIDER_TRACK,
            fill_color: theme::SLIDER_FILL,
        }
    }

    /// Message published when the pointer is released
    pub fn on_release(mut self, message: Message) -> Self {
        self.on_release = Some(message);
        self
    }

    /// Sets the slot size
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the corner radius
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Sets the scale around the center
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// State for the drag slider
#[derive(Debug, Clone, Copy, Default)]
pub struct State {
    /// Y position where the current drag started
    origin: Option<f32>,
    /// Finger driving the drag, if it is a touch drag
    finger: Option<touch::Finger>,
}

impl<'a, Message, Renderer> Widget<Message, Theme, Renderer> for DragSlider<'a, Message>
where
    Renderer: renderer::Renderer,
    Message: Clone,
{
    fn tag(&self) -> widget::tree::Tag {
        widget::tree::Tag::of::<State>()
    }

    fn state(&self) -> widget::tree::State {
        widget::tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        Size::new(Length::Fixed(self.width), Length::Fixed(self.height))
    }

    fn layout(
        &mut self,
        _tree: &mut widget::Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let width = Length::Fixed(self.width);
        let height = Length::Fixed(self.height);
        let limits = limits.width(width).height(height);
        let size = limits.resolve(width, height, Size::ZERO);
        layout::Node::new(size)
    }

    fn update(
        &mut self,
        tree: &mut widget::Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_mut::<State>();
        let outline = slider_frame(layout.bounds(), self.progress, self.scale).outline;

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if state.origin.is_none() {
                    if let Some(position) = cursor.position_over(outline) {
                        self.begin(state, position, None, shell);
                    }
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if state.finger.is_none() {
                    if let Some(origin) = state.origin {
                        shell.publish((self.on_drag)(position.y - origin));
                        shell.capture_event();
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.finger.is_none() && state.origin.is_some() {
                    self.end(state, shell);
                }
            }
            Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if state.origin.is_none() && outline.contains(*position) {
                    self.begin(state, *position, Some(*id), shell);
                }
            }
            Event::Touch(touch::Event::FingerMoved { id, position }) => {
                if state.finger == Some(*id) {
                    if let Some(origin) = state.origin {
                        shell.publish((self.on_drag)(position.y - origin));
                        shell.capture_event();
                    }
                }
            }
            Event::Touch(
                touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. },
            ) => {
                if state.finger == Some(*id) {
                    self.end(state, shell);
                }
            }
            _ => {}
        }
    }

    fn draw(
        &self,
        _tree: &widget::Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let frame = slider_frame(layout.bounds(), self.progress, self.scale);
        if frame.outline.width <= 0.0 || frame.outline.height <= 0.0 {
            return;
        }

        let radius = (self.corner_radius * self.scale.max(0.0))
            .min(frame.outline.width / 2.0)
            .min(frame.outline.height / 2.0);

        // Track
        renderer.fill_quad(
            renderer::Quad {
                bounds: frame.outline,
                border: Border::default().rounded(radius),
                ..Default::default()
            },
            Background::Color(self.track_color),
        );

        if frame.fill.height <= 0.0 {
            return;
        }

        // Fill follows the track's rounded bottom; the top rounds only near
        // the track's top edge
        let bottom = radius.min(frame.fill.height / 2.0);
        let top = if frame.fill.y - frame.outline.y < radius {
            bottom
        } else {
            0.0
        };

        renderer.fill_quad(
            renderer::Quad {
                bounds: frame.fill,
                border: Border::default().rounded(Radius {
                    top_left: top,
                    top_right: top,
                    bottom_right: bottom,
                    bottom_left: bottom,
                }),
                ..Default::default()
            },
            Background::Color(self.fill_color),
        );
    }

    fn mouse_interaction(
        &self,
        tree: &widget::Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<State>();
        let outline = slider_frame(layout.bounds(), self.progress, self.scale).outline;

        if state.origin.is_some() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(outline) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a, Message: Clone> DragSlider<'a, Message> {
    fn begin(
        &self,
        state: &mut State,
        position: Point,
        finger: Option<touch::Finger>,
        shell: &mut Shell<'_, Message>,
    ) {
        state.origin = Some(position.y);
        state.finger = finger;
        // A press is a zero-length drag
        shell.publish((self.on_drag)(0.0));
        shell.capture_event();
    }

    fn end(&self, state: &mut State, shell: &mut Shell<'_, Message>) {
        state.origin = None;
        state.finger = None;
        if let Some(message) = self.on_release.clone() {
            shell.publish(message);
        }
        shell.capture_event();
    }
}

impl<'a, Message> From<DragSlider<'a, Message>> for Element<'a, Message, Theme>
where
    Message: Clone + 'a,
{
    fn from(slider: DragSlider<'a, Message>) -> Self {
        Element::new(slider)
    }
}

/// Creates a new drag slider
pub fn drag_slider<'a, Message>(
    progress: f32,
    on_drag: impl Fn(f32) -> Message + 'a,
) -> DragSlider<'a, Message> {
    DragSlider::new(progress, on_drag)
}
