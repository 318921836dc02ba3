//! Worm ring primitive
//!
//! A dark mouth ringed with radial "teeth" whose length breathes with time,
//! drawn with iced's Canvas.
//!
//! # Design
//!
//! This is a primitive component that implements `canvas::Program` trait.
//! Segment geometry lives in [`radial_segments`] so it can be tested without
//! a renderer.
//!
//! The worm fades as one layer. Its stacked discs are flattened into
//! non-overlapping rings by [`disc_rings`] and each ring is filled once at
//! the worm opacity. Teeth are stroked on top at the same opacity, so where
//! they cross the mouth the faded mouth shows through slightly.

use iced::widget::{Canvas, container};
use iced::widget::canvas::{Fill, Frame, Geometry, LineCap, Path, Program, Stroke, fill};
use iced::{Color, Element, Length, Point, Renderer, Theme, Vector, mouse};

use crate::features::settings::WormSettings;
use crate::ui::theme;

/// Radius of the inner mouth disc
const MOUTH_RADIUS: f32 = 100.0;
/// First tooth points straight up
const START_ANGLE_DEG: f32 = -90.0;

/// One radial line of the ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Length of every tooth at `elapsed` seconds
pub fn line_length(radius: f32, elapsed: f32, settings: &WormSettings) -> f32 {
    let height = radius * (elapsed / settings.period_divisor).sin();
    height.clamp(settings.min_line, settings.max_line)
}

/// Compute the teeth of a ring of outer `radius` centered on `center`
///
/// Each segment starts on the inner edge of the border and points towards
/// the center.
pub fn radial_segments(
    center: Point,
    radius: f32,
    elapsed: f32,
    settings: &WormSettings,
) -> Vec<Segment> {
    let count = settings.line_count.max(1);
    let step = 360.0 / count as f32;
    let inner_radius = radius - settings.border_width;
    let length = line_length(radius, elapsed, settings);

    (0..count)
        .map(|index| {
            let angle = (index as f32 * step + START_ANGLE_DEG).to_radians();
            let (sin, cos) = angle.sin_cos();
            Segment {
                from: Point::new(center.x + inner_radius * cos, center.y + inner_radius * sin),
                to: Point::new(
                    center.x + (inner_radius - length) * cos,
                    center.y + (inner_radius - length) * sin,
                ),
            }
        })
        .collect()
}

/// Annulus of the flattened worm body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub outer: f32,
    /// Zero for the innermost disc
    pub inner: f32,
    pub color: Color,
}

/// Source-over blend of `top` onto `bottom`
fn blend_over(top: Color, bottom: Color) -> Color {
    let alpha = top.a + bottom.a * (1.0 - top.a);
    if alpha <= f32::EPSILON {
        return Color::TRANSPARENT;
    }

    let mix = |t: f32, b: f32| (t * top.a + b * bottom.a * (1.0 - top.a)) / alpha;
    Color::from_rgba(
        mix(top.r, bottom.r),
        mix(top.g, bottom.g),
        mix(top.b, bottom.b),
        alpha,
    )
}

/// Flatten the body, haze and mouth discs into rings, outermost first
///
/// Each ring carries the color the disc stack composites to inside it, at
/// full opacity.
pub fn disc_rings(radius: f32, border_width: f32) -> Vec<Ring> {
    let discs = [
        (radius, theme::WORM_BODY),
        (radius, theme::WORM_HAZE),
        (MOUTH_RADIUS.min(radius), theme::WORM_MOUTH),
        ((radius - border_width).max(0.0), theme::WORM_MOUTH),
    ];

    let mut edges: Vec<f32> = discs
        .iter()
        .map(|(r, _)| *r)
        .filter(|r| *r > 0.0)
        .collect();
    edges.sort_by(|a, b| b.total_cmp(a));
    edges.dedup();

    edges
        .iter()
        .enumerate()
        .map(|(index, &outer)| Ring {
            outer,
            inner: edges.get(index + 1).copied().unwrap_or(0.0),
            color: discs
                .iter()
                .filter(|(r, _)| *r >= outer)
                .fold(Color::TRANSPARENT, |below, (_, color)| {
                    blend_over(*color, below)
                }),
        })
        .collect()
}

/// Worm ring configuration for one frame
#[derive(Debug, Clone)]
pub struct WormRing {
    /// Seconds since the worm appeared
    pub elapsed: f32,
    /// Scale around the center (0.0 - 1.0)
    pub scale: f32,
    pub settings: WormSettings,
}

impl WormRing {
    pub fn new(elapsed: f32, scale: f32, settings: WormSettings) -> Self {
        Self {
            elapsed,
            scale: scale.max(0.0),
            settings,
        }
    }
}

impl<Message> Program<Message> for WormRing {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: iced::Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        if self.scale <= f32::EPSILON {
            return vec![frame.into_geometry()];
        }

        let center = frame.center();
        let radius = bounds.width.min(bounds.height) / 2.0;
        let opacity = self.settings.opacity;
        let faded = |color| theme::with_opacity(color, opacity);

        frame.with_save(|frame| {
            frame.translate(Vector::new(center.x, center.y));
            frame.scale(self.scale);
            frame.translate(Vector::new(-center.x, -center.y));

            for ring in disc_rings(radius, self.settings.border_width) {
                let path = Path::new(|builder| {
                    builder.circle(center, ring.outer);
                    if ring.inner > 0.0 {
                        builder.circle(center, ring.inner);
                    }
                });
                frame.fill(
                    &path,
                    Fill {
                        rule: fill::Rule::EvenOdd,
                        ..Fill::from(faded(ring.color))
                    },
                );
            }

            let teeth = Path::new(|builder| {
                for segment in radial_segments(center, radius, self.elapsed, &self.settings) {
                    builder.move_to(segment.from);
                    builder.line_to(segment.to);
                }
            });

            frame.stroke(
                &teeth,
                Stroke::default()
                    .with_width(1.0)
                    .with_line_cap(LineCap::Round)
                    .with_color(faded(theme::WORM_TEETH)),
            );
        });

        vec![frame.into_geometry()]
    }
}

/// Create a square worm ring of side `diameter`, centered in the available space
pub fn view<'a, Message: 'a>(ring: WormRing, diameter: f32) -> Element<'a, Message> {
    container(Canvas::new(ring).width(diameter).height(diameter))
        .center(Length::Fill)
        .into()
}
