//! Primitive UI elements - atomic building blocks
//!
//! This module contains the lowest-level UI components that implement
//! iced's `Widget` trait or `canvas::Program` trait directly.
//!
//! # Design Principles
//!
//! - **No business logic**: Primitives must not import from `crate::app`
//! - **Generic Message types**: Use type parameters for flexibility
//! - **Self-contained**: Each primitive handles its own layout and rendering
//!
//! # Contents
//!
//! - [`DragSlider`] - Fill slider reporting raw drag translation
//! - [`WormRing`] - Worm body with breathing teeth using Canvas

pub mod drag_slider;
pub mod worm_ring;

pub use drag_slider::drag_slider;
pub use worm_ring::WormRing;
