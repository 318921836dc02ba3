//! UI module for Ambrosia
//!
//! # Architecture
//!
//! The UI is organized into two layers plus shared helpers:
//!
//! - **Primitives** (`primitives`): Low-level Widget and canvas Program implementations
//! - **Widgets** (`widgets`): Composable UI pieces without business logic
//! - `animation` and `theme`: tweens and the color palette

pub mod animation;
pub mod primitives;
pub mod theme;
pub mod widgets;
