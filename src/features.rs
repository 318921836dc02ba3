//! Feature modules - logic separated from UI
//!
//! Each feature module contains the core logic for a specific functionality.
//! Features should not depend on UI components directly.

pub mod clock;
pub mod gesture;
pub mod sequencer;
pub mod settings;

pub use clock::{Clock, SystemClock};
pub use gesture::DragTracker;
pub use sequencer::{Choreography, Cue, Stage};
pub use settings::Settings;
