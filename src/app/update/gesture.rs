// src/app/update/gesture.rs
//! Slider drag message handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;
use crate::features::gesture::DragUpdate;
use crate::ui::animation::prelude::presets;

impl App {
    /// Handle slider drag messages
    pub fn handle_gesture(&mut self, message: &Message) -> Option<Task<Message>> {
        let update = match message {
            Message::SliderDragged(translation_y) => self.core.drag.drag_changed(*translation_y),
            Message::SliderReleased => {
                let update = self.core.drag.drag_ended();
                tracing::debug!("Drag committed at offset {:.1}", self.core.drag.last_offset());
                update
            }
            _ => return None,
        };

        self.apply_drag(update);
        Some(Task::none())
    }

    fn apply_drag(&mut self, update: DragUpdate) {
        tracing::trace!(
            "Drag offset {:.1} -> progress {:.3}",
            self.core.drag.offset(),
            update.progress
        );

        let now = self.core.clock.now();
        let duration = self.core.settings.slider.fill_transition();
        self.ui
            .fill
            .animate_to(update.progress, presets::drag_follow(), duration, now);

        if update.crossings == 0 {
            return;
        }

        if let Some(cue) = self
            .core
            .choreography
            .register_crossings(update.crossings, now)
        {
            self.apply_cue(cue);
        }
    }
}
