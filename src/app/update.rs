//! Message update handlers - thin dispatcher delegating to submodules

mod gesture;
mod keyboard;
mod sequence;
mod window;

use iced::Task;

use super::{App, Message};

impl App {
    /// Handle messages by delegating to appropriate submodule handlers
    pub fn update(&mut self, message: Message) -> Task<Message> {
        if let Some(task) = self.handle_gesture(&message) {
            return task;
        }
        if let Some(task) = self.handle_sequence(&message) {
            return task;
        }
        if let Some(task) = self.handle_window(&message) {
            return task;
        }
        if let Some(task) = self.handle_keyboard(&message) {
            return task;
        }

        Task::none()
    }
}
