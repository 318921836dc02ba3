// src/app/update/keyboard.rs
//! Keyboard message handlers

use iced::Task;
use iced::keyboard::Key;
use iced::keyboard::key::Named;

use crate::app::message::Message;
use crate::app::state::App;

impl App {
    /// Handle keyboard-related messages
    pub fn handle_keyboard(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            // Escape aborts a running sequence and restores the idle screen
            Message::KeyPressed(Key::Named(Named::Escape), _) => {
                if self.core.choreography.is_running() {
                    self.core.choreography.cancel();
                    self.ui.restore_idle();
                }
                Some(Task::none())
            }
            Message::KeyPressed(..) => Some(Task::none()),
            _ => None,
        }
    }
}
