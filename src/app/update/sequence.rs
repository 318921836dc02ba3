// src/app/update/sequence.rs
//! Reveal sequence message handlers
//!
//! Turns stage cues from the choreography into tween targets. Each animation
//! starts at the instant its stage was scheduled for, so a late tick lands
//! partway through it instead of restarting it.

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;
use crate::features::{Cue, Stage};
use crate::ui::animation::prelude::presets;

impl App {
    /// Handle animation ticks
    pub fn handle_sequence(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::AnimationTick => {
                let now = self.core.clock.now();
                for cue in self.core.choreography.advance(now) {
                    self.apply_cue(cue);
                }
                self.ui.tick(now);
                Some(Task::none())
            }
            _ => None,
        }
    }

    /// Start the animations that belong to a newly entered stage
    pub(super) fn apply_cue(&mut self, cue: Cue) {
        let choreography = &self.core.settings.choreography;
        let flags = cue.stage.flags();
        let ui = &mut self.ui;

        let slider_target = if flags.slider_eaten { 0.0 } else { 1.0 };
        let title_target = if flags.title_visible { 1.0 } else { 0.0 };
        let presence_target = if flags.worm_visible { 1.0 } else { 0.0 };

        match cue.stage {
            Stage::WormRevealed => {
                ui.worm_started = Some(cue.at);
                ui.worm_presence.snap_to(presence_target);
                ui.worm_scale.snap_to(flags.worm_scale);
                // A restarted sequence may find the slider eaten
                ui.slider_scale.snap_to(slider_target);
                ui.title_scale.snap_to(title_target);
            }
            Stage::WormGrowing => {
                ui.worm_scale.animate_to(
                    flags.worm_scale,
                    presets::grow(),
                    choreography.worm_grow(),
                    cue.at,
                );
            }
            Stage::SliderEaten => {
                ui.slider_scale
                    .animate_to(slider_target, presets::eaten(), choreography.eat(), cue.at);
            }
            Stage::TitleRevealed => {
                let duration = choreography.title();
                ui.title_scale
                    .animate_to(title_target, presets::smooth(), duration, cue.at);
                ui.worm_scale
                    .animate_to(flags.worm_scale, presets::smooth(), duration, cue.at);
            }
            Stage::Resetting => {
                let duration = choreography.reset();
                ui.worm_presence
                    .animate_to(presence_target, presets::smooth(), duration, cue.at);
                ui.slider_scale
                    .animate_to(slider_target, presets::smooth(), duration, cue.at);
                ui.title_scale
                    .animate_to(title_target, presets::smooth(), duration, cue.at);
            }
            Stage::Idle => {
                ui.worm_started = None;
            }
        }
    }
}
