//! Main application module

mod message;
mod state;
mod update;
mod view;

use std::sync::Arc;
use std::time::Duration;

use iced::{Task, Theme};

use crate::features::{Clock, Settings, SystemClock};
pub use message::Message;
pub use state::App;
use state::{CoreState, UiState};

impl App {
    /// Create new application instance
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        tracing::info!(
            "Starting with {} crossings to reveal, counter mode {}",
            settings.choreography.crossings_to_reveal,
            settings.slider.counter_mode
        );
        (Self::with_clock(settings, Arc::new(SystemClock)), Task::none())
    }

    /// Create an application reading time from `clock`
    pub fn with_clock(settings: Settings, clock: Arc<dyn Clock>) -> Self {
        let window_size = iced::Size::new(
            settings.display.window_width,
            settings.display.window_height,
        );

        Self {
            core: CoreState::new(settings, clock),
            ui: UiState::new(window_size),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }

    pub fn title(&self) -> String {
        "Ambrosia".to_string()
    }

    /// Subscriptions for animation ticks, window resizes and keyboard events
    pub fn subscription(&self) -> iced::Subscription<Message> {
        use iced::keyboard;

        let rate = subscription_logic::tick_rate(
            self.ui.has_active_animations(),
            self.core.choreography.is_running(),
            self.core.settings.display.power_saving_mode,
        );

        // 1. Animation ticks
        let tick_sub = match rate {
            subscription_logic::TickRate::Frames => {
                iced::window::frames().map(|_| Message::AnimationTick)
            }
            subscription_logic::TickRate::Every(interval) => {
                iced::time::every(interval).map(|_| Message::AnimationTick)
            }
            subscription_logic::TickRate::Idle => iced::Subscription::none(),
        };

        // 2. Window resize
        let resize_sub =
            iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size));

        // 3. Keyboard events
        let keyboard_sub = keyboard::listen().filter_map(|event| match event {
            keyboard::Event::KeyPressed { key, modifiers, .. } => {
                Some(Message::KeyPressed(key, modifiers))
            }
            _ => None,
        });

        iced::Subscription::batch([tick_sub, resize_sub, keyboard_sub])
    }
}

/// Interval between sequence ticks when frames are not needed
const POWER_SAVING_TICK: Duration = Duration::from_millis(100);

/// Subscription decision logic for testability
pub mod subscription_logic {
    use super::*;

    /// How often the app needs `AnimationTick`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TickRate {
        /// Nothing is moving
        Idle,
        /// Every frame
        Frames,
        /// Fixed interval, enough to keep the sequence on schedule
        Every(Duration),
    }

    pub fn tick_rate(has_animations: bool, sequence_running: bool, power_saving: bool) -> TickRate {
        if has_animations {
            TickRate::Frames
        } else if sequence_running {
            // The worm teeth move every frame unless frozen
            if power_saving {
                TickRate::Every(POWER_SAVING_TICK)
            } else {
                TickRate::Frames
            }
        } else {
            TickRate::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::subscription_logic::*;
    use super::*;
    use crate::features::clock::ManualClock;
    use crate::features::settings::{CounterMode, RetriggerPolicy};
    use crate::features::{Stage, sequencer::StageFlags};

    mod property_tick_rate {
        use super::*;

        #[test]
        fn idle_without_work() {
            assert_eq!(tick_rate(false, false, false), TickRate::Idle);
            assert_eq!(tick_rate(false, false, true), TickRate::Idle);
        }

        #[test]
        fn tweens_need_frames() {
            assert_eq!(tick_rate(true, false, false), TickRate::Frames);
            assert_eq!(tick_rate(true, true, true), TickRate::Frames);
        }

        #[test]
        fn running_sequence_keeps_ticking() {
            assert_eq!(tick_rate(false, true, false), TickRate::Frames);
            assert_eq!(
                tick_rate(false, true, true),
                TickRate::Every(POWER_SAVING_TICK)
            );
        }
    }

    mod property_end_to_end {
        use super::*;

        const MAX: f32 = 180.0;

        fn app(settings: Settings) -> (App, Arc<ManualClock>) {
            let clock = Arc::new(ManualClock::new());
            let app = App::with_clock(settings, clock.clone());
            (app, clock)
        }

        fn overshoot_gesture(app: &mut App) {
            let _ = app.update(Message::SliderDragged(0.0));
            let _ = app.update(Message::SliderDragged(-(MAX + 200.0)));
            let _ = app.update(Message::SliderReleased);
        }

        fn tick_after(app: &mut App, clock: &ManualClock, secs: f32) {
            clock.advance(Duration::from_secs_f32(secs));
            let _ = app.update(Message::AnimationTick);
        }

        #[test]
        fn three_overshoots_reveal_worm() {
            let (mut app, _clock) = app(Settings::default());

            overshoot_gesture(&mut app);
            overshoot_gesture(&mut app);
            assert!(!app.core.choreography.flags().worm_visible);
            assert_eq!(app.core.choreography.counter(), 2);

            overshoot_gesture(&mut app);
            assert!(app.core.choreography.flags().worm_visible);
            assert_eq!(app.core.choreography.stage(), Stage::WormRevealed);
            assert!(app.ui.worm_started.is_some());
        }

        #[test]
        fn release_commits_clamped_offset() {
            let (mut app, _clock) = app(Settings::default());
            overshoot_gesture(&mut app);
            assert_eq!(app.core.drag.last_offset(), MAX);
            assert_eq!(app.core.drag.progress(), 1.0);
        }

        #[test]
        fn title_follows_after_fifteen_seconds() {
            let (mut app, clock) = app(Settings::default());
            for _ in 0..3 {
                overshoot_gesture(&mut app);
            }

            tick_after(&mut app, &clock, 3.5);
            assert_eq!(app.core.choreography.stage(), Stage::WormGrowing);
            assert_eq!(app.ui.worm_scale.target(), 1.0);

            tick_after(&mut app, &clock, 3.0);
            assert_eq!(app.core.choreography.stage(), Stage::SliderEaten);
            assert_eq!(app.ui.slider_scale.target(), 0.0);
            assert!(!app.core.choreography.flags().title_visible);

            tick_after(&mut app, &clock, 9.0);
            let flags = app.core.choreography.flags();
            assert!(flags.title_visible);
            assert_eq!(app.core.choreography.counter(), 0);
            assert_eq!(app.ui.title_scale.target(), 1.0);
            assert_eq!(app.ui.worm_scale.target(), 0.0);
        }

        #[test]
        fn full_cycle_restores_idle_flags() {
            let (mut app, clock) = app(Settings::default());
            for _ in 0..3 {
                overshoot_gesture(&mut app);
            }

            tick_after(&mut app, &clock, 40.0);
            assert_eq!(app.core.choreography.stage(), Stage::Idle);
            assert_eq!(app.core.choreography.flags(), StageFlags::default());
            assert_eq!(app.core.choreography.counter(), 0);
            assert!(app.ui.worm_started.is_none());
            assert_eq!(app.ui.slider_scale.target(), 1.0);
            assert_eq!(app.ui.title_scale.target(), 0.0);
        }

        #[test]
        fn crossings_during_sequence_are_ignored() {
            let (mut app, clock) = app(Settings::default());
            for _ in 0..3 {
                overshoot_gesture(&mut app);
            }
            tick_after(&mut app, &clock, 1.0);

            for _ in 0..3 {
                overshoot_gesture(&mut app);
            }
            assert_eq!(app.core.choreography.stage(), Stage::WormRevealed);
            assert_eq!(app.core.choreography.counter(), 3);
        }

        #[test]
        fn polling_mode_reveals_within_one_long_drag() {
            let mut settings = Settings::default();
            settings.slider.counter_mode = CounterMode::Polling;
            settings.choreography.retrigger = RetriggerPolicy::Ignore;
            let (mut app, _clock) = app(settings);

            let _ = app.update(Message::SliderDragged(-(MAX + 10.0)));
            let _ = app.update(Message::SliderDragged(-(MAX + 20.0)));
            assert!(!app.core.choreography.flags().worm_visible);
            let _ = app.update(Message::SliderDragged(-(MAX + 30.0)));
            assert!(app.core.choreography.flags().worm_visible);
        }

        #[test]
        fn escape_cancels_sequence() {
            use iced::keyboard::{Key, Modifiers, key::Named};

            let (mut app, clock) = app(Settings::default());
            for _ in 0..3 {
                overshoot_gesture(&mut app);
            }
            tick_after(&mut app, &clock, 7.0);
            assert_eq!(app.core.choreography.stage(), Stage::SliderEaten);

            let _ = app.update(Message::KeyPressed(
                Key::Named(Named::Escape),
                Modifiers::default(),
            ));
            assert_eq!(app.core.choreography.stage(), Stage::Idle);
            assert_eq!(app.core.choreography.counter(), 0);
            assert_eq!(app.ui.slider_scale.value(), 1.0);
            assert!(!app.ui.worm_mounted());
        }

        #[test]
        fn resize_sets_worm_diameter() {
            let (mut app, _clock) = app(Settings::default());
            assert_eq!(app.ui.worm_diameter(), 420.0);

            let _ = app.update(Message::WindowResized(iced::Size::new(900.0, 640.0)));
            assert_eq!(app.ui.worm_diameter(), 640.0);
        }

        #[test]
        fn worm_elapsed_uses_injected_clock() {
            let (mut app, clock) = app(Settings::default());
            for _ in 0..3 {
                overshoot_gesture(&mut app);
            }
            clock.advance(Duration::from_secs(2));
            assert!((app.ui.worm_elapsed(app.core.clock.now()) - 2.0).abs() < 1e-6);
        }
    }

    mod property_animation_timing {
        use super::*;

        const MAX: f32 = 180.0;

        fn revealed_app() -> (App, Arc<ManualClock>) {
            let clock = Arc::new(ManualClock::new());
            let mut app = App::with_clock(Settings::default(), clock.clone());
            for _ in 0..3 {
                let _ = app.update(Message::SliderDragged(0.0));
                let _ = app.update(Message::SliderDragged(-(MAX + 200.0)));
                let _ = app.update(Message::SliderReleased);
            }
            assert_eq!(app.core.choreography.stage(), Stage::WormRevealed);
            (app, clock)
        }

        /// Tick with the clock at `millis` after the reveal
        fn tick_at(app: &mut App, clock: &ManualClock, millis: u64) {
            clock.set(Duration::from_millis(millis));
            let _ = app.update(Message::AnimationTick);
        }

        fn between(value: f32) -> bool {
            value > 0.0 && value < 1.0
        }

        #[test]
        fn worm_grows_over_half_a_second() {
            let (mut app, clock) = revealed_app();

            tick_at(&mut app, &clock, 3_000);
            assert_eq!(app.core.choreography.stage(), Stage::WormGrowing);
            assert!(app.ui.worm_scale.value() < 0.01);

            tick_at(&mut app, &clock, 3_250);
            assert!(between(app.ui.worm_scale.value()));
            assert!(app.ui.worm_scale.is_animating());

            tick_at(&mut app, &clock, 3_500);
            assert_eq!(app.ui.worm_scale.value(), 1.0);
            assert!(!app.ui.worm_scale.is_animating());
        }

        #[test]
        fn slider_is_eaten_over_four_seconds() {
            let (mut app, clock) = revealed_app();
            tick_at(&mut app, &clock, 3_000);

            tick_at(&mut app, &clock, 6_000);
            assert_eq!(app.core.choreography.stage(), Stage::SliderEaten);
            assert!(app.ui.slider_scale.value() > 0.99);

            tick_at(&mut app, &clock, 8_000);
            assert!(between(app.ui.slider_scale.value()));

            tick_at(&mut app, &clock, 9_900);
            assert!(app.ui.slider_scale.is_animating());

            tick_at(&mut app, &clock, 10_000);
            assert_eq!(app.ui.slider_scale.value(), 0.0);
            assert!(!app.ui.slider_scale.is_animating());
        }

        #[test]
        fn late_tick_lands_partway_through_stage() {
            let (mut app, clock) = revealed_app();
            tick_at(&mut app, &clock, 3_100);
            assert_eq!(app.core.choreography.stage(), Stage::WormGrowing);
            assert!(between(app.ui.worm_scale.value()));

            // Eat began at 6.0 s; 0.1 s into a 4 s ease-out the slider is barely touched
            tick_at(&mut app, &clock, 6_100);
            assert_eq!(app.core.choreography.stage(), Stage::SliderEaten);
            assert!(app.ui.slider_scale.value() > 0.5);
            assert!(app.ui.slider_scale.is_animating());
        }

        #[test]
        fn title_and_reset_fade_over_ten_seconds() {
            let (mut app, clock) = revealed_app();
            tick_at(&mut app, &clock, 15_000);
            assert_eq!(app.core.choreography.stage(), Stage::TitleRevealed);
            assert!(app.ui.title_scale.value() < 0.01);

            tick_at(&mut app, &clock, 20_000);
            assert!(between(app.ui.title_scale.value()));
            assert!(between(app.ui.worm_scale.value()));

            tick_at(&mut app, &clock, 25_000);
            assert_eq!(app.core.choreography.stage(), Stage::Resetting);
            assert!(app.ui.title_scale.value() > 0.99);
            assert!(app.ui.worm_presence.value() > 0.99);
            assert_eq!(app.ui.worm_scale.value(), 0.0);

            tick_at(&mut app, &clock, 30_000);
            assert!(between(app.ui.title_scale.value()));
            assert!(between(app.ui.worm_presence.value()));
            assert!(between(app.ui.slider_scale.value()));

            tick_at(&mut app, &clock, 35_000);
            assert_eq!(app.core.choreography.stage(), Stage::Idle);
            assert_eq!(app.ui.title_scale.value(), 0.0);
            assert_eq!(app.ui.worm_presence.value(), 0.0);
            assert_eq!(app.ui.slider_scale.value(), 1.0);
            assert!(!app.ui.has_active_animations());
        }

        #[test]
        fn single_late_tick_settles_every_value() {
            let (mut app, clock) = revealed_app();
            tick_at(&mut app, &clock, 40_000);

            assert_eq!(app.core.choreography.stage(), Stage::Idle);
            assert_eq!(app.ui.slider_scale.value(), 1.0);
            assert_eq!(app.ui.worm_scale.value(), 0.0);
            assert_eq!(app.ui.title_scale.value(), 0.0);
            assert!(!app.ui.has_active_animations());
        }
    }
}
