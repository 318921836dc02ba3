// src/app/view.rs
//! Application view rendering

use iced::widget::{Space, container, stack};
use iced::{Element, Fill};

use super::App;
use super::message::Message;
use crate::ui::primitives::{WormRing, drag_slider, worm_ring};
use crate::ui::widgets::{backdrop, title};

impl App {
    /// Build the single screen
    pub fn view(&self) -> Element<'_, Message> {
        let settings = &self.core.settings;

        let worm: Element<'_, Message> = if self.ui.worm_mounted() {
            let presence = self.ui.worm_presence.value();
            let elapsed = if settings.display.power_saving_mode {
                0.0
            } else {
                self.ui.worm_elapsed(self.core.clock.now())
            };

            let mut worm_settings = settings.worm.clone();
            worm_settings.opacity *= presence;

            worm_ring::view(
                WormRing::new(
                    elapsed,
                    self.ui.worm_scale.value() * presence,
                    worm_settings,
                ),
                self.ui.worm_diameter(),
            )
        } else {
            Space::new().width(0).height(0).into()
        };

        let slider = container(
            drag_slider(self.ui.fill.value(), Message::SliderDragged)
                .on_release(Message::SliderReleased)
                .size(settings.slider.max_width, settings.slider.max_height)
                .corner_radius(settings.slider.corner_radius)
                .scale(self.ui.slider_scale.value()),
        )
        .center(Fill)
        .padding(16);

        let title = title::view(&settings.display.title, self.ui.title_scale.value());

        stack![backdrop::view(), worm, slider, title]
            .width(Fill)
            .height(Fill)
            .into()
    }
}
