//! Full-screen gradient backdrop

use iced::widget::{Space, container};
use iced::{Element, Fill};

use crate::ui::theme;

/// Gradient filling the whole window
pub fn view<'a, Message: 'a>() -> Element<'a, Message> {
    container(Space::new().width(Fill).height(Fill))
        .width(Fill)
        .height(Fill)
        .style(theme::backdrop)
        .into()
}
