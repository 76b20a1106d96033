//! Main window composition.

use iced::widget::{column, container, stack};
use iced::{Element, Length};

use crate::ui::messages::Message;
use crate::ui::state::AppState;

use super::bottom_panel::bottom_panel;
use super::popups::{popup_layer, settings_menu};
use super::toast::toast_overlay;

/// Browsing pane above the bottom panel, with the settings menu, popups
/// and toasts layered on top.
pub fn main_view(s: &AppState) -> Element<'_, Message> {
    let ctx = s.view_context();

    let base = container(column![s.browsing.view(&ctx), bottom_panel(s)])
        .width(Length::Fill)
        .height(Length::Fill);

    let mut layers: Vec<Element<Message>> = vec![base.into()];
    if s.browsing.is_settings_menu_open() {
        layers.push(settings_menu());
    }
    if let Some(popup) = s.controller.popup() {
        layers.push(popup_layer(s, popup));
    }
    if let Some(toasts) = toast_overlay(&s.toasts) {
        layers.push(toasts);
    }

    stack(layers).into()
}
