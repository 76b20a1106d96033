//! Keyboard shortcut handling.
//!
//! Only key presses no widget captured reach this point, so typing a space
//! into a search box never toggles playback.

use iced::Task;
use iced::keyboard::{Key, Modifiers};
use iced::widget::text_input;

use crate::ui::messages::Message;
use crate::ui::route::Route;
use crate::ui::shortcuts::ShortcutAction;
use crate::ui::state::AppState;

use super::navigation::{handle_navigation, navigate};
use super::playback::handle_playback;

/// Handle keyboard shortcuts.
///
/// Returns a Task if the key triggered an action, or Task::none() if unhandled.
pub fn handle_keyboard(s: &mut AppState, key: Key, modifiers: Modifiers) -> Task<Message> {
    let Some(action) = s.shortcuts.resolve(&key, modifiers) else {
        return Task::none();
    };

    // The login dialog is modal
    if s.controller.is_login_open() {
        return Task::none();
    }

    match action {
        ShortcutAction::Back => handle_navigation(s, Message::GoBack),
        ShortcutAction::Forward => handle_navigation(s, Message::GoForward),
        ShortcutAction::Reload => handle_navigation(s, Message::Reload),
        ShortcutAction::FocusSearch => match s.browsing.search_input_id() {
            Some(id) => {
                tracing::debug!(target: "ui::keyboard", "Focusing search");
                text_input::focus(id)
            }
            None => Task::none(),
        },
        ShortcutAction::SelectAll => {
            s.browsing.select_all();
            Task::none()
        }
        ShortcutAction::NavButton(index) => match Route::nav_button(index) {
            Some(route) if s.browsing.is_navigation_enabled() => navigate(s, route),
            _ => Task::none(),
        },
        ShortcutAction::ClosePopup => {
            if !s.controller.close_escapable() {
                s.browsing.close_settings_menu();
            }
            Task::none()
        }
        ShortcutAction::PlayPause => handle_playback(s, Message::PlayPause),
    }
}
