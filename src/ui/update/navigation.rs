//! Routing, history and messages addressed to pages.

use iced::Task;

use crate::ui::messages::Message;
use crate::ui::pages::PageMessage;
use crate::ui::route::Route;
use crate::ui::router;
use crate::ui::state::AppState;

use super::effects::apply_effects;

/// Navigate to `route` with the persisted album order.
pub fn navigate(s: &mut AppState, route: Route) -> Task<Message> {
    s.browsing.close_settings_menu();
    match router::navigate_to(&mut s.browsing, route, s.sort_order) {
        Some((id, effects)) => apply_effects(s, id, effects),
        None => Task::none(),
    }
}

/// Handle navigation messages
pub fn handle_navigation(s: &mut AppState, msg: Message) -> Task<Message> {
    let changed = match msg {
        Message::NavigateTo(route) => return navigate(s, route),
        Message::GoBack => s.browsing.go_back(),
        Message::GoForward => s.browsing.go_forward(),
        Message::Reload => {
            if !s.browsing.is_navigation_enabled() {
                return Task::none();
            }
            s.browsing.reload()
        }
        Message::Page(id, message) => {
            // A rejected favorite still needs reporting after the page is gone
            let failure = match &message {
                PageMessage::FavoriteSaved { result: Err(e), .. } => Some(e.clone()),
                _ => None,
            };
            return match s.browsing.update_page(id, message) {
                Some(effects) => apply_effects(s, id, effects),
                None => {
                    if let Some(e) = failure {
                        s.toasts.error(format!("Failed to update favorite: {}", e));
                    }
                    Task::none()
                }
            };
        }
        _ => None,
    };

    match changed {
        Some((id, effects)) => apply_effects(s, id, effects),
        None => Task::none(),
    }
}
