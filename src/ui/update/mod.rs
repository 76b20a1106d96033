//! Update handlers for application messages.
//!
//! This module is split into submodules by concern:
//! - `effects`: turning page effects into backend tasks
//! - `navigation`: routing, history and page messages
//! - `session`: login, logout and server events
//! - `playback`: transport controls, playback events and the now playing card
//! - `covers`: cover art requests and results
//! - `keyboard`: shortcut dispatch

mod covers;
mod effects;
mod keyboard;
mod navigation;
mod playback;
mod session;

use iced::Task;

use super::messages::Message;
use super::state::AppState;

pub use covers::{handle_cover_loaded, handle_full_cover_loaded};
pub use keyboard::handle_keyboard;
pub use navigation::handle_navigation;
pub use playback::{handle_card, handle_playback, handle_playback_event};
pub use session::{handle_login, handle_server_event};

/// Persist the config if it has a home. The result comes back as
/// [`Message::ConfigSaved`].
pub(crate) fn save_config_task(s: &AppState) -> Task<Message> {
    let Some(path) = s.config_path.clone() else {
        return Task::none();
    };
    Task::perform(crate::config::save_async(s.config.clone(), path), |result| {
        Message::ConfigSaved(result.map_err(|e| e.to_string()))
    })
}
