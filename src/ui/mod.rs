//! UI module for Sonority.
//!
//! `Sonority` is the main window: it owns the browsing pane, the popup
//! controller and the now playing card, routes every [`Message`] to the
//! handlers in `update`, and turns backend events into subscriptions.

mod browsing;
mod controller;
mod covers;
mod history;
mod messages;
mod pages;
mod route;
mod router;
mod shortcuts;
mod state;
mod streams;
pub mod theme;
mod update;
mod views;
mod widgets;

use std::time::Duration;

use iced::{Element, Subscription, Task, Theme, keyboard, time};

use crate::backend::ServerEvent;

pub use messages::Message;
pub use shortcuts::ShortcutMap;
pub use state::Startup;
use state::AppState;

pub struct Sonority {
    state: AppState,
}

impl Sonority {
    pub fn new(startup: Startup) -> (Self, Task<Message>) {
        let mut state = AppState::new(startup);
        tracing::debug!(target: "ui::update", variant = ?state.variant, "UI::new()");

        // The password is never stored, so every session starts at the
        // login dialog unless the backend is already connected.
        let task = if state.backend.server.is_connected() {
            let server = state.config.server.name.clone();
            update::handle_server_event(&mut state, ServerEvent::Connected { server })
        } else {
            state.controller.prompt_for_login(state.config.server.clone());
            Task::none()
        };

        (Self { state }, task)
    }

    pub fn title(&self) -> String {
        self.state.window_title()
    }

    pub fn theme(&self) -> Theme {
        theme::app_theme(self.state.variant)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let backend = &self.state.backend;
        let mut subscriptions = vec![
            Subscription::run_with_id(
                "server-events",
                futures::StreamExt::map(
                    streams::broadcast_stream(backend.server.subscribe()),
                    Message::Server,
                ),
            ),
            Subscription::run_with_id(
                "playback-events",
                futures::StreamExt::map(
                    streams::broadcast_stream(backend.playback.subscribe()),
                    Message::Playback,
                ),
            ),
            // Keyboard shortcuts - only keys no widget captured
            keyboard::on_key_press(|key, modifiers| Some(Message::KeyPressed(key, modifiers))),
        ];

        if !self.state.toasts.is_empty() {
            subscriptions.push(time::every(Duration::from_secs(1)).map(|_| Message::ToastTick));
        }

        Subscription::batch(subscriptions)
    }

    pub fn view(&self) -> Element<'_, Message> {
        views::main_view(&self.state)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        if !matches!(message, Message::ToastTick) {
            tracing::trace!(target: "ui::update", message = ?message, "Update received");
        }
        let s = &mut self.state;

        match message {
            Message::Server(event) => update::handle_server_event(s, event),
            Message::Playback(event) => update::handle_playback_event(s, event),

            Message::LoginFieldChanged(..)
            | Message::LoginSubmit
            | Message::LoginResult(_)
            | Message::Logout => update::handle_login(s, message),

            Message::NavigateTo(_)
            | Message::GoBack
            | Message::GoForward
            | Message::Reload
            | Message::Page(..) => update::handle_navigation(s, message),

            Message::ToggleSettingsMenu => {
                s.browsing.toggle_settings_menu();
                Task::none()
            }
            Message::ShowAbout => {
                s.browsing.close_settings_menu();
                s.controller.show(controller::Popup::About);
                Task::none()
            }
            Message::ClosePopup => {
                s.controller.close_escapable();
                s.browsing.close_settings_menu();
                Task::none()
            }

            Message::PlayPause
            | Message::Next
            | Message::Previous
            | Message::PlayPauseResult(_)
            | Message::PlaybackResult(_) => update::handle_playback(s, message),

            Message::ShowCoverImage
            | Message::OpenNowPlayingMenu
            | Message::SetFavorite(_)
            | Message::SetRating(_)
            | Message::FavoriteResult { .. }
            | Message::RatingResult { .. }
            | Message::AddToPlaylist
            | Message::PlaylistsLoaded(_)
            | Message::AddToPlaylistChosen(_)
            | Message::ActionResult(_) => update::handle_card(s, message),

            Message::CoverLoaded(cover_id, result) => {
                update::handle_cover_loaded(s, cover_id, result);
                Task::none()
            }
            Message::FullCoverLoaded(cover_id, result) => {
                update::handle_full_cover_loaded(s, cover_id, result);
                Task::none()
            }

            Message::KeyPressed(key, modifiers) => update::handle_keyboard(s, key, modifiers),

            Message::ConfigSaved(Ok(())) => Task::none(),
            Message::ConfigSaved(Err(e)) => {
                tracing::error!(target: "ui::update", "Failed to save config: {}", e);
                s.toasts.error(format!("Failed to save settings: {}", e));
                Task::none()
            }

            Message::ToastDismiss(id) => {
                s.toasts.remove(id);
                Task::none()
            }
            Message::ToastTick => {
                s.toasts.remove_expired();
                Task::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AlbumSortOrder, LibraryData, MemoryBackend, PlaybackEvent};
    use crate::config::Config;
    use crate::test_utils::mock_song;
    use iced::keyboard::{Key, Modifiers, key};
    use pages::PageMessage;
    use route::Route;

    fn app() -> Sonority {
        let backend = MemoryBackend::new(LibraryData::sample(), ".").into_backend();
        let startup = Startup {
            config: Config::default(),
            config_path: None,
            backend,
            shortcuts: ShortcutMap::for_platform(false),
        };
        Sonority::new(startup).0
    }

    fn connected_app() -> Sonority {
        let mut app = app();
        let _ = app.update(Message::LoginResult(Ok(())));
        let _ = app.update(Message::Server(ServerEvent::Connected {
            server: "Test server".into(),
        }));
        app
    }

    fn error_toasts(app: &Sonority) -> usize {
        app.state
            .toasts
            .visible()
            .filter(|t| t.level() == views::toast::ToastLevel::Error)
            .count()
    }

    fn press(app: &mut Sonority, key: Key, modifiers: Modifiers) {
        let _ = app.update(Message::KeyPressed(key, modifiers));
    }

    #[test]
    fn test_starts_at_login_dialog() {
        let app = app();
        assert!(app.state.controller.is_login_open());
        assert!(!app.state.browsing.is_navigation_enabled());
        assert!(app.state.browsing.current().is_none());
        assert_eq!(app.title(), "Sonority");
    }

    #[test]
    fn test_connect_routes_home() {
        let app = connected_app();
        assert!(!app.state.controller.is_login_open());
        assert!(app.state.browsing.is_navigation_enabled());
        assert_eq!(app.state.browsing.current_route(), Some(Route::HOME));
    }

    #[test]
    fn test_logout_clears_page_and_history() {
        let mut app = connected_app();
        let _ = app.update(Message::NavigateTo(Route::Artists));
        assert!(app.state.browsing.can_go_back());

        let _ = app.update(Message::Logout);
        assert!(app.state.browsing.current().is_none());
        assert!(!app.state.browsing.is_navigation_enabled());
        assert!(app.state.controller.is_login_open());

        // History stays empty after logging back in
        let _ = app.update(Message::Server(ServerEvent::Connected {
            server: "Test server".into(),
        }));
        assert!(!app.state.browsing.can_go_back());
    }

    #[test]
    fn test_navigation_ignored_while_logged_out() {
        let mut app = app();
        let _ = app.update(Message::NavigateTo(Route::Artists));
        assert!(app.state.browsing.current().is_none());
    }

    #[test]
    fn test_escape_closes_popup_but_not_login() {
        let mut app = connected_app();
        let _ = app.update(Message::ShowAbout);
        assert!(app.state.controller.popup().is_some());
        press(&mut app, Key::Named(key::Named::Escape), Modifiers::empty());
        assert!(app.state.controller.popup().is_none());

        let _ = app.update(Message::Logout);
        press(&mut app, Key::Named(key::Named::Escape), Modifiers::empty());
        assert!(app.state.controller.is_login_open());
    }

    #[test]
    fn test_numbered_shortcut_navigates() {
        let mut app = connected_app();
        press(&mut app, Key::Character("2".into()), Modifiers::CTRL);
        assert_eq!(app.state.browsing.current_route(), Some(Route::Favorites));

        press(&mut app, Key::Named(key::Named::ArrowLeft), Modifiers::ALT);
        assert_eq!(app.state.browsing.current_route(), Some(Route::Albums));
        press(&mut app, Key::Named(key::Named::ArrowRight), Modifiers::ALT);
        assert_eq!(app.state.browsing.current_route(), Some(Route::Favorites));
    }

    #[test]
    fn test_shortcuts_blocked_by_login_dialog() {
        let mut app = app();
        let _ = app.update(Message::Server(ServerEvent::Connected {
            server: "Test server".into(),
        }));
        // Login dialog still up until the login result arrives
        press(&mut app, Key::Character("4".into()), Modifiers::CTRL);
        assert_eq!(app.state.browsing.current_route(), Some(Route::HOME));
    }

    #[test]
    fn test_title_follows_current_song() {
        let mut app = connected_app();
        let _ = app.update(Message::Playback(PlaybackEvent::SongChanged {
            now: Some(mock_song("s1", "al-1", 1)),
            previous: None,
        }));
        assert_eq!(app.title(), "Song s1 – Test Artist · Sonority");

        let _ = app.update(Message::Playback(PlaybackEvent::SongChanged {
            now: None,
            previous: Some(mock_song("s1", "al-1", 1)),
        }));
        assert_eq!(app.title(), "Sonority");
    }

    #[test]
    fn test_rejected_card_changes_are_rolled_back() {
        let mut app = connected_app();
        let _ = app.update(Message::Playback(PlaybackEvent::SongChanged {
            now: Some(mock_song("s1", "al-1", 1)),
            previous: None,
        }));
        let card_song = |app: &Sonority| app.state.now_playing.song().cloned().unwrap();

        let _ = app.update(Message::SetFavorite(true));
        assert!(card_song(&app).starred);
        let _ = app.update(Message::FavoriteResult {
            song_id: "s1".into(),
            previous: false,
            result: Err("Not connected to a server".into()),
        });
        assert!(!card_song(&app).starred);

        let _ = app.update(Message::SetRating(4));
        assert_eq!(card_song(&app).rating, 4);
        let _ = app.update(Message::RatingResult {
            song_id: "s1".into(),
            previous: 0,
            result: Err("Not connected to a server".into()),
        });
        assert_eq!(card_song(&app).rating, 0);
        assert_eq!(error_toasts(&app), 2);
    }

    #[test]
    fn test_favorite_failure_reported_after_leaving_page() {
        let mut app = connected_app();
        let albums_page = app.state.browsing.current_id().unwrap();
        let _ = app.update(Message::NavigateTo(Route::Artists));
        let _ = app.update(Message::Page(
            albums_page,
            PageMessage::FavoriteSaved {
                id: "al-1".into(),
                favorite: true,
                result: Err("Not connected to a server".into()),
            },
        ));
        assert_eq!(error_toasts(&app), 1);
    }

    #[test]
    fn test_sort_order_change_is_remembered() {
        let mut app = connected_app();
        let id = app.state.browsing.current_id().unwrap();
        let _ = app.update(Message::Page(
            id,
            PageMessage::SortOrderChanged(AlbumSortOrder::Artist),
        ));
        assert_eq!(app.state.sort_order, AlbumSortOrder::Artist);
        assert_eq!(
            app.state.config.albums_page.sort_order,
            AlbumSortOrder::Artist.to_string()
        );
    }

    #[test]
    fn test_failed_config_save_shows_toast() {
        let mut app = app();
        let _ = app.update(Message::ConfigSaved(Err("disk full".into())));
        assert!(!app.state.toasts.is_empty());
    }
}
