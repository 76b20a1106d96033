//! Server connection: the login dialog, logout and server events.

use iced::Task;

use crate::backend::{PlayerStatus, ServerEvent};
use crate::ui::messages::Message;
use crate::ui::route::Route;
use crate::ui::state::AppState;

use super::navigation::navigate;
use super::save_config_task;

/// Handle login dialog and logout messages
pub fn handle_login(s: &mut AppState, msg: Message) -> Task<Message> {
    match msg {
        Message::LoginFieldChanged(field, value) => {
            if let Some(dialog) = s.controller.login_mut() {
                dialog.set_field(field, value);
            }
            Task::none()
        }
        Message::LoginSubmit => {
            let Some(dialog) = s.controller.login_mut() else {
                return Task::none();
            };
            if !dialog.can_submit() {
                return Task::none();
            }
            dialog.connecting = true;
            dialog.error = None;
            let server_config = dialog.server.clone();
            let password = dialog.password.clone();
            tracing::info!(target: "ui::update", server = %server_config.name, "Connecting");

            let server = s.backend.server.clone();
            Task::perform(
                async move {
                    server
                        .connect(&server_config, &password)
                        .await
                        .map_err(|e| e.to_string())
                },
                Message::LoginResult,
            )
        }
        Message::LoginResult(Ok(())) => {
            // Remember the profile that worked; the password stays in memory only
            if let Some(dialog) = s.controller.login_mut() {
                s.config.server = dialog.server.clone();
            }
            s.controller.close();
            save_config_task(s)
        }
        Message::LoginResult(Err(e)) => {
            tracing::warn!(target: "ui::update", "Login failed: {}", e);
            if let Some(dialog) = s.controller.login_mut() {
                dialog.connecting = false;
                dialog.error = Some(e);
            }
            Task::none()
        }
        Message::Logout => {
            tracing::info!(target: "ui::update", "Logging out");
            s.backend.server.logout();
            on_logged_out(s);
            Task::none()
        }
        _ => Task::none(),
    }
}

pub fn handle_server_event(s: &mut AppState, event: ServerEvent) -> Task<Message> {
    match event {
        ServerEvent::Connected { server } => {
            tracing::info!(target: "ui::update", %server, "Server connected");
            s.browsing.enable_navigation();
            s.toasts.info(format!("Connected to {}", server));
            navigate(s, Route::HOME)
        }
        ServerEvent::LoggedOut => {
            // Already handled when the logout came from this window
            if !s.controller.is_login_open() {
                on_logged_out(s);
            }
            Task::none()
        }
    }
}

fn on_logged_out(s: &mut AppState) {
    s.browsing.disable_navigation();
    s.browsing.set_page(None);
    s.browsing.clear_history();
    s.now_playing.update(None);
    s.player_status = PlayerStatus::Stopped;
    s.controller.prompt_for_login(s.config.server.clone());
}
