//! Popups and dialogs shown over the main window. At most one is open.

use crate::backend::Playlist;
use crate::config::ServerConfig;
use crate::ui::messages::LoginField;

/// State of the login dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginDialog {
    pub server: ServerConfig,
    pub password: String,
    pub connecting: bool,
    pub error: Option<String>,
}

impl LoginDialog {
    pub fn new(server: ServerConfig) -> Self {
        Self {
            server,
            password: String::new(),
            connecting: false,
            error: None,
        }
    }

    pub fn set_field(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::ServerName => self.server.name = value,
            LoginField::Url => self.server.url = value,
            LoginField::Username => self.server.username = value,
            LoginField::Password => self.password = value,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.connecting && !self.server.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    Login(LoginDialog),
    About,
    CoverImage {
        cover_id: String,
    },
    /// Right-click menu of the now playing card
    NowPlayingMenu,
    AddToPlaylist {
        song_ids: Vec<String>,
        /// `None` while the playlists load
        playlists: Option<Vec<Playlist>>,
    },
}

impl Popup {
    /// Whether Escape may close this popup. The login dialog stays until a
    /// connection succeeds.
    pub fn is_escapable(&self) -> bool {
        !matches!(self, Popup::Login(_))
    }
}

#[derive(Debug, Default)]
pub struct Controller {
    popup: Option<Popup>,
}

impl Controller {
    /// Open `popup`, replacing any escapable one. Returns false if the
    /// login dialog is blocking.
    pub fn show(&mut self, popup: Popup) -> bool {
        if let Some(current) = &self.popup
            && !current.is_escapable()
            && popup.is_escapable()
        {
            return false;
        }
        self.popup = Some(popup);
        true
    }

    pub fn prompt_for_login(&mut self, server: ServerConfig) {
        tracing::info!(target: "ui::update", server = %server.name, "Prompting for login");
        self.popup = Some(Popup::Login(LoginDialog::new(server)));
    }

    /// Close the popup if Escape may close it.
    pub fn close_escapable(&mut self) -> bool {
        match &self.popup {
            Some(popup) if popup.is_escapable() => {
                self.popup = None;
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self) {
        self.popup = None;
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn popup_mut(&mut self) -> Option<&mut Popup> {
        self.popup.as_mut()
    }

    pub fn login_mut(&mut self) -> Option<&mut LoginDialog> {
        match &mut self.popup {
            Some(Popup::Login(dialog)) => Some(dialog),
            _ => None,
        }
    }

    pub fn is_login_open(&self) -> bool {
        matches!(self.popup, Some(Popup::Login(_)))
    }
}
