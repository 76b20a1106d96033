//! Message types for the Sonority UI.

use iced::keyboard::{Key, Modifiers};

use super::browsing::PageId;
use super::pages::PageMessage;
use super::route::Route;
use crate::backend::{Playlist, PlaybackEvent, PlayerStatus, ServerEvent};

/// Login dialog fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    ServerName,
    Url,
    Username,
    Password,
}

/// All possible messages that can be sent in the application
#[derive(Debug, Clone)]
pub enum Message {
    // Backend events
    Server(ServerEvent),
    Playback(PlaybackEvent),

    // Login / logout
    LoginFieldChanged(LoginField, String),
    LoginSubmit,
    LoginResult(Result<(), String>),
    Logout,

    // Navigation
    NavigateTo(Route),
    GoBack,
    GoForward,
    Reload,
    /// A message for the page with this id
    Page(PageId, PageMessage),

    // Popups and menus
    ToggleSettingsMenu,
    ShowAbout,
    ClosePopup,

    // Playback controls
    PlayPause,
    Next,
    Previous,
    PlayPauseResult(Result<PlayerStatus, String>),
    /// Outcome of a fire-and-forget playback command
    PlaybackResult(Result<(), String>),

    // Now playing card
    ShowCoverImage,
    OpenNowPlayingMenu,
    SetFavorite(bool),
    SetRating(u8),
    /// Server answer to a card favorite change, with the value it replaced
    FavoriteResult {
        song_id: String,
        previous: bool,
        result: Result<String, String>,
    },
    RatingResult {
        song_id: String,
        previous: u8,
        result: Result<(), String>,
    },
    AddToPlaylist,
    PlaylistsLoaded(Result<Vec<Playlist>, String>),
    AddToPlaylistChosen(Playlist),
    /// Outcome of a library mutation; the text is shown on success
    ActionResult(Result<String, String>),

    // Cover art
    CoverLoaded(String, Result<Vec<u8>, String>),
    FullCoverLoaded(String, Result<Vec<u8>, String>),

    // Keyboard
    KeyPressed(Key, Modifiers),

    // Config
    ConfigSaved(Result<(), String>),

    // Toasts
    ToastDismiss(u64),
    ToastTick,
}
