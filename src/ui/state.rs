//! Application state for the Sonority UI.

use std::path::PathBuf;

use crate::backend::{AlbumSortOrder, Backend, PlayerStatus};
use crate::config::Config;

use super::browsing::BrowsingPane;
use super::controller::Controller;
use super::covers::CoverCache;
use super::pages::ViewContext;
use super::shortcuts::ShortcutMap;
use super::theme::ThemeVariant;
use super::views::ToastQueue;
use super::widgets::NowPlayingCard;

/// Application name shown in the window title
pub const APP_NAME: &str = "Sonority";

/// Everything the application needs before the first frame.
pub struct Startup {
    pub config: Config,
    /// Where settings changes are written, `None` to keep them in memory
    pub config_path: Option<PathBuf>,
    pub backend: Backend,
    pub shortcuts: ShortcutMap,
}

pub struct AppState {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub backend: Backend,
    pub shortcuts: ShortcutMap,
    pub browsing: BrowsingPane,
    pub controller: Controller,
    pub now_playing: NowPlayingCard,
    pub player_status: PlayerStatus,
    pub covers: CoverCache,
    pub toasts: ToastQueue,
    pub variant: ThemeVariant,
    /// Persisted albums page order, applied to every new albums page
    pub sort_order: AlbumSortOrder,
}

impl AppState {
    pub fn new(startup: Startup) -> Self {
        let Startup {
            mut config,
            config_path,
            backend,
            shortcuts,
        } = startup;
        let variant = ThemeVariant::from_name(&config.appearance.theme);
        let sort_order = config.albums_page.sort_order();
        Self {
            config,
            config_path,
            backend,
            shortcuts,
            browsing: BrowsingPane::new(),
            controller: Controller::default(),
            now_playing: NowPlayingCard::default(),
            player_status: PlayerStatus::default(),
            covers: CoverCache::default(),
            toasts: ToastQueue::default(),
            variant,
            sort_order,
        }
    }

    pub fn view_context(&self) -> ViewContext<'_> {
        ViewContext {
            covers: &self.covers,
            now_playing: self.now_playing.song().map(|s| s.id.as_str()),
            variant: self.variant,
        }
    }

    /// "Title – Artist · Sonority" while a song is loaded, else the app name.
    pub fn window_title(&self) -> String {
        let Some(title) = self.now_playing.title() else {
            return APP_NAME.to_string();
        };
        let artists = self
            .now_playing
            .song()
            .map(|s| s.artist_names())
            .unwrap_or_default();
        if artists.is_empty() {
            format!("{} · {}", title, APP_NAME)
        } else {
            format!("{} – {} · {}", title, artists, APP_NAME)
        }
    }
}
