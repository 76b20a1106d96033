//! Navigation destinations.

use std::fmt;

use super::theme::IconName;

/// A page the browsing pane can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    NowPlaying,
    Favorites,
    Albums,
    Artists,
    Genres,
    Playlists,
    Album(String),
    Artist(String),
    Genre(String),
    Playlist(String),
}

impl Route {
    /// Where the app lands after connecting.
    pub const HOME: Route = Route::Albums;

    /// Top-level routes reachable from the navigation buttons, in button
    /// order. The Nth entry is also bound to the Nth numeric shortcut.
    pub const NAV_BUTTONS: [Route; 6] = [
        Route::NowPlaying,
        Route::Favorites,
        Route::Albums,
        Route::Artists,
        Route::Genres,
        Route::Playlists,
    ];

    /// Navigation button for the given zero-based index.
    pub fn nav_button(index: usize) -> Option<Route> {
        Self::NAV_BUTTONS.get(index).cloned()
    }

    pub fn icon(&self) -> IconName {
        match self {
            Route::NowPlaying => IconName::NowPlaying,
            Route::Favorites => IconName::Favorite,
            Route::Albums | Route::Album(_) => IconName::Album,
            Route::Artists | Route::Artist(_) => IconName::Artist,
            Route::Genres | Route::Genre(_) => IconName::Genre,
            Route::Playlists | Route::Playlist(_) => IconName::Playlist,
        }
    }

    /// Label used for navigation buttons and tooltips.
    pub fn label(&self) -> &'static str {
        match self {
            Route::NowPlaying => "Now Playing",
            Route::Favorites => "Favorites",
            Route::Albums => "Albums",
            Route::Artists => "Artists",
            Route::Genres => "Genres",
            Route::Playlists => "Playlists",
            Route::Album(_) => "Album",
            Route::Artist(_) => "Artist",
            Route::Genre(_) => "Genre",
            Route::Playlist(_) => "Playlist",
        }
    }

    /// The navigation button this route highlights, if any.
    pub fn nav_index(&self) -> Option<usize> {
        Self::NAV_BUTTONS.iter().position(|r| r == self)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Album(id) | Route::Artist(id) | Route::Genre(id) | Route::Playlist(id) => {
                write!(f, "{} {}", self.label(), id)
            }
            _ => f.write_str(self.label()),
        }
    }
}
