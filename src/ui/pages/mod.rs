//! Browsable pages.
//!
//! A page owns its widgets and turns [`PageMessage`]s into [`Effect`]s; it
//! never talks to the backend itself. The app runs the effects and feeds
//! results back as [`PageMessage::Loaded`], tagged with the id of the page
//! that asked so late results for a page that is gone are dropped.
//!
//! Every page can be reduced to a [`SavedPage`] snapshot for the history
//! stacks. Restoring a snapshot reproduces the page without any
//! [`Effect::Fetch`]: loaded data, grid paging and scroll positions come
//! back as they were.

mod album;
mod albums;
mod artist;
mod filtered;
mod list;
mod now_playing;
mod playlist;

pub use album::{AlbumPage, SavedAlbumPage};
pub use albums::{AlbumsPage, SavedAlbumsPage};
pub use artist::{ArtistPage, SavedArtistPage};
pub use filtered::{FilteredAlbumsPage, SavedFilteredAlbumsPage};
pub use list::{ListEntry, ListKind, ListPage, SavedListPage};
pub use now_playing::{NowPlayingPage, SavedNowPlayingPage};
pub use playlist::{PlaylistPage, SavedPlaylistPage};

use std::time::Duration;

use iced::Element;
use iced::widget::{scrollable, text_input};

use super::covers::CoverCache;
use super::route::Route;
use super::theme::ThemeVariant;
use crate::backend::{
    Album, AlbumQuery, AlbumSortOrder, AlbumWithTracks, Artist, ArtistWithAlbums, Genre,
    Playlist, PlaylistWithTracks, Song,
};

/// Delay between the last keystroke in a search box and the search.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

// =============================================================================
// MESSAGES & EFFECTS
// =============================================================================

/// Scroll state reported by a page's scrollable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    pub offset: f32,
    pub viewport_height: f32,
    pub content_height: f32,
}

impl From<scrollable::Viewport> for ScrollPosition {
    fn from(viewport: scrollable::Viewport) -> Self {
        Self {
            offset: viewport.absolute_offset().y,
            viewport_height: viewport.bounds().height,
            content_height: viewport.content_bounds().height,
        }
    }
}

#[derive(Debug, Clone)]
pub enum PageMessage {
    Loaded(Loaded),
    Scrolled(ScrollPosition),
    /// Request the next page of a paged grid
    LoadMore,
    SortOrderChanged(AlbumSortOrder),
    SearchChanged(String),
    /// Debounce timer fired for the search input at this sequence number
    SearchDebounced(u64),
    SearchSubmitted,
    Navigate(Route),
    PlayAlbum(String),
    /// Select a single track row
    TrackClicked(usize),
    PlayTrack(usize),
    PlayAll,
    ToggleFavorite,
    /// Server answer to a favorite change this page made
    FavoriteSaved {
        id: String,
        favorite: bool,
        result: Result<(), String>,
    },
}

/// Backend data a page asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch {
    Albums {
        query: AlbumQuery,
        offset: usize,
        limit: usize,
    },
    Album(String),
    Artist(String),
    Artists,
    Genres,
    Playlists,
    Playlist(String),
    Queue,
}

/// Result of a [`Fetch`], errors already rendered to text.
#[derive(Debug, Clone)]
pub enum Loaded {
    Albums {
        query: AlbumQuery,
        offset: usize,
        result: Result<Vec<Album>, String>,
    },
    Album(Result<AlbumWithTracks, String>),
    Artist(Result<ArtistWithAlbums, String>),
    Artists(Result<Vec<Artist>, String>),
    Genres(Result<Vec<Genre>, String>),
    Playlists(Result<Vec<Playlist>, String>),
    Playlist(Result<PlaylistWithTracks, String>),
    Queue {
        songs: Vec<Song>,
        current: Option<String>,
    },
}

/// Work a page hands back to the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch(Fetch),
    Navigate(Route),
    PlayAlbum { album_id: String, index: usize },
    PlaySongs { songs: Vec<Song>, index: usize },
    SetFavorite { id: String, favorite: bool },
    ScrollTo { id: scrollable::Id, offset: f32 },
    /// Deliver [`PageMessage::SearchDebounced`] after `delay`
    Debounce { seq: u64, delay: Duration },
    SaveSortOrder(AlbumSortOrder),
    LoadCovers(Vec<String>),
    /// Re-read the player's in-memory queue. Not a backend round trip, so
    /// restored pages may use it to catch up with playback.
    SyncQueue,
    /// Show an error toast
    Notify(String),
}

impl Effect {
    pub fn is_fetch(&self) -> bool {
        matches!(self, Effect::Fetch(_))
    }
}

// =============================================================================
// PAGE TRAITS
// =============================================================================

/// Shared state pages read while rendering.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub covers: &'a CoverCache,
    /// ID of the song currently playing
    pub now_playing: Option<&'a str>,
    pub variant: ThemeVariant,
}

pub trait Page {
    fn route(&self) -> Route;

    /// Heading shown above the page content.
    fn title(&self) -> String;

    /// Snapshot for the history stacks.
    fn save(&self) -> SavedPage;

    /// Drop loaded data and fetch it again, keeping user input such as
    /// search text.
    fn reload(&mut self) -> Vec<Effect>;

    fn update(&mut self, message: PageMessage) -> Vec<Effect>;

    fn view<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, PageMessage>;

    fn searchable(&self) -> Option<&dyn Searchable> {
        None
    }

    /// Select every row. Returns false for pages without a selection.
    fn select_all(&mut self) -> bool {
        false
    }

    fn on_song_changed(&mut self, _now: Option<&Song>) -> Vec<Effect> {
        Vec::new()
    }
}

/// Pages with a search box that the search shortcut can focus.
pub trait Searchable {
    fn search_input_id(&self) -> text_input::Id;

    fn search_text(&self) -> &str;
}

// =============================================================================
// PAGE UNIONS
// =============================================================================

#[derive(Debug)]
pub enum AnyPage {
    Albums(AlbumsPage),
    FilteredAlbums(FilteredAlbumsPage),
    Artist(ArtistPage),
    Album(AlbumPage),
    Playlist(PlaylistPage),
    NowPlaying(NowPlayingPage),
    List(ListPage),
}

impl AnyPage {
    pub fn page(&self) -> &dyn Page {
        match self {
            AnyPage::Albums(p) => p,
            AnyPage::FilteredAlbums(p) => p,
            AnyPage::Artist(p) => p,
            AnyPage::Album(p) => p,
            AnyPage::Playlist(p) => p,
            AnyPage::NowPlaying(p) => p,
            AnyPage::List(p) => p,
        }
    }

    pub fn page_mut(&mut self) -> &mut dyn Page {
        match self {
            AnyPage::Albums(p) => p,
            AnyPage::FilteredAlbums(p) => p,
            AnyPage::Artist(p) => p,
            AnyPage::Album(p) => p,
            AnyPage::Playlist(p) => p,
            AnyPage::NowPlaying(p) => p,
            AnyPage::List(p) => p,
        }
    }
}

/// Snapshot of a page taken when navigating away from it.
#[derive(Debug, Clone)]
pub enum SavedPage {
    Albums(SavedAlbumsPage),
    FilteredAlbums(SavedFilteredAlbumsPage),
    Artist(SavedArtistPage),
    Album(SavedAlbumPage),
    Playlist(SavedPlaylistPage),
    NowPlaying(SavedNowPlayingPage),
    List(SavedListPage),
}

impl SavedPage {
    pub fn route(&self) -> Route {
        match self {
            SavedPage::Albums(_) => Route::Albums,
            SavedPage::FilteredAlbums(s) => s.route.clone(),
            SavedPage::Artist(s) => Route::Artist(s.artist_id.clone()),
            SavedPage::Album(s) => Route::Album(s.album_id.clone()),
            SavedPage::Playlist(s) => Route::Playlist(s.playlist_id.clone()),
            SavedPage::NowPlaying(_) => Route::NowPlaying,
            SavedPage::List(s) => s.kind.route(),
        }
    }

    /// Rebuild the page. The effects only reposition scrollables, except
    /// for snapshots taken before the page finished loading.
    pub fn restore(self) -> (AnyPage, Vec<Effect>) {
        match self {
            SavedPage::Albums(s) => {
                let (page, effects) = AlbumsPage::restore(s);
                (AnyPage::Albums(page), effects)
            }
            SavedPage::FilteredAlbums(s) => {
                let (page, effects) = FilteredAlbumsPage::restore(s);
                (AnyPage::FilteredAlbums(page), effects)
            }
            SavedPage::Artist(s) => {
                let (page, effects) = ArtistPage::restore(s);
                (AnyPage::Artist(page), effects)
            }
            SavedPage::Album(s) => {
                let (page, effects) = AlbumPage::restore(s);
                (AnyPage::Album(page), effects)
            }
            SavedPage::Playlist(s) => {
                let (page, effects) = PlaylistPage::restore(s);
                (AnyPage::Playlist(page), effects)
            }
            SavedPage::NowPlaying(s) => {
                let (page, effects) = NowPlayingPage::restore(s);
                (AnyPage::NowPlaying(page), effects)
            }
            SavedPage::List(s) => {
                let (page, effects) = ListPage::restore(s);
                (AnyPage::List(page), effects)
            }
        }
    }
}

/// Effects for a scrollable restored to `offset`.
pub(crate) fn scroll_effect(id: &scrollable::Id, offset: f32) -> Vec<Effect> {
    if offset > 0.0 {
        vec![Effect::ScrollTo {
            id: id.clone(),
            offset,
        }]
    } else {
        Vec::new()
    }
}
