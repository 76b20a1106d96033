//! Trait definitions for the backend collaborators.
//!
//! The UI only ever talks to these traits. The offline backend in
//! [`super::memory`] implements all four; a networked implementation would
//! plug in the same way.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::model::{
    Album, AlbumWithTracks, Artist, ArtistWithAlbums, Genre, Playlist, PlaylistWithTracks, Song,
};
use super::query::AlbumQuery;
use crate::config::ServerConfig;
use crate::error::Result;

/// Capacity of the event broadcast channels
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Playback state reported by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Events published by the [`PlaybackManager`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// The current song changed. `now` is `None` when playback stopped.
    SongChanged {
        now: Option<Song>,
        previous: Option<Song>,
    },
    StatusChanged(PlayerStatus),
}

/// Events published by the [`ServerManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    Connected { server: String },
    LoggedOut,
}

/// Library queries and mutations.
#[async_trait]
pub trait LibraryManager: Send + Sync {
    /// Page through albums matching `query`.
    async fn albums(&self, query: &AlbumQuery, offset: usize, limit: usize) -> Result<Vec<Album>>;

    async fn album(&self, id: &str) -> Result<AlbumWithTracks>;

    async fn artist(&self, id: &str) -> Result<ArtistWithAlbums>;

    async fn artists(&self) -> Result<Vec<Artist>>;

    async fn genres(&self) -> Result<Vec<Genre>>;

    async fn playlists(&self) -> Result<Vec<Playlist>>;

    async fn playlist(&self, id: &str) -> Result<PlaylistWithTracks>;

    /// Star or unstar a song or album.
    async fn set_favorite(&self, id: &str, favorite: bool) -> Result<()>;

    /// Rate a song, 0 clears the rating.
    async fn set_rating(&self, song_id: &str, rating: u8) -> Result<()>;

    async fn add_to_playlist(&self, playlist_id: &str, song_ids: &[String]) -> Result<()>;
}

/// Play queue control.
#[async_trait]
pub trait PlaybackManager: Send + Sync {
    /// Replace the queue with the album's tracks and start at `index`.
    async fn play_album(&self, album_id: &str, index: usize) -> Result<()>;

    /// Replace the queue with `songs` and start at `index`.
    async fn play_songs(&self, songs: Vec<Song>, index: usize) -> Result<()>;

    async fn play_pause(&self) -> Result<PlayerStatus>;

    async fn next(&self) -> Result<()>;

    async fn previous(&self) -> Result<()>;

    fn now_playing(&self) -> Option<Song>;

    fn queue(&self) -> Vec<Song>;

    fn status(&self) -> PlayerStatus;

    fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent>;
}

/// Cover art retrieval. Returns encoded image bytes.
#[async_trait]
pub trait ImageManager: Send + Sync {
    async fn cover_thumbnail(&self, cover_id: &str) -> Result<Vec<u8>>;

    async fn full_cover(&self, cover_id: &str) -> Result<Vec<u8>>;
}

/// Server connection lifecycle.
#[async_trait]
pub trait ServerManager: Send + Sync {
    async fn connect(&self, server: &ServerConfig, password: &str) -> Result<()>;

    fn logout(&self);

    fn is_connected(&self) -> bool;

    fn subscribe(&self) -> broadcast::Receiver<ServerEvent>;
}

/// Handles to all backend collaborators, shared with async tasks.
#[derive(Clone)]
pub struct Backend {
    pub library: Arc<dyn LibraryManager>,
    pub playback: Arc<dyn PlaybackManager>,
    pub images: Arc<dyn ImageManager>,
    pub server: Arc<dyn ServerManager>,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("connected", &self.server.is_connected())
            .finish_non_exhaustive()
    }
}
