//! Offline backend serving a library document from memory.
//!
//! Implements every backend trait over a [`LibraryData`] loaded from JSON.
//! There is no network and no audio output: playback is a simulated queue
//! that publishes the same events a real player would, which is enough to
//! drive the UI and the tests.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use parking_lot::{Mutex, RwLock};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::managers::{
    Backend, EVENT_CHANNEL_CAPACITY, ImageManager, LibraryManager, PlaybackEvent, PlaybackManager,
    PlayerStatus, ServerEvent, ServerManager,
};
use super::model::{
    Album, AlbumWithTracks, Artist, ArtistRef, ArtistWithAlbums, Genre, Playlist,
    PlaylistWithTracks, Song,
};
use super::query::{AlbumQuery, AlbumSortOrder};
use crate::config::ServerConfig;
use crate::error::{Error, Result, ResultExt};

/// Edge length of generated cover thumbnails, in pixels
pub const THUMBNAIL_SIZE: u32 = 300;

/// The whole library as stored in a JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryData {
    pub albums: Vec<Album>,
    pub artists: Vec<Artist>,
    pub songs: Vec<Song>,
    pub playlists: Vec<PlaylistEntry>,
    /// Password required to connect. Any password is accepted when unset.
    pub password: Option<String>,
}

/// A playlist together with its ordered song IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    #[serde(flatten)]
    pub playlist: Playlist,
    #[serde(default)]
    pub song_ids: Vec<String>,
}

impl LibraryData {
    /// Load a library document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(format!("reading library {}", path.display()))?;
        let data: LibraryData = serde_json::from_str(&contents)
            .with_context(format!("parsing library {}", path.display()))?;
        Ok(data)
    }

    /// Inconsistencies that make parts of the library unreachable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for song in &self.songs {
            if !self.albums.iter().any(|a| a.id == song.album_id) {
                problems.push(format!(
                    "song {} references unknown album {:?}",
                    song.id, song.album_id
                ));
            }
        }
        for album in &self.albums {
            for artist in &album.artists {
                if !self.artists.iter().any(|a| a.id == artist.id) {
                    problems.push(format!(
                        "album {} references unknown artist {:?}",
                        album.id, artist.id
                    ));
                }
            }
        }
        for entry in &self.playlists {
            for id in &entry.song_ids {
                if !self.songs.iter().any(|s| &s.id == id) {
                    problems.push(format!(
                        "playlist {} references unknown song {:?}",
                        entry.playlist.id, id
                    ));
                }
            }
        }
        problems
    }

    /// A small built-in library used when no library file is given.
    pub fn sample() -> Self {
        let artist = |id: &str, name: &str| ArtistRef {
            id: id.to_string(),
            name: name.to_string(),
        };
        let album = |id: &str, name: &str, by: ArtistRef, year: u32, genre: &str, created: &str| {
            Album {
                id: id.to_string(),
                name: name.to_string(),
                artists: smallvec![by],
                year: Some(year),
                genre: Some(genre.to_string()),
                cover_art: None,
                song_count: 3,
                created: Some(created.to_string()),
                last_played: None,
                play_count: 0,
                starred: false,
            }
        };

        let tides = artist("ar-1", "The Low Tides");
        let quartz = artist("ar-2", "Quartz Garden");
        let moss = artist("ar-3", "Moss & Meridian");

        let albums = vec![
            album("al-1", "Harbor Lights", tides.clone(), 2019, "Indie", "2024-01-10T12:00:00Z"),
            album("al-2", "Undertow", tides.clone(), 2022, "Indie", "2024-03-02T09:30:00Z"),
            album("al-3", "Prism Hours", quartz.clone(), 2015, "Electronic", "2023-11-20T18:45:00Z"),
            album("al-4", "Fieldnotes", moss.clone(), 2008, "Folk", "2024-05-14T07:00:00Z"),
            album("al-5", "Night Market", quartz.clone(), 2021, "Electronic", "2022-08-01T21:15:00Z"),
        ];

        let mut songs = Vec::new();
        for al in &albums {
            for track in 1..=3u32 {
                songs.push(Song {
                    id: format!("{}-s{}", al.id, track),
                    title: format!("{} {}", al.name, ["Intro", "Interlude", "Finale"][track as usize - 1]),
                    artists: al.artists.clone(),
                    album: al.name.clone(),
                    album_id: al.id.clone(),
                    track: Some(track),
                    disc: Some(1),
                    duration: 150 + track * 37,
                    cover_art: None,
                    rating: 0,
                    starred: false,
                });
            }
        }

        let artists = [(&tides, 2), (&quartz, 2), (&moss, 1)]
            .into_iter()
            .map(|(a, count)| Artist {
                id: a.id.clone(),
                name: a.name.clone(),
                album_count: count,
                starred: false,
            })
            .collect();

        let playlists = vec![PlaylistEntry {
            playlist: Playlist {
                id: "pl-1".to_string(),
                name: "Evening Mix".to_string(),
                comment: Some("Quiet ones".to_string()),
                owner: "demo".to_string(),
                song_count: 3,
                duration: songs[0].duration + songs[4].duration + songs[9].duration,
            },
            song_ids: vec![songs[0].id.clone(), songs[4].id.clone(), songs[9].id.clone()],
        }];

        Self {
            albums,
            artists,
            songs,
            playlists,
            password: None,
        }
    }
}

#[derive(Debug, Default)]
struct PlayQueue {
    songs: Vec<Song>,
    current: Option<usize>,
    status: PlayerStatus,
}

impl PlayQueue {
    fn current_song(&self) -> Option<Song> {
        self.current.and_then(|i| self.songs.get(i)).cloned()
    }
}

/// In-memory implementation of all backend traits.
pub struct MemoryBackend {
    data: RwLock<LibraryData>,
    /// Directory cover art paths are resolved against
    base_dir: PathBuf,
    connected: RwLock<Option<String>>,
    queue: Mutex<PlayQueue>,
    playback_tx: broadcast::Sender<PlaybackEvent>,
    server_tx: broadcast::Sender<ServerEvent>,
}

impl MemoryBackend {
    pub fn new(data: LibraryData, base_dir: impl Into<PathBuf>) -> Self {
        let (playback_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (server_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            data: RwLock::new(data),
            base_dir: base_dir.into(),
            connected: RwLock::new(None),
            queue: Mutex::new(PlayQueue::default()),
            playback_tx,
            server_tx,
        }
    }

    /// Load a library document; cover paths resolve relative to its folder.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = LibraryData::load(path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self::new(data, base_dir))
    }

    /// Share this backend behind every trait handle.
    pub fn into_backend(self) -> Backend {
        let shared = Arc::new(self);
        Backend {
            library: shared.clone(),
            playback: shared.clone(),
            images: shared.clone(),
            server: shared,
        }
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected.read().is_some() {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    fn album_tracks(data: &LibraryData, album_id: &str) -> Vec<Song> {
        let mut tracks: Vec<Song> = data
            .songs
            .iter()
            .filter(|s| s.album_id == album_id)
            .cloned()
            .collect();
        tracks.sort_by_key(|s| (s.disc.unwrap_or(1), s.track.unwrap_or(u32::MAX)));
        tracks
    }

    fn start_queue(&self, songs: Vec<Song>, index: usize) -> Result<()> {
        if songs.is_empty() {
            return Err(Error::playback("nothing to play"));
        }
        if index >= songs.len() {
            return Err(Error::playback(format!(
                "track {} out of range ({} tracks)",
                index + 1,
                songs.len()
            )));
        }

        let (previous, now) = {
            let mut queue = self.queue.lock();
            let previous = queue.current_song();
            queue.songs = songs;
            queue.current = Some(index);
            queue.status = PlayerStatus::Playing;
            (previous, queue.current_song())
        };

        tracing::debug!(target: "backend", "Playing {:?}", now.as_ref().map(|s| &s.title));
        let _ = self
            .playback_tx
            .send(PlaybackEvent::SongChanged { now, previous });
        let _ = self
            .playback_tx
            .send(PlaybackEvent::StatusChanged(PlayerStatus::Playing));
        Ok(())
    }

    /// Move the queue cursor; stepping past either end stops playback.
    fn step(&self, forward: bool) {
        let (previous, now, status) = {
            let mut queue = self.queue.lock();
            let Some(current) = queue.current else {
                return;
            };
            let previous = queue.current_song();
            let next = if forward {
                Some(current + 1).filter(|i| *i < queue.songs.len())
            } else {
                current.checked_sub(1)
            };
            queue.current = next;
            if next.is_none() {
                queue.status = PlayerStatus::Stopped;
            }
            (previous, queue.current_song(), queue.status)
        };

        let _ = self
            .playback_tx
            .send(PlaybackEvent::SongChanged { now, previous });
        if status == PlayerStatus::Stopped {
            let _ = self
                .playback_tx
                .send(PlaybackEvent::StatusChanged(PlayerStatus::Stopped));
        }
    }

    fn cover_path(&self, cover_id: &str) -> Result<PathBuf> {
        let path = self.base_dir.join(cover_id);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::MissingFile(path))
        }
    }
}

fn timestamp(value: &Option<String>) -> Option<DateTime<FixedOffset>> {
    value
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

fn sort_albums(albums: &mut [Album], order: AlbumSortOrder) {
    match order {
        AlbumSortOrder::RecentlyAdded => albums.sort_by_key(|a| Reverse(timestamp(&a.created))),
        AlbumSortOrder::RecentlyPlayed => {
            albums.sort_by_key(|a| Reverse(timestamp(&a.last_played)))
        }
        AlbumSortOrder::Frequent => albums.sort_by_key(|a| Reverse(a.play_count)),
        AlbumSortOrder::Title => albums.sort_by_key(|a| a.name.to_lowercase()),
        AlbumSortOrder::Artist => {
            albums.sort_by_key(|a| (a.artist_names().to_lowercase(), a.name.to_lowercase()))
        }
        AlbumSortOrder::YearAscending => {
            albums.sort_by_key(|a| (a.year.unwrap_or(u32::MAX), a.name.to_lowercase()))
        }
        AlbumSortOrder::YearDescending => {
            albums.sort_by_key(|a| (Reverse(a.year.unwrap_or(0)), a.name.to_lowercase()))
        }
        AlbumSortOrder::Random => shuffle_albums(albums, 0),
    }
}

fn shuffle_albums(albums: &mut [Album], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    albums.shuffle(&mut rng);
}

fn artist_albums(data: &LibraryData, artist_id: &str) -> Vec<Album> {
    let mut albums: Vec<Album> = data
        .albums
        .iter()
        .filter(|a| a.artists.iter().any(|r| r.id == artist_id))
        .cloned()
        .collect();
    albums.sort_by_key(|a| (a.year.unwrap_or(u32::MAX), a.name.to_lowercase()));
    albums
}

fn query_albums(data: &LibraryData, query: &AlbumQuery) -> Vec<Album> {
    let by_name = |albums: &mut Vec<Album>| albums.sort_by_key(|a| a.name.to_lowercase());

    match query {
        AlbumQuery::Sorted(order) => {
            let mut albums: Vec<Album> = match order {
                AlbumSortOrder::RecentlyPlayed => data
                    .albums
                    .iter()
                    .filter(|a| a.last_played.is_some())
                    .cloned()
                    .collect(),
                AlbumSortOrder::Frequent => data
                    .albums
                    .iter()
                    .filter(|a| a.play_count > 0)
                    .cloned()
                    .collect(),
                _ => data.albums.clone(),
            };
            sort_albums(&mut albums, *order);
            albums
        }
        AlbumQuery::Random(seed) => {
            let mut albums = data.albums.clone();
            // Shuffle from a fixed starting order so the seed alone decides
            albums.sort_by(|a, b| a.id.cmp(&b.id));
            shuffle_albums(&mut albums, *seed);
            albums
        }
        AlbumQuery::Search(text) => {
            let needle = text.to_lowercase();
            let mut albums: Vec<Album> = data
                .albums
                .iter()
                .filter(|a| {
                    a.name.to_lowercase().contains(&needle)
                        || a.artist_names().to_lowercase().contains(&needle)
                })
                .cloned()
                .collect();
            by_name(&mut albums);
            albums
        }
        AlbumQuery::Genre(genre) => {
            let mut albums: Vec<Album> = data
                .albums
                .iter()
                .filter(|a| {
                    a.genre
                        .as_deref()
                        .is_some_and(|g| g.eq_ignore_ascii_case(genre))
                })
                .cloned()
                .collect();
            by_name(&mut albums);
            albums
        }
        AlbumQuery::Artist(artist_id) => artist_albums(data, artist_id),
        AlbumQuery::Favorites => {
            let mut albums: Vec<Album> = data.albums.iter().filter(|a| a.starred).cloned().collect();
            by_name(&mut albums);
            albums
        }
    }
}

#[async_trait]
impl LibraryManager for MemoryBackend {
    async fn albums(&self, query: &AlbumQuery, offset: usize, limit: usize) -> Result<Vec<Album>> {
        self.ensure_connected()?;
        let data = self.data.read();
        Ok(query_albums(&data, query)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn album(&self, id: &str) -> Result<AlbumWithTracks> {
        self.ensure_connected()?;
        let data = self.data.read();
        let album = data
            .albums
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("Album", id))?;
        let tracks = Self::album_tracks(&data, id);
        Ok(AlbumWithTracks { album, tracks })
    }

    async fn artist(&self, id: &str) -> Result<ArtistWithAlbums> {
        self.ensure_connected()?;
        let data = self.data.read();
        let artist = data
            .artists
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("Artist", id))?;
        let albums = artist_albums(&data, id);
        Ok(ArtistWithAlbums { artist, albums })
    }

    async fn artists(&self) -> Result<Vec<Artist>> {
        self.ensure_connected()?;
        let mut artists = self.data.read().artists.clone();
        artists.sort_by_key(|a| a.name.to_lowercase());
        Ok(artists)
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        self.ensure_connected()?;
        let data = self.data.read();
        let mut genres: BTreeMap<String, Genre> = BTreeMap::new();
        for album in &data.albums {
            let Some(name) = &album.genre else {
                continue;
            };
            let entry = genres.entry(name.to_lowercase()).or_insert_with(|| Genre {
                name: name.clone(),
                album_count: 0,
                song_count: 0,
            });
            entry.album_count += 1;
            entry.song_count += album.song_count;
        }
        Ok(genres.into_values().collect())
    }

    async fn playlists(&self) -> Result<Vec<Playlist>> {
        self.ensure_connected()?;
        Ok(self
            .data
            .read()
            .playlists
            .iter()
            .map(|p| p.playlist.clone())
            .collect())
    }

    async fn playlist(&self, id: &str) -> Result<PlaylistWithTracks> {
        self.ensure_connected()?;
        let data = self.data.read();
        let entry = data
            .playlists
            .iter()
            .find(|p| p.playlist.id == id)
            .ok_or_else(|| Error::not_found("Playlist", id))?;
        let tracks = entry
            .song_ids
            .iter()
            .filter_map(|sid| data.songs.iter().find(|s| &s.id == sid).cloned())
            .collect();
        Ok(PlaylistWithTracks {
            playlist: entry.playlist.clone(),
            tracks,
        })
    }

    async fn set_favorite(&self, id: &str, favorite: bool) -> Result<()> {
        self.ensure_connected()?;
        let mut data = self.data.write();
        if let Some(album) = data.albums.iter_mut().find(|a| a.id == id) {
            album.starred = favorite;
        } else if let Some(song) = data.songs.iter_mut().find(|s| s.id == id) {
            song.starred = favorite;
        } else if let Some(artist) = data.artists.iter_mut().find(|a| a.id == id) {
            artist.starred = favorite;
        } else {
            return Err(Error::not_found("Item", id));
        }

        // Keep the queued copy in sync so the now playing card updates
        let mut queue = self.queue.lock();
        for song in queue.songs.iter_mut().filter(|s| s.id == id) {
            song.starred = favorite;
        }
        Ok(())
    }

    async fn set_rating(&self, song_id: &str, rating: u8) -> Result<()> {
        self.ensure_connected()?;
        if rating > 5 {
            return Err(Error::InvalidArgument(format!(
                "rating {} is out of range 0-5",
                rating
            )));
        }
        let mut data = self.data.write();
        let song = data
            .songs
            .iter_mut()
            .find(|s| s.id == song_id)
            .ok_or_else(|| Error::not_found("Song", song_id))?;
        song.rating = rating;

        let mut queue = self.queue.lock();
        for song in queue.songs.iter_mut().filter(|s| s.id == song_id) {
            song.rating = rating;
        }
        Ok(())
    }

    async fn add_to_playlist(&self, playlist_id: &str, song_ids: &[String]) -> Result<()> {
        self.ensure_connected()?;
        let mut data = self.data.write();
        let added: Vec<Song> = song_ids
            .iter()
            .filter_map(|id| data.songs.iter().find(|s| &s.id == id).cloned())
            .collect();
        let entry = data
            .playlists
            .iter_mut()
            .find(|p| p.playlist.id == playlist_id)
            .ok_or_else(|| Error::not_found("Playlist", playlist_id))?;
        for song in added {
            entry.playlist.song_count += 1;
            entry.playlist.duration += song.duration;
            entry.song_ids.push(song.id);
        }
        Ok(())
    }
}

#[async_trait]
impl PlaybackManager for MemoryBackend {
    async fn play_album(&self, album_id: &str, index: usize) -> Result<()> {
        self.ensure_connected()?;
        let tracks = {
            let data = self.data.read();
            if !data.albums.iter().any(|a| a.id == album_id) {
                return Err(Error::not_found("Album", album_id));
            }
            Self::album_tracks(&data, album_id)
        };
        self.start_queue(tracks, index)
            .with_context(format!("playing album {}", album_id))
    }

    async fn play_songs(&self, songs: Vec<Song>, index: usize) -> Result<()> {
        self.ensure_connected()?;
        self.start_queue(songs, index)
    }

    async fn play_pause(&self) -> Result<PlayerStatus> {
        let status = {
            let mut queue = self.queue.lock();
            queue.status = match queue.status {
                PlayerStatus::Playing => PlayerStatus::Paused,
                PlayerStatus::Paused => PlayerStatus::Playing,
                PlayerStatus::Stopped if queue.current.is_some() => PlayerStatus::Playing,
                PlayerStatus::Stopped => return Ok(PlayerStatus::Stopped),
            };
            queue.status
        };
        let _ = self.playback_tx.send(PlaybackEvent::StatusChanged(status));
        Ok(status)
    }

    async fn next(&self) -> Result<()> {
        self.step(true);
        Ok(())
    }

    async fn previous(&self) -> Result<()> {
        self.step(false);
        Ok(())
    }

    fn now_playing(&self) -> Option<Song> {
        self.queue.lock().current_song()
    }

    fn queue(&self) -> Vec<Song> {
        self.queue.lock().songs.clone()
    }

    fn status(&self) -> PlayerStatus {
        self.queue.lock().status
    }

    fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.playback_tx.subscribe()
    }
}

#[async_trait]
impl ImageManager for MemoryBackend {
    async fn cover_thumbnail(&self, cover_id: &str) -> Result<Vec<u8>> {
        let path = self.cover_path(cover_id)?;
        tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
            let img = image::open(&path).map_err(|e| Error::image(e.to_string()))?;
            let thumb = img.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE);
            let mut bytes = Vec::new();
            thumb
                .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
                .map_err(|e| Error::image(e.to_string()))?;
            Ok(bytes)
        })
        .await
        .map_err(|e| Error::image(e.to_string()))?
    }

    async fn full_cover(&self, cover_id: &str) -> Result<Vec<u8>> {
        let path = self.cover_path(cover_id)?;
        tokio::task::spawn_blocking(move || std::fs::read(&path).map_err(Error::from))
            .await
            .map_err(|e| Error::image(e.to_string()))?
    }
}

#[async_trait]
impl ServerManager for MemoryBackend {
    async fn connect(&self, server: &ServerConfig, password: &str) -> Result<()> {
        if server.username.trim().is_empty() {
            return Err(Error::Authentication("username is required".to_string()));
        }
        if let Some(expected) = &self.data.read().password {
            if expected != password {
                return Err(Error::Authentication(
                    "wrong username or password".to_string(),
                ));
            }
        }

        *self.connected.write() = Some(server.name.clone());
        tracing::info!(target: "backend", "Connected to {} as {}", server.name, server.username);
        let _ = self.server_tx.send(ServerEvent::Connected {
            server: server.name.clone(),
        });
        Ok(())
    }

    fn logout(&self) {
        if self.connected.write().take().is_none() {
            return;
        }

        let previous = {
            let mut queue = self.queue.lock();
            let previous = queue.current_song();
            *queue = PlayQueue::default();
            previous
        };
        if previous.is_some() {
            let _ = self.playback_tx.send(PlaybackEvent::SongChanged {
                now: None,
                previous,
            });
        }

        tracing::info!(target: "backend", "Logged out");
        let _ = self.server_tx.send(ServerEvent::LoggedOut);
    }

    fn is_connected(&self) -> bool {
        self.connected.read().is_some()
    }

    fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.server_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::query::ALBUM_PAGE_SIZE;
    use crate::test_utils::connected_backend;

    #[tokio::test]
    async fn test_queries_require_connection() {
        let backend = MemoryBackend::new(LibraryData::sample(), ".");
        let err = backend.artists().await.unwrap_err();
        assert!(matches!(err, Error::NotConnected));
    }

    #[tokio::test]
    async fn test_connect_checks_password() {
        let data = LibraryData {
            password: Some("hunter2".to_string()),
            ..LibraryData::sample()
        };
        let backend = MemoryBackend::new(data, ".");
        let server = ServerConfig {
            username: "alice".to_string(),
            ..ServerConfig::default()
        };

        assert!(matches!(
            backend.connect(&server, "wrong").await,
            Err(Error::Authentication(_))
        ));
        assert!(!backend.is_connected());

        let mut events = ServerManager::subscribe(&backend);
        backend.connect(&server, "hunter2").await.unwrap();
        assert!(backend.is_connected());
        assert!(matches!(events.recv().await, Ok(ServerEvent::Connected { .. })));
    }

    #[tokio::test]
    async fn test_recently_added_order() {
        let backend = connected_backend().await;
        let albums = backend
            .albums(&AlbumQuery::Sorted(AlbumSortOrder::RecentlyAdded), 0, ALBUM_PAGE_SIZE)
            .await
            .unwrap();
        let ids: Vec<_> = albums.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["al-4", "al-2", "al-1", "al-3", "al-5"]);
    }

    #[tokio::test]
    async fn test_paging_splits_results() {
        let backend = connected_backend().await;
        let query = AlbumQuery::Sorted(AlbumSortOrder::Title);
        let first = backend.albums(&query, 0, 2).await.unwrap();
        let rest = backend.albums(&query, 2, 10).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(rest.len(), 3);
        assert_eq!(first[0].name, "Fieldnotes");
    }

    #[tokio::test]
    async fn test_random_order_is_stable_per_seed() {
        let backend = connected_backend().await;
        let a = backend.albums(&AlbumQuery::Random(7), 0, 10).await.unwrap();
        let b = backend.albums(&AlbumQuery::Random(7), 0, 10).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_search_matches_album_and_artist() {
        let backend = connected_backend().await;
        let by_artist = backend
            .albums(&AlbumQuery::Search("quartz".to_string()), 0, 10)
            .await
            .unwrap();
        assert_eq!(by_artist.len(), 2);

        let by_name = backend
            .albums(&AlbumQuery::Search("harbor".to_string()), 0, 10)
            .await
            .unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "al-1");
    }

    #[tokio::test]
    async fn test_favorites_follow_set_favorite() {
        let backend = connected_backend().await;
        assert!(
            backend
                .albums(&AlbumQuery::Favorites, 0, 10)
                .await
                .unwrap()
                .is_empty()
        );

        backend.set_favorite("al-3", true).await.unwrap();
        let favs = backend.albums(&AlbumQuery::Favorites, 0, 10).await.unwrap();
        assert_eq!(favs.len(), 1);
        assert_eq!(favs[0].id, "al-3");

        assert!(backend.set_favorite("nope", true).await.is_err());
    }

    #[tokio::test]
    async fn test_genres_aggregate_albums() {
        let backend = connected_backend().await;
        let genres = backend.genres().await.unwrap();
        let electronic = genres.iter().find(|g| g.name == "Electronic").unwrap();
        assert_eq!(electronic.album_count, 2);
        assert_eq!(electronic.song_count, 6);
    }

    #[tokio::test]
    async fn test_play_album_emits_song_change() {
        let backend = connected_backend().await;
        let mut events = PlaybackManager::subscribe(&backend);

        backend.play_album("al-2", 1).await.unwrap();
        match events.recv().await.unwrap() {
            PlaybackEvent::SongChanged { now, previous } => {
                assert_eq!(now.unwrap().id, "al-2-s2");
                assert!(previous.is_none());
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(backend.status(), PlayerStatus::Playing);
        assert_eq!(backend.queue().len(), 3);
    }

    #[tokio::test]
    async fn test_play_album_out_of_range_fails() {
        let backend = connected_backend().await;
        let err = backend.play_album("al-1", 9).await.unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(backend.now_playing().is_none());
    }

    #[tokio::test]
    async fn test_next_past_end_stops() {
        let backend = connected_backend().await;
        backend.play_album("al-1", 2).await.unwrap();
        backend.next().await.unwrap();
        assert!(backend.now_playing().is_none());
        assert_eq!(backend.status(), PlayerStatus::Stopped);
    }

    #[tokio::test]
    async fn test_play_pause_toggles() {
        let backend = connected_backend().await;
        assert_eq!(backend.play_pause().await.unwrap(), PlayerStatus::Stopped);
        backend.play_album("al-1", 0).await.unwrap();
        assert_eq!(backend.play_pause().await.unwrap(), PlayerStatus::Paused);
        assert_eq!(backend.play_pause().await.unwrap(), PlayerStatus::Playing);
    }

    #[tokio::test]
    async fn test_logout_stops_playback() {
        let backend = connected_backend().await;
        backend.play_album("al-1", 0).await.unwrap();
        let mut server_events = ServerManager::subscribe(&backend);

        backend.logout();
        assert!(!backend.is_connected());
        assert!(backend.now_playing().is_none());
        assert_eq!(server_events.recv().await.unwrap(), ServerEvent::LoggedOut);
    }

    #[tokio::test]
    async fn test_add_to_playlist_updates_counts() {
        let backend = connected_backend().await;
        backend
            .add_to_playlist("pl-1", &["al-5-s1".to_string(), "missing".to_string()])
            .await
            .unwrap();
        let playlist = backend.playlist("pl-1").await.unwrap();
        assert_eq!(playlist.playlist.song_count, 4);
        assert_eq!(playlist.tracks.last().unwrap().id, "al-5-s1");
    }

    #[tokio::test]
    async fn test_missing_cover_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let backend = MemoryBackend::new(LibraryData::sample(), dir.path());
        let err = backend.cover_thumbnail("covers/none.png").await.unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }

    #[tokio::test]
    async fn test_thumbnail_is_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        image::RgbImage::from_pixel(640, 640, image::Rgb([200, 40, 40]))
            .save(&path)
            .unwrap();

        let backend = MemoryBackend::new(LibraryData::sample(), dir.path());
        let bytes = backend.cover_thumbnail("cover.png").await.unwrap();
        let thumb = image::load_from_memory(&bytes).unwrap();
        assert_eq!(thumb.width(), THUMBNAIL_SIZE);
    }

    #[test]
    fn test_sample_library_is_consistent() {
        assert!(LibraryData::sample().problems().is_empty());
    }

    #[test]
    fn test_library_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(
            &path,
            serde_json::to_string_pretty(&LibraryData::sample()).unwrap(),
        )
        .unwrap();

        let loaded = LibraryData::load(&path).unwrap();
        assert_eq!(loaded.albums.len(), 5);
        assert_eq!(loaded.playlists[0].song_ids.len(), 3);
    }

    #[test]
    fn test_problems_reports_dangling_song() {
        let mut data = LibraryData::sample();
        data.songs[0].album_id = "ghost".to_string();
        let problems = data.problems();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("ghost"));
    }
}
