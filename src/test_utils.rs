//! Test utilities and fixtures for sonority tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{connected_backend, mock_albums};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let backend = connected_backend().await;
//!     let albums = mock_albums(10);
//!     // ... test logic
//! }
//! ```

use smallvec::smallvec;

use crate::backend::{
    Album, AlbumWithTracks, ArtistRef, LibraryData, MemoryBackend, ServerManager, Song,
};
use crate::config::ServerConfig;

/// Server profile accepted by the sample library.
pub fn test_server() -> ServerConfig {
    ServerConfig {
        name: "Test server".to_string(),
        url: "file://test".to_string(),
        username: "tester".to_string(),
    }
}

/// Offline backend over the sample library, already connected.
pub async fn connected_backend() -> MemoryBackend {
    let backend = MemoryBackend::new(LibraryData::sample(), ".");
    backend
        .connect(&test_server(), "")
        .await
        .expect("sample library accepts any password");
    backend
}

/// Creates a mock Album with sensible defaults.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let album = Album { year: Some(1999), ..mock_album("al-1") };
/// ```
pub fn mock_album(id: &str) -> Album {
    Album {
        id: id.to_string(),
        name: format!("Album {}", id),
        artists: smallvec![ArtistRef {
            id: "ar-test".to_string(),
            name: "Test Artist".to_string(),
        }],
        year: Some(2020),
        genre: Some("Rock".to_string()),
        cover_art: Some(format!("covers/{}.jpg", id)),
        song_count: 2,
        created: None,
        last_played: None,
        play_count: 0,
        starred: false,
    }
}

/// `n` albums with IDs `al-0` .. `al-{n-1}`.
pub fn mock_albums(n: usize) -> Vec<Album> {
    (0..n).map(|i| mock_album(&format!("al-{}", i))).collect()
}

/// Creates a mock Song belonging to `album_id`.
pub fn mock_song(id: &str, album_id: &str, track: u32) -> Song {
    Song {
        id: id.to_string(),
        title: format!("Song {}", id),
        artists: smallvec![ArtistRef {
            id: "ar-test".to_string(),
            name: "Test Artist".to_string(),
        }],
        album: format!("Album {}", album_id),
        album_id: album_id.to_string(),
        track: Some(track),
        disc: Some(1),
        duration: 200,
        cover_art: None,
        rating: 0,
        starred: false,
    }
}

/// An album with `tracks` songs.
pub fn mock_album_with_tracks(id: &str, tracks: u32) -> AlbumWithTracks {
    AlbumWithTracks {
        album: Album {
            song_count: tracks,
            ..mock_album(id)
        },
        tracks: (1..=tracks)
            .map(|t| mock_song(&format!("{}-s{}", id, t), id, t))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LibraryManager;

    #[tokio::test]
    async fn test_connected_backend_serves_queries() {
        let backend = connected_backend().await;
        assert!(!backend.artists().await.unwrap().is_empty());
    }

    #[test]
    fn test_mock_albums_have_distinct_ids() {
        let albums = mock_albums(3);
        assert_eq!(albums[0].id, "al-0");
        assert_eq!(albums[2].id, "al-2");
    }

    #[test]
    fn test_mock_album_with_tracks() {
        let album = mock_album_with_tracks("al-9", 4);
        assert_eq!(album.tracks.len(), 4);
        assert_eq!(album.tracks[3].track, Some(4));
        assert_eq!(album.album.song_count, 4);
    }
}
