//! Library entities as returned by the server.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::Duration;

/// Artists credited on an album or song. Almost always one or two.
pub type ArtistRefs = SmallVec<[ArtistRef; 2]>;

/// Reference to an artist by ID and display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: ArtistRefs,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub song_count: u32,
    /// RFC 3339 timestamp of when the album was added to the library
    #[serde(default)]
    pub created: Option<String>,
    /// RFC 3339 timestamp of the last play
    #[serde(default)]
    pub last_played: Option<String>,
    #[serde(default)]
    pub play_count: u32,
    #[serde(default)]
    pub starred: bool,
}

impl Album {
    /// Artist names joined for display, e.g. "A, B".
    pub fn artist_names(&self) -> String {
        join_names(&self.artists)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub album_count: u32,
    #[serde(default)]
    pub starred: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artists: ArtistRefs,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub album_id: String,
    #[serde(default)]
    pub track: Option<u32>,
    #[serde(default)]
    pub disc: Option<u32>,
    /// Length in seconds
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub cover_art: Option<String>,
    /// User rating, 0 (unrated) to 5
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub starred: bool,
}

impl Song {
    pub fn artist_names(&self) -> String {
        join_names(&self.artists)
    }

    pub fn length(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
    pub album_count: u32,
    pub song_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub song_count: u32,
    /// Total length in seconds
    #[serde(default)]
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlbumWithTracks {
    pub album: Album,
    pub tracks: Vec<Song>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistWithAlbums {
    pub artist: Artist,
    pub albums: Vec<Album>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistWithTracks {
    pub playlist: Playlist,
    pub tracks: Vec<Song>,
}

fn join_names(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format seconds as M:SS or H:MM:SS
pub fn format_duration(secs: u32) -> String {
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_artist_names_joined() {
        let album = Album {
            artists: smallvec![
                ArtistRef {
                    id: "a1".into(),
                    name: "Alpha".into()
                },
                ArtistRef {
                    id: "a2".into(),
                    name: "Beta".into()
                },
            ],
            ..crate::test_utils::mock_album("al-1")
        };
        assert_eq!(album.artist_names(), "Alpha, Beta");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(3725), "1:02:05");
    }

    #[test]
    fn test_album_deserializes_with_defaults() {
        let album: Album = serde_json::from_str(r#"{"id": "x", "name": "Only Name"}"#).unwrap();
        assert!(album.artists.is_empty());
        assert_eq!(album.song_count, 0);
        assert!(!album.starred);
    }
}
