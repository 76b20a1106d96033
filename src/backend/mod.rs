//! Backend collaborators consumed by the UI.
//!
//! - `model`: library entities (albums, songs, playlists)
//! - `query`: album sort orders, queries and paging
//! - `managers`: traits for library, playback, images and server connection
//! - `memory`: offline implementation over a JSON library document

pub mod managers;
pub mod memory;
pub mod model;
pub mod query;

pub use managers::{
    Backend, ImageManager, LibraryManager, PlaybackEvent, PlaybackManager, PlayerStatus,
    ServerEvent, ServerManager,
};
pub use memory::{LibraryData, MemoryBackend};
pub use model::{
    Album, AlbumWithTracks, Artist, ArtistRef, ArtistWithAlbums, Genre, Playlist,
    PlaylistWithTracks, Song,
};
pub use query::{ALBUM_PAGE_SIZE, AlbumPager, AlbumQuery, AlbumSortOrder};
