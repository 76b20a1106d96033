//! Reusable widgets composed by the pages and the bottom panel.

pub mod album_grid;
pub mod now_playing;
pub mod searcher;
pub mod track_list;

pub use album_grid::{AlbumGrid, AlbumGridState};
pub use now_playing::NowPlayingCard;
pub use searcher::{SearchInput, Searcher};
pub use track_list::{TrackList, TrackListState};
