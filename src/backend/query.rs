//! Album queries and offset-based paging.

use std::fmt;
use std::str::FromStr;

/// Number of albums requested per page by the album grid
pub const ALBUM_PAGE_SIZE: usize = 48;

/// Sort orders offered by the albums page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AlbumSortOrder {
    #[default]
    RecentlyAdded,
    RecentlyPlayed,
    Frequent,
    Random,
    Title,
    Artist,
    YearAscending,
    YearDescending,
}

impl AlbumSortOrder {
    pub const ALL: [AlbumSortOrder; 8] = [
        AlbumSortOrder::RecentlyAdded,
        AlbumSortOrder::RecentlyPlayed,
        AlbumSortOrder::Frequent,
        AlbumSortOrder::Random,
        AlbumSortOrder::Title,
        AlbumSortOrder::Artist,
        AlbumSortOrder::YearAscending,
        AlbumSortOrder::YearDescending,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AlbumSortOrder::RecentlyAdded => "Recently Added",
            AlbumSortOrder::RecentlyPlayed => "Recently Played",
            AlbumSortOrder::Frequent => "Frequently Played",
            AlbumSortOrder::Random => "Random",
            AlbumSortOrder::Title => "Title (A-Z)",
            AlbumSortOrder::Artist => "Artist (A-Z)",
            AlbumSortOrder::YearAscending => "Year (ascending)",
            AlbumSortOrder::YearDescending => "Year (descending)",
        }
    }
}

impl fmt::Display for AlbumSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown album sort order: {0}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for AlbumSortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlbumSortOrder::ALL
            .into_iter()
            .find(|o| o.label() == s)
            .ok_or_else(|| UnknownSortOrder(s.to_string()))
    }
}

/// What set of albums a grid shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AlbumQuery {
    Sorted(AlbumSortOrder),
    /// Random order, stable across pages for the same seed
    Random(u64),
    Search(String),
    Genre(String),
    /// Albums credited to an artist, oldest first
    Artist(String),
    Favorites,
}

impl AlbumQuery {
    /// Query for a sort order. Random orders get a fresh seed so that each
    /// reset reshuffles while paging stays consistent.
    pub fn for_order(order: AlbumSortOrder) -> Self {
        match order {
            AlbumSortOrder::Random => AlbumQuery::Random(rand::random()),
            other => AlbumQuery::Sorted(other),
        }
    }
}

/// Paging cursor over an [`AlbumQuery`].
///
/// Holds no connection to the backend, so it can be cloned into a saved page
/// and resumed later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumPager {
    query: AlbumQuery,
    offset: usize,
    exhausted: bool,
}

impl AlbumPager {
    pub fn new(query: AlbumQuery) -> Self {
        Self {
            query,
            offset: 0,
            exhausted: false,
        }
    }

    /// A pager with nothing left to fetch, for grids populated up front.
    pub fn finished(query: AlbumQuery, len: usize) -> Self {
        Self {
            query,
            offset: len,
            exhausted: true,
        }
    }

    pub fn query(&self) -> &AlbumQuery {
        &self.query
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The next page to request, or `None` once the server ran dry.
    pub fn next_request(&self) -> Option<(AlbumQuery, usize, usize)> {
        (!self.exhausted).then(|| (self.query.clone(), self.offset, ALBUM_PAGE_SIZE))
    }

    /// Record a page of `received` albums fetched at `offset`.
    ///
    /// Returns false when the page is stale (another page already advanced
    /// the cursor) and should be discarded.
    pub fn advance(&mut self, offset: usize, received: usize) -> bool {
        if offset != self.offset || self.exhausted {
            return false;
        }
        self.offset += received;
        if received < ALBUM_PAGE_SIZE {
            self.exhausted = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_labels_round_trip() {
        for order in AlbumSortOrder::ALL {
            assert_eq!(order.label().parse::<AlbumSortOrder>(), Ok(order));
        }
        assert!("Alphabetical".parse::<AlbumSortOrder>().is_err());
    }

    #[test]
    fn test_random_order_gets_seeded_query() {
        assert!(matches!(
            AlbumQuery::for_order(AlbumSortOrder::Random),
            AlbumQuery::Random(_)
        ));
        assert_eq!(
            AlbumQuery::for_order(AlbumSortOrder::Title),
            AlbumQuery::Sorted(AlbumSortOrder::Title)
        );
    }

    #[test]
    fn test_pager_advances_until_short_page() {
        let mut pager = AlbumPager::new(AlbumQuery::Favorites);
        assert_eq!(pager.next_request().unwrap().1, 0);

        assert!(pager.advance(0, ALBUM_PAGE_SIZE));
        assert_eq!(pager.next_request().unwrap().1, ALBUM_PAGE_SIZE);

        assert!(pager.advance(ALBUM_PAGE_SIZE, 3));
        assert!(pager.is_exhausted());
        assert!(pager.next_request().is_none());
        assert_eq!(pager.offset(), ALBUM_PAGE_SIZE + 3);
    }

    #[test]
    fn test_pager_rejects_stale_page() {
        let mut pager = AlbumPager::new(AlbumQuery::Favorites);
        assert!(pager.advance(0, ALBUM_PAGE_SIZE));
        assert!(!pager.advance(0, ALBUM_PAGE_SIZE));
        assert_eq!(pager.offset(), ALBUM_PAGE_SIZE);
    }
}
