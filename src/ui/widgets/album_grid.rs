//! Lazily paged grid of album covers.
//!
//! The grid pulls pages from an [`AlbumPager`] as the user scrolls towards
//! the bottom. Its whole state (albums loaded so far, paging cursor and
//! scroll position) can be captured in an [`AlbumGridState`] and put back
//! later without refetching.

use iced::widget::{Space, column, container, mouse_area, responsive, row, scrollable, text};
use iced::{Element, Length};

use crate::backend::{Album, AlbumPager, AlbumQuery};
use crate::ui::pages::{Effect, Fetch, PageMessage, ScrollPosition, ViewContext};
use crate::ui::route::Route;
use crate::ui::theme::{IconName, layout, spacing, typography};
use crate::ui::views::helpers::{calc_visible_range, cover, icon_button, link, status_message};

/// Distance from the bottom, in pixels, at which the next page is requested
pub const LOAD_MORE_THRESHOLD: f32 = layout::GRID_CELL_HEIGHT * 2.0;

/// Everything needed to put a grid back exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumGridState {
    pub albums: Vec<Album>,
    pub pager: AlbumPager,
    pub scroll: ScrollPosition,
}

#[derive(Debug)]
pub struct AlbumGrid {
    albums: Vec<Album>,
    pager: AlbumPager,
    /// A page request is in flight
    loading: bool,
    scroll: ScrollPosition,
    show_year: bool,
    scroll_id: scrollable::Id,
}

impl AlbumGrid {
    /// Empty grid over `query`, with the request for the first page.
    pub fn new(query: AlbumQuery) -> (Self, Vec<Effect>) {
        let mut grid = Self::with_pager(AlbumPager::new(query), Vec::new());
        let effects = grid.fetch_next();
        (grid, effects)
    }

    /// Grid over albums that were loaded elsewhere. Nothing is paged in.
    pub fn with_albums(query: AlbumQuery, albums: Vec<Album>) -> Self {
        let pager = AlbumPager::finished(query, albums.len());
        Self::with_pager(pager, albums)
    }

    pub fn from_state(state: AlbumGridState) -> (Self, Vec<Effect>) {
        let mut grid = Self::with_pager(state.pager, state.albums);
        grid.scroll = state.scroll;
        let effects = crate::ui::pages::scroll_effect(&grid.scroll_id, grid.scroll.offset);
        (grid, effects)
    }

    fn with_pager(pager: AlbumPager, albums: Vec<Album>) -> Self {
        Self {
            albums,
            pager,
            loading: false,
            scroll: ScrollPosition::default(),
            show_year: false,
            scroll_id: scrollable::Id::unique(),
        }
    }

    pub fn show_year(mut self, show: bool) -> Self {
        self.show_year = show;
        self
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn query(&self) -> &AlbumQuery {
        self.pager.query()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset
    }

    /// Start over with a new query, scrolled to the top.
    pub fn reset(&mut self, query: AlbumQuery) -> Vec<Effect> {
        self.albums.clear();
        self.pager = AlbumPager::new(query);
        self.loading = false;
        self.scroll = ScrollPosition::default();

        let mut effects = vec![Effect::ScrollTo {
            id: self.scroll_id.clone(),
            offset: 0.0,
        }];
        effects.extend(self.fetch_next());
        effects
    }

    /// Put back a previously saved state. Any request in flight for the
    /// replaced query is discarded when it arrives.
    pub fn reset_from_state(&mut self, state: AlbumGridState) -> Vec<Effect> {
        self.albums = state.albums;
        self.pager = state.pager;
        self.loading = false;
        self.scroll = state.scroll;
        vec![Effect::ScrollTo {
            id: self.scroll_id.clone(),
            offset: self.scroll.offset,
        }]
    }

    pub fn save_to_state(&self) -> AlbumGridState {
        AlbumGridState {
            albums: self.albums.clone(),
            pager: self.pager.clone(),
            scroll: self.scroll,
        }
    }

    /// Request the next page unless one is in flight or the query ran dry.
    pub fn fetch_next(&mut self) -> Vec<Effect> {
        if self.loading {
            return Vec::new();
        }
        match self.pager.next_request() {
            Some((query, offset, limit)) => {
                self.loading = true;
                vec![Effect::Fetch(Fetch::Albums {
                    query,
                    offset,
                    limit,
                })]
            }
            None => Vec::new(),
        }
    }

    pub fn on_loaded(
        &mut self,
        query: AlbumQuery,
        offset: usize,
        result: Result<Vec<Album>, String>,
    ) -> Vec<Effect> {
        if &query != self.pager.query() {
            tracing::debug!(target: "ui::update", ?query, "Dropping albums for replaced query");
            return Vec::new();
        }
        // A page for an old cursor position leaves the current request in flight
        if offset != self.pager.offset() || self.pager.is_exhausted() {
            tracing::debug!(target: "ui::update", offset, "Dropping stale album page");
            return Vec::new();
        }
        self.loading = false;

        match result {
            Ok(albums) => {
                self.pager.advance(offset, albums.len());
                let covers: Vec<String> = albums.iter().filter_map(|a| a.cover_art.clone()).collect();
                self.albums.extend(albums);
                if covers.is_empty() {
                    Vec::new()
                } else {
                    vec![Effect::LoadCovers(covers)]
                }
            }
            Err(e) => {
                tracing::warn!(target: "ui::update", "Failed to load albums: {}", e);
                vec![Effect::Notify(format!("Failed to load albums: {}", e))]
            }
        }
    }

    pub fn on_scroll(&mut self, position: ScrollPosition) -> Vec<Effect> {
        self.scroll = position;
        let remaining = position.content_height - (position.offset + position.viewport_height);
        if remaining < LOAD_MORE_THRESHOLD {
            self.fetch_next()
        } else {
            Vec::new()
        }
    }

    pub fn view<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, PageMessage> {
        if self.albums.is_empty() {
            return if self.loading {
                status_message("Loading albums…")
            } else if self.pager.is_exhausted() {
                status_message("No albums")
            } else {
                status_message("")
            };
        }

        let ctx = *ctx;
        responsive(move |size| {
            let columns = ((size.width / layout::GRID_CELL_WIDTH).floor() as usize).max(1);
            let total_rows = self.albums.len().div_ceil(columns);
            let (start, end, top, bottom) = calc_visible_range(
                self.scroll.offset,
                size.height,
                total_rows,
                layout::GRID_CELL_HEIGHT,
            );

            let rows = (start..end).map(|r| {
                let first = r * columns;
                let last = (first + columns).min(self.albums.len());
                row(self.albums[first..last].iter().map(|a| self.cell(a, &ctx)))
                    .height(Length::Fixed(layout::GRID_CELL_HEIGHT))
                    .into()
            });

            let mut content = column![Space::with_height(Length::Fixed(top))]
                .extend(rows)
                .push(Space::with_height(Length::Fixed(bottom)))
                .width(Length::Fill);

            if !self.pager.is_exhausted() {
                content = content.push(
                    container(if self.loading {
                        Element::from(text("Loading…").size(typography::SIZE_SMALL))
                    } else {
                        link("Load more", typography::SIZE_SMALL, PageMessage::LoadMore).into()
                    })
                    .center_x(Length::Fill)
                    .padding(spacing::MD),
                );
            }

            scrollable(content)
                .id(self.scroll_id.clone())
                .on_scroll(|viewport| PageMessage::Scrolled(viewport.into()))
                .height(Length::Fill)
                .width(Length::Fill)
                .into()
        })
        .into()
    }

    fn cell<'a>(&'a self, album: &'a Album, ctx: &ViewContext<'a>) -> Element<'a, PageMessage> {
        let open = PageMessage::Navigate(Route::Album(album.id.clone()));

        let art = mouse_area(cover(
            ctx.covers,
            album.cover_art.as_deref(),
            layout::GRID_COVER_SIZE,
        ))
        .on_press(open.clone())
        .on_right_press(PageMessage::PlayAlbum(album.id.clone()));

        let title = row![
            link(&album.name, typography::SIZE_BODY, open),
            Space::with_width(Length::Fill),
            icon_button(IconName::Play, 12, Some(PageMessage::PlayAlbum(album.id.clone()))),
        ];

        let mut details = column![art, title]
            .spacing(spacing::XS)
            .width(Length::Fixed(layout::GRID_COVER_SIZE));

        if let Some(artist) = album.artists.first() {
            details = details.push(link(
                album.artist_names(),
                typography::SIZE_SMALL,
                PageMessage::Navigate(Route::Artist(artist.id.clone())),
            ));
        }
        if self.show_year
            && let Some(year) = album.year
        {
            details = details.push(text(year.to_string()).size(typography::SIZE_SMALL));
        }

        container(details)
            .width(Length::Fixed(layout::GRID_CELL_WIDTH))
            .padding(spacing::SM)
            .into()
    }
}
