//! All albums, sorted or searched.
//!
//! The page keeps two grid snapshots besides the live grid: the unfiltered
//! grid from before a search started, so clearing the search puts it back
//! without reloading, and the search grid, so a saved page can come back
//! mid-search.

use iced::widget::{Space, column, pick_list, row, text};
use iced::{Alignment, Element, Length};

use super::{Effect, Loaded, Page, PageMessage, SavedPage, Searchable, ViewContext};
use crate::backend::{AlbumQuery, AlbumSortOrder};
use crate::ui::route::Route;
use crate::ui::theme::{layout, spacing, typography};
use crate::ui::widgets::album_grid::{AlbumGrid, AlbumGridState};
use crate::ui::widgets::searcher::{SearchInput, Searcher};

#[derive(Debug, Clone)]
pub struct SavedAlbumsPage {
    pub sort_order: AlbumSortOrder,
    pub search_text: String,
    /// Text in the search box, which may be ahead of `search_text` while
    /// the debounce timer runs
    pub typed_text: String,
    pub grid_state: Option<AlbumGridState>,
    pub search_grid_state: Option<AlbumGridState>,
}

#[derive(Debug)]
pub struct AlbumsPage {
    sort_order: AlbumSortOrder,
    grid: AlbumGrid,
    /// Unfiltered grid, captured when a search starts
    grid_state: Option<AlbumGridState>,
    /// Search grid, as of the last save
    search_grid_state: Option<AlbumGridState>,
    searcher: Searcher,
    /// The search currently applied to the grid
    search_text: String,
}

impl AlbumsPage {
    pub fn new(sort_order: AlbumSortOrder) -> (Self, Vec<Effect>) {
        let (grid, effects) = AlbumGrid::new(AlbumQuery::for_order(sort_order));
        let page = Self {
            sort_order,
            grid,
            grid_state: None,
            search_grid_state: None,
            searcher: Searcher::new("Search albums"),
            search_text: String::new(),
        };
        (page, effects)
    }

    pub fn restore(saved: SavedAlbumsPage) -> (Self, Vec<Effect>) {
        let searching = !saved.search_text.is_empty();
        let live_state = if searching {
            saved.search_grid_state.clone()
        } else {
            saved.grid_state.clone()
        };

        let (grid, mut effects) = match live_state {
            Some(state) => AlbumGrid::from_state(state),
            None if searching => AlbumGrid::new(AlbumQuery::Search(saved.search_text.clone())),
            None => AlbumGrid::new(AlbumQuery::for_order(saved.sort_order)),
        };

        let mut page = Self {
            sort_order: saved.sort_order,
            grid,
            grid_state: saved.grid_state,
            search_grid_state: saved.search_grid_state,
            searcher: Searcher::new("Search albums").with_text(saved.search_text.clone()),
            search_text: saved.search_text,
        };
        // Typing that had not been applied yet gets a fresh debounce tick
        if saved.typed_text != page.search_text {
            effects.extend(page.update(PageMessage::SearchChanged(saved.typed_text)));
        }
        (page, effects)
    }

    pub fn sort_order(&self) -> AlbumSortOrder {
        self.sort_order
    }

    pub fn grid(&self) -> &AlbumGrid {
        &self.grid
    }

    fn is_searching(&self) -> bool {
        !self.search_text.is_empty()
    }

    /// Apply a search. An empty query goes back to the unfiltered grid.
    fn on_searched(&mut self, query: String) -> Vec<Effect> {
        if query == self.search_text {
            return Vec::new();
        }
        tracing::debug!(target: "ui::update", query = %query, "Album search");

        let effects = if query.is_empty() {
            match self.grid_state.take() {
                Some(state) => self.grid.reset_from_state(state),
                None => self.grid.reset(AlbumQuery::for_order(self.sort_order)),
            }
        } else {
            self.do_search(&query)
        };
        self.search_text = query;
        effects
    }

    fn do_search(&mut self, query: &str) -> Vec<Effect> {
        if !self.is_searching() {
            self.grid_state = Some(self.grid.save_to_state());
        }
        self.grid.reset(AlbumQuery::Search(query.to_string()))
    }

    fn on_sort_order_changed(&mut self, order: AlbumSortOrder) -> Vec<Effect> {
        if order == self.sort_order {
            return Vec::new();
        }
        self.sort_order = order;
        let mut effects = vec![Effect::SaveSortOrder(order)];
        if self.is_searching() {
            // The unfiltered snapshot is for the old order; rebuilt when the
            // search is cleared.
            self.grid_state = None;
        } else {
            effects.extend(self.grid.reset(AlbumQuery::for_order(order)));
        }
        effects
    }
}

impl Page for AlbumsPage {
    fn route(&self) -> Route {
        Route::Albums
    }

    fn title(&self) -> String {
        "Albums".to_string()
    }

    fn save(&self) -> SavedPage {
        let live = self.grid.save_to_state();
        let (grid_state, search_grid_state) = if self.is_searching() {
            (self.grid_state.clone(), Some(live))
        } else {
            (Some(live), self.search_grid_state.clone())
        };
        SavedPage::Albums(SavedAlbumsPage {
            sort_order: self.sort_order,
            search_text: self.search_text.clone(),
            typed_text: self.searcher.text().to_string(),
            grid_state,
            search_grid_state,
        })
    }

    fn reload(&mut self) -> Vec<Effect> {
        if self.is_searching() {
            self.grid.reset(AlbumQuery::Search(self.search_text.clone()))
        } else {
            self.grid.reset(AlbumQuery::for_order(self.sort_order))
        }
    }

    fn update(&mut self, message: PageMessage) -> Vec<Effect> {
        match message {
            PageMessage::Loaded(Loaded::Albums {
                query,
                offset,
                result,
            }) => self.grid.on_loaded(query, offset, result),
            PageMessage::Scrolled(position) => self.grid.on_scroll(position),
            PageMessage::LoadMore => self.grid.fetch_next(),
            PageMessage::SortOrderChanged(order) => self.on_sort_order_changed(order),
            PageMessage::SearchChanged(text) => match self.searcher.on_input(text) {
                SearchInput::Apply(query) => self.on_searched(query),
                SearchInput::Pending(effect) => vec![effect],
            },
            PageMessage::SearchDebounced(seq) => match self.searcher.on_debounced(seq) {
                Some(query) => self.on_searched(query),
                None => Vec::new(),
            },
            PageMessage::SearchSubmitted => {
                let query = self.searcher.on_submit();
                self.on_searched(query)
            }
            PageMessage::Navigate(route) => vec![Effect::Navigate(route)],
            PageMessage::PlayAlbum(album_id) => vec![Effect::PlayAlbum { album_id, index: 0 }],
            _ => Vec::new(),
        }
    }

    fn view<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, PageMessage> {
        let header = row![
            text(self.title()).size(typography::SIZE_TITLE),
            Space::with_width(Length::Fill),
            pick_list(
                AlbumSortOrder::ALL,
                Some(self.sort_order),
                PageMessage::SortOrderChanged
            )
            .text_size(typography::SIZE_BODY)
            .width(Length::Fixed(layout::SORT_PICKER_WIDTH)),
            self.searcher.view(),
        ]
        .spacing(spacing::MD)
        .align_y(Alignment::Center);

        column![header, self.grid.view(ctx)]
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .into()
    }

    fn searchable(&self) -> Option<&dyn Searchable> {
        Some(self)
    }
}

impl Searchable for AlbumsPage {
    fn search_input_id(&self) -> iced::widget::text_input::Id {
        self.searcher.input_id()
    }

    fn search_text(&self) -> &str {
        &self.search_text
    }
}
