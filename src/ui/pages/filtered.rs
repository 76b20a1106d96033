//! Album grids behind a fixed filter: favorites or a single genre.

use iced::widget::{column, text};
use iced::Element;

use super::{Effect, Loaded, Page, PageMessage, SavedPage, ViewContext};
use crate::backend::AlbumQuery;
use crate::ui::route::Route;
use crate::ui::theme::{spacing, typography};
use crate::ui::widgets::album_grid::{AlbumGrid, AlbumGridState};

#[derive(Debug, Clone)]
pub struct SavedFilteredAlbumsPage {
    pub route: Route,
    pub grid_state: AlbumGridState,
}

#[derive(Debug)]
pub struct FilteredAlbumsPage {
    route: Route,
    grid: AlbumGrid,
}

impl FilteredAlbumsPage {
    pub fn favorites() -> (Self, Vec<Effect>) {
        Self::with_query(Route::Favorites, AlbumQuery::Favorites)
    }

    pub fn genre(name: impl Into<String>) -> (Self, Vec<Effect>) {
        let name = name.into();
        Self::with_query(Route::Genre(name.clone()), AlbumQuery::Genre(name))
    }

    fn with_query(route: Route, query: AlbumQuery) -> (Self, Vec<Effect>) {
        let (grid, effects) = AlbumGrid::new(query);
        (
            Self {
                route,
                grid: grid.show_year(true),
            },
            effects,
        )
    }

    pub fn restore(saved: SavedFilteredAlbumsPage) -> (Self, Vec<Effect>) {
        let (grid, effects) = AlbumGrid::from_state(saved.grid_state);
        (
            Self {
                route: saved.route,
                grid: grid.show_year(true),
            },
            effects,
        )
    }

    pub fn grid(&self) -> &AlbumGrid {
        &self.grid
    }
}

impl Page for FilteredAlbumsPage {
    fn route(&self) -> Route {
        self.route.clone()
    }

    fn title(&self) -> String {
        match &self.route {
            Route::Genre(name) => name.clone(),
            route => route.label().to_string(),
        }
    }

    fn save(&self) -> SavedPage {
        SavedPage::FilteredAlbums(SavedFilteredAlbumsPage {
            route: self.route.clone(),
            grid_state: self.grid.save_to_state(),
        })
    }

    fn reload(&mut self) -> Vec<Effect> {
        let query = self.grid.query().clone();
        self.grid.reset(query)
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
            PageMessage::Navigate(route) => vec![Effect::Navigate(route)],
            PageMessage::PlayAlbum(album_id) => vec![Effect::PlayAlbum { album_id, index: 0 }],
            _ => Vec::new(),
        }
    }

    fn view<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, PageMessage> {
        column![
            text(self.title()).size(typography::SIZE_TITLE),
            self.grid.view(ctx)
        ]
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::pages::Fetch;
    use crate::test_utils::mock_albums;

    #[test]
    fn test_genre_page_queries_genre() {
        let (page, effects) = FilteredAlbumsPage::genre("Folk");
        assert_eq!(page.route(), Route::Genre("Folk".into()));
        assert_eq!(page.title(), "Folk");
        assert!(matches!(
            &effects[..],
            [Effect::Fetch(Fetch::Albums { query: AlbumQuery::Genre(g), offset: 0, .. })] if g == "Folk"
        ));
    }

    #[test]
    fn test_favorites_restore_without_fetch() {
        let (mut page, _) = FilteredAlbumsPage::favorites();
        page.update(PageMessage::Loaded(Loaded::Albums {
            query: AlbumQuery::Favorites,
            offset: 0,
            result: Ok(mock_albums(2)),
        }));

        let SavedPage::FilteredAlbums(saved) = page.save() else {
            panic!("wrong snapshot");
        };
        let (restored, effects) = FilteredAlbumsPage::restore(saved);
        assert!(effects.iter().all(|e| !e.is_fetch()));
        assert_eq!(restored.grid().albums().len(), 2);
        assert_eq!(restored.title(), "Favorites");
    }

    #[test]
    fn test_reload_refetches_same_filter() {
        let (mut page, _) = FilteredAlbumsPage::genre("Indie");
        let effects = page.reload();
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Fetch(Fetch::Albums { query: AlbumQuery::Genre(g), .. }) if g == "Indie"
        )));
    }
}
