//! Flat lists of artists, genres or playlists, filtered as you type.

use iced::widget::{Space, button, column, row, scrollable, text};
use iced::{Alignment, Element, Length};

use super::{
    Effect, Fetch, Loaded, Page, PageMessage, SavedPage, ScrollPosition, Searchable, ViewContext,
    scroll_effect,
};
use crate::backend::{Artist, Genre, Playlist};
use crate::ui::route::Route;
use crate::ui::theme::{self, layout, spacing, typography};
use crate::ui::views::helpers::{calc_visible_range, status_message};
use crate::ui::widgets::searcher::Searcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Artists,
    Genres,
    Playlists,
}

impl ListKind {
    pub fn route(self) -> Route {
        match self {
            ListKind::Artists => Route::Artists,
            ListKind::Genres => Route::Genres,
            ListKind::Playlists => Route::Playlists,
        }
    }

    fn fetch(self) -> Fetch {
        match self {
            ListKind::Artists => Fetch::Artists,
            ListKind::Genres => Fetch::Genres,
            ListKind::Playlists => Fetch::Playlists,
        }
    }
}

/// One row: where it leads, its name and a short detail line.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub route: Route,
    pub name: String,
    pub detail: String,
}

impl From<Artist> for ListEntry {
    fn from(artist: Artist) -> Self {
        Self {
            route: Route::Artist(artist.id),
            name: artist.name,
            detail: plural(artist.album_count, "album"),
        }
    }
}

impl From<Genre> for ListEntry {
    fn from(genre: Genre) -> Self {
        Self {
            route: Route::Genre(genre.name.clone()),
            detail: format!(
                "{} · {}",
                plural(genre.album_count, "album"),
                plural(genre.song_count, "song")
            ),
            name: genre.name,
        }
    }
}

impl From<Playlist> for ListEntry {
    fn from(playlist: Playlist) -> Self {
        Self {
            route: Route::Playlist(playlist.id),
            name: playlist.name,
            detail: plural(playlist.song_count, "song"),
        }
    }
}

fn plural(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[derive(Debug, Clone)]
pub struct SavedListPage {
    pub kind: ListKind,
    pub entries: Option<Vec<ListEntry>>,
    pub filter: String,
    pub scroll: ScrollPosition,
}

#[derive(Debug)]
pub struct ListPage {
    kind: ListKind,
    /// `None` until loaded
    entries: Option<Vec<ListEntry>>,
    searcher: Searcher,
    scroll: ScrollPosition,
    scroll_id: scrollable::Id,
}

impl ListPage {
    pub fn new(kind: ListKind) -> (Self, Vec<Effect>) {
        let page = Self {
            kind,
            entries: None,
            searcher: Searcher::new("Filter"),
            scroll: ScrollPosition::default(),
            scroll_id: scrollable::Id::unique(),
        };
        (page, vec![Effect::Fetch(kind.fetch())])
    }

    pub fn restore(saved: SavedListPage) -> (Self, Vec<Effect>) {
        let Some(entries) = saved.entries else {
            let (mut page, effects) = Self::new(saved.kind);
            page.searcher.set_text(saved.filter);
            return (page, effects);
        };
        let page = Self {
            kind: saved.kind,
            entries: Some(entries),
            searcher: Searcher::new("Filter").with_text(saved.filter),
            scroll: saved.scroll,
            scroll_id: scrollable::Id::unique(),
        };
        let effects = scroll_effect(&page.scroll_id, page.scroll.offset);
        (page, effects)
    }

    /// Entries whose name contains the filter text, ignoring case.
    pub fn visible_entries(&self) -> Vec<&ListEntry> {
        let needle = self.searcher.text().to_lowercase();
        self.entries
            .iter()
            .flatten()
            .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn set_entries<T: Into<ListEntry>>(
        &mut self,
        what: &str,
        result: Result<Vec<T>, String>,
    ) -> Vec<Effect> {
        match result {
            Ok(items) => {
                self.entries = Some(items.into_iter().map(Into::into).collect());
                Vec::new()
            }
            Err(e) => {
                self.entries = Some(Vec::new());
                vec![Effect::Notify(format!("Failed to load {}: {}", what, e))]
            }
        }
    }
}

impl Page for ListPage {
    fn route(&self) -> Route {
        self.kind.route()
    }

    fn title(&self) -> String {
        self.kind.route().label().to_string()
    }

    fn save(&self) -> SavedPage {
        SavedPage::List(SavedListPage {
            kind: self.kind,
            entries: self.entries.clone(),
            filter: self.searcher.text().to_string(),
            scroll: self.scroll,
        })
    }

    fn reload(&mut self) -> Vec<Effect> {
        self.entries = None;
        vec![Effect::Fetch(self.kind.fetch())]
    }

    fn update(&mut self, message: PageMessage) -> Vec<Effect> {
        match message {
            PageMessage::Loaded(Loaded::Artists(result)) if self.kind == ListKind::Artists => {
                self.set_entries("artists", result)
            }
            PageMessage::Loaded(Loaded::Genres(result)) if self.kind == ListKind::Genres => {
                self.set_entries("genres", result)
            }
            PageMessage::Loaded(Loaded::Playlists(result)) if self.kind == ListKind::Playlists => {
                self.set_entries("playlists", result)
            }
            PageMessage::SearchChanged(text) => {
                // Filtering is local, so there is nothing to debounce
                self.searcher.set_text(text);
                Vec::new()
            }
            PageMessage::Scrolled(position) => {
                self.scroll = position;
                Vec::new()
            }
            PageMessage::Navigate(route) => vec![Effect::Navigate(route)],
            _ => Vec::new(),
        }
    }

    fn view<'a>(&'a self, _ctx: &ViewContext<'a>) -> Element<'a, PageMessage> {
        let header = row![
            text(self.title()).size(typography::SIZE_TITLE),
            Space::with_width(Length::Fill),
            self.searcher.view(),
        ]
        .spacing(spacing::MD)
        .align_y(Alignment::Center);

        let body: Element<'a, PageMessage> = if self.entries.is_none() {
            status_message("Loading…")
        } else {
            let entries = self.visible_entries();
            if entries.is_empty() {
                status_message("Nothing to show")
            } else {
                let (start, end, top, bottom) = calc_visible_range(
                    self.scroll.offset,
                    self.scroll.viewport_height,
                    entries.len(),
                    layout::LIST_ROW_HEIGHT,
                );
                let rows = entries[start..end].iter().copied().map(|entry| {
                    button(
                        row![
                            theme::icon_text(entry.route.icon(), typography::SIZE_BODY),
                            text(&entry.name)
                                .size(typography::SIZE_BODY)
                                .width(Length::Fill),
                            text(&entry.detail).size(typography::SIZE_SMALL),
                        ]
                        .spacing(spacing::MD)
                        .align_y(Alignment::Center),
                    )
                    .width(Length::Fill)
                    .height(Length::Fixed(layout::LIST_ROW_HEIGHT))
                    .style(theme::button_ghost)
                    .on_press(PageMessage::Navigate(entry.route.clone()))
                    .into()
                });

                scrollable(
                    column![Space::with_height(Length::Fixed(top))]
                        .extend(rows)
                        .push(Space::with_height(Length::Fixed(bottom)))
                        .width(Length::Fill),
                )
                .id(self.scroll_id.clone())
                .on_scroll(|viewport| PageMessage::Scrolled(viewport.into()))
                .height(Length::Fill)
                .into()
            }
        };

        column![header, body]
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .into()
    }

    fn searchable(&self) -> Option<&dyn Searchable> {
        Some(self)
    }
}

impl Searchable for ListPage {
    fn search_input_id(&self) -> iced::widget::text_input::Id {
        self.searcher.input_id()
    }

    fn search_text(&self) -> &str {
        self.searcher.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artists() -> Vec<Artist> {
        ["The Low Tides", "Quartz Garden", "Moss & Meridian"]
            .iter()
            .enumerate()
            .map(|(i, name)| Artist {
                id: format!("ar-{}", i + 1),
                name: name.to_string(),
                album_count: 1,
                starred: false,
            })
            .collect()
    }

    fn loaded_page() -> ListPage {
        let (mut page, _) = ListPage::new(ListKind::Artists);
        page.update(PageMessage::Loaded(Loaded::Artists(Ok(artists()))));
        page
    }

    #[test]
    fn test_new_fetches_kind() {
        let (_, effects) = ListPage::new(ListKind::Genres);
        assert_eq!(effects, vec![Effect::Fetch(Fetch::Genres)]);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_immediate() {
        let mut page = loaded_page();
        let effects = page.update(PageMessage::SearchChanged("quartz".into()));
        assert!(effects.is_empty());

        let visible = page.visible_entries();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].route, Route::Artist("ar-2".into()));
    }

    #[test]
    fn test_results_for_other_kind_ignored() {
        let (mut page, _) = ListPage::new(ListKind::Playlists);
        page.update(PageMessage::Loaded(Loaded::Artists(Ok(artists()))));
        assert!(page.visible_entries().is_empty());
        assert!(page.entries.is_none());
    }

    #[test]
    fn test_restore_keeps_filter_without_fetch() {
        let mut page = loaded_page();
        page.update(PageMessage::SearchChanged("moss".into()));

        let SavedPage::List(saved) = page.save() else {
            panic!("wrong snapshot");
        };
        let (restored, effects) = ListPage::restore(saved);
        assert!(effects.iter().all(|e| !e.is_fetch()));
        assert_eq!(restored.search_text(), "moss");
        assert_eq!(restored.visible_entries().len(), 1);
    }

    #[test]
    fn test_restore_before_load_keeps_filter() {
        let (mut page, _) = ListPage::new(ListKind::Artists);
        page.update(PageMessage::SearchChanged("moss".into()));

        let SavedPage::List(saved) = page.save() else {
            panic!("wrong snapshot");
        };
        let (mut restored, effects) = ListPage::restore(saved);
        assert_eq!(effects, vec![Effect::Fetch(Fetch::Artists)]);
        assert_eq!(restored.search_text(), "moss");

        restored.update(PageMessage::Loaded(Loaded::Artists(Ok(artists()))));
        assert_eq!(restored.visible_entries().len(), 1);
    }

    #[test]
    fn test_genre_entry_links_to_genre_page() {
        let entry = ListEntry::from(Genre {
            name: "Folk".into(),
            album_count: 1,
            song_count: 3,
        });
        assert_eq!(entry.route, Route::Genre("Folk".into()));
        assert_eq!(entry.detail, "1 album · 3 songs");
    }
}
