//! An artist and their albums.

use iced::widget::{column, row, text};
use iced::{Alignment, Element};

use super::{Effect, Fetch, Loaded, Page, PageMessage, SavedPage, ViewContext};
use crate::backend::{AlbumQuery, Artist};
use crate::ui::route::Route;
use crate::ui::theme::{IconName, spacing, typography};
use crate::ui::views::helpers::{icon_button, status_message};
use crate::ui::widgets::album_grid::{AlbumGrid, AlbumGridState};

#[derive(Debug, Clone)]
pub struct SavedArtistPage {
    pub artist_id: String,
    pub loaded: Option<(Artist, AlbumGridState)>,
}

#[derive(Debug)]
pub struct ArtistPage {
    artist_id: String,
    artist: Option<Artist>,
    grid: Option<AlbumGrid>,
    error: Option<String>,
}

impl ArtistPage {
    pub fn new(artist_id: impl Into<String>) -> (Self, Vec<Effect>) {
        let artist_id = artist_id.into();
        let effects = vec![Effect::Fetch(Fetch::Artist(artist_id.clone()))];
        let page = Self {
            artist_id,
            artist: None,
            grid: None,
            error: None,
        };
        (page, effects)
    }

    pub fn restore(saved: SavedArtistPage) -> (Self, Vec<Effect>) {
        match saved.loaded {
            Some((artist, state)) => {
                let (grid, effects) = AlbumGrid::from_state(state);
                let page = Self {
                    artist_id: saved.artist_id,
                    artist: Some(artist),
                    grid: Some(grid.show_year(true)),
                    error: None,
                };
                (page, effects)
            }
            None => Self::new(saved.artist_id),
        }
    }

    pub fn artist(&self) -> Option<&Artist> {
        self.artist.as_ref()
    }

    pub fn grid(&self) -> Option<&AlbumGrid> {
        self.grid.as_ref()
    }
}

impl Page for ArtistPage {
    fn route(&self) -> Route {
        Route::Artist(self.artist_id.clone())
    }

    fn title(&self) -> String {
        self.artist
            .as_ref()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "Artist".to_string())
    }

    fn save(&self) -> SavedPage {
        let loaded = match (&self.artist, &self.grid) {
            (Some(artist), Some(grid)) => Some((artist.clone(), grid.save_to_state())),
            _ => None,
        };
        SavedPage::Artist(SavedArtistPage {
            artist_id: self.artist_id.clone(),
            loaded,
        })
    }

    fn reload(&mut self) -> Vec<Effect> {
        self.artist = None;
        self.grid = None;
        self.error = None;
        vec![Effect::Fetch(Fetch::Artist(self.artist_id.clone()))]
    }

    fn update(&mut self, message: PageMessage) -> Vec<Effect> {
        match message {
            PageMessage::Loaded(Loaded::Artist(Ok(loaded))) => {
                if loaded.artist.id != self.artist_id {
                    return Vec::new();
                }
                let covers: Vec<String> = loaded
                    .albums
                    .iter()
                    .filter_map(|a| a.cover_art.clone())
                    .collect();
                let query = AlbumQuery::Artist(self.artist_id.clone());
                self.grid = Some(AlbumGrid::with_albums(query, loaded.albums).show_year(true));
                self.artist = Some(loaded.artist);
                if covers.is_empty() {
                    Vec::new()
                } else {
                    vec![Effect::LoadCovers(covers)]
                }
            }
            PageMessage::Loaded(Loaded::Artist(Err(e))) => {
                self.error = Some(e.clone());
                vec![Effect::Notify(format!("Failed to load artist: {}", e))]
            }
            PageMessage::Scrolled(position) => match &mut self.grid {
                Some(grid) => grid.on_scroll(position),
                None => Vec::new(),
            },
            PageMessage::ToggleFavorite => match &mut self.artist {
                Some(artist) => {
                    artist.starred = !artist.starred;
                    vec![Effect::SetFavorite {
                        id: artist.id.clone(),
                        favorite: artist.starred,
                    }]
                }
                None => Vec::new(),
            },
            PageMessage::FavoriteSaved {
                id,
                favorite,
                result: Err(e),
            } => {
                if let Some(artist) = self.artist.as_mut().filter(|a| a.id == id) {
                    if artist.starred == favorite {
                        artist.starred = !favorite;
                    }
                }
                vec![Effect::Notify(format!("Failed to update favorite: {}", e))]
            }
            PageMessage::Navigate(route) => vec![Effect::Navigate(route)],
            PageMessage::PlayAlbum(album_id) => vec![Effect::PlayAlbum { album_id, index: 0 }],
            _ => Vec::new(),
        }
    }

    fn view<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, PageMessage> {
        let (Some(artist), Some(grid)) = (&self.artist, &self.grid) else {
            return match &self.error {
                Some(e) => status_message(format!("Could not load artist: {}", e)),
                None => status_message("Loading artist…"),
            };
        };

        let favorite = if artist.starred {
            IconName::Favorite
        } else {
            IconName::NotFavorite
        };
        let header = row![
            text(&artist.name).size(typography::SIZE_TITLE),
            icon_button(favorite, typography::SIZE_HEADING, Some(PageMessage::ToggleFavorite)),
            text(format!("{} albums", grid.albums().len())).size(typography::SIZE_SMALL),
        ]
        .spacing(spacing::MD)
        .align_y(Alignment::Center);

        column![header, grid.view(ctx)]
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .into()
    }
}
