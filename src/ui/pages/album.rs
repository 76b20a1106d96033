//! A single album with its track list.

use iced::widget::{Row, Space, button, column, row, text};
use iced::{Alignment, Element, Length};

use super::{Effect, Fetch, Loaded, Page, PageMessage, SavedPage, ViewContext};
use crate::backend::Album;
use crate::backend::model::format_duration;
use crate::ui::route::Route;
use crate::ui::theme::{self, IconName, spacing, typography};
use crate::ui::views::helpers::{cover, icon_button, link, status_message};
use crate::ui::widgets::track_list::{TrackList, TrackListState};

const COVER_SIZE: f32 = 200.0;

#[derive(Debug, Clone)]
pub struct SavedAlbumPage {
    pub album_id: String,
    /// Album and tracks, once loaded
    pub loaded: Option<(Album, TrackListState)>,
}

#[derive(Debug)]
pub struct AlbumPage {
    album_id: String,
    album: Option<Album>,
    tracks: TrackList,
    error: Option<String>,
}

impl AlbumPage {
    pub fn new(album_id: impl Into<String>) -> (Self, Vec<Effect>) {
        let album_id = album_id.into();
        let effects = vec![Effect::Fetch(Fetch::Album(album_id.clone()))];
        let page = Self {
            album_id,
            album: None,
            tracks: TrackList::new(Vec::new()),
            error: None,
        };
        (page, effects)
    }

    pub fn restore(saved: SavedAlbumPage) -> (Self, Vec<Effect>) {
        match saved.loaded {
            Some((album, state)) => {
                let (tracks, effects) = TrackList::from_state(state);
                let page = Self {
                    album_id: saved.album_id,
                    album: Some(album),
                    tracks,
                    error: None,
                };
                (page, effects)
            }
            None => Self::new(saved.album_id),
        }
    }

    pub fn album(&self) -> Option<&Album> {
        self.album.as_ref()
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    fn play(&self, index: usize) -> Vec<Effect> {
        vec![Effect::PlayAlbum {
            album_id: self.album_id.clone(),
            index,
        }]
    }

    fn header<'a>(&'a self, album: &'a Album, ctx: &ViewContext<'a>) -> Element<'a, PageMessage> {
        let artists = Row::with_children(album.artists.iter().map(|a| {
            link(
                &a.name,
                typography::SIZE_HEADING,
                PageMessage::Navigate(Route::Artist(a.id.clone())),
            )
            .into()
        }))
        .spacing(spacing::SM);

        let total: u32 = self.tracks.tracks().iter().map(|s| s.duration).sum();
        let mut facts = Vec::new();
        if let Some(year) = album.year {
            facts.push(year.to_string());
        }
        if let Some(genre) = &album.genre {
            facts.push(genre.clone());
        }
        facts.push(format!("{} tracks", self.tracks.tracks().len()));
        facts.push(format_duration(total));

        let favorite = if album.starred {
            IconName::Favorite
        } else {
            IconName::NotFavorite
        };

        let actions = row![
            button(text(format!("{} Play", theme::icon(IconName::Play))))
                .padding([6, 14])
                .on_press(PageMessage::PlayAll),
            icon_button(favorite, typography::SIZE_HEADING, Some(PageMessage::ToggleFavorite)),
        ]
        .spacing(spacing::SM)
        .align_y(Alignment::Center);

        row![
            cover(ctx.covers, album.cover_art.as_deref(), COVER_SIZE),
            column![
                text(&album.name).size(typography::SIZE_TITLE),
                artists,
                text(facts.join(" · ")).size(typography::SIZE_SMALL),
                Space::with_height(Length::Fill),
                actions,
            ]
            .spacing(spacing::SM)
            .height(Length::Fixed(COVER_SIZE)),
        ]
        .spacing(spacing::LG)
        .into()
    }
}

impl Page for AlbumPage {
    fn route(&self) -> Route {
        Route::Album(self.album_id.clone())
    }

    fn title(&self) -> String {
        self.album
            .as_ref()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "Album".to_string())
    }

    fn save(&self) -> SavedPage {
        SavedPage::Album(SavedAlbumPage {
            album_id: self.album_id.clone(),
            loaded: self
                .album
                .clone()
                .map(|album| (album, self.tracks.save_to_state())),
        })
    }

    fn reload(&mut self) -> Vec<Effect> {
        self.album = None;
        self.error = None;
        self.tracks.set_tracks(Vec::new());
        vec![Effect::Fetch(Fetch::Album(self.album_id.clone()))]
    }

    fn update(&mut self, message: PageMessage) -> Vec<Effect> {
        match message {
            PageMessage::Loaded(Loaded::Album(Ok(loaded))) => {
                if loaded.album.id != self.album_id {
                    return Vec::new();
                }
                let covers: Vec<String> = loaded.album.cover_art.iter().cloned().collect();
                self.album = Some(loaded.album);
                self.tracks.set_tracks(loaded.tracks);
                if covers.is_empty() {
                    Vec::new()
                } else {
                    vec![Effect::LoadCovers(covers)]
                }
            }
            PageMessage::Loaded(Loaded::Album(Err(e))) => {
                self.error = Some(e.clone());
                vec![Effect::Notify(format!("Failed to load album: {}", e))]
            }
            PageMessage::Scrolled(position) => {
                self.tracks.on_scroll(position);
                Vec::new()
            }
            PageMessage::TrackClicked(index) => {
                self.tracks.select(index);
                Vec::new()
            }
            PageMessage::PlayTrack(index) => self.play(index),
            PageMessage::PlayAll => self.play(0),
            PageMessage::ToggleFavorite => match &mut self.album {
                Some(album) => {
                    album.starred = !album.starred;
                    vec![Effect::SetFavorite {
                        id: album.id.clone(),
                        favorite: album.starred,
                    }]
                }
                None => Vec::new(),
            },
            PageMessage::FavoriteSaved {
                id,
                favorite,
                result: Err(e),
            } => {
                if let Some(album) = self.album.as_mut().filter(|a| a.id == id) {
                    if album.starred == favorite {
                        album.starred = !favorite;
                    }
                }
                vec![Effect::Notify(format!("Failed to update favorite: {}", e))]
            }
            PageMessage::Navigate(route) => vec![Effect::Navigate(route)],
            _ => Vec::new(),
        }
    }

    fn view<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, PageMessage> {
        let content: Element<'a, PageMessage> = match (&self.album, &self.error) {
            (Some(album), _) => column![self.header(album, ctx), self.tracks.view(ctx)]
                .spacing(spacing::LG)
                .into(),
            (None, Some(error)) => status_message(format!("Could not load album: {}", error)),
            (None, None) => status_message("Loading album…"),
        };
        column![content].padding(spacing::LG).into()
    }

    fn select_all(&mut self) -> bool {
        self.tracks.select_all();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_album_with_tracks;

    fn loaded_page() -> AlbumPage {
        let (mut page, _) = AlbumPage::new("al-1");
        page.update(PageMessage::Loaded(Loaded::Album(Ok(mock_album_with_tracks(
            "al-1", 3,
        )))));
        page
    }

    #[test]
    fn test_new_fetches_album() {
        let (page, effects) = AlbumPage::new("al-1");
        assert_eq!(effects, vec![Effect::Fetch(Fetch::Album("al-1".into()))]);
        assert_eq!(page.route(), Route::Album("al-1".into()));
    }

    #[test]
    fn test_loaded_album_requests_cover() {
        let (mut page, _) = AlbumPage::new("al-1");
        let effects = page.update(PageMessage::Loaded(Loaded::Album(Ok(
            mock_album_with_tracks("al-1", 3),
        ))));
        assert_eq!(effects, vec![Effect::LoadCovers(vec!["covers/al-1.jpg".into()])]);
        assert_eq!(page.title(), "Album al-1");
        assert_eq!(page.tracks().tracks().len(), 3);
    }

    #[test]
    fn test_other_album_is_ignored() {
        let (mut page, _) = AlbumPage::new("al-1");
        page.update(PageMessage::Loaded(Loaded::Album(Ok(mock_album_with_tracks(
            "al-2", 3,
        )))));
        assert!(page.album().is_none());
    }

    #[test]
    fn test_restore_keeps_selection_without_fetch() {
        let mut page = loaded_page();
        page.update(PageMessage::TrackClicked(2));

        let SavedPage::Album(saved) = page.save() else {
            panic!("wrong snapshot");
        };
        let (restored, effects) = AlbumPage::restore(saved);
        assert!(effects.iter().all(|e| !e.is_fetch()));
        assert!(restored.tracks().selected().contains(&2));
    }

    #[test]
    fn test_restore_before_load_fetches() {
        let (page, _) = AlbumPage::new("al-1");
        let SavedPage::Album(saved) = page.save() else {
            panic!("wrong snapshot");
        };
        let (_, effects) = AlbumPage::restore(saved);
        assert!(effects.iter().any(Effect::is_fetch));
    }

    #[test]
    fn test_play_track_plays_album_from_index() {
        let mut page = loaded_page();
        assert_eq!(
            page.update(PageMessage::PlayTrack(1)),
            vec![Effect::PlayAlbum {
                album_id: "al-1".into(),
                index: 1
            }]
        );
    }

    #[test]
    fn test_toggle_favorite() {
        let mut page = loaded_page();
        let effects = page.update(PageMessage::ToggleFavorite);
        assert_eq!(
            effects,
            vec![Effect::SetFavorite {
                id: "al-1".into(),
                favorite: true
            }]
        );
        assert!(page.album().unwrap().starred);
    }

    #[test]
    fn test_rejected_favorite_is_rolled_back() {
        let mut page = loaded_page();
        page.update(PageMessage::ToggleFavorite);
        assert!(page.album().unwrap().starred);

        let effects = page.update(PageMessage::FavoriteSaved {
            id: "al-1".into(),
            favorite: true,
            result: Err("Not connected to a server".into()),
        });
        assert!(matches!(&effects[..], [Effect::Notify(_)]));
        assert!(!page.album().unwrap().starred);
    }

    #[test]
    fn test_accepted_favorite_is_kept() {
        let mut page = loaded_page();
        page.update(PageMessage::ToggleFavorite);
        let effects = page.update(PageMessage::FavoriteSaved {
            id: "al-1".into(),
            favorite: true,
            result: Ok(()),
        });
        assert!(effects.is_empty());
        assert!(page.album().unwrap().starred);
    }

    #[test]
    fn test_select_all() {
        let mut page = loaded_page();
        assert!(page.select_all());
        assert_eq!(page.tracks().selected().len(), 3);
    }
}
