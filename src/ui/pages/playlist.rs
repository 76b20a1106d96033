//! A playlist with its tracks.

use iced::widget::{button, column, row, text};
use iced::{Alignment, Element};

use super::{Effect, Fetch, Loaded, Page, PageMessage, SavedPage, ViewContext};
use crate::backend::Playlist;
use crate::backend::model::format_duration;
use crate::ui::route::Route;
use crate::ui::theme::{self, IconName, spacing, typography};
use crate::ui::views::helpers::status_message;
use crate::ui::widgets::track_list::{TrackList, TrackListState};

#[derive(Debug, Clone)]
pub struct SavedPlaylistPage {
    pub playlist_id: String,
    pub loaded: Option<(Playlist, TrackListState)>,
}

#[derive(Debug)]
pub struct PlaylistPage {
    playlist_id: String,
    playlist: Option<Playlist>,
    tracks: TrackList,
    error: Option<String>,
}

impl PlaylistPage {
    pub fn new(playlist_id: impl Into<String>) -> (Self, Vec<Effect>) {
        let playlist_id = playlist_id.into();
        let effects = vec![Effect::Fetch(Fetch::Playlist(playlist_id.clone()))];
        let page = Self {
            playlist_id,
            playlist: None,
            tracks: TrackList::new(Vec::new()).show_album(true),
            error: None,
        };
        (page, effects)
    }

    pub fn restore(saved: SavedPlaylistPage) -> (Self, Vec<Effect>) {
        match saved.loaded {
            Some((playlist, state)) => {
                let (tracks, effects) = TrackList::from_state(state);
                let page = Self {
                    playlist_id: saved.playlist_id,
                    playlist: Some(playlist),
                    tracks: tracks.show_album(true),
                    error: None,
                };
                (page, effects)
            }
            None => Self::new(saved.playlist_id),
        }
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    fn play(&self, index: usize) -> Vec<Effect> {
        if self.tracks.tracks().is_empty() {
            return Vec::new();
        }
        vec![Effect::PlaySongs {
            songs: self.tracks.tracks().to_vec(),
            index,
        }]
    }
}

impl Page for PlaylistPage {
    fn route(&self) -> Route {
        Route::Playlist(self.playlist_id.clone())
    }

    fn title(&self) -> String {
        self.playlist
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Playlist".to_string())
    }

    fn save(&self) -> SavedPage {
        SavedPage::Playlist(SavedPlaylistPage {
            playlist_id: self.playlist_id.clone(),
            loaded: self
                .playlist
                .clone()
                .map(|p| (p, self.tracks.save_to_state())),
        })
    }

    fn reload(&mut self) -> Vec<Effect> {
        self.playlist = None;
        self.error = None;
        self.tracks.set_tracks(Vec::new());
        vec![Effect::Fetch(Fetch::Playlist(self.playlist_id.clone()))]
    }

    fn update(&mut self, message: PageMessage) -> Vec<Effect> {
        match message {
            PageMessage::Loaded(Loaded::Playlist(Ok(loaded))) => {
                if loaded.playlist.id != self.playlist_id {
                    return Vec::new();
                }
                self.playlist = Some(loaded.playlist);
                self.tracks.set_tracks(loaded.tracks);
                Vec::new()
            }
            PageMessage::Loaded(Loaded::Playlist(Err(e))) => {
                self.error = Some(e.clone());
                vec![Effect::Notify(format!("Failed to load playlist: {}", e))]
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
            PageMessage::Navigate(route) => vec![Effect::Navigate(route)],
            _ => Vec::new(),
        }
    }

    fn view<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, PageMessage> {
        let Some(playlist) = &self.playlist else {
            return match &self.error {
                Some(e) => status_message(format!("Could not load playlist: {}", e)),
                None => status_message("Loading playlist…"),
            };
        };

        let mut details = vec![format!("by {}", playlist.owner)];
        details.push(format!("{} tracks", self.tracks.tracks().len()));
        details.push(format_duration(
            self.tracks.tracks().iter().map(|s| s.duration).sum(),
        ));

        let mut header = column![
            row![
                text(&playlist.name).size(typography::SIZE_TITLE),
                button(text(format!("{} Play", theme::icon(IconName::Play))))
                    .padding([6, 14])
                    .on_press_maybe((!self.tracks.tracks().is_empty()).then_some(PageMessage::PlayAll)),
            ]
            .spacing(spacing::MD)
            .align_y(Alignment::Center),
            text(details.join(" · ")).size(typography::SIZE_SMALL),
        ]
        .spacing(spacing::XS);
        if let Some(comment) = &playlist.comment {
            header = header.push(text(comment).size(typography::SIZE_BODY));
        }

        column![header, self.tracks.view(ctx)]
            .spacing(spacing::LG)
            .padding(spacing::LG)
            .into()
    }

    fn select_all(&mut self) -> bool {
        self.tracks.select_all();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PlaylistWithTracks;
    use crate::test_utils::mock_album_with_tracks;

    fn loaded() -> PlaylistWithTracks {
        PlaylistWithTracks {
            playlist: Playlist {
                id: "pl-1".into(),
                name: "Evening Mix".into(),
                comment: None,
                owner: "demo".into(),
                song_count: 3,
                duration: 600,
            },
            tracks: mock_album_with_tracks("al-1", 3).tracks,
        }
    }

    #[test]
    fn test_play_track_sends_whole_playlist() {
        let (mut page, _) = PlaylistPage::new("pl-1");
        page.update(PageMessage::Loaded(Loaded::Playlist(Ok(loaded()))));

        let effects = page.update(PageMessage::PlayTrack(2));
        assert!(matches!(
            &effects[..],
            [Effect::PlaySongs { songs, index: 2 }] if songs.len() == 3
        ));
    }

    #[test]
    fn test_play_before_load_does_nothing() {
        let (mut page, _) = PlaylistPage::new("pl-1");
        assert!(page.update(PageMessage::PlayAll).is_empty());
    }

    #[test]
    fn test_restore_without_fetch() {
        let (mut page, _) = PlaylistPage::new("pl-1");
        page.update(PageMessage::Loaded(Loaded::Playlist(Ok(loaded()))));
        page.select_all();

        let SavedPage::Playlist(saved) = page.save() else {
            panic!("wrong snapshot");
        };
        let (restored, effects) = PlaylistPage::restore(saved);
        assert!(effects.iter().all(|e| !e.is_fetch()));
        assert_eq!(restored.title(), "Evening Mix");
        assert_eq!(restored.tracks().selected().len(), 3);
    }
}
