//! The play queue.

use iced::widget::{column, text};
use iced::Element;

use super::{Effect, Fetch, Loaded, Page, PageMessage, SavedPage, ViewContext};
use crate::backend::Song;
use crate::ui::route::Route;
use crate::ui::theme::{spacing, typography};
use crate::ui::views::helpers::status_message;
use crate::ui::widgets::track_list::{TrackList, TrackListState};

#[derive(Debug, Clone)]
pub struct SavedNowPlayingPage {
    pub queue: TrackListState,
    pub loaded: bool,
}

#[derive(Debug)]
pub struct NowPlayingPage {
    queue: TrackList,
    loaded: bool,
}

impl NowPlayingPage {
    pub fn new() -> (Self, Vec<Effect>) {
        let page = Self {
            queue: TrackList::new(Vec::new()).show_album(true),
            loaded: false,
        };
        (page, vec![Effect::Fetch(Fetch::Queue)])
    }

    pub fn restore(saved: SavedNowPlayingPage) -> (Self, Vec<Effect>) {
        if !saved.loaded {
            return Self::new();
        }
        // Playback may have replaced the queue while the page was away
        let (queue, mut effects) = TrackList::from_state(saved.queue);
        effects.push(Effect::SyncQueue);
        let page = Self {
            queue: queue.show_album(true),
            loaded: true,
        };
        (page, effects)
    }

    pub fn queue(&self) -> &TrackList {
        &self.queue
    }
}

impl Page for NowPlayingPage {
    fn route(&self) -> Route {
        Route::NowPlaying
    }

    fn title(&self) -> String {
        "Now Playing".to_string()
    }

    fn save(&self) -> SavedPage {
        SavedPage::NowPlaying(SavedNowPlayingPage {
            queue: self.queue.save_to_state(),
            loaded: self.loaded,
        })
    }

    fn reload(&mut self) -> Vec<Effect> {
        vec![Effect::Fetch(Fetch::Queue)]
    }

    fn update(&mut self, message: PageMessage) -> Vec<Effect> {
        match message {
            PageMessage::Loaded(Loaded::Queue { songs, .. }) => {
                // An unchanged queue keeps its selection
                let same = self.loaded
                    && songs.len() == self.queue.tracks().len()
                    && songs.iter().zip(self.queue.tracks()).all(|(a, b)| a.id == b.id);
                if !same {
                    self.queue.set_tracks(songs);
                }
                self.loaded = true;
                Vec::new()
            }
            PageMessage::Scrolled(position) => {
                self.queue.on_scroll(position);
                Vec::new()
            }
            PageMessage::TrackClicked(index) => {
                self.queue.select(index);
                Vec::new()
            }
            PageMessage::PlayTrack(index) if index < self.queue.tracks().len() => {
                vec![Effect::PlaySongs {
                    songs: self.queue.tracks().to_vec(),
                    index,
                }]
            }
            PageMessage::Navigate(route) => vec![Effect::Navigate(route)],
            _ => Vec::new(),
        }
    }

    fn view<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, PageMessage> {
        let body = if !self.loaded {
            status_message("Loading queue…")
        } else if self.queue.tracks().is_empty() {
            status_message("The play queue is empty")
        } else {
            self.queue.view(ctx)
        };

        column![text(self.title()).size(typography::SIZE_TITLE), body]
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .into()
    }

    fn select_all(&mut self) -> bool {
        self.queue.select_all();
        true
    }

    /// The queue may have been replaced along with the song.
    fn on_song_changed(&mut self, _now: Option<&Song>) -> Vec<Effect> {
        vec![Effect::Fetch(Fetch::Queue)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_album_with_tracks;

    fn loaded_page() -> NowPlayingPage {
        let (mut page, _) = NowPlayingPage::new();
        page.update(PageMessage::Loaded(Loaded::Queue {
            songs: mock_album_with_tracks("al-1", 3).tracks,
            current: Some("al-1-s1".into()),
        }));
        page
    }

    #[test]
    fn test_new_fetches_queue() {
        let (_, effects) = NowPlayingPage::new();
        assert_eq!(effects, vec![Effect::Fetch(Fetch::Queue)]);
    }

    #[test]
    fn test_song_change_refreshes_queue() {
        let mut page = loaded_page();
        let effects = page.on_song_changed(None);
        assert_eq!(effects, vec![Effect::Fetch(Fetch::Queue)]);
    }

    #[test]
    fn test_play_track_out_of_range_ignored() {
        let mut page = loaded_page();
        assert!(page.update(PageMessage::PlayTrack(7)).is_empty());
        assert!(matches!(
            &page.update(PageMessage::PlayTrack(1))[..],
            [Effect::PlaySongs { index: 1, .. }]
        ));
    }

    #[test]
    fn test_restore_loaded_queue_without_fetch() {
        let page = loaded_page();
        let SavedPage::NowPlaying(saved) = page.save() else {
            panic!("wrong snapshot");
        };
        let (restored, effects) = NowPlayingPage::restore(saved);
        assert!(effects.iter().all(|e| !e.is_fetch()));
        assert!(effects.contains(&Effect::SyncQueue));
        assert_eq!(restored.queue().tracks().len(), 3);
    }

    #[test]
    fn test_restored_page_catches_up_with_new_queue() {
        let page = loaded_page();
        let SavedPage::NowPlaying(saved) = page.save() else {
            panic!("wrong snapshot");
        };
        let (mut restored, _) = NowPlayingPage::restore(saved);

        let replaced = mock_album_with_tracks("al-2", 5).tracks;
        restored.update(PageMessage::Loaded(Loaded::Queue {
            songs: replaced.clone(),
            current: Some(replaced[0].id.clone()),
        }));
        let ids: Vec<_> = restored.queue().tracks().iter().map(|s| &s.id).collect();
        assert_eq!(ids, replaced.iter().map(|s| &s.id).collect::<Vec<_>>());
    }

    #[test]
    fn test_unchanged_queue_keeps_selection() {
        let mut page = loaded_page();
        page.update(PageMessage::TrackClicked(2));
        let SavedPage::NowPlaying(saved) = page.save() else {
            panic!("wrong snapshot");
        };
        let (mut restored, _) = NowPlayingPage::restore(saved);
        restored.update(PageMessage::Loaded(Loaded::Queue {
            songs: mock_album_with_tracks("al-1", 3).tracks,
            current: None,
        }));
        assert!(restored.queue().selected().contains(&2));
    }
}
