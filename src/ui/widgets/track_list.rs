//! Virtualized track table with row selection.

use std::collections::BTreeSet;

use iced::widget::{Space, column, container, mouse_area, row, scrollable, text};
use iced::{Alignment, Element, Length};

use crate::backend::Song;
use crate::backend::model::format_duration;
use crate::ui::pages::{Effect, PageMessage, ScrollPosition, ViewContext, scroll_effect};
use crate::ui::theme::{self, layout, spacing, typography};
use crate::ui::views::helpers::calc_visible_range;

#[derive(Debug, Clone, PartialEq)]
pub struct TrackListState {
    pub tracks: Vec<Song>,
    pub selected: BTreeSet<usize>,
    pub scroll: ScrollPosition,
}

#[derive(Debug)]
pub struct TrackList {
    tracks: Vec<Song>,
    selected: BTreeSet<usize>,
    scroll: ScrollPosition,
    scroll_id: scrollable::Id,
    show_album: bool,
}

impl TrackList {
    pub fn new(tracks: Vec<Song>) -> Self {
        Self {
            tracks,
            selected: BTreeSet::new(),
            scroll: ScrollPosition::default(),
            scroll_id: scrollable::Id::unique(),
            show_album: false,
        }
    }

    /// Show the album column, for lists that mix albums.
    pub fn show_album(mut self, show: bool) -> Self {
        self.show_album = show;
        self
    }

    pub fn from_state(state: TrackListState) -> (Self, Vec<Effect>) {
        let mut list = Self::new(state.tracks);
        list.selected = state.selected;
        list.scroll = state.scroll;
        let effects = scroll_effect(&list.scroll_id, list.scroll.offset);
        (list, effects)
    }

    pub fn save_to_state(&self) -> TrackListState {
        TrackListState {
            tracks: self.tracks.clone(),
            selected: self.selected.clone(),
            scroll: self.scroll,
        }
    }

    /// Replace the rows. Selection is cleared.
    pub fn set_tracks(&mut self, tracks: Vec<Song>) {
        self.tracks = tracks;
        self.selected.clear();
    }

    pub fn tracks(&self) -> &[Song] {
        &self.tracks
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    /// Select a single row.
    pub fn select(&mut self, index: usize) {
        self.selected.clear();
        if index < self.tracks.len() {
            self.selected.insert(index);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = (0..self.tracks.len()).collect();
    }

    pub fn on_scroll(&mut self, position: ScrollPosition) {
        self.scroll = position;
    }

    pub fn view<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, PageMessage> {
        let (start, end, top, bottom) = calc_visible_range(
            self.scroll.offset,
            self.scroll.viewport_height,
            self.tracks.len(),
            layout::TRACK_ROW_HEIGHT,
        );

        let rows = self.tracks[start..end]
            .iter()
            .enumerate()
            .map(|(i, song)| self.track_row(start + i, song, ctx.now_playing));

        let header = self.header();
        let body = scrollable(
            column![Space::with_height(Length::Fixed(top))]
                .extend(rows)
                .push(Space::with_height(Length::Fixed(bottom)))
                .width(Length::Fill),
        )
        .id(self.scroll_id.clone())
        .on_scroll(|viewport| PageMessage::Scrolled(viewport.into()))
        .height(Length::Fill)
        .width(Length::Fill);

        column![header, body].spacing(spacing::XS).into()
    }

    fn header(&self) -> Element<'_, PageMessage> {
        let label = |s: &'static str| text(s).size(typography::SIZE_SMALL);
        let mut header = row![
            label("#").width(Length::Fixed(40.0)),
            label("Title").width(Length::FillPortion(4)),
            label("Artist").width(Length::FillPortion(3)),
        ];
        if self.show_album {
            header = header.push(label("Album").width(Length::FillPortion(3)));
        }
        header
            .push(label("Time").width(Length::Fixed(60.0)))
            .padding([0, spacing::SM])
            .into()
    }

    fn track_row<'a>(
        &'a self,
        index: usize,
        song: &'a Song,
        now_playing: Option<&str>,
    ) -> Element<'a, PageMessage> {
        let playing = now_playing == Some(song.id.as_str());
        let number = if playing {
            theme::icon(theme::IconName::Play).to_string()
        } else {
            song.track
                .map(|t| t.to_string())
                .unwrap_or_else(|| (index + 1).to_string())
        };

        let mut cells = row![
            text(number)
                .size(typography::SIZE_SMALL)
                .width(Length::Fixed(40.0)),
            text(&song.title)
                .size(typography::SIZE_BODY)
                .width(Length::FillPortion(4)),
            text(song.artist_names())
                .size(typography::SIZE_BODY)
                .width(Length::FillPortion(3)),
        ]
        .align_y(Alignment::Center);

        if self.show_album {
            cells = cells.push(
                text(&song.album)
                    .size(typography::SIZE_BODY)
                    .width(Length::FillPortion(3)),
            );
        }
        cells = cells.push(
            text(format_duration(song.duration))
                .size(typography::SIZE_SMALL)
                .width(Length::Fixed(60.0)),
        );

        mouse_area(
            container(cells)
                .height(Length::Fixed(layout::TRACK_ROW_HEIGHT))
                .padding([0, spacing::SM])
                .align_y(Alignment::Center)
                .width(Length::Fill)
                .style(theme::row_highlight(self.selected.contains(&index))),
        )
        .on_press(PageMessage::TrackClicked(index))
        .on_double_click(PageMessage::PlayTrack(index))
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_album_with_tracks;

    fn list() -> TrackList {
        TrackList::new(mock_album_with_tracks("al-1", 4).tracks)
    }

    #[test]
    fn test_select_replaces_selection() {
        let mut list = list();
        list.select(1);
        list.select(3);
        assert_eq!(list.selected().iter().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_select_out_of_range_clears() {
        let mut list = list();
        list.select(1);
        list.select(10);
        assert!(list.selected().is_empty());
    }

    #[test]
    fn test_select_all() {
        let mut list = list();
        list.select_all();
        assert_eq!(list.selected().len(), 4);
    }

    #[test]
    fn test_state_round_trip() {
        let mut list = list();
        list.select(2);
        list.on_scroll(ScrollPosition {
            offset: 64.0,
            viewport_height: 300.0,
            content_height: 800.0,
        });

        let (restored, effects) = TrackList::from_state(list.save_to_state());
        assert_eq!(restored.save_to_state(), list.save_to_state());
        assert!(matches!(&effects[..], [Effect::ScrollTo { offset, .. }] if *offset == 64.0));
    }

    #[test]
    fn test_set_tracks_clears_selection() {
        let mut list = list();
        list.select_all();
        list.set_tracks(mock_album_with_tracks("al-2", 2).tracks);
        assert!(list.selected().is_empty());
        assert_eq!(list.tracks().len(), 2);
    }
}
