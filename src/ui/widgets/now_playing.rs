//! Card for the current track, shown at the left of the bottom panel.

use iced::font::{Font, Weight};
use iced::widget::{Space, button, column, image, mouse_area, row, text};
use iced::{Alignment, Element, Length};

use crate::backend::{ArtistRef, Song};
use crate::ui::covers::CoverCache;
use crate::ui::messages::Message;
use crate::ui::route::Route;
use crate::ui::theme::{self, layout, spacing, typography};
use crate::ui::views::helpers::link;

#[derive(Debug, Clone, Default)]
pub struct NowPlayingCard {
    song: Option<Song>,
}

impl NowPlayingCard {
    pub fn update(&mut self, song: Option<Song>) {
        self.song = song;
    }

    pub fn song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    /// Track title, `None` when empty or nothing plays.
    pub fn title(&self) -> Option<&str> {
        self.song
            .as_ref()
            .map(|s| s.title.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn album(&self) -> Option<&str> {
        self.song
            .as_ref()
            .map(|s| s.album.as_str())
            .filter(|a| !a.is_empty())
    }

    pub fn artists(&self) -> &[ArtistRef] {
        self.song.as_ref().map(|s| &s.artists[..]).unwrap_or(&[])
    }

    pub fn cover_id(&self) -> Option<&str> {
        self.song.as_ref().and_then(|s| s.cover_art.as_deref())
    }

    /// Whether the card currently shows the song with this id.
    pub fn is_showing(&self, song_id: &str) -> bool {
        self.song.as_ref().is_some_and(|s| s.id == song_id)
    }

    /// Reflect a favorite change made from the card menu.
    pub fn set_starred(&mut self, starred: bool) {
        if let Some(song) = &mut self.song {
            song.starred = starred;
        }
    }

    pub fn set_rating(&mut self, rating: u8) {
        if let Some(song) = &mut self.song {
            song.rating = rating.min(5);
        }
    }

    pub fn view<'a>(&'a self, covers: &'a CoverCache) -> Element<'a, Message> {
        let mut lines = column![].spacing(2).width(Length::Fill);

        if let Some(title) = self.title() {
            lines = lines.push(
                button(text(title).size(typography::SIZE_BODY).font(Font {
                    weight: Weight::Bold,
                    ..Font::DEFAULT
                }))
                .padding(0)
                .style(theme::button_link)
                .on_press(Message::NavigateTo(Route::NowPlaying)),
            );
        }

        let artists = self.artists();
        if !artists.is_empty() {
            let mut names = row![].align_y(Alignment::Center);
            for (i, artist) in artists.iter().enumerate() {
                if i > 0 {
                    names = names.push(text(", ").size(typography::SIZE_SMALL));
                }
                names = names.push(link(
                    &artist.name,
                    typography::SIZE_SMALL,
                    Message::NavigateTo(Route::Artist(artist.id.clone())),
                ));
            }
            lines = lines.push(names);
        }

        if let Some(album) = self.album() {
            let album_id = self.song.as_ref().map(|s| s.album_id.as_str()).unwrap_or("");
            lines = lines.push(if album_id.is_empty() {
                Element::from(text(album).size(typography::SIZE_SMALL))
            } else {
                link(
                    album,
                    typography::SIZE_SMALL,
                    Message::NavigateTo(Route::Album(album_id.to_string())),
                )
                .into()
            });
        }

        let mut card = row![Space::with_height(layout::NOW_PLAYING_MIN_HEIGHT)]
            .spacing(spacing::MD)
            .align_y(Alignment::Center);

        // Hidden until the thumbnail arrives
        if let Some(handle) = self.cover_id().and_then(|id| covers.thumbnail(id)) {
            card = card.push(
                mouse_area(
                    image(handle.clone())
                        .width(Length::Fixed(layout::NOW_PLAYING_COVER))
                        .height(Length::Fixed(layout::NOW_PLAYING_COVER)),
                )
                .on_press(Message::ShowCoverImage),
            );
        }
        card = card.push(lines);

        let area = mouse_area(card);
        if self.song.is_some() {
            area.on_right_press(Message::OpenNowPlayingMenu).into()
        } else {
            area.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_song;

    #[test]
    fn test_empty_card_hides_everything() {
        let card = NowPlayingCard::default();
        assert!(card.title().is_none());
        assert!(card.album().is_none());
        assert!(card.artists().is_empty());
        assert!(card.cover_id().is_none());
    }

    #[test]
    fn test_empty_fields_are_hidden() {
        let mut song = mock_song("s1", "al-1", 1);
        song.title = String::new();
        song.album = String::new();
        let mut card = NowPlayingCard::default();
        card.update(Some(song));
        assert!(card.title().is_none());
        assert!(card.album().is_none());
        assert!(!card.artists().is_empty());
    }

    #[test]
    fn test_update_replaces_song() {
        let mut card = NowPlayingCard::default();
        card.update(Some(mock_song("s1", "al-1", 1)));
        card.update(Some(mock_song("s2", "al-1", 2)));
        assert_eq!(card.title(), Some("Song s2"));
        card.update(None);
        assert!(card.song().is_none());
    }

    #[test]
    fn test_menu_changes_are_reflected() {
        let mut card = NowPlayingCard::default();
        card.set_starred(true);
        assert!(card.song().is_none());

        card.update(Some(mock_song("s1", "al-1", 1)));
        card.set_starred(true);
        card.set_rating(9);
        let song = card.song().cloned().unwrap();
        assert!(song.starred);
        assert_eq!(song.rating, 5);
    }
}
