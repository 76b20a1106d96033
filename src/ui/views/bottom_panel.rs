//! Bottom panel: current track card on the left, transport in the middle.

use iced::widget::{Space, container, row};
use iced::{Alignment, Element, Length};

use crate::backend::PlayerStatus;
use crate::ui::messages::Message;
use crate::ui::state::AppState;
use crate::ui::theme::{self, ColorName, IconName, spacing, typography};

use super::helpers::icon_button;

pub fn bottom_panel(s: &AppState) -> Element<'_, Message> {
    let has_song = s.now_playing.song().is_some();
    let play_icon = if s.player_status == PlayerStatus::Playing {
        IconName::Pause
    } else {
        IconName::Play
    };

    let transport = row![
        icon_button(
            IconName::Previous,
            typography::SIZE_HEADING,
            has_song.then_some(Message::Previous)
        ),
        icon_button(
            play_icon,
            typography::SIZE_TITLE,
            has_song.then_some(Message::PlayPause)
        ),
        icon_button(
            IconName::Next,
            typography::SIZE_HEADING,
            has_song.then_some(Message::Next)
        ),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center);

    container(
        row![
            container(s.now_playing.view(&s.covers)).width(Length::FillPortion(2)),
            container(transport).center_x(Length::FillPortion(1)),
            Space::with_width(Length::FillPortion(2)),
        ]
        .align_y(Alignment::Center)
        .padding([spacing::XS, spacing::MD]),
    )
    .width(Length::Fill)
    .style(theme::surface(ColorName::Background, s.variant))
    .into()
}
