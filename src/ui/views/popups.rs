//! Modal popups: login, about, cover image, the now playing menu and the
//! playlist picker. Also the settings dropdown.

use iced::widget::{
    Space, TextInput, button, center, column, container, image, mouse_area, opaque, row,
    scrollable, text, text_input,
};
use iced::{Alignment, Element, Length, Padding};

use crate::backend::Playlist;
use crate::ui::controller::{LoginDialog, Popup};
use crate::ui::messages::{LoginField, Message};
use crate::ui::state::{APP_NAME, AppState};
use crate::ui::theme::{self, IconName, spacing, typography};

use super::helpers::status_message;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const POPUP_WIDTH: f32 = 360.0;
const COVER_POPUP_SIZE: f32 = 500.0;

/// The popup layered over a dimmed backdrop. Clicking the backdrop closes
/// escapable popups.
pub fn popup_layer<'a>(s: &'a AppState, popup: &'a Popup) -> Element<'a, Message> {
    let backdrop = mouse_area(
        container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::backdrop_style),
    );
    let backdrop = if popup.is_escapable() {
        backdrop.on_press(Message::ClosePopup)
    } else {
        backdrop
    };

    let content = match popup {
        Popup::Login(dialog) => login_view(dialog),
        Popup::About => about_view(),
        Popup::CoverImage { cover_id } => cover_view(s, cover_id),
        Popup::NowPlayingMenu => return menu_layer(opaque(backdrop), now_playing_menu(s)),
        Popup::AddToPlaylist { playlists, .. } => playlist_picker(playlists.as_deref()),
    };

    iced::widget::stack![
        opaque(backdrop),
        center(opaque(
            container(content)
                .padding(spacing::LG)
                .style(theme::popup_style)
        )),
    ]
    .into()
}

/// Context menus sit above the bottom panel rather than in the middle.
fn menu_layer<'a>(
    backdrop: Element<'a, Message>,
    menu: Element<'a, Message>,
) -> Element<'a, Message> {
    iced::widget::stack![
        backdrop,
        container(opaque(
            container(menu)
                .padding(spacing::XS)
                .style(theme::popup_style)
        ))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Left)
        .align_y(iced::alignment::Vertical::Bottom)
        .padding(Padding {
            top: 0.0,
            right: 0.0,
            bottom: 95.0,
            left: spacing::MD as f32,
        }),
    ]
    .into()
}

fn menu_item<'a>(label: impl ToString, msg: Message) -> Element<'a, Message> {
    button(text(label.to_string()).size(typography::SIZE_BODY))
        .width(Length::Fill)
        .padding([6, 12])
        .style(theme::button_ghost)
        .on_press(msg)
        .into()
}

fn login_view(dialog: &LoginDialog) -> Element<'_, Message> {
    let mut form = column![
        text("Connect to server").size(typography::SIZE_HEADING),
        login_field(dialog, "Server name", &dialog.server.name, LoginField::ServerName),
        login_field(dialog, "URL", &dialog.server.url, LoginField::Url),
        login_field(dialog, "Username", &dialog.server.username, LoginField::Username),
        login_field(dialog, "Password", &dialog.password, LoginField::Password).secure(true),
    ]
    .spacing(spacing::SM)
    .width(Length::Fixed(POPUP_WIDTH));

    if let Some(error) = &dialog.error {
        form = form.push(
            text(error)
                .size(typography::SIZE_SMALL)
                .style(text::danger),
        );
    }

    let label = if dialog.connecting {
        "Connecting..."
    } else {
        "Connect"
    };
    form.push(
        row![
            Space::with_width(Length::Fill),
            button(text(label).size(typography::SIZE_BODY))
                .padding([6, 16])
                .on_press_maybe(dialog.can_submit().then_some(Message::LoginSubmit)),
        ]
        .align_y(Alignment::Center),
    )
    .into()
}

fn login_field<'a>(
    dialog: &LoginDialog,
    placeholder: &str,
    value: &str,
    which: LoginField,
) -> TextInput<'a, Message> {
    let input = text_input(placeholder, value)
        .padding(spacing::SM)
        .style(theme::search_input_style)
        .on_submit(Message::LoginSubmit);
    // Read-only while a connection attempt is running
    if dialog.connecting {
        input
    } else {
        input.on_input(move |v| Message::LoginFieldChanged(which, v))
    }
}

fn about_view<'a>() -> Element<'a, Message> {
    column![
        row![
            theme::icon_text(IconName::NowPlaying, typography::SIZE_TITLE),
            text(APP_NAME).size(typography::SIZE_TITLE),
        ]
        .spacing(spacing::SM)
        .align_y(Alignment::Center),
        text(format!("Version {}", VERSION)).size(typography::SIZE_SMALL),
        text("A desktop client for Subsonic-compatible music servers.")
            .size(typography::SIZE_BODY),
        row![
            Space::with_width(Length::Fill),
            button(text("Close").size(typography::SIZE_BODY))
                .padding([6, 16])
                .on_press(Message::ClosePopup),
        ],
    ]
    .spacing(spacing::MD)
    .width(Length::Fixed(POPUP_WIDTH))
    .into()
}

fn cover_view<'a>(s: &'a AppState, cover_id: &str) -> Element<'a, Message> {
    let handle = s
        .covers
        .full(cover_id)
        .or_else(|| s.covers.thumbnail(cover_id));
    match handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(COVER_POPUP_SIZE))
            .height(Length::Fixed(COVER_POPUP_SIZE))
            .into(),
        None => status_message("Loading cover..."),
    }
}

fn now_playing_menu(s: &AppState) -> Element<'_, Message> {
    let current = s.now_playing.song().map(|song| song.rating).unwrap_or(0);
    let stars = (0..=5u8).map(|rating| {
        let label = if rating == 0 {
            "None".to_string()
        } else {
            theme::icon(IconName::RatingFilled)
                .to_string()
                .repeat(rating as usize)
        };
        button(text(label).size(typography::SIZE_SMALL))
            .padding([4, 6])
            .style(if rating == current {
                theme::button_nav_active
            } else {
                theme::button_ghost
            })
            .on_press(Message::SetRating(rating))
            .into()
    });

    column![
        menu_item("Set favorite", Message::SetFavorite(true)),
        menu_item("Unset favorite", Message::SetFavorite(false)),
        container(
            column![
                text("Set rating").size(typography::SIZE_SMALL),
                iced::widget::Row::with_children(stars).spacing(2),
            ]
            .spacing(spacing::XS)
        )
        .padding([6, 12]),
        menu_item("Add to playlist...", Message::AddToPlaylist),
    ]
    .width(Length::Fixed(260.0))
    .into()
}

fn playlist_picker(playlists: Option<&[Playlist]>) -> Element<'_, Message> {
    let body: Element<'_, Message> = match playlists {
        None => status_message("Loading playlists..."),
        Some([]) => status_message("No playlists"),
        Some(playlists) => scrollable(column(playlists.iter().map(|playlist| {
            menu_item(
                &playlist.name,
                Message::AddToPlaylistChosen(playlist.clone()),
            )
        })))
        .height(Length::Fixed(300.0))
        .into(),
    };

    column![
        text("Add to playlist").size(typography::SIZE_HEADING),
        body,
        row![
            Space::with_width(Length::Fill),
            button(text("Cancel").size(typography::SIZE_BODY))
                .padding([6, 16])
                .style(theme::button_ghost)
                .on_press(Message::ClosePopup),
        ],
    ]
    .spacing(spacing::MD)
    .width(Length::Fixed(POPUP_WIDTH))
    .into()
}

/// Dropdown under the settings button.
pub fn settings_menu<'a>() -> Element<'a, Message> {
    let backdrop = mouse_area(Space::new(Length::Fill, Length::Fill))
        .on_press(Message::ToggleSettingsMenu);

    let menu = container(
        column![
            menu_item("Log Out", Message::Logout),
            menu_item("About...", Message::ShowAbout),
        ]
        .width(Length::Fixed(180.0)),
    )
    .padding(spacing::XS)
    .style(theme::popup_style);

    iced::widget::stack![
        backdrop,
        container(opaque(menu))
            .width(Length::Fill)
            .align_x(iced::alignment::Horizontal::Right)
            .padding(Padding {
                top: 48.0,
                right: spacing::MD as f32,
                bottom: 0.0,
                left: 0.0,
            }),
    ]
    .into()
}
