//! Theme lookup tables.
//!
//! Named colors are resolved per variant (dark/light) with a fallback to
//! the base palette, named icons resolve to glyphs, and the widget style
//! functions used across the views live here.
//!
//! # Usage
//! ```ignore
//! use crate::ui::theme::{self, ColorName, IconName};
//!
//! let bg = theme::color(ColorName::PageBackground, variant);
//! let heart = theme::icon(IconName::Favorite);
//! ```

use iced::widget::{Text, button, container, text, text_input};
use iced::{Background, Border, Color, Theme};

// =============================================================================
// VARIANTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse the `appearance.theme` config value. Anything but "light" is dark.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("light") {
            ThemeVariant::Light
        } else {
            ThemeVariant::Dark
        }
    }
}

// =============================================================================
// COLORS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorName {
    /// Behind page content
    PageBackground,
    /// Window chrome: header bar, bottom panel
    Background,
    Button,
    InputBackground,
    Foreground,
    ForegroundMuted,
    Primary,
    ScrollBar,
    Hover,
    Border,
    Success,
    Error,
}

const fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color::from_rgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    )
}

/// Look up a named color for `variant`.
pub fn color(name: ColorName, variant: ThemeVariant) -> Color {
    use ColorName::*;
    use ThemeVariant::*;

    match (name, variant) {
        (PageBackground, Dark) => rgb8(15, 15, 15),
        (PageBackground, Light) => rgb8(255, 255, 255),
        (Background, Dark) => rgb8(35, 35, 35),
        (Background, Light) => rgb8(240, 240, 240),
        (Button, Dark) => rgba8(20, 20, 20, 50),
        (Button, Light) => rgba8(200, 200, 200, 240),
        (InputBackground, Dark) => rgba8(20, 20, 20, 50),
        (Foreground, Light) => rgb8(10, 10, 10),
        (Primary, Light) => rgb8(25, 25, 250),
        // Scroll bars follow the text color of the variant
        (ScrollBar, variant) => base_color(Foreground, variant),
        (name, variant) => base_color(name, variant),
    }
}

/// Base palette the named overrides fall back to.
fn base_color(name: ColorName, variant: ThemeVariant) -> Color {
    use ColorName::*;
    use ThemeVariant::*;

    match (name, variant) {
        (PageBackground, Dark) | (Background, Dark) => rgb8(23, 23, 24),
        (PageBackground, Light) | (Background, Light) => rgb8(237, 237, 237),
        (Button, Dark) => rgb8(40, 41, 46),
        (Button, Light) => rgb8(245, 245, 245),
        (InputBackground, Dark) => rgb8(32, 33, 36),
        (InputBackground, Light) => rgb8(243, 243, 243),
        (Foreground, Dark) | (ScrollBar, Dark) => rgb8(243, 243, 243),
        (Foreground, Light) | (ScrollBar, Light) => rgb8(33, 33, 33),
        (ForegroundMuted, Dark) => rgb8(161, 161, 170),
        (ForegroundMuted, Light) => rgb8(113, 113, 122),
        (Primary, _) => rgb8(41, 111, 246),
        (Hover, Dark) => rgba8(255, 255, 255, 15),
        (Hover, Light) => rgba8(0, 0, 0, 15),
        (Border, Dark) => rgb8(58, 58, 66),
        (Border, Light) => rgb8(212, 212, 216),
        (Success, _) => rgb8(34, 197, 94),
        (Error, _) => rgb8(239, 68, 68),
    }
}

/// Build the iced theme for a variant.
pub fn app_theme(variant: ThemeVariant) -> Theme {
    let palette = iced::theme::Palette {
        background: color(ColorName::Background, variant),
        text: color(ColorName::Foreground, variant),
        primary: color(ColorName::Primary, variant),
        success: color(ColorName::Success, variant),
        danger: color(ColorName::Error, variant),
    };
    let name = match variant {
        ThemeVariant::Dark => "Sonority Dark",
        ThemeVariant::Light => "Sonority Light",
    };
    Theme::custom(name.to_string(), palette)
}

/// Create a color with alpha transparency
pub const fn with_alpha(color: Color, alpha: f32) -> Color {
    Color {
        r: color.r,
        g: color.g,
        b: color.b,
        a: alpha,
    }
}

// =============================================================================
// ICONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconName {
    NowPlaying,
    Favorite,
    NotFavorite,
    Album,
    Artist,
    Genre,
    Playlist,
    Shuffle,
    Back,
    Forward,
    Reload,
    Settings,
    Search,
    Play,
    Pause,
    Next,
    Previous,
    RatingFilled,
    RatingEmpty,
    Close,
}

/// Look up the glyph for a named icon.
pub fn icon(name: IconName) -> char {
    match name {
        IconName::NowPlaying => '♫',
        IconName::Favorite => '♥',
        IconName::NotFavorite => '♡',
        IconName::Album => '◉',
        IconName::Artist => '☺',
        IconName::Genre => '♪',
        IconName::Playlist => '☰',
        IconName::Shuffle => '⇄',
        IconName::Back => '←',
        IconName::Forward => '→',
        IconName::Reload => '⟳',
        IconName::Settings => '⚙',
        IconName::Search => '⌕',
        IconName::Play => '▶',
        IconName::Pause => '‖',
        IconName::Next => '»',
        IconName::Previous => '«',
        IconName::RatingFilled => '★',
        IconName::RatingEmpty => '☆',
        IconName::Close => '×',
    }
}

/// Icon glyph as a text widget.
pub fn icon_text<'a>(name: IconName, size: u16) -> Text<'a> {
    text(icon(name).to_string()).size(size)
}

// =============================================================================
// SPACING & SIZES
// =============================================================================

pub mod spacing {
    pub const XS: u16 = 4;
    pub const SM: u16 = 8;
    pub const MD: u16 = 12;
    pub const LG: u16 = 16;
    pub const XL: u16 = 24;
}

pub mod typography {
    pub const SIZE_TITLE: u16 = 24;
    pub const SIZE_HEADING: u16 = 18;
    pub const SIZE_BODY: u16 = 14;
    pub const SIZE_SMALL: u16 = 12;
}

pub mod layout {
    /// Album grid cell width including the caption
    pub const GRID_CELL_WIDTH: f32 = 180.0;
    /// Album grid cell height including the caption
    pub const GRID_CELL_HEIGHT: f32 = 230.0;
    pub const GRID_COVER_SIZE: f32 = 160.0;
    pub const TRACK_ROW_HEIGHT: f32 = 32.0;
    pub const LIST_ROW_HEIGHT: f32 = 36.0;
    /// The now playing card never shrinks below this height
    pub const NOW_PLAYING_MIN_HEIGHT: f32 = 85.0;
    pub const NOW_PLAYING_COVER: f32 = 85.0;
    pub const SORT_PICKER_WIDTH: f32 = 170.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
}

// =============================================================================
// WIDGET STYLES
// =============================================================================

/// Solid background container for a named color.
pub fn surface(name: ColorName, variant: ThemeVariant) -> impl Fn(&Theme) -> container::Style {
    move |_| container::Style {
        background: Some(Background::Color(color(name, variant))),
        ..Default::default()
    }
}

/// Floating panels: popups, menus, toasts.
pub fn popup_style(theme: &Theme) -> container::Style {
    let palette = theme.palette();
    container::Style {
        background: Some(Background::Color(palette.background)),
        text_color: Some(palette.text),
        border: Border {
            color: with_alpha(palette.text, 0.2),
            width: 1.0,
            radius: radius::MD.into(),
        },
        shadow: iced::Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.35),
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 10.0,
        },
    }
}

/// Dimmed backdrop behind modal popups.
pub fn backdrop_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.5))),
        ..Default::default()
    }
}

/// Borderless button that only shows a background on hover.
pub fn button_ghost(theme: &Theme, status: button::Status) -> button::Style {
    let palette = theme.palette();
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => {
            Some(Background::Color(with_alpha(palette.text, 0.08)))
        }
        _ => None,
    };
    button::Style {
        background,
        text_color: if status == button::Status::Disabled {
            with_alpha(palette.text, 0.35)
        } else {
            palette.text
        },
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: Default::default(),
    }
}

/// Text-only button that looks like a hyperlink.
pub fn button_link(theme: &Theme, status: button::Status) -> button::Style {
    let palette = theme.palette();
    button::Style {
        background: None,
        text_color: match status {
            button::Status::Hovered | button::Status::Pressed => palette.primary,
            _ => palette.text,
        },
        border: Border::default(),
        shadow: Default::default(),
    }
}

/// Navigation bar button for the active page.
pub fn button_nav_active(theme: &Theme, status: button::Status) -> button::Style {
    let palette = theme.palette();
    button::Style {
        background: Some(Background::Color(with_alpha(palette.primary, 0.25))),
        text_color: palette.primary,
        ..button_ghost(theme, status)
    }
}

/// Row in a list or track list; `selected` rows are tinted.
pub fn row_highlight(selected: bool) -> impl Fn(&Theme) -> container::Style {
    move |theme| {
        let palette = theme.palette();
        container::Style {
            background: selected.then(|| Background::Color(with_alpha(palette.primary, 0.22))),
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

pub fn search_input_style(theme: &Theme, status: text_input::Status) -> text_input::Style {
    let palette = theme.palette();
    let border_color = match status {
        text_input::Status::Focused => palette.primary,
        text_input::Status::Hovered => with_alpha(palette.text, 0.4),
        _ => with_alpha(palette.text, 0.2),
    };
    text_input::Style {
        background: Background::Color(with_alpha(palette.text, 0.05)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::SM.into(),
        },
        icon: with_alpha(palette.text, 0.6),
        placeholder: with_alpha(palette.text, 0.45),
        value: palette.text,
        selection: with_alpha(palette.primary, 0.4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_name() {
        assert_eq!(ThemeVariant::from_name("Light"), ThemeVariant::Light);
        assert_eq!(ThemeVariant::from_name("dark"), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::from_name("solarized"), ThemeVariant::Dark);
    }

    #[test]
    fn test_page_background_overrides() {
        assert_eq!(
            color(ColorName::PageBackground, ThemeVariant::Dark),
            rgb8(15, 15, 15)
        );
        assert_eq!(
            color(ColorName::PageBackground, ThemeVariant::Light),
            Color::WHITE
        );
    }

    #[test]
    fn test_unlisted_combination_falls_back_to_base() {
        assert_eq!(
            color(ColorName::Foreground, ThemeVariant::Dark),
            base_color(ColorName::Foreground, ThemeVariant::Dark)
        );
        assert_eq!(
            color(ColorName::Primary, ThemeVariant::Dark),
            rgb8(41, 111, 246)
        );
    }

    #[test]
    fn test_scrollbar_follows_foreground() {
        for variant in [ThemeVariant::Dark, ThemeVariant::Light] {
            assert_eq!(
                color(ColorName::ScrollBar, variant),
                base_color(ColorName::Foreground, variant)
            );
        }
    }

    #[test]
    fn test_favorite_icons_differ() {
        assert_ne!(icon(IconName::Favorite), icon(IconName::NotFavorite));
    }
}
