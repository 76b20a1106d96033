//! Helper functions shared across view components.

use iced::widget::{Button, button, container, image, text};
use iced::{Element, Length};

use crate::ui::covers::CoverCache;
use crate::ui::theme::{self, IconName, typography};

/// Rows rendered beyond the visible area in each direction
pub const SCROLL_BUFFER: usize = 5;

/// Assumed viewport height before the first scroll event arrives
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;

/// Calculate visible range for virtualized lists.
///
/// Returns `(start, end, top_padding, bottom_padding)`.
pub fn calc_visible_range(
    scroll: f32,
    viewport: f32,
    total: usize,
    row_h: f32,
) -> (usize, usize, f32, f32) {
    let vp = if viewport > 0.0 {
        viewport
    } else {
        DEFAULT_VIEWPORT_HEIGHT
    };
    let start = ((scroll.max(0.0) / row_h).floor() as usize)
        .saturating_sub(SCROLL_BUFFER)
        .min(total);
    let end = (start + (vp / row_h).ceil() as usize + 2 * SCROLL_BUFFER).min(total);
    (
        start,
        end,
        start as f32 * row_h,
        total.saturating_sub(end) as f32 * row_h,
    )
}

/// Text button styled as a hyperlink.
pub fn link<'a, M: Clone + 'a>(label: impl ToString, size: u16, msg: M) -> Button<'a, M> {
    button(text(label.to_string()).size(size))
        .padding(0)
        .style(theme::button_link)
        .on_press(msg)
}

/// Icon-only ghost button, disabled when `msg` is `None`.
pub fn icon_button<'a, M: Clone + 'a>(icon: IconName, size: u16, msg: Option<M>) -> Button<'a, M> {
    button(theme::icon_text(icon, size))
        .padding([4, 8])
        .style(theme::button_ghost)
        .on_press_maybe(msg)
}

/// Cover thumbnail from the cache, or an album glyph while it loads.
pub fn cover<'a, M: 'a>(
    covers: &'a CoverCache,
    cover_id: Option<&str>,
    size: f32,
) -> Element<'a, M> {
    match cover_id.and_then(|id| covers.thumbnail(id)) {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into(),
        None => container(theme::icon_text(IconName::Album, (size / 3.0) as u16))
            .center_x(Length::Fixed(size))
            .center_y(Length::Fixed(size))
            .style(container::rounded_box)
            .into(),
    }
}

/// Centered status line for empty, loading and failed states.
pub fn status_message<'a, M: 'a>(message: impl ToString) -> Element<'a, M> {
    container(text(message.to_string()).size(typography::SIZE_BODY))
        .center_x(Length::Fill)
        .padding(theme::spacing::XL)
        .into()
}
