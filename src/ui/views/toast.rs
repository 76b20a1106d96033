//! Toast notification component for non-blocking user feedback.
//!
//! Toasts are ephemeral messages stacked above the bottom panel that
//! auto-dismiss after a fixed duration. Failed backend calls end up here.
//!
//! # Example
//! ```ignore
//! app.toasts.success("Added to Evening Mix");
//! app.toasts.error("Failed to load album: not connected");
//! ```

use std::time::{Duration, Instant};

use iced::widget::{Space, button, container, row, text};
use iced::{Element, Length, Padding};

use crate::ui::messages::Message;
use crate::ui::theme::{self, IconName, spacing, typography};

/// Duration before toasts auto-dismiss
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Maximum number of visible toasts at once
pub const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    fn glyph(self) -> char {
        match self {
            ToastLevel::Success => '✓',
            ToastLevel::Error => '!',
            ToastLevel::Info => 'i',
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    id: u64,
    level: ToastLevel,
    message: String,
    created_at: Instant,
}

impl Toast {
    fn new(id: u64, level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            id,
            level,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn level(&self) -> ToastLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast::new(id, level, message));
        // Keep only the most recent toasts
        if self.toasts.len() > MAX_VISIBLE_TOASTS * 2 {
            self.toasts.drain(0..MAX_VISIBLE_TOASTS);
        }
    }

    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn remove_expired(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Most recent unexpired toasts, up to [`MAX_VISIBLE_TOASTS`]
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        let start = self.toasts.len().saturating_sub(MAX_VISIBLE_TOASTS);
        self.toasts[start..].iter().filter(|t| !t.is_expired())
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }
}

fn toast_view(toast: &Toast) -> Element<'_, Message> {
    let level = toast.level;

    let content = row![
        text(level.glyph().to_string())
            .size(typography::SIZE_BODY)
            .style(move |t: &iced::Theme| text::Style {
                color: Some(accent(t, level)),
            }),
        Space::with_width(spacing::SM),
        text(&toast.message).size(typography::SIZE_BODY),
        Space::with_width(Length::Fill),
        button(theme::icon_text(IconName::Close, typography::SIZE_SMALL))
            .padding([spacing::XS, spacing::SM])
            .style(theme::button_ghost)
            .on_press(Message::ToastDismiss(toast.id)),
    ]
    .align_y(iced::Alignment::Center)
    .padding([spacing::SM, spacing::MD]);

    container(content)
        .width(Length::Fixed(400.0))
        .style(move |t| container::Style {
            border: iced::Border {
                color: accent(t, level),
                width: 2.0,
                radius: theme::radius::MD.into(),
            },
            ..theme::popup_style(t)
        })
        .into()
}

fn accent(theme: &iced::Theme, level: ToastLevel) -> iced::Color {
    let palette = theme.palette();
    match level {
        ToastLevel::Success => palette.success,
        ToastLevel::Error => palette.danger,
        ToastLevel::Info => palette.primary,
    }
}

/// Toasts stacked at the bottom-right, above the bottom panel.
pub fn toast_overlay(queue: &ToastQueue) -> Option<Element<'_, Message>> {
    let toasts: Vec<Element<Message>> = queue.visible().map(toast_view).collect();
    if toasts.is_empty() {
        return None;
    }

    let overlay = container(
        iced::widget::column(toasts)
            .spacing(spacing::SM)
            .align_x(iced::Alignment::End),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(iced::alignment::Horizontal::Right)
    .align_y(iced::alignment::Vertical::Bottom)
    .padding(Padding {
        top: 0.0,
        right: spacing::XL as f32,
        bottom: 110.0,
        left: 0.0,
    });

    Some(overlay.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut queue = ToastQueue::default();
        queue.error("one");
        queue.success("two");
        let ids: Vec<u64> = queue.visible().map(Toast::id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_remove() {
        let mut queue = ToastQueue::default();
        queue.info("hello");
        queue.remove(0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_only_recent_toasts_visible() {
        let mut queue = ToastQueue::default();
        for i in 0..8 {
            queue.error(format!("error {}", i));
        }
        let visible: Vec<&str> = queue.visible().map(Toast::message).collect();
        assert_eq!(visible.len(), MAX_VISIBLE_TOASTS);
        assert_eq!(visible.last(), Some(&"error 7"));
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut queue = ToastQueue::default();
        for i in 0..(MAX_VISIBLE_TOASTS * 2 + 1) {
            queue.info(format!("{}", i));
        }
        assert!(queue.toasts.len() <= MAX_VISIBLE_TOASTS * 2);
        assert_eq!(queue.visible().last().map(Toast::level), Some(ToastLevel::Info));
    }
}
