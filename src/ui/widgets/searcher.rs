//! Search box with debounced change notification.
//!
//! Every keystroke bumps a sequence number and schedules a debounce tick.
//! Only the tick carrying the latest sequence number applies the search,
//! so a burst of typing ends in a single query.

use iced::Element;
use iced::widget::text_input;

use crate::ui::pages::{Effect, PageMessage, SEARCH_DEBOUNCE};
use crate::ui::theme::{self, typography};

#[derive(Debug)]
pub struct Searcher {
    text: String,
    seq: u64,
    input_id: text_input::Id,
    placeholder: &'static str,
}

/// What the page should do after the text changed.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchInput {
    /// Apply this text right away
    Apply(String),
    /// Wait for the debounce tick
    Pending(Effect),
}

impl Searcher {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            text: String::new(),
            seq: 0,
            input_id: text_input::Id::unique(),
            placeholder,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn input_id(&self) -> text_input::Id {
        self.input_id.clone()
    }

    /// Replace the text with no debounce, for filters applied locally.
    pub fn set_text(&mut self, text: String) {
        self.seq += 1;
        self.text = text;
    }

    /// Record an edit. Clearing the box applies immediately.
    pub fn on_input(&mut self, text: String) -> SearchInput {
        self.seq += 1;
        self.text = text;
        if self.text.is_empty() {
            SearchInput::Apply(String::new())
        } else {
            SearchInput::Pending(Effect::Debounce {
                seq: self.seq,
                delay: SEARCH_DEBOUNCE,
            })
        }
    }

    /// The text to search for if `seq` is still the latest edit.
    pub fn on_debounced(&self, seq: u64) -> Option<String> {
        (seq == self.seq).then(|| self.text.clone())
    }

    /// Enter pressed: search now and cancel any pending tick.
    pub fn on_submit(&mut self) -> String {
        self.seq += 1;
        self.text.clone()
    }

    pub fn view(&self) -> Element<'_, PageMessage> {
        text_input(self.placeholder, &self.text)
            .id(self.input_id.clone())
            .on_input(PageMessage::SearchChanged)
            .on_submit(PageMessage::SearchSubmitted)
            .padding([6, 10])
            .size(typography::SIZE_BODY)
            .width(iced::Length::Fixed(240.0))
            .style(theme::search_input_style)
            .into()
    }
}
