//! The browsing pane: the current page, its back/forward history and the
//! navigation bar above it.
//!
//! Each installed page gets a fresh [`PageId`]. Async results carry the id
//! of the page that requested them, and messages for an id that is no
//! longer current are dropped.

use iced::widget::{Space, button, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::history::History;
use super::messages::Message;
use super::pages::{AnyPage, Effect, PageMessage, SavedPage, ViewContext};
use super::route::Route;
use super::theme::{self, ColorName, IconName, spacing, typography};
use super::views::helpers::icon_button;
use crate::backend::Song;

/// Identifies one installed page instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(u64);

#[derive(Debug)]
pub struct BrowsingPane {
    current: Option<(PageId, AnyPage)>,
    next_id: u64,
    history: History<SavedPage>,
    navigation_enabled: bool,
    settings_menu_open: bool,
}

impl Default for BrowsingPane {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowsingPane {
    /// Empty pane with navigation disabled until a server is connected.
    pub fn new() -> Self {
        Self {
            current: None,
            next_id: 0,
            history: History::new(),
            navigation_enabled: false,
            settings_menu_open: false,
        }
    }

    fn install(&mut self, page: AnyPage) -> PageId {
        let id = PageId(self.next_id);
        self.next_id += 1;
        tracing::debug!(target: "ui::nav", ?id, route = %page.page().route(), "Installed page");
        self.current = Some((id, page));
        id
    }

    /// Show a new page, pushing the current one onto the back stack and
    /// clearing the forward stack.
    pub fn navigate(&mut self, page: AnyPage) -> PageId {
        if let Some((_, leaving)) = self.current.take() {
            self.history.push(leaving.page().save());
        }
        self.install(page)
    }

    /// Replace the current page without recording history.
    pub fn set_page(&mut self, page: Option<AnyPage>) -> Option<PageId> {
        match page {
            Some(page) => Some(self.install(page)),
            None => {
                self.current = None;
                None
            }
        }
    }

    pub fn go_back(&mut self) -> Option<(PageId, Vec<Effect>)> {
        if !self.navigation_enabled {
            return None;
        }
        let previous = self.history.pop_back()?;
        if let Some((_, leaving)) = self.current.take() {
            self.history.push_forward(leaving.page().save());
        }
        tracing::info!(target: "ui::nav", route = %previous.route(), "Back");
        let (page, effects) = previous.restore();
        Some((self.install(page), effects))
    }

    pub fn go_forward(&mut self) -> Option<(PageId, Vec<Effect>)> {
        if !self.navigation_enabled {
            return None;
        }
        let next = self.history.pop_forward()?;
        if let Some((_, leaving)) = self.current.take() {
            self.history.push_back(leaving.page().save());
        }
        tracing::info!(target: "ui::nav", route = %next.route(), "Forward");
        let (page, effects) = next.restore();
        Some((self.install(page), effects))
    }

    /// Reload the current page in place.
    pub fn reload(&mut self) -> Option<(PageId, Vec<Effect>)> {
        let (id, page) = self.current.as_mut()?;
        tracing::info!(target: "ui::nav", route = %page.page().route(), "Reload");
        Some((*id, page.page_mut().reload()))
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Route a message to the page it was meant for. Returns `None` if that
    /// page is no longer shown.
    pub fn update_page(&mut self, id: PageId, message: PageMessage) -> Option<Vec<Effect>> {
        match &mut self.current {
            Some((current, page)) if *current == id => Some(page.page_mut().update(message)),
            _ => {
                tracing::debug!(target: "ui::nav", ?id, "Dropping message for a page no longer shown");
                None
            }
        }
    }

    pub fn on_song_changed(&mut self, now: Option<&Song>) -> Option<(PageId, Vec<Effect>)> {
        let (id, page) = self.current.as_mut()?;
        Some((*id, page.page_mut().on_song_changed(now)))
    }

    /// Search box of the current page, if it has one.
    pub fn search_input_id(&self) -> Option<text_input::Id> {
        let (_, page) = self.current.as_ref()?;
        page.page().searchable().map(|s| s.search_input_id())
    }

    pub fn select_all(&mut self) -> bool {
        match &mut self.current {
            Some((_, page)) => page.page_mut().select_all(),
            None => false,
        }
    }

    pub fn current(&self) -> Option<&AnyPage> {
        self.current.as_ref().map(|(_, page)| page)
    }

    pub fn current_id(&self) -> Option<PageId> {
        self.current.as_ref().map(|(id, _)| *id)
    }

    pub fn current_route(&self) -> Option<Route> {
        self.current().map(|page| page.page().route())
    }

    pub fn enable_navigation(&mut self) {
        self.navigation_enabled = true;
    }

    pub fn disable_navigation(&mut self) {
        self.navigation_enabled = false;
        self.settings_menu_open = false;
    }

    pub fn is_navigation_enabled(&self) -> bool {
        self.navigation_enabled
    }

    pub fn can_go_back(&self) -> bool {
        self.navigation_enabled && self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.navigation_enabled && self.history.can_go_forward()
    }

    pub fn toggle_settings_menu(&mut self) {
        self.settings_menu_open = !self.settings_menu_open;
    }

    pub fn close_settings_menu(&mut self) -> bool {
        std::mem::replace(&mut self.settings_menu_open, false)
    }

    pub fn is_settings_menu_open(&self) -> bool {
        self.settings_menu_open
    }

    pub fn view<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, Message> {
        let page: Element<'a, Message> = match &self.current {
            Some((id, page)) => {
                let id = *id;
                page.page()
                    .view(ctx)
                    .map(move |message| Message::Page(id, message))
            }
            None => Space::new(Length::Fill, Length::Fill).into(),
        };

        iced::widget::column![
            self.nav_bar(ctx),
            container(page)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(theme::surface(ColorName::PageBackground, ctx.variant)),
        ]
        .into()
    }

    fn nav_bar<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, Message> {
        let enabled = self.navigation_enabled;
        let active = self.current_route().and_then(|r| r.nav_index());

        let history_buttons = row![
            icon_button(
                IconName::Back,
                typography::SIZE_HEADING,
                self.can_go_back().then_some(Message::GoBack)
            ),
            icon_button(
                IconName::Forward,
                typography::SIZE_HEADING,
                self.can_go_forward().then_some(Message::GoForward)
            ),
            icon_button(
                IconName::Reload,
                typography::SIZE_HEADING,
                (enabled && self.current.is_some()).then_some(Message::Reload)
            ),
        ]
        .spacing(spacing::XS);

        let nav_buttons = Route::NAV_BUTTONS.iter().enumerate().map(|(i, route)| {
            let label = row![
                theme::icon_text(route.icon(), typography::SIZE_BODY),
                text(route.label()).size(typography::SIZE_BODY),
            ]
            .spacing(spacing::XS)
            .align_y(Alignment::Center);

            button(label)
                .padding([6, 10])
                .style(if active == Some(i) {
                    theme::button_nav_active
                } else {
                    theme::button_ghost
                })
                .on_press_maybe(enabled.then(|| Message::NavigateTo(route.clone())))
                .into()
        });

        container(
            row![
                history_buttons,
                Space::with_width(spacing::LG),
                iced::widget::Row::with_children(nav_buttons).spacing(spacing::XS),
                Space::with_width(Length::Fill),
                icon_button(
                    IconName::Settings,
                    typography::SIZE_HEADING,
                    Some(Message::ToggleSettingsMenu)
                ),
            ]
            .align_y(Alignment::Center)
            .padding([spacing::SM, spacing::MD]),
        )
        .width(Length::Fill)
        .style(theme::surface(ColorName::Background, ctx.variant))
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AlbumQuery, AlbumSortOrder};
    use crate::ui::pages::{AlbumPage, AlbumsPage, ListKind, ListPage, Loaded};
    use crate::test_utils::{mock_album_with_tracks, mock_albums};

    fn albums_page() -> AnyPage {
        AnyPage::Albums(AlbumsPage::new(AlbumSortOrder::Title).0)
    }

    fn album_page(id: &str) -> AnyPage {
        AnyPage::Album(AlbumPage::new(id).0)
    }

    fn pane() -> BrowsingPane {
        let mut pane = BrowsingPane::new();
        pane.enable_navigation();
        pane
    }

    #[test]
    fn test_back_restores_loaded_page_without_fetch() {
        let mut pane = pane();
        let id = pane.navigate(albums_page());
        pane.update_page(
            id,
            PageMessage::Loaded(Loaded::Albums {
                query: AlbumQuery::Sorted(AlbumSortOrder::Title),
                offset: 0,
                result: Ok(mock_albums(6)),
            }),
        );
        pane.navigate(album_page("al-1"));

        let (_, effects) = pane.go_back().expect("history has an entry");
        assert!(effects.iter().all(|e| !e.is_fetch()));
        match pane.current() {
            Some(AnyPage::Albums(page)) => assert_eq!(page.grid().albums().len(), 6),
            other => panic!("unexpected page {:?}", other),
        }
    }

    #[test]
    fn test_forward_after_back() {
        let mut pane = pane();
        pane.navigate(albums_page());
        let album = pane.navigate(album_page("al-1"));
        pane.update_page(
            album,
            PageMessage::Loaded(Loaded::Album(Ok(mock_album_with_tracks("al-1", 2)))),
        );

        pane.go_back();
        assert!(pane.can_go_forward());

        let (_, effects) = pane.go_forward().expect("forward entry");
        assert!(effects.iter().all(|e| !e.is_fetch()));
        assert_eq!(pane.current_route(), Some(Route::Album("al-1".into())));
        assert!(!pane.can_go_forward());
        assert!(pane.can_go_back());
    }

    #[test]
    fn test_navigate_clears_forward() {
        let mut pane = pane();
        pane.navigate(albums_page());
        pane.navigate(album_page("al-1"));
        pane.go_back();
        pane.navigate(AnyPage::List(ListPage::new(ListKind::Artists).0));
        assert!(!pane.can_go_forward());
    }

    #[test]
    fn test_messages_for_old_pages_are_dropped() {
        let mut pane = pane();
        let old = pane.navigate(albums_page());
        let new = pane.navigate(album_page("al-1"));
        assert_ne!(old, new);

        assert!(pane.update_page(old, PageMessage::LoadMore).is_none());
        assert!(pane.update_page(new, PageMessage::PlayAll).is_some());
    }

    #[test]
    fn test_restored_page_gets_new_id() {
        let mut pane = pane();
        let first = pane.navigate(albums_page());
        pane.navigate(album_page("al-1"));
        let (restored, _) = pane.go_back().unwrap();
        assert_ne!(first, restored);
        assert!(pane.update_page(first, PageMessage::LoadMore).is_none());
    }

    #[test]
    fn test_history_disabled_while_logged_out() {
        let mut pane = pane();
        pane.navigate(albums_page());
        pane.navigate(album_page("al-1"));
        pane.disable_navigation();

        assert!(!pane.can_go_back());
        assert!(pane.go_back().is_none());
        assert_eq!(pane.current_route(), Some(Route::Album("al-1".into())));
    }

    #[test]
    fn test_clear_history_and_page() {
        let mut pane = pane();
        pane.navigate(albums_page());
        pane.navigate(album_page("al-1"));
        pane.clear_history();
        pane.set_page(None);

        assert!(!pane.can_go_back());
        assert!(pane.current().is_none());
        assert!(pane.reload().is_none());
    }

    #[test]
    fn test_search_input_only_on_searchable_pages() {
        let mut pane = pane();
        pane.navigate(album_page("al-1"));
        assert!(pane.search_input_id().is_none());
        pane.navigate(albums_page());
        assert!(pane.search_input_id().is_some());
    }

    #[test]
    fn test_select_all_reaches_page() {
        let mut pane = pane();
        assert!(!pane.select_all());
        pane.navigate(albums_page());
        assert!(!pane.select_all());
        pane.navigate(album_page("al-1"));
        assert!(pane.select_all());
    }
}
