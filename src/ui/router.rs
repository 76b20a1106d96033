//! Maps routes to freshly built pages.

use super::browsing::{BrowsingPane, PageId};
use super::pages::{
    AlbumPage, AlbumsPage, AnyPage, ArtistPage, Effect, FilteredAlbumsPage, ListKind, ListPage,
    NowPlayingPage, PlaylistPage,
};
use super::route::Route;
use crate::backend::AlbumSortOrder;

/// Build the page for `route` together with its initial fetches.
/// `sort_order` is the persisted albums page order.
pub fn create_page(route: &Route, sort_order: AlbumSortOrder) -> (AnyPage, Vec<Effect>) {
    match route {
        Route::NowPlaying => wrap(NowPlayingPage::new(), AnyPage::NowPlaying),
        Route::Favorites => wrap(FilteredAlbumsPage::favorites(), AnyPage::FilteredAlbums),
        Route::Albums => wrap(AlbumsPage::new(sort_order), AnyPage::Albums),
        Route::Artists => wrap(ListPage::new(ListKind::Artists), AnyPage::List),
        Route::Genres => wrap(ListPage::new(ListKind::Genres), AnyPage::List),
        Route::Playlists => wrap(ListPage::new(ListKind::Playlists), AnyPage::List),
        Route::Album(id) => wrap(AlbumPage::new(id.clone()), AnyPage::Album),
        Route::Artist(id) => wrap(ArtistPage::new(id.clone()), AnyPage::Artist),
        Route::Genre(name) => wrap(FilteredAlbumsPage::genre(name.clone()), AnyPage::FilteredAlbums),
        Route::Playlist(id) => wrap(PlaylistPage::new(id.clone()), AnyPage::Playlist),
    }
}

fn wrap<P>(built: (P, Vec<Effect>), variant: fn(P) -> AnyPage) -> (AnyPage, Vec<Effect>) {
    (variant(built.0), built.1)
}

/// Navigate the pane to `route`, recording history.
///
/// Navigating to the route already on screen does nothing and returns
/// `None`; use reload to refresh it.
pub fn navigate_to(
    pane: &mut BrowsingPane,
    route: Route,
    sort_order: AlbumSortOrder,
) -> Option<(PageId, Vec<Effect>)> {
    if !pane.is_navigation_enabled() {
        tracing::debug!(target: "ui::nav", %route, "Navigation disabled");
        return None;
    }
    if pane.current_route().as_ref() == Some(&route) {
        tracing::debug!(target: "ui::nav", %route, "Already showing route");
        return None;
    }
    tracing::info!(target: "ui::nav", %route, "Navigate");
    let (page, effects) = create_page(&route, sort_order);
    Some((pane.navigate(page), effects))
}
