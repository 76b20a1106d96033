//! Runs the effects pages hand back.
//!
//! Fetch results are addressed to the page that asked, so the browsing pane
//! can drop them if the user has moved on.

use iced::Task;
use iced::widget::scrollable::{self, AbsoluteOffset};

use crate::backend::Backend;
use crate::ui::browsing::PageId;
use crate::ui::messages::Message;
use crate::ui::pages::{Effect, Fetch, Loaded, PageMessage};
use crate::ui::state::AppState;

use super::covers::request_thumbnails;
use super::navigation::navigate;
use super::save_config_task;

pub fn apply_effects(s: &mut AppState, page_id: PageId, effects: Vec<Effect>) -> Task<Message> {
    let mut tasks = Vec::with_capacity(effects.len());
    for effect in effects {
        tasks.push(apply_effect(s, page_id, effect));
    }
    Task::batch(tasks)
}

fn apply_effect(s: &mut AppState, page_id: PageId, effect: Effect) -> Task<Message> {
    match effect {
        Effect::Fetch(fetch) => fetch_task(&s.backend, page_id, fetch),
        Effect::Navigate(route) => navigate(s, route),
        Effect::PlayAlbum { album_id, index } => {
            tracing::info!(target: "ui::update", %album_id, index, "Play album");
            let playback = s.backend.playback.clone();
            Task::perform(
                async move {
                    playback
                        .play_album(&album_id, index)
                        .await
                        .map_err(|e| e.to_string())
                },
                Message::PlaybackResult,
            )
        }
        Effect::PlaySongs { songs, index } => {
            tracing::info!(target: "ui::update", count = songs.len(), index, "Play songs");
            let playback = s.backend.playback.clone();
            Task::perform(
                async move {
                    playback
                        .play_songs(songs, index)
                        .await
                        .map_err(|e| e.to_string())
                },
                Message::PlaybackResult,
            )
        }
        Effect::SetFavorite { id, favorite } => {
            let library = s.backend.library.clone();
            let item_id = id.clone();
            Task::perform(
                async move {
                    library
                        .set_favorite(&item_id, favorite)
                        .await
                        .map_err(|e| e.to_string())
                },
                move |result| {
                    Message::Page(
                        page_id,
                        PageMessage::FavoriteSaved {
                            id: id.clone(),
                            favorite,
                            result,
                        },
                    )
                },
            )
        }
        Effect::ScrollTo { id, offset } => {
            scrollable::scroll_to(id, AbsoluteOffset { x: 0.0, y: offset })
        }
        Effect::Debounce { seq, delay } => Task::perform(
            async move { tokio::time::sleep(delay).await },
            move |_| Message::Page(page_id, PageMessage::SearchDebounced(seq)),
        ),
        Effect::SaveSortOrder(order) => {
            tracing::debug!(target: "ui::update", %order, "Saving album sort order");
            s.sort_order = order;
            s.config.albums_page.sort_order = order.to_string();
            save_config_task(s)
        }
        Effect::LoadCovers(cover_ids) => request_thumbnails(s, cover_ids),
        Effect::SyncQueue => Task::done(Message::Page(
            page_id,
            PageMessage::Loaded(queue_snapshot(&s.backend)),
        )),
        Effect::Notify(text) => {
            s.toasts.error(text);
            Task::none()
        }
    }
}

fn fetch_task(backend: &Backend, page_id: PageId, fetch: Fetch) -> Task<Message> {
    tracing::debug!(target: "ui::update", ?page_id, ?fetch, "Fetch");
    let library = backend.library.clone();
    let to_page = move |loaded| Message::Page(page_id, PageMessage::Loaded(loaded));

    match fetch {
        Fetch::Albums {
            query,
            offset,
            limit,
        } => Task::perform(
            async move {
                let result = library
                    .albums(&query, offset, limit)
                    .await
                    .map_err(|e| e.to_string());
                Loaded::Albums {
                    query,
                    offset,
                    result,
                }
            },
            to_page,
        ),
        Fetch::Album(id) => Task::perform(
            async move { Loaded::Album(library.album(&id).await.map_err(|e| e.to_string())) },
            to_page,
        ),
        Fetch::Artist(id) => Task::perform(
            async move { Loaded::Artist(library.artist(&id).await.map_err(|e| e.to_string())) },
            to_page,
        ),
        Fetch::Artists => Task::perform(
            async move { Loaded::Artists(library.artists().await.map_err(|e| e.to_string())) },
            to_page,
        ),
        Fetch::Genres => Task::perform(
            async move { Loaded::Genres(library.genres().await.map_err(|e| e.to_string())) },
            to_page,
        ),
        Fetch::Playlists => Task::perform(
            async move { Loaded::Playlists(library.playlists().await.map_err(|e| e.to_string())) },
            to_page,
        ),
        Fetch::Playlist(id) => Task::perform(
            async move {
                Loaded::Playlist(library.playlist(&id).await.map_err(|e| e.to_string()))
            },
            to_page,
        ),
        // The queue lives in memory, no round trip needed
        Fetch::Queue => Task::done(to_page(queue_snapshot(backend))),
    }
}

fn queue_snapshot(backend: &Backend) -> Loaded {
    let playback = &backend.playback;
    Loaded::Queue {
        songs: playback.queue(),
        current: playback.now_playing().map(|song| song.id),
    }
}
