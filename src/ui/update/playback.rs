//! Transport controls, playback events and the now playing card menu.

use iced::Task;

use crate::backend::PlaybackEvent;
use crate::ui::controller::Popup;
use crate::ui::messages::Message;
use crate::ui::state::AppState;

use super::covers::{request_full_cover, request_thumbnails};
use super::effects::apply_effects;

/// Handle play/pause, next and previous
pub fn handle_playback(s: &mut AppState, msg: Message) -> Task<Message> {
    let playback = s.backend.playback.clone();
    match msg {
        Message::PlayPause => Task::perform(
            async move { playback.play_pause().await.map_err(|e| e.to_string()) },
            Message::PlayPauseResult,
        ),
        Message::Next => Task::perform(
            async move { playback.next().await.map_err(|e| e.to_string()) },
            Message::PlaybackResult,
        ),
        Message::Previous => Task::perform(
            async move { playback.previous().await.map_err(|e| e.to_string()) },
            Message::PlaybackResult,
        ),
        Message::PlayPauseResult(Ok(status)) => {
            s.player_status = status;
            Task::none()
        }
        Message::PlayPauseResult(Err(e)) | Message::PlaybackResult(Err(e)) => {
            tracing::warn!(target: "ui::update", "Playback command failed: {}", e);
            s.toasts.error(format!("Playback failed: {}", e));
            Task::none()
        }
        _ => Task::none(),
    }
}

pub fn handle_playback_event(s: &mut AppState, event: PlaybackEvent) -> Task<Message> {
    match event {
        PlaybackEvent::SongChanged { now, .. } => {
            tracing::debug!(
                target: "ui::update",
                song = now.as_ref().map(|song| song.title.as_str()),
                "Song changed"
            );
            let cover = now.as_ref().and_then(|song| song.cover_art.clone());
            s.now_playing.update(now);

            let mut tasks = Vec::new();
            if let Some(cover_id) = cover {
                tasks.push(request_thumbnails(s, vec![cover_id]));
            }
            let song = s.now_playing.song().cloned();
            if let Some((id, effects)) = s.browsing.on_song_changed(song.as_ref()) {
                tasks.push(apply_effects(s, id, effects));
            }
            Task::batch(tasks)
        }
        PlaybackEvent::StatusChanged(status) => {
            s.player_status = status;
            Task::none()
        }
    }
}

/// Handle the now playing card: cover popup, context menu and its actions
pub fn handle_card(s: &mut AppState, msg: Message) -> Task<Message> {
    match msg {
        Message::ShowCoverImage => {
            let Some(cover_id) = s.now_playing.cover_id().map(str::to_string) else {
                return Task::none();
            };
            if s.controller.show(Popup::CoverImage {
                cover_id: cover_id.clone(),
            }) {
                request_full_cover(s, cover_id)
            } else {
                Task::none()
            }
        }
        Message::OpenNowPlayingMenu => {
            if s.now_playing.song().is_some() {
                s.controller.show(Popup::NowPlayingMenu);
            }
            Task::none()
        }
        Message::SetFavorite(favorite) => {
            s.controller.close_escapable();
            let Some((song_id, previous)) = s
                .now_playing
                .song()
                .map(|song| (song.id.clone(), song.starred))
            else {
                return Task::none();
            };
            s.now_playing.set_starred(favorite);
            let library = s.backend.library.clone();
            let id = song_id.clone();
            Task::perform(
                async move {
                    library
                        .set_favorite(&id, favorite)
                        .await
                        .map(|_| {
                            if favorite {
                                "Added to favorites".to_string()
                            } else {
                                "Removed from favorites".to_string()
                            }
                        })
                        .map_err(|e| e.to_string())
                },
                move |result| Message::FavoriteResult {
                    song_id: song_id.clone(),
                    previous,
                    result,
                },
            )
        }
        Message::SetRating(rating) => {
            s.controller.close_escapable();
            let Some((song_id, previous)) = s
                .now_playing
                .song()
                .map(|song| (song.id.clone(), song.rating))
            else {
                return Task::none();
            };
            s.now_playing.set_rating(rating);
            let library = s.backend.library.clone();
            let id = song_id.clone();
            Task::perform(
                async move {
                    library
                        .set_rating(&id, rating)
                        .await
                        .map_err(|e| e.to_string())
                },
                move |result| Message::RatingResult {
                    song_id: song_id.clone(),
                    previous,
                    result,
                },
            )
        }
        Message::FavoriteResult {
            song_id,
            previous,
            result,
        } => match result {
            Ok(text) => {
                s.toasts.success(text);
                Task::none()
            }
            Err(e) => {
                tracing::warn!(target: "ui::update", %song_id, "Favorite change rejected: {}", e);
                if s.now_playing.is_showing(&song_id) {
                    s.now_playing.set_starred(previous);
                }
                s.toasts.error(format!("Failed to update favorite: {}", e));
                Task::none()
            }
        },
        Message::RatingResult {
            song_id,
            previous,
            result: Err(e),
        } => {
            tracing::warn!(target: "ui::update", %song_id, "Rating change rejected: {}", e);
            if s.now_playing.is_showing(&song_id) {
                s.now_playing.set_rating(previous);
            }
            s.toasts.error(format!("Failed to set rating: {}", e));
            Task::none()
        }
        Message::AddToPlaylist => {
            let Some(song_id) = s.now_playing.song().map(|song| song.id.clone()) else {
                return Task::none();
            };
            s.controller.show(Popup::AddToPlaylist {
                song_ids: vec![song_id],
                playlists: None,
            });
            let library = s.backend.library.clone();
            Task::perform(
                async move { library.playlists().await.map_err(|e| e.to_string()) },
                Message::PlaylistsLoaded,
            )
        }
        Message::PlaylistsLoaded(Ok(loaded)) => {
            // The picker may have been closed before the playlists arrived
            if let Some(Popup::AddToPlaylist { playlists, .. }) = s.controller.popup_mut() {
                *playlists = Some(loaded);
            }
            Task::none()
        }
        Message::PlaylistsLoaded(Err(e)) => {
            s.controller.close_escapable();
            s.toasts.error(format!("Failed to load playlists: {}", e));
            Task::none()
        }
        Message::AddToPlaylistChosen(playlist) => {
            let song_ids = match s.controller.popup() {
                Some(Popup::AddToPlaylist { song_ids, .. }) => song_ids.clone(),
                _ => return Task::none(),
            };
            s.controller.close();
            tracing::info!(target: "ui::update", playlist = %playlist.name, "Adding to playlist");
            let library = s.backend.library.clone();
            Task::perform(
                async move {
                    library
                        .add_to_playlist(&playlist.id, &song_ids)
                        .await
                        .map(|_| format!("Added to {}", playlist.name))
                        .map_err(|e| e.to_string())
                },
                Message::ActionResult,
            )
        }
        Message::ActionResult(Ok(text)) => {
            if !text.is_empty() {
                s.toasts.success(text);
            }
            Task::none()
        }
        Message::ActionResult(Err(e)) => {
            tracing::warn!(target: "ui::update", "Library action failed: {}", e);
            s.toasts.error(e);
            Task::none()
        }
        _ => Task::none(),
    }
}
