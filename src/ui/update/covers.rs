//! Cover art requests and results.

use iced::Task;

use crate::ui::messages::Message;
use crate::ui::state::AppState;

/// Fetch thumbnails not requested before.
pub fn request_thumbnails(s: &mut AppState, cover_ids: Vec<String>) -> Task<Message> {
    let wanted = s.covers.request(cover_ids);
    if wanted.is_empty() {
        return Task::none();
    }
    tracing::trace!(target: "ui::update", count = wanted.len(), "Requesting covers");

    let tasks: Vec<Task<Message>> = wanted
        .into_iter()
        .map(|cover_id| {
            let images = s.backend.images.clone();
            Task::perform(
                async move {
                    let result = images
                        .cover_thumbnail(&cover_id)
                        .await
                        .map_err(|e| e.to_string());
                    (cover_id, result)
                },
                |(cover_id, result)| Message::CoverLoaded(cover_id, result),
            )
        })
        .collect();
    Task::batch(tasks)
}

/// Fetch the full size cover for the cover popup.
pub fn request_full_cover(s: &AppState, cover_id: String) -> Task<Message> {
    if s.covers.full(&cover_id).is_some() {
        return Task::none();
    }
    let images = s.backend.images.clone();
    Task::perform(
        async move {
            let result = images
                .full_cover(&cover_id)
                .await
                .map_err(|e| e.to_string());
            (cover_id, result)
        },
        |(cover_id, result)| Message::FullCoverLoaded(cover_id, result),
    )
}

pub fn handle_cover_loaded(s: &mut AppState, cover_id: String, result: Result<Vec<u8>, String>) {
    match result {
        Ok(bytes) => s.covers.insert_thumbnail(cover_id, bytes),
        // A missing cover keeps its placeholder
        Err(e) => tracing::debug!(target: "ui::update", %cover_id, "Cover unavailable: {}", e),
    }
}

pub fn handle_full_cover_loaded(
    s: &mut AppState,
    cover_id: String,
    result: Result<Vec<u8>, String>,
) {
    match result {
        Ok(bytes) => s.covers.insert_full(cover_id, bytes),
        Err(e) => {
            tracing::warn!(target: "ui::update", %cover_id, "Failed to load cover: {}", e);
            s.toasts.error(format!("Failed to load cover image: {}", e));
        }
    }
}
