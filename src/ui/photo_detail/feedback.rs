use std::sync::Arc;

use crate::data_provider::PhotoDetailDataProvider;
use crate::persistence::PersistenceResult;
use crate::ui::mvi::Feedback;
use crate::ui::photo_detail::intent::PhotoDetailEvent;
use crate::ui::photo_detail::state::{PhotoDetailState, PhotoDetailStatus};

pub fn when_loading(
    provider: Arc<PhotoDetailDataProvider>,
) -> Feedback<PhotoDetailState, PhotoDetailEvent> {
    Feedback::when(
        "photo_detail.when_loading",
        |state: &PhotoDetailState| match state.status {
            PhotoDetailStatus::Loading => Some((state.element.album_id, state.element.id)),
            _ => None,
        },
        move |(album_id, photo_id): (u64, u64)| {
            let provider = Arc::clone(&provider);
            async move {
                match provider
                    .fetch_author_and_comment_count(album_id, photo_id)
                    .await
                {
                    Ok((author, number_of_comments)) => PhotoDetailEvent::Loaded {
                        author,
                        number_of_comments,
                    },
                    Err(err) => {
                        tracing::warn!(photo_id, error = %err, "failed to load photo detail");
                        PhotoDetailEvent::FailedToLoad
                    }
                }
            }
        },
    )
}

/// Cache author and comment count once loaded.
///
/// The favourite flag is not part of the gate, so toggling it does not
/// trigger another write.
pub fn when_persisting(
    provider: Arc<PhotoDetailDataProvider>,
) -> Feedback<PhotoDetailState, PhotoDetailEvent> {
    Feedback::when_optional(
        "photo_detail.when_persisting",
        |state: &PhotoDetailState| match &state.status {
            PhotoDetailStatus::Loaded(detail) => {
                Some((detail.id, detail.author.clone(), detail.number_of_comments))
            }
            _ => None,
        },
        move |(photo_id, author, number_of_comments): (u64, String, usize)| {
            let provider = Arc::clone(&provider);
            async move {
                match provider.persist(&author, number_of_comments, photo_id).await {
                    Ok(PersistenceResult::Persisted) => {
                        tracing::info!(photo_id, "photo detail persisted");
                        Some(PhotoDetailEvent::Persisted)
                    }
                    Ok(PersistenceResult::AlreadyPresent) => Some(PhotoDetailEvent::Persisted),
                    Err(err) => {
                        tracing::warn!(photo_id, error = %err, "failed to persist photo detail");
                        None
                    }
                }
            }
        },
    )
}
