//! Side-effect sources of the list loop.

use std::sync::Arc;

use futures::future::join_all;

use crate::data_provider::{AsyncImageDataProvider, ListDataProvider};
use crate::persistence::PersistenceResult;
use crate::ui::list::element::Element;
use crate::ui::list::intent::ListEvent;
use crate::ui::list::state::{ListState, ListStatus, ThumbnailRequest};
use crate::ui::mvi::Feedback;

pub fn when_loading_metadata(provider: Arc<ListDataProvider>) -> Feedback<ListState, ListEvent> {
    Feedback::when(
        "list.when_loading_metadata",
        |state: &ListState| (state.status == ListStatus::Loading).then_some(()),
        move |()| {
            let provider = Arc::clone(&provider);
            async move {
                match provider.fetch_metadata().await {
                    Ok(elements) => ListEvent::LoadedMetadata(elements),
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to load list metadata");
                        ListEvent::FailedToLoadMetadata
                    }
                }
            }
        },
    )
}

/// Fan out one fetch per requested thumbnail and join them all.
///
/// Results keep request order, not completion order.
pub fn when_loading_thumbnails(
    images: Arc<AsyncImageDataProvider>,
) -> Feedback<ListState, ListEvent> {
    Feedback::when(
        "list.when_loading_thumbnails",
        |state: &ListState| match &state.status {
            ListStatus::LoadingThumbnails(request) => Some(request.clone()),
            _ => None,
        },
        move |request: ThumbnailRequest| {
            let images = Arc::clone(&images);
            async move {
                let fetches = request.urls.iter().map(|url| {
                    let images = Arc::clone(&images);
                    async move {
                        images.fetch_image(url).await.unwrap_or_else(|err| {
                            tracing::debug!(url = url.as_str(), error = %err, "thumbnail failed");
                            None
                        })
                    }
                });
                let loaded = join_all(fetches).await;
                tracing::debug!(
                    requested = request.indexes.len(),
                    decoded = loaded.iter().filter(|image| image.is_some()).count(),
                    "thumbnail batch finished"
                );
                ListEvent::LoadedThumbnails {
                    images: loaded,
                    indexes: request.indexes,
                }
            }
        },
    )
}

/// Snapshot of one loaded collection, compared by generation only.
#[derive(Debug, Clone)]
pub(crate) struct PersistRequest {
    generation: u64,
    elements: Arc<Vec<Element>>,
}

impl PartialEq for PersistRequest {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation
    }
}

pub(crate) fn persist_request(state: &ListState) -> Option<PersistRequest> {
    (state.status == ListStatus::Loaded && !state.persisted).then(|| PersistRequest {
        generation: state.generation,
        elements: Arc::clone(&state.elements),
    })
}

/// Write the loaded elements to the cache, once per loaded collection.
pub fn when_persisting(provider: Arc<ListDataProvider>) -> Feedback<ListState, ListEvent> {
    Feedback::when_optional(
        "list.when_persisting",
        persist_request,
        move |request: PersistRequest| {
            let provider = Arc::clone(&provider);
            async move {
                match provider.persist(&request.elements).await {
                    Ok(PersistenceResult::Persisted) => {
                        tracing::info!(
                            count = request.elements.len(),
                            generation = request.generation,
                            "list persisted"
                        );
                        Some(ListEvent::Persisted)
                    }
                    Ok(PersistenceResult::AlreadyPresent) => Some(ListEvent::Persisted),
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to persist list");
                        None
                    }
                }
            }
        },
    )
}
