use std::sync::Arc;

use crate::data_provider::AsyncImageDataProvider;
use crate::media::Image;
use crate::persistence::PersistenceResult;
use crate::ui::async_image::intent::AsyncImageEvent;
use crate::ui::async_image::state::{AsyncImageState, AsyncImageStatus};
use crate::ui::mvi::Feedback;

pub fn when_loading(
    provider: Arc<AsyncImageDataProvider>,
) -> Feedback<AsyncImageState, AsyncImageEvent> {
    Feedback::when(
        "async_image.when_loading",
        |state: &AsyncImageState| {
            (state.status == AsyncImageStatus::Loading).then(|| state.url.clone())
        },
        move |url: String| {
            let provider = Arc::clone(&provider);
            async move {
                match provider.fetch_image(&url).await {
                    Ok(image) => AsyncImageEvent::Loaded(image),
                    Err(err) => {
                        tracing::warn!(url = url.as_str(), error = %err, "failed to load image");
                        AsyncImageEvent::FailedToLoad
                    }
                }
            }
        },
    )
}

pub fn when_loaded(
    provider: Arc<AsyncImageDataProvider>,
) -> Feedback<AsyncImageState, AsyncImageEvent> {
    Feedback::when_optional(
        "async_image.when_loaded",
        |state: &AsyncImageState| match &state.status {
            AsyncImageStatus::Loaded(image) => Some((state.url.clone(), image.clone())),
            _ => None,
        },
        move |(url, image): (String, Image)| {
            let provider = Arc::clone(&provider);
            async move {
                match provider.persist_image(&image, &url).await {
                    Ok(PersistenceResult::Persisted) => {
                        tracing::debug!(url = url.as_str(), "image persisted");
                        Some(AsyncImageEvent::Persisted)
                    }
                    Ok(PersistenceResult::AlreadyPresent) => Some(AsyncImageEvent::Persisted),
                    Err(err) => {
                        tracing::warn!(url = url.as_str(), error = %err, "failed to persist image");
                        None
                    }
                }
            }
        },
    )
}
