use std::sync::Arc;

use thiserror::Error;

use crate::api::{Api, RemoteError};
use crate::media::Image;
use crate::persistence::{ImagePersister, PersistenceError, PersistenceResult};

#[derive(Debug, Error)]
pub enum ImageDataError {
    #[error("failed to download image: {0}")]
    Remote(#[from] RemoteError),
}

/// Source of images keyed by their URL.
#[derive(Clone)]
pub struct AsyncImageDataProvider {
    api: Arc<dyn Api>,
    persister: ImagePersister,
}

impl AsyncImageDataProvider {
    pub fn new(api: Arc<dyn Api>, persister: ImagePersister) -> Self {
        Self { api, persister }
    }

    /// Cached image if present, otherwise downloaded and decoded.
    ///
    /// `Ok(None)` means the download succeeded but the bytes are not a
    /// usable image.
    pub async fn fetch_image(&self, url: &str) -> Result<Option<Image>, ImageDataError> {
        match self.persister.fetch(url).await {
            Ok(image) => {
                tracing::debug!(url, "image served from cache");
                return Ok(Some(image));
            }
            Err(err) if err.is_miss() => {}
            Err(err) => tracing::warn!(url, error = %err, "image cache unreadable"),
        }

        let bytes = self.api.fetch_image_bytes(url).await?;
        let image = tokio::task::spawn_blocking(move || Image::decode(bytes))
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "image decode task failed");
                None
            });
        Ok(image)
    }

    pub async fn persist_image(
        &self,
        image: &Image,
        url: &str,
    ) -> Result<PersistenceResult, PersistenceError> {
        self.persister.persist(image, url).await
    }
}
