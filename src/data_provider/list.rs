use std::sync::Arc;

use thiserror::Error;

use crate::api::{Api, RemoteError};
use crate::persistence::{PersistenceError, PersistenceResult, Persister};
use crate::ui::list::{sort_by_favourites, Element};

/// Cache key of the whole element collection.
pub const ELEMENTS_KEY: &str = "/ListView/elements";

#[derive(Debug, Error)]
pub enum ListDataError {
    #[error("failed to load photos: {0}")]
    Remote(#[from] RemoteError),
}

/// Source of the list screen's elements.
#[derive(Clone)]
pub struct ListDataProvider {
    api: Arc<dyn Api>,
    persister: Persister,
}

impl ListDataProvider {
    pub fn new(api: Arc<dyn Api>, persister: Persister) -> Self {
        Self { api, persister }
    }

    /// Cached elements if present, otherwise every photo from the API
    /// mapped to a non-favourite element, sorted by favourite order.
    pub async fn fetch_metadata(&self) -> Result<Vec<Element>, ListDataError> {
        match self.persister.fetch::<Vec<Element>>(ELEMENTS_KEY).await {
            Ok(elements) => {
                tracing::debug!(count = elements.len(), "elements served from cache");
                return Ok(elements);
            }
            Err(err) if err.is_miss() => {
                tracing::debug!("elements not cached, fetching from api");
            }
            Err(err) => {
                tracing::warn!(error = %err, "elements cache unreadable, fetching from api");
            }
        }

        // The API has no pagination; the whole list is small enough to
        // download and decode in one go.
        let photos = self.api.fetch_photos().await?;
        let mut elements: Vec<Element> = photos.into_iter().map(Element::from).collect();
        sort_by_favourites(&mut elements);
        tracing::info!(count = elements.len(), "elements fetched from api");
        Ok(elements)
    }

    pub async fn persist(
        &self,
        elements: &[Element],
    ) -> Result<PersistenceResult, PersistenceError> {
        self.persister.persist(elements, ELEMENTS_KEY).await
    }
}
