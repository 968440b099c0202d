use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::media::Image;
use crate::persistence::store::CacheStore;
use crate::persistence::{PersistenceError, PersistenceResult};

/// Typed JSON codec on top of a [`CacheStore`].
#[derive(Clone)]
pub struct Persister {
    store: Arc<dyn CacheStore>,
}

impl Persister {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Read and decode the value stored under `key`.
    ///
    /// An absent entry is [`PersistenceError::NotFound`].
    pub async fn fetch<T: DeserializeOwned>(&self, key: &str) -> Result<T, PersistenceError> {
        let bytes = self
            .store
            .get(key)
            .await?
            .ok_or_else(|| PersistenceError::NotFound {
                key: key.to_string(),
            })?;

        serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Serialization {
            key: key.to_string(),
            source,
        })
    }

    /// Store `value` under `key` unless something is already there.
    pub async fn persist<T: Serialize + ?Sized>(
        &self,
        value: &T,
        key: &str,
    ) -> Result<PersistenceResult, PersistenceError> {
        let bytes =
            serde_json::to_vec(value).map_err(|source| PersistenceError::Serialization {
                key: key.to_string(),
                source,
            })?;
        self.store.put_if_absent(key, bytes).await
    }
}

/// Image cache storing the encoded bytes.
#[derive(Clone)]
pub struct ImagePersister {
    store: Arc<dyn CacheStore>,
}

impl ImagePersister {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    pub async fn fetch(&self, key: &str) -> Result<Image, PersistenceError> {
        let bytes = self
            .store
            .get(key)
            .await?
            .ok_or_else(|| PersistenceError::NotFound {
                key: key.to_string(),
            })?;

        Image::decode(bytes).ok_or_else(|| PersistenceError::Decode {
            key: key.to_string(),
        })
    }

    pub async fn persist(
        &self,
        image: &Image,
        key: &str,
    ) -> Result<PersistenceResult, PersistenceError> {
        self.store.put_if_absent(key, image.bytes().to_vec()).await
    }
}
