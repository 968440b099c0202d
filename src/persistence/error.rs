use thiserror::Error;

/// Errors that can occur when reading or writing the cache.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Nothing is stored under the key
    #[error("no cached value for '{key}'")]
    NotFound { key: String },

    /// Key cannot be mapped to a storage location
    #[error("invalid cache key '{key}'")]
    InvalidKey { key: String },

    #[error("cache I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize cached value '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Cached bytes are not a decodable image
    #[error("cached bytes for '{key}' are not a usable image")]
    Decode { key: String },
}

impl PersistenceError {
    /// True for a plain cache miss, which callers recover from by
    /// falling through to the network.
    pub fn is_miss(&self) -> bool {
        matches!(self, PersistenceError::NotFound { .. })
    }
}
