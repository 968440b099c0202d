//! Local cache collaborator.
//!
//! Values are stored under string keys through a [`CacheStore`]. Writes
//! are put-if-absent: an existing entry is never overwritten and the caller
//! learns which of the two outcomes happened via [`PersistenceResult`].

mod disk;
mod error;
mod persister;
mod store;

pub use disk::DiskStore;
pub use error::PersistenceError;
pub use persister::{ImagePersister, Persister};
pub use store::{CacheStore, MemoryStore};

/// Successful outcome of a cache write.
///
/// A failing write is a [`PersistenceError`], not a variant of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceResult {
    /// The value was written.
    Persisted,
    /// A value was already stored under the key; nothing was written.
    AlreadyPresent,
}
