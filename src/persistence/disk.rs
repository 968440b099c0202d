//! File-backed [`CacheStore`].
//!
//! Each key is one file directly under the root directory. Writes are
//! staged in a temp file inside the root and published with a no-clobber
//! link, so a reader never sees a partial entry and an existing entry is
//! never replaced.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::persistence::store::CacheStore;
use crate::persistence::{PersistenceError, PersistenceResult};

const ENTRY_SUFFIX: &str = ".entry";

/// Upper bound for an encoded file name, below common filesystem limits.
const MAX_FILE_NAME: usize = 240;

/// Encoded prefix kept in front of the digest of an over-long key.
const HASHED_PREFIX: usize = 160;

#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default cache location: `<cache_dir>/photoloop`.
    ///
    /// Falls back to the current directory if the platform has no cache dir.
    pub fn default_root() -> PathBuf {
        let cache_dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
        cache_dir.join("photoloop")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds the entry for `key`.
    ///
    /// Keys whose encoding does not fit a file name keep a readable prefix
    /// and are told apart by the SHA-256 of the full key.
    pub fn entry_path(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let mut name = encode_key(key);
        if name.is_empty() {
            return Err(PersistenceError::InvalidKey {
                key: key.to_string(),
            });
        }
        if name.len() + ENTRY_SUFFIX.len() > MAX_FILE_NAME {
            // The encoding is ASCII, so any byte offset is a char boundary.
            name.truncate(HASHED_PREFIX);
            name.push('~');
            name.push_str(&hex::encode(Sha256::digest(key.as_bytes())));
        }
        name.push_str(ENTRY_SUFFIX);
        Ok(self.root.join(name))
    }
}

/// Percent-encode everything outside `[A-Za-z0-9._-]`, including `/`.
///
/// A leading `/` is dropped so `/ListView/elements` and `ListView/elements`
/// name the same entry.
fn encode_key(key: &str) -> String {
    let trimmed = key.trim_start_matches('/');
    let mut out = String::with_capacity(trimmed.len());
    for byte in trimmed.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => out.push(byte as char),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

fn io_error(key: &str, source: io::Error) -> PersistenceError {
    PersistenceError::Io {
        key: key.to_string(),
        source,
    }
}

fn read_entry(path: &Path, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_error(key, err)),
    }
}

fn write_entry(
    root: &Path,
    path: &Path,
    key: &str,
    bytes: &[u8],
) -> Result<PersistenceResult, PersistenceError> {
    if path.exists() {
        return Ok(PersistenceResult::AlreadyPresent);
    }

    fs::create_dir_all(root).map_err(|e| io_error(key, e))?;

    let mut staged = NamedTempFile::new_in(root).map_err(|e| io_error(key, e))?;
    staged.write_all(bytes).map_err(|e| io_error(key, e))?;
    staged.as_file().sync_all().map_err(|e| io_error(key, e))?;

    match staged.persist_noclobber(path) {
        Ok(_) => Ok(PersistenceResult::Persisted),
        Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
            Ok(PersistenceResult::AlreadyPresent)
        }
        Err(err) => Err(io_error(key, err.error)),
    }
}

#[async_trait]
impl CacheStore for DiskStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        let path = self.entry_path(key)?;
        let owned_key = key.to_string();
        tokio::task::spawn_blocking(move || read_entry(&path, &owned_key))
            .await
            .map_err(|e| io_error(key, io::Error::other(e)))?
    }

    async fn put_if_absent(
        &self,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<PersistenceResult, PersistenceError> {
        let path = self.entry_path(key)?;
        let root = self.root.clone();
        let owned_key = key.to_string();
        let result = tokio::task::spawn_blocking(move || {
            write_entry(&root, &path, &owned_key, &bytes)
        })
        .await
        .map_err(|e| io_error(key, io::Error::other(e)))??;

        match result {
            PersistenceResult::Persisted => tracing::debug!(key, "persisted"),
            PersistenceResult::AlreadyPresent => {
                tracing::debug!(key, "already present, skipping persist")
            }
        }
        Ok(result)
    }
}
