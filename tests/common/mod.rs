//! Shared test utilities and fake collaborators.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use async_trait::async_trait;
use image::{ImageFormat, Rgba, RgbaImage};
use parking_lot::Mutex;
use photoloop::api::{Album, Api, Photo, RemoteError, User};
use photoloop::data_provider::{AsyncImageDataProvider, ListDataProvider, PhotoDetailDataProvider};
use photoloop::media::Image;
use photoloop::persistence::{
    CacheStore, ImagePersister, MemoryStore, PersistenceError, PersistenceResult, Persister,
};
use photoloop::ui::list::Element;
use std::collections::HashMap;
use std::future::Future;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound for any single wait in a loop test.
pub const WAIT: Duration = Duration::from_secs(5);

/// Await `future`, failing the test if it takes longer than [`WAIT`].
pub async fn within<T>(future: impl Future<Output = T>) -> T {
    tokio::time::timeout(WAIT, future)
        .await
        .expect("timed out waiting for the loop")
}

// -- Fixtures -----------------------------------------------------------------

/// Encoded PNG of the given size.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let pixels = RgbaImage::from_pixel(width, height, Rgba([40, 80, 120, 255]));
    let mut out = Cursor::new(Vec::new());
    pixels
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

pub fn image(width: u32, height: u32) -> Image {
    Image::decode(png(width, height)).expect("decodable png")
}

pub fn photo(id: u64, album_id: u64) -> Photo {
    Photo {
        id,
        title: format!("photo {}", id),
        url: format!("http://img.test/600/{}", id),
        thumbnail_url: format!("http://img.test/150/{}", id),
        album_id,
    }
}

pub fn element(id: u64, title: &str, is_favourite: bool, album_id: u64) -> Element {
    Element {
        id,
        title: title.to_string(),
        photo_url: format!("http://img.test/600/{}", id),
        thumbnail_url: format!("http://img.test/150/{}", id),
        is_favourite,
        album_id,
    }
}

fn not_found(url: String) -> RemoteError {
    RemoteError::Status { url, status: 404 }
}

// -- Fake API -----------------------------------------------------------------

/// In-process [`Api`] with configurable data and per-endpoint call counts.
#[derive(Default)]
pub struct FakeApi {
    pub photos: Mutex<Vec<Photo>>,
    pub albums: Mutex<HashMap<u64, Album>>,
    pub users: Mutex<HashMap<u64, User>>,
    pub comment_counts: Mutex<HashMap<u64, usize>>,
    pub images: Mutex<HashMap<String, Vec<u8>>>,
    /// Every call of `fetch_photos` fails while set.
    pub fail_photos: AtomicBool,
    /// `fetch_photos` and `fetch_image_bytes` never complete while set.
    pub hang: AtomicBool,
    pub photo_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_photos(photos: Vec<Photo>) -> Self {
        let api = Self::default();
        *api.photos.lock() = photos;
        api
    }

    /// Album `album_id` belongs to a user named `author`.
    pub fn with_author(self, album_id: u64, author: &str) -> Self {
        let user_id = album_id + 1000;
        self.albums.lock().insert(album_id, Album { user_id });
        self.users.lock().insert(
            user_id,
            User {
                id: user_id,
                name: author.to_string(),
                username: author.to_lowercase(),
            },
        );
        self
    }

    pub fn with_comments(self, photo_id: u64, count: usize) -> Self {
        self.comment_counts.lock().insert(photo_id, count);
        self
    }

    pub fn with_image(self, url: &str, bytes: Vec<u8>) -> Self {
        self.images.lock().insert(url.to_string(), bytes);
        self
    }

    async fn maybe_hang(&self) {
        if self.hang.load(Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl Api for FakeApi {
    async fn fetch_photos(&self) -> Result<Vec<Photo>, RemoteError> {
        self.photo_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_hang().await;
        if self.fail_photos.load(Ordering::SeqCst) {
            return Err(RemoteError::Status {
                url: "fake://photos".to_string(),
                status: 500,
            });
        }
        Ok(self.photos.lock().clone())
    }

    async fn fetch_album(&self, album_id: u64) -> Result<Album, RemoteError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.albums
            .lock()
            .get(&album_id)
            .cloned()
            .ok_or_else(|| not_found(format!("fake://albums/{}", album_id)))
    }

    async fn fetch_user(&self, user_id: u64) -> Result<User, RemoteError> {
        self.users
            .lock()
            .get(&user_id)
            .cloned()
            .ok_or_else(|| not_found(format!("fake://users/{}", user_id)))
    }

    async fn fetch_comment_count(&self, photo_id: u64) -> Result<usize, RemoteError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.comment_counts
            .lock()
            .get(&photo_id)
            .copied()
            .ok_or_else(|| not_found(format!("fake://photos/{}/comments", photo_id)))
    }

    async fn fetch_image_bytes(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_hang().await;
        self.images
            .lock()
            .get(url)
            .cloned()
            .ok_or_else(|| not_found(url.to_string()))
    }
}

/// [`Api`] that fails the test if any endpoint is reached.
pub struct SpyApi;

fn reached<T>(call: String) -> Result<T, RemoteError> {
    panic!("{} must not be called", call)
}

#[async_trait]
impl Api for SpyApi {
    async fn fetch_photos(&self) -> Result<Vec<Photo>, RemoteError> {
        reached("fetch_photos".to_string())
    }

    async fn fetch_album(&self, album_id: u64) -> Result<Album, RemoteError> {
        reached(format!("fetch_album({})", album_id))
    }

    async fn fetch_user(&self, user_id: u64) -> Result<User, RemoteError> {
        reached(format!("fetch_user({})", user_id))
    }

    async fn fetch_comment_count(&self, photo_id: u64) -> Result<usize, RemoteError> {
        reached(format!("fetch_comment_count({})", photo_id))
    }

    async fn fetch_image_bytes(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        reached(format!("fetch_image_bytes({})", url))
    }
}

// -- Counting store -----------------------------------------------------------

/// [`MemoryStore`] that counts `put_if_absent` calls per key.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    writes: Mutex<HashMap<String, usize>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self, key: &str) -> usize {
        self.writes.lock().get(key).copied().unwrap_or(0)
    }
}

#[async_trait]
impl CacheStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        self.inner.get(key).await
    }

    async fn put_if_absent(
        &self,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<PersistenceResult, PersistenceError> {
        *self.writes.lock().entry(key.to_string()).or_default() += 1;
        self.inner.put_if_absent(key, bytes).await
    }
}

// -- Provider builders --------------------------------------------------------

pub fn list_provider(api: Arc<dyn Api>, store: &Arc<MemoryStore>) -> Arc<ListDataProvider> {
    Arc::new(ListDataProvider::new(api, Persister::new(store.clone())))
}

pub fn image_provider(api: Arc<dyn Api>, store: &Arc<MemoryStore>) -> Arc<AsyncImageDataProvider> {
    Arc::new(AsyncImageDataProvider::new(
        api,
        ImagePersister::new(store.clone()),
    ))
}

pub fn detail_provider(api: Arc<dyn Api>, store: &Arc<MemoryStore>) -> Arc<PhotoDetailDataProvider> {
    Arc::new(PhotoDetailDataProvider::new(api, Persister::new(store.clone())))
}
