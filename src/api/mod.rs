//! REST collaborator: JSONPlaceholder photos, albums, users and comments.

mod error;
mod json_placeholder;
mod models;
mod remote;

use async_trait::async_trait;

pub use error::RemoteError;
pub use json_placeholder::{JsonPlaceholderApi, DEFAULT_BASE_URL};
pub use models::{Album, Comment, Photo, User};
pub use remote::Remote;

/// Asynchronous, single-shot fetch operations consumed by the data providers.
///
/// No retries are performed at this level.
#[async_trait]
pub trait Api: Send + Sync {
    async fn fetch_photos(&self) -> Result<Vec<Photo>, RemoteError>;

    async fn fetch_album(&self, album_id: u64) -> Result<Album, RemoteError>;

    async fn fetch_user(&self, user_id: u64) -> Result<User, RemoteError>;

    /// Number of comments left on a photo.
    async fn fetch_comment_count(&self, photo_id: u64) -> Result<usize, RemoteError>;

    async fn fetch_image_bytes(&self, url: &str) -> Result<Vec<u8>, RemoteError>;
}
