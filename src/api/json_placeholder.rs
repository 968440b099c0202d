use async_trait::async_trait;

use crate::api::error::RemoteError;
use crate::api::models::{Album, Comment, Photo, User};
use crate::api::remote::Remote;
use crate::api::Api;

pub const DEFAULT_BASE_URL: &str = "http://jsonplaceholder.typicode.com/";

/// [`Api`] backed by the public JSONPlaceholder service.
#[derive(Clone)]
pub struct JsonPlaceholderApi {
    remote: Remote,
    base_url: String,
}

impl JsonPlaceholderApi {
    pub fn new(remote: Remote, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { remote, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Api for JsonPlaceholderApi {
    async fn fetch_photos(&self) -> Result<Vec<Photo>, RemoteError> {
        self.remote.load_json(&self.endpoint("photos")).await
    }

    async fn fetch_album(&self, album_id: u64) -> Result<Album, RemoteError> {
        self.remote
            .load_json(&self.endpoint(&format!("albums/{}", album_id)))
            .await
    }

    async fn fetch_user(&self, user_id: u64) -> Result<User, RemoteError> {
        self.remote
            .load_json(&self.endpoint(&format!("users/{}", user_id)))
            .await
    }

    async fn fetch_comment_count(&self, photo_id: u64) -> Result<usize, RemoteError> {
        let comments: Vec<Comment> = self
            .remote
            .load_json(&self.endpoint(&format!("photos/{}/comments", photo_id)))
            .await?;
        Ok(comments.len())
    }

    async fn fetch_image_bytes(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RemoteError::InvalidUrl(url.to_string()));
        }
        self.remote.load_data(url).await
    }
}
