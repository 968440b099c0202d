use std::sync::Arc;

use thiserror::Error;

use crate::api::{Api, RemoteError};
use crate::persistence::{PersistenceError, PersistenceResult, Persister};

pub fn author_key(photo_id: u64) -> String {
    format!("/Photo{}/author", photo_id)
}

pub fn number_of_comments_key(photo_id: u64) -> String {
    format!("/Photo{}/numberOfComments", photo_id)
}

#[derive(Debug, Error)]
pub enum PhotoDetailError {
    #[error("failed to load author: {0}")]
    Author(#[source] RemoteError),

    #[error("failed to load comment count: {0}")]
    Comments(#[source] RemoteError),
}

/// Source of a photo's author and comment count.
#[derive(Clone)]
pub struct PhotoDetailDataProvider {
    api: Arc<dyn Api>,
    persister: Persister,
}

impl PhotoDetailDataProvider {
    pub fn new(api: Arc<dyn Api>, persister: Persister) -> Self {
        Self { api, persister }
    }

    /// Author name and number of comments for a photo.
    ///
    /// Both values are required. The cache is used only when it holds both;
    /// otherwise album→user and the comment count are fetched concurrently
    /// and either failure fails the whole operation.
    pub async fn fetch_author_and_comment_count(
        &self,
        album_id: u64,
        photo_id: u64,
    ) -> Result<(String, usize), PhotoDetailError> {
        let author_key = author_key(photo_id);
        let comments_key = number_of_comments_key(photo_id);
        let (author, comments) = tokio::join!(
            self.persister.fetch::<String>(&author_key),
            self.persister.fetch::<usize>(&comments_key),
        );

        match (author, comments) {
            (Ok(author), Ok(comments)) => {
                tracing::debug!(photo_id, "author and comments served from cache");
                return Ok((author, comments));
            }
            (author, comments) => {
                if let Some(err) = [author.err(), comments.err()]
                    .into_iter()
                    .flatten()
                    .find(|err| !err.is_miss())
                {
                    tracing::warn!(photo_id, error = %err, "detail cache unreadable");
                }
            }
        }

        let author = async {
            let album = self
                .api
                .fetch_album(album_id)
                .await
                .map_err(PhotoDetailError::Author)?;
            let user = self
                .api
                .fetch_user(album.user_id)
                .await
                .map_err(PhotoDetailError::Author)?;
            Ok::<_, PhotoDetailError>(user.name)
        };
        let comments = async {
            self.api
                .fetch_comment_count(photo_id)
                .await
                .map_err(PhotoDetailError::Comments)
        };

        let (author, comments) = tokio::try_join!(author, comments)?;
        tracing::info!(photo_id, comments, "author and comments fetched from api");
        Ok((author, comments))
    }

    /// Store both values. A mixed outcome (one written, one already there)
    /// is reported as `Persisted`.
    pub async fn persist(
        &self,
        author: &str,
        number_of_comments: usize,
        photo_id: u64,
    ) -> Result<PersistenceResult, PersistenceError> {
        let author_key = author_key(photo_id);
        let comments_key = number_of_comments_key(photo_id);
        let (author, comments) = tokio::try_join!(
            self.persister.persist(author, &author_key),
            self.persister.persist(&number_of_comments, &comments_key),
        )?;

        match (author, comments) {
            (PersistenceResult::AlreadyPresent, PersistenceResult::AlreadyPresent) => {
                Ok(PersistenceResult::AlreadyPresent)
            }
            (PersistenceResult::Persisted, PersistenceResult::Persisted) => {
                Ok(PersistenceResult::Persisted)
            }
            (author, comments) => {
                tracing::warn!(
                    photo_id,
                    ?author,
                    ?comments,
                    "detail cache was partially populated"
                );
                Ok(PersistenceResult::Persisted)
            }
        }
    }
}
