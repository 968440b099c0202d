//! Thin HTTP loader used by the API client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::error::RemoteError;
use crate::config::ApiConfig;

/// Loads raw bytes or JSON models over HTTP.
///
/// Every request is bounded by the configured request timeout; anything
/// other than `200 OK` is an error.
#[derive(Clone)]
pub struct Remote {
    client: Client,
}

impl Remote {
    pub fn new(config: &ApiConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(RemoteError::Client)?;

        Ok(Self { client })
    }

    pub async fn load_data(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteError::from_reqwest(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::from_reqwest(url, e))?;

        tracing::debug!(url, bytes = body.len(), "loaded");
        Ok(body.to_vec())
    }

    pub async fn load_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        let body = self.load_data(url).await?;
        serde_json::from_slice(&body).map_err(|source| RemoteError::Parsing {
            url: url.to_string(),
            source,
        })
    }
}
