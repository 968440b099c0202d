use thiserror::Error;

/// Errors produced while talking to the REST API.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection or protocol failure
    #[error("request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived with a status other than 200
    #[error("request to '{url}' returned status {status}")]
    Status { url: String, status: u16 },

    /// Request exceeded the configured timeout
    #[error("request to '{url}' timed out")]
    Timeout { url: String },

    /// Body did not decode into the expected model
    #[error("failed to decode response from '{url}': {source}")]
    Parsing {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// URL could not be built from the configured base
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl RemoteError {
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            RemoteError::Timeout {
                url: url.to_string(),
            }
        } else {
            RemoteError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}
