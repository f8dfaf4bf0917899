use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No route to {url}")]
    Unreachable { url: String },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid url {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Url of the request that failed, if there was one.
    pub fn url(&self) -> Option<&str> {
        match self {
            ApiError::Transport { url, .. }
            | ApiError::Unreachable { url }
            | ApiError::Status { url, .. }
            | ApiError::Decode { url, .. } => Some(url),
            ApiError::InvalidUrl(_) => None,
        }
    }
}
