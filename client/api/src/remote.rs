use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Where response bodies come from.
#[async_trait]
pub trait Source: Send + Sync {
    async fn get(&self, url: &str) -> Result<String, ApiError>;
}

#[derive(Clone, Default)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Source for HttpSource {
    async fn get(&self, url: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(url, e))?;

        let status = response.status();
        debug!(%url, %status, "Fetched");

        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| transport(url, e))
    }
}

fn transport(url: &str, source: reqwest::Error) -> ApiError {
    if source.is_connect() {
        ApiError::Unreachable {
            url: url.to_string(),
        }
    } else {
        ApiError::Transport {
            url: url.to_string(),
            source,
        }
    }
}

/// Fetch `url` and decode its body as `T`.
pub async fn fetch<T: DeserializeOwned>(source: &dyn Source, url: &str) -> Result<T, ApiError> {
    let json_string = source.get(url).await?;

    serde_json::from_str(&json_string).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}
