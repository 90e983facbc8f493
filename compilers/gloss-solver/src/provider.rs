use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("embedding provider unavailable: {0}")]
    Unavailable(String),
    #[error("malformed embedding response: {0}")]
    Malformed(String),
}

/// Source of embedding vectors for vocabulary words and queries.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}

#[cfg(feature = "remote")]
pub use http::HttpEmbeddingProvider;

#[cfg(feature = "remote")]
mod http {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};

    use super::{EmbeddingProvider, ProviderError};

    #[derive(Serialize)]
    struct EmbedRequest<'a> {
        text: &'a str,
    }

    #[derive(Deserialize)]
    struct EmbedResponse {
        vector: Vec<f32>,
    }

    /// `POST {"text": ...}` -> `{"vector": [...]}`.
    pub struct HttpEmbeddingProvider {
        client: reqwest::Client,
        endpoint: String,
        api_key: Option<String>,
    }

    impl HttpEmbeddingProvider {
        pub fn new(
            endpoint: impl Into<String>,
            api_key: Option<String>,
            timeout: Option<Duration>,
        ) -> Result<Self, ProviderError> {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
            Ok(Self {
                client,
                endpoint: endpoint.into(),
                api_key,
            })
        }
    }

    #[async_trait]
    impl EmbeddingProvider for HttpEmbeddingProvider {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
            let mut request = self.client.post(&self.endpoint).json(&EmbedRequest { text });
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = request
                .send()
                .await
                .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
            if !response.status().is_success() {
                return Err(ProviderError::Unavailable(format!(
                    "status {}",
                    response.status()
                )));
            }

            let body: EmbedResponse = response
                .json()
                .await
                .map_err(|e| ProviderError::Malformed(e.to_string()))?;
            if body.vector.is_empty() {
                return Err(ProviderError::Malformed("empty vector".to_string()));
            }
            Ok(body.vector)
        }
    }
}
