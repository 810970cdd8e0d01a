//! HTTP implementation of the catalog provider over `reqwest`.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::Config;
use crate::error::Result;
use crate::query::CatalogQuery;

use super::{CatalogProvider, CoursePage, FetchError, FetchResult, request_params};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response envelope for the course collection endpoint.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<CoursePage>,
}

pub struct HttpCatalogProvider {
    client: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl HttpCatalogProvider {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.map(SecretString::from),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.base_url(), config.api_token())
    }
}

#[async_trait::async_trait]
impl CatalogProvider for HttpCatalogProvider {
    async fn fetch_page(&self, query: &CatalogQuery) -> FetchResult {
        let url = format!("{}/courses", self.base_url);
        let params = request_params(query);

        let mut request = self.client.get(&url).query(&params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!("catalog request failed: {e}");
            FetchError::new(e.to_string())
        })?;

        let status = response.status();

        // Parse the envelope even on non-2xx responses: the server's own
        // message beats a bare status line.
        let envelope: ApiEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) if !status.is_success() => {
                tracing::debug!("catalog returned HTTP {status} with unreadable body: {e}");
                return Err(FetchError::new(format!(
                    "server returned HTTP {}",
                    status.as_u16()
                )));
            }
            Err(e) => return Err(FetchError::new(e.to_string())),
        };

        if !envelope.success {
            let message = envelope.message.filter(|m| !m.is_empty());
            return Err(match message {
                Some(message) => FetchError::new(message),
                None if !status.is_success() => {
                    FetchError::new(format!("server returned HTTP {}", status.as_u16()))
                }
                None => FetchError::new(super::GENERIC_FETCH_ERROR),
            });
        }

        envelope
            .data
            .ok_or_else(|| FetchError::new(super::GENERIC_FETCH_ERROR))
    }
}
