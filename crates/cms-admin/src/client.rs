use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ProviderError;

#[derive(Debug, Deserialize)]
struct WireError {
    code: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WireEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<WireError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The subset of a content item the admin side reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub body: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: ContentMetadata,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub total_count: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentList {
    pub contents: Vec<ContentItem>,
    pub pagination: PageSummary,
}

/// HTTP client for the content API rooted at an injected base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> Result<Self, ProviderError> {
        if base.cannot_be_a_base() {
            return Err(ProviderError::InvalidUrl(base.to_string()));
        }

        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    pub fn parse(base: &str) -> Result<Self, ProviderError> {
        let url =
            Url::parse(base).map_err(|err| ProviderError::InvalidUrl(format!("{base}: {err}")))?;
        Self::new(url)
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(String, String)],
    ) -> Result<T, ProviderError> {
        let response = self.http.get(url).query(query).send().await?;
        let envelope: WireEnvelope<T> = response.json().await?;

        if let Some(error) = envelope.error {
            return Err(ProviderError::Api {
                code: error.code,
                message: error.message,
            });
        }

        match (envelope.success, envelope.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(ProviderError::MalformedResponse(
                "envelope carried neither data nor error".to_string(),
            )),
        }
    }

    pub async fn list_contents(
        &self,
        query: &[(String, String)],
    ) -> Result<ContentList, ProviderError> {
        let url = self.endpoint(&["api", "v1", "contents"])?;
        self.fetch(url, query).await
    }

    pub async fn get_content(&self, id: &str) -> Result<ContentItem, ProviderError> {
        let url = self.endpoint(&["api", "v1", "contents", id])?;
        self.fetch(url, &[]).await
    }
}
