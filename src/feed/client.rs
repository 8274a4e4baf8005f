//! HTTP client for the portal endpoints.

use reqwest::header;
use serde_json::json;
use tracing::debug;

use super::parser::{parse_articles, parse_generated};
use super::types::{ApiErrorBody, Article, Category, FeedError, GeneratedArticle};
use super::util::is_valid_url;
use crate::TARGET_WEB_REQUEST;

/// Client for the portal's read and generate endpoints.
pub struct FeedClient {
    client: reqwest::Client,
    read_url: String,
    generate_url: String,
}

impl FeedClient {
    pub fn new(read_url: &str, generate_url: &str) -> anyhow::Result<Self> {
        if !is_valid_url(read_url) {
            anyhow::bail!("invalid read endpoint URL: {}", read_url);
        }
        if !is_valid_url(generate_url) {
            anyhow::bail!("invalid generate endpoint URL: {}", generate_url);
        }

        let client = reqwest::Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(FeedClient {
            client,
            read_url: read_url.to_string(),
            generate_url: generate_url.to_string(),
        })
    }

    /// Fetch the full article set from the read endpoint.
    pub async fn fetch_articles(&self) -> Result<Vec<Article>, FeedError> {
        debug!(target: TARGET_WEB_REQUEST, "Fetching articles from {}", self.read_url);

        let response = self
            .client
            .get(&self.read_url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::read_error_message(response).await;
            debug!(target: TARGET_WEB_REQUEST, "Read endpoint returned {}: {}", status, message);
            return Err(FeedError::Application {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        parse_articles(&body)
    }

    /// Request generation of a new article, optionally in a given category.
    pub async fn generate(&self, category: Option<Category>) -> Result<GeneratedArticle, FeedError> {
        let payload = match category {
            Some(category) => json!({ "category": category }),
            None => json!({}),
        };
        debug!(target: TARGET_WEB_REQUEST, "Requesting generation from {} with {}", self.generate_url, payload);

        let response = self
            .client
            .post(&self.generate_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::read_error_message(response).await;
            debug!(target: TARGET_WEB_REQUEST, "Generate endpoint returned {}: {}", status, message);
            return Err(FeedError::Application {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        parse_generated(&body)
    }

    // Pull the server's error message out of a failed response, falling
    // back to a generic message when the body is not the expected shape.
    async fn read_error_message(response: reqwest::Response) -> String {
        match response.text().await {
            Ok(body) => match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(parsed) => parsed.error,
                Err(_) => "portal request failed".to_string(),
            },
            Err(_) => "portal request failed".to_string(),
        }
    }
}
