//! Response body normalization for the portal endpoints.

use super::types::{Article, FeedError, GeneratedArticle, NewsPayload};

/// Parse a read-endpoint body into the canonical article collection.
///
/// The deployed portal has served two shapes over time: a bare JSON array
/// of articles, and an object wrapping the array under a `news` key. Both
/// normalize to the same `Vec<Article>` here, before anything downstream
/// sees the payload.
pub fn parse_articles(body: &str) -> Result<Vec<Article>, FeedError> {
    let payload: NewsPayload = serde_json::from_str(body)?;
    Ok(payload.into_articles())
}

/// Parse a generate-endpoint success body.
///
/// Any success body carrying at least `title` and `word_count` is accepted;
/// the full-article shape is a superset and parses identically.
pub fn parse_generated(body: &str) -> Result<GeneratedArticle, FeedError> {
    Ok(serde_json::from_str(body)?)
}
