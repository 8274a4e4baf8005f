//! Type definitions for the feed module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::time::Duration;

use super::util::parse_date;

/// Article categories published by the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    IT,
    Cryptocurrency,
    Games,
    Finance,
    World,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::IT,
        Category::Cryptocurrency,
        Category::Games,
        Category::Finance,
        Category::World,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::IT => "IT",
            Category::Cryptocurrency => "Cryptocurrency",
            Category::Games => "Games",
            Category::Finance => "Finance",
            Category::World => "World",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Error returned when a category name is not recognized
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown category '{0}' (expected one of: IT, Cryptocurrency, Games, Finance, World)")]
pub struct UnknownCategory(pub String);

/// Category restriction applied to the article list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => *only == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// A single article as served by the read endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub category: Category,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub word_count: i64,
    #[serde(default)]
    pub view_count: i64,
}

/// The two payload shapes the read endpoint is known to serve
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NewsPayload {
    Bare(Vec<Article>),
    Wrapped { news: Vec<Article> },
}

impl NewsPayload {
    pub fn into_articles(self) -> Vec<Article> {
        match self {
            NewsPayload::Bare(articles) => articles,
            NewsPayload::Wrapped { news } => news,
        }
    }
}

/// Summary of a successful generation request
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedArticle {
    pub title: String,
    pub word_count: i64,
}

/// Error body returned by the portal on failed requests
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Errors from the portal endpoints
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("portal error (status {status}): {message}")]
    Application { status: u16, message: String },
}

// Constants
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

// Accepts RFC 3339, timezone-naive ISO 8601, or null.
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("it".parse::<Category>().unwrap(), Category::IT);
        assert_eq!("GAMES".parse::<Category>().unwrap(), Category::Games);
        assert_eq!(
            "cryptocurrency".parse::<Category>().unwrap(),
            Category::Cryptocurrency
        );
        assert!("sports".parse::<Category>().is_err());
    }

    #[test]
    fn category_filter_parses_all_and_names() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "finance".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Finance)
        );
        assert!("unknown".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn category_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::World));
        assert!(CategoryFilter::Only(Category::IT).matches(Category::IT));
        assert!(!CategoryFilter::Only(Category::IT).matches(Category::Games));
    }

    #[test]
    fn article_deserializes_rfc3339_date() {
        let json = r#"{
            "id": 1,
            "title": "Test",
            "category": "IT",
            "content": "Body",
            "created_at": "2025-06-01T10:30:00Z",
            "word_count": 120,
            "view_count": 3
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, 1);
        assert_eq!(article.category, Category::IT);
        assert!(article.created_at.is_some());
        assert!(article.image_url.is_none());
    }

    #[test]
    fn article_accepts_naive_and_null_dates() {
        let naive = r#"{"id": 2, "title": "A", "category": "Games", "content": "B",
                        "created_at": "2025-06-01T10:30:00"}"#;
        let article: Article = serde_json::from_str(naive).unwrap();
        assert!(article.created_at.is_some());

        let null = r#"{"id": 3, "title": "A", "category": "Games", "content": "B",
                       "created_at": null}"#;
        let article: Article = serde_json::from_str(null).unwrap();
        assert!(article.created_at.is_none());
    }

    #[test]
    fn generated_article_parses_full_article_body() {
        // The generate endpoint may return the whole article; only the
        // summary fields matter to the client.
        let json = r#"{"id": 9, "title": "Fresh", "category": "World",
                       "content": "...", "word_count": 321, "view_count": 0}"#;
        let generated: GeneratedArticle = serde_json::from_str(json).unwrap();
        assert_eq!(generated.title, "Fresh");
        assert_eq!(generated.word_count, 321);
    }
}
