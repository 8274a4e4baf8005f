//! The article list controller: fetch, filter, generate.

use tracing::{info, warn};

use super::client::FeedClient;
use super::types::{Article, Category, CategoryFilter, FeedError, GeneratedArticle};
use crate::TARGET_WEB_REQUEST;

/// Holds the full fetched article set plus the active filters.
///
/// The filtered view is recomputed from the latest full set on every read;
/// a successful refresh replaces the set wholesale, and a failed refresh
/// leaves it untouched.
pub struct ArticleList {
    client: FeedClient,
    articles: Vec<Article>,
    category: CategoryFilter,
    search: String,
}

impl ArticleList {
    pub fn new(client: FeedClient) -> Self {
        ArticleList {
            client,
            articles: Vec::new(),
            category: CategoryFilter::All,
            search: String::new(),
        }
    }

    /// Fetch the full article set, replacing the current collection.
    ///
    /// On any failure the existing collection is left as-is and the error
    /// is returned for the caller to log.
    pub async fn refresh(&mut self) -> Result<usize, FeedError> {
        let articles = self.client.fetch_articles().await?;
        info!(target: TARGET_WEB_REQUEST, "Refreshed article list: {} articles", articles.len());
        self.articles = articles;
        Ok(self.articles.len())
    }

    pub fn set_category(&mut self, filter: CategoryFilter) {
        self.category = filter;
    }

    pub fn set_search_query(&mut self, text: &str) {
        self.search = text.to_string();
    }

    /// The articles matching both active filters, in source order.
    ///
    /// Empty or whitespace-only search text imposes no restriction; the
    /// match is a case-insensitive substring test over title and content.
    pub fn filtered(&self) -> Vec<&Article> {
        let query = self.search.trim().to_lowercase();
        self.articles
            .iter()
            .filter(|article| self.category.matches(article.category))
            .filter(|article| {
                query.is_empty()
                    || article.title.to_lowercase().contains(&query)
                    || article.content.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Request generation of a new article, then refresh the collection.
    ///
    /// The generated article is never spliced in locally; a follow-up
    /// refresh fetches the authoritative set. If that refresh fails the
    /// stale collection stands and generation still reports success.
    pub async fn generate(
        &mut self,
        category: Option<Category>,
    ) -> Result<GeneratedArticle, FeedError> {
        let generated = self.client.generate(category).await?;
        info!(
            target: TARGET_WEB_REQUEST,
            "Generated article '{}' ({} words)", generated.title, generated.word_count
        );

        if let Err(err) = self.refresh().await {
            warn!(target: TARGET_WEB_REQUEST, "Refresh after generation failed: {}", err);
        }

        Ok(generated)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn find(&self, id: i64) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::util::test_support::{spawn_stub_sequence, spawn_stub_server};

    fn article(id: i64, title: &str, category: Category, content: &str) -> Article {
        serde_json::from_str(&format!(
            r#"{{"id": {}, "title": "{}", "category": "{}", "content": "{}"}}"#,
            id, title, category, content
        ))
        .unwrap()
    }

    fn list_with(articles: Vec<Article>) -> ArticleList {
        let client = FeedClient::new("http://127.0.0.1:1/news", "http://127.0.0.1:1/gen").unwrap();
        let mut list = ArticleList::new(client);
        list.articles = articles;
        list
    }

    fn sample() -> Vec<Article> {
        vec![
            article(1, "Rust 2.0 announced", Category::IT, "The compiler team shipped it"),
            article(2, "Bitcoin dips", Category::Cryptocurrency, "Markets react to rust on mining rigs"),
            article(3, "New strategy game", Category::Games, "Turn-based tactics"),
            article(4, "Rates hold steady", Category::Finance, "Central bank statement"),
        ]
    }

    #[test]
    fn category_filter_selects_exact_subset() {
        let mut list = list_with(sample());
        list.set_category(CategoryFilter::Only(Category::Games));
        let filtered = list.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 3);

        list.set_category(CategoryFilter::All);
        assert_eq!(list.filtered().len(), 4);
    }

    #[test]
    fn search_matches_title_and_content_case_insensitively() {
        let mut list = list_with(sample());
        list.set_search_query("RUST");
        let ids: Vec<i64> = list.filtered().iter().map(|a| a.id).collect();
        // Matches title of 1 and content of 2, source order preserved
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn whitespace_search_imposes_no_restriction() {
        let mut list = list_with(sample());
        list.set_search_query("   ");
        assert_eq!(list.filtered().len(), 4);
        list.set_search_query("");
        assert_eq!(list.filtered().len(), 4);
    }

    #[test]
    fn combined_filters_intersect() {
        let mut list = list_with(sample());
        list.set_category(CategoryFilter::Only(Category::IT));
        list.set_search_query("rust");
        let ids: Vec<i64> = list.filtered().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn find_locates_article_by_id() {
        let list = list_with(sample());
        assert_eq!(list.find(3).map(|a| a.title.as_str()), Some("New strategy game"));
        assert!(list.find(99).is_none());
    }

    #[tokio::test]
    async fn successful_refresh_replaces_collection() {
        let body = r#"[{"id": 10, "title": "Fresh", "category": "World", "content": "x"}]"#;
        let url = spawn_stub_server("200 OK", body.to_string()).await;
        let client = FeedClient::new(&url, &url).unwrap();
        let mut list = ArticleList::new(client);
        list.articles = sample();

        let count = list.refresh().await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(list.articles().len(), 1);
        assert_eq!(list.articles()[0].id, 10);
    }

    #[tokio::test]
    async fn failed_refresh_leaves_collection_unchanged() {
        let client = FeedClient::new("http://127.0.0.1:1/news", "http://127.0.0.1:1/gen").unwrap();
        let mut list = ArticleList::new(client);
        list.articles = sample();

        assert!(list.refresh().await.is_err());
        assert_eq!(list.articles().len(), 4);
        assert_eq!(list.articles()[0].id, 1);
    }

    #[tokio::test]
    async fn generation_refreshes_and_new_article_appears_once() {
        let generated = r#"{"title": "Quantum chips", "word_count": 280}"#;
        let refreshed = r#"[
            {"id": 20, "title": "Quantum chips", "category": "IT", "content": "x"},
            {"id": 19, "title": "Older story", "category": "World", "content": "y"}
        ]"#;
        let url = spawn_stub_sequence(vec![
            ("200 OK", generated.to_string()),
            ("200 OK", refreshed.to_string()),
        ])
        .await;
        let client = FeedClient::new(&url, &url).unwrap();
        let mut list = ArticleList::new(client);

        let summary = list.generate(Some(Category::IT)).await.unwrap();
        assert_eq!(summary.title, "Quantum chips");
        assert_eq!(summary.word_count, 280);

        let occurrences = list
            .articles()
            .iter()
            .filter(|a| a.title == "Quantum chips")
            .count();
        assert_eq!(occurrences, 1);
    }

    #[tokio::test]
    async fn generation_succeeds_even_when_follow_up_refresh_fails() {
        let generated = r#"{"title": "Lone success", "word_count": 90}"#;
        // Only one response: the POST succeeds, the follow-up GET finds
        // the server gone.
        let url = spawn_stub_sequence(vec![("200 OK", generated.to_string())]).await;
        let client = FeedClient::new(&url, &url).unwrap();
        let mut list = ArticleList::new(client);
        list.articles = sample();

        let summary = list.generate(None).await.unwrap();
        assert_eq!(summary.title, "Lone success");
        // Stale collection stands
        assert_eq!(list.articles().len(), 4);
    }

    #[tokio::test]
    async fn failed_generation_leaves_collection_unchanged() {
        let client = FeedClient::new("http://127.0.0.1:1/news", "http://127.0.0.1:1/gen").unwrap();
        let mut list = ArticleList::new(client);
        list.articles = sample();

        assert!(list.generate(Some(Category::IT)).await.is_err());
        assert_eq!(list.articles().len(), 4);
    }
}
