//! Terminal rendering for article listings and full articles.

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use prettytable::{Cell, Row as PrettyRow, Table};

use crate::feed::Article;

/// Format an article date in local time, or a placeholder when missing.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "unknown".to_string(),
    }
}

/// Build a listing table for the given articles.
pub fn article_table(articles: &[&Article]) -> Table {
    let mut table = Table::new();
    table.add_row(PrettyRow::new(vec![
        Cell::new("ID"),
        Cell::new("Category"),
        Cell::new("Title"),
        Cell::new("Created"),
        Cell::new("Words"),
        Cell::new("Views"),
    ]));

    for article in articles {
        table.add_row(PrettyRow::new(vec![
            Cell::new(&article.id.to_string()),
            Cell::new(article.category.as_str()),
            Cell::new(&truncate(&article.title, 60)),
            Cell::new(&format_date(article.created_at)),
            Cell::new(&article.word_count.to_string()),
            Cell::new(&article.view_count.to_string()),
        ]));
    }

    table
}

/// Print a full article with header, counters, and paragraphs.
pub fn print_article(article: &Article) {
    println!("{}", "═".repeat(80).bright_blue());
    println!("{}", article.title.bright_white().bold());
    println!(
        "{}  {}  {} words  {} views",
        article.category.as_str().bright_cyan(),
        format_date(article.created_at).dimmed(),
        article.word_count,
        article.view_count
    );
    if let Some(ref image_url) = article.image_url {
        println!("{}: {}", "Image".bright_blue(), image_url);
    }
    println!("{}", "─".repeat(80).dimmed());

    for paragraph in article.content.split('\n').filter(|p| !p.trim().is_empty()) {
        println!("{}\n", paragraph);
    }

    println!("{}", "═".repeat(80).bright_blue());
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
