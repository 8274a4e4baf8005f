//! One-shot diagnostics for a read endpoint.

use reqwest::header;
use serde_json::Value;
use tracing::debug;

use super::types::{Article, Category};
use super::util::is_valid_url;
use crate::TARGET_WEB_REQUEST;

/// Diagnostic status codes for endpoint probing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Success,
    RequestFailed,
    ParseError,
}

/// Payload shape detected in the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    BareArray,
    NewsObject,
    Unknown,
}

impl PayloadShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadShape::BareArray => "bare array",
            PayloadShape::NewsObject => "object with 'news' key",
            PayloadShape::Unknown => "unrecognized",
        }
    }
}

/// Detailed probe results for a read endpoint
#[derive(Debug)]
pub struct ProbeReport {
    pub status: ProbeStatus,
    pub http_status: Option<u16>,
    pub content_type: Option<String>,
    pub shape: PayloadShape,
    pub articles_found: usize,
    pub per_category: Vec<(Category, usize)>,
    pub preview: Vec<(i64, String)>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ProbeReport {
    fn empty() -> Self {
        ProbeReport {
            status: ProbeStatus::RequestFailed,
            http_status: None,
            content_type: None,
            shape: PayloadShape::Unknown,
            articles_found: 0,
            per_category: Vec::new(),
            preview: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Probe a read endpoint and report what it serves.
pub async fn probe_feed(url: &str) -> anyhow::Result<ProbeReport> {
    if !is_valid_url(url) {
        anyhow::bail!("invalid endpoint URL: {}", url);
    }

    let mut report = ProbeReport::empty();

    let client = reqwest::Client::builder()
        .gzip(true)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

    debug!(target: TARGET_WEB_REQUEST, "Probing endpoint {}", url);
    let response = match client
        .get(url)
        .header(header::ACCEPT, "application/json")
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            report.errors.push(format!("Request failed: {}", err));
            return Ok(report);
        }
    };

    report.http_status = Some(response.status().as_u16());
    report.content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    if !response.status().is_success() {
        report
            .errors
            .push(format!("HTTP error: {}", response.status()));
        return Ok(report);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            report.errors.push(format!("Failed to read body: {}", err));
            return Ok(report);
        }
    };

    inspect_body(&body, &mut report);
    Ok(report)
}

// Shape detection and per-article checks, shared with the tests below.
fn inspect_body(body: &str, report: &mut ProbeReport) {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            report.status = ProbeStatus::ParseError;
            report.errors.push(format!("Body is not JSON: {}", err));
            return;
        }
    };

    let (shape, items) = match &value {
        Value::Array(items) => (PayloadShape::BareArray, Some(items)),
        Value::Object(map) => match map.get("news") {
            Some(Value::Array(items)) => (PayloadShape::NewsObject, Some(items)),
            _ => (PayloadShape::Unknown, None),
        },
        _ => (PayloadShape::Unknown, None),
    };
    report.shape = shape;

    let Some(items) = items else {
        report.status = ProbeStatus::ParseError;
        report
            .errors
            .push("JSON is neither a bare array nor an object with a 'news' array".to_string());
        return;
    };

    let mut seen_ids = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match serde_json::from_value::<Article>(item.clone()) {
            Ok(article) => {
                if seen_ids.contains(&article.id) {
                    report
                        .warnings
                        .push(format!("Duplicate article id {}", article.id));
                }
                seen_ids.push(article.id);

                if article.created_at.is_none() {
                    report
                        .warnings
                        .push(format!("Article {} has no parseable date", article.id));
                }

                if let Some(entry) = report
                    .per_category
                    .iter_mut()
                    .find(|(c, _)| *c == article.category)
                {
                    entry.1 += 1;
                } else {
                    report.per_category.push((article.category, 1));
                }

                if report.preview.len() < 5 {
                    report.preview.push((article.id, article.title));
                }
            }
            Err(err) => {
                report
                    .errors
                    .push(format!("Article at index {} is malformed: {}", i, err));
            }
        }
    }

    report.articles_found = seen_ids.len();
    report.status = if report.errors.is_empty() {
        ProbeStatus::Success
    } else {
        ProbeStatus::ParseError
    };
}
