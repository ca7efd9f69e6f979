use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

use crate::domain::{ports::DocumentLoader, DomainError, FetchedDocument};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("doc-chat/", env!("CARGO_PKG_VERSION"));

/// Loads the text of a publicly shared Google Doc via its HTML export.
pub struct GoogleDocLoader {
    client: reqwest::Client,
    min_words: usize,
}

impl GoogleDocLoader {
    pub fn new(min_words: usize) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(Self { client, min_words })
    }
}

fn doc_id_from_url(url: &str) -> Result<String, DomainError> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("valid pattern"));

    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| DomainError::validation("Invalid Google Docs link format."))
}

fn export_url(doc_id: &str) -> String {
    format!("https://docs.google.com/document/d/{doc_id}/export?format=html")
}

/// Pulls the readable text out of the exported HTML: headings, paragraphs
/// and list items, one per line. Scripts and styles are never selected.
fn extract_text(html: &str) -> FetchedDocument {
    let document = Html::parse_document(html);

    let title = Selector::parse("title").ok().and_then(|sel| {
        document
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    });

    let content = Selector::parse("h1, h2, h3, p, li")
        .map(|sel| {
            document
                .select(&sel)
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    FetchedDocument {
        title,
        text: content,
    }
}

#[async_trait]
impl DocumentLoader for GoogleDocLoader {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, DomainError> {
        let doc_id = doc_id_from_url(url)?;
        let export = export_url(&doc_id);
        debug!(doc_id, "fetching document export");

        let response = self
            .client
            .get(&export)
            .send()
            .await
            .map_err(|_| DomainError::fetch("Unable to fetch the document."))?;

        if response.status() == reqwest::StatusCode::FORBIDDEN {
            return Err(DomainError::forbidden(
                "Document is private. Please set it to 'Anyone with the link can view'.",
            ));
        }
        if !response.status().is_success() {
            return Err(DomainError::fetch("Unable to fetch the document."));
        }

        let html = response
            .text()
            .await
            .map_err(|_| DomainError::fetch("Unable to fetch the document."))?;

        let fetched = extract_text(&html);
        if fetched.word_count() < self.min_words {
            return Err(DomainError::validation(
                "The document is empty or too short.",
            ));
        }

        Ok(fetched)
    }
}
