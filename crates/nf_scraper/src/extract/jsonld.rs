//! Article metadata from JSON-LD `<script>` blocks.

use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

use super::parse_date;

#[derive(Debug, Default)]
pub struct JsonLdMetadata {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub publish_date: Option<DateTime<Utc>>,
}

pub fn extract_metadata(document: &Html) -> JsonLdMetadata {
    let mut meta = JsonLdMetadata::default();
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();

    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let Ok(json) = serde_json::from_str::<serde_json::Value>(raw.trim()) else {
            continue;
        };
        // pages sometimes wrap the article object in a @graph array
        let candidates: Vec<&serde_json::Value> = match json.get("@graph").and_then(|g| g.as_array())
        {
            Some(graph) => graph.iter().collect(),
            None => vec![&json],
        };

        for node in candidates {
            if meta.title.is_none() {
                meta.title = node
                    .get("headline")
                    .and_then(|h| h.as_str())
                    .map(|h| h.trim().to_string())
                    .filter(|h| !h.is_empty());
            }
            if meta.publish_date.is_none() {
                meta.publish_date = node
                    .get("datePublished")
                    .and_then(|d| d.as_str())
                    .and_then(parse_date);
            }
            if meta.authors.is_empty() {
                if let Some(author) = node.get("author") {
                    meta.authors = author_names(author);
                }
            }
        }
    }

    meta
}

fn author_names(author: &serde_json::Value) -> Vec<String> {
    let mut names = Vec::new();
    match author {
        serde_json::Value::Array(items) => {
            for item in items {
                if let Some(name) = item.get("name").and_then(|n| n.as_str()) {
                    names.push(name.trim().to_string());
                }
            }
        }
        serde_json::Value::Object(obj) => {
            if let Some(name) = obj.get("name").and_then(|n| n.as_str()) {
                names.push(name.trim().to_string());
            }
        }
        serde_json::Value::String(s) => {
            names.push(s.trim().to_string());
        }
        _ => {}
    }
    names.retain(|n| !n.is_empty());
    names
}
