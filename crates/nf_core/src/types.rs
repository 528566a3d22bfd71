use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const METHOD_EXTRACTIVE: &str = "extractive";
pub const METHOD_AI_ABSTRACTIVE: &str = "ai_abstractive";
pub const METHOD_AI_UNAVAILABLE: &str = "ai_unavailable";

/// Placeholder title when no strategy found one on the page.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRequest {
    pub url: String,
}

/// Clean article text plus whatever metadata the winning extraction
/// strategy produced. Built once by acquisition, read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub text: String,
    pub authors: Vec<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub url: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractiveSummary {
    pub summary: String,
    /// Selected sentences in original document order.
    pub sentences: Vec<String>,
    pub method: String,
}

impl ExtractiveSummary {
    pub fn empty() -> Self {
        Self {
            summary: String::new(),
            sentences: Vec::new(),
            method: METHOD_EXTRACTIVE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Keywords {
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSummary {
    pub summary: String,
    pub method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub article: Option<Article>,
    pub extractive_summary: Option<ExtractiveSummary>,
    pub keywords: Option<Keywords>,
    pub ai_summary: Option<AiSummary>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummarizeResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            article: None,
            extractive_summary: None,
            keywords: None,
            ai_summary: None,
            success: false,
            error: Some(error.into()),
        }
    }
}
