//! The response assembler: validate, acquire, fan out the summarization
//! branches, merge under a deadline.

use std::time::Duration;

use tracing::{error, info};

use nf_core::text::sentences;
use nf_core::types::{METHOD_AI_ABSTRACTIVE, METHOD_AI_UNAVAILABLE};
use nf_core::validate::validate_url;
use nf_core::{
    AcquisitionError, AiSummary, Article, ExtractiveSummary, Keywords, SummarizeResponse,
    UNKNOWN_TITLE,
};
use nf_summarize::{extract_keywords, extractive_summarize};

use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub num_sentences: usize,
    pub num_keywords: usize,
    /// Word budget passed to the abstractive model.
    pub ai_max_length: usize,
    /// How long the assembler waits for the AI branch before degrading.
    pub ai_deadline: Duration,
    pub cache_ttl: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            num_sentences: nf_summarize::DEFAULT_NUM_SENTENCES,
            num_keywords: nf_summarize::DEFAULT_NUM_KEYWORDS,
            ai_max_length: 150,
            ai_deadline: Duration::from_secs(45),
            cache_ttl: Duration::from_secs(600),
        }
    }
}

/// Full pipeline for one request. Never returns an error: every failure
/// mode is folded into the response envelope.
pub async fn run(state: &AppState, raw_url: &str) -> SummarizeResponse {
    let url = match validate_url(raw_url) {
        Ok(url) => url,
        Err(err) => {
            info!("rejected URL {:?}: {}", raw_url, err);
            return SummarizeResponse::failure(err.to_string());
        }
    };

    let cache_key = url.to_string();
    if let Some(hit) = state.cache.get(&cache_key).await {
        info!("cache hit for {}", cache_key);
        return hit;
    }

    let article = match nf_scraper::acquire(&state.http, url.as_str()).await {
        Ok(article) => article,
        Err(err) => {
            error!("acquisition failed for {}: {}", cache_key, err);
            return SummarizeResponse::failure(friendly_acquisition_message(&err));
        }
    };

    let response = summarize_article(state, article).await;
    state.cache.put(cache_key, response.clone()).await;
    response
}

/// Stage 3+4: run the local branch and the AI branches concurrently against
/// the immutable article, then merge. Acquisition already succeeded, so the
/// response is `success: true` no matter how the branches fare.
pub async fn summarize_article(state: &AppState, mut article: Article) -> SummarizeResponse {
    let text = article.text.clone();
    let config = state.config.clone();

    let local = tokio::task::spawn_blocking(move || {
        let extractive = extractive_summarize(&text, config.num_sentences);
        let keywords = extract_keywords(&text, config.num_keywords);
        (extractive, keywords)
    });
    let ai = ai_branch(state, &article.text);
    let title = title_branch(state, &article.title, &article.text);

    let (local_result, ai_summary, generated_title) = tokio::join!(local, ai, title);
    if let Some(title) = generated_title {
        article.title = title;
    }

    let (extractive, keywords) = match local_result {
        Ok(pair) => pair,
        Err(join_err) => {
            // a panic here is a defect, but it must not take the request down
            error!("local summarization branch failed: {}", join_err);
            (ExtractiveSummary::empty(), Keywords::default())
        }
    };

    SummarizeResponse {
        article: Some(article),
        extractive_summary: Some(extractive),
        keywords: Some(keywords),
        ai_summary: Some(ai_summary),
        success: true,
        error: None,
    }
}

async fn ai_branch(state: &AppState, text: &str) -> AiSummary {
    let attempt = state
        .summarizer
        .summarize(text, state.config.ai_max_length);
    match tokio::time::timeout(state.config.ai_deadline, attempt).await {
        Ok(Ok(summary)) => AiSummary {
            summary,
            method: METHOD_AI_ABSTRACTIVE.to_string(),
        },
        Ok(Err(err)) => {
            error!("AI summarization unavailable ({}): {}", state.summarizer.name(), err);
            degraded_ai_summary(text, state.config.ai_max_length)
        }
        Err(_) => {
            error!(
                "AI branch missed the {:?} deadline, degrading",
                state.config.ai_deadline
            );
            degraded_ai_summary(text, state.config.ai_max_length)
        }
    }
}

/// Titles shorter than this are treated as scraping noise and regenerated.
const MIN_TITLE_CHARS: usize = 10;

/// Static headline when the model cannot produce one.
const FALLBACK_TITLE: &str = "Article Summary";

fn needs_generated_title(title: &str) -> bool {
    let trimmed = title.trim();
    trimmed == UNKNOWN_TITLE || trimmed.chars().count() < MIN_TITLE_CHARS
}

/// Returns a replacement title when the scraped one is missing or too short
/// to be a real headline, `None` when the scraped title stands.
async fn title_branch(state: &AppState, title: &str, text: &str) -> Option<String> {
    if !needs_generated_title(title) {
        return None;
    }
    let attempt = state.summarizer.generate_title(text);
    match tokio::time::timeout(state.config.ai_deadline, attempt).await {
        Ok(Ok(generated)) if !generated.is_empty() => Some(generated),
        Ok(Ok(_)) => Some(FALLBACK_TITLE.to_string()),
        Ok(Err(err)) => {
            error!("AI title generation unavailable ({}): {}", state.summarizer.name(), err);
            Some(FALLBACK_TITLE.to_string())
        }
        Err(_) => {
            error!(
                "title generation missed the {:?} deadline, using fallback",
                state.config.ai_deadline
            );
            Some(FALLBACK_TITLE.to_string())
        }
    }
}

/// Leading sentences of the article, truncated to the word budget. Keeps
/// the field useful when the AI service is down.
fn degraded_ai_summary(text: &str, max_length: usize) -> AiSummary {
    let leading = sentences(text)
        .into_iter()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ");
    let words: Vec<&str> = leading.split_whitespace().collect();
    let summary = if words.is_empty() {
        "Unable to generate summary.".to_string()
    } else if words.len() > max_length {
        format!("{}...", words[..max_length].join(" "))
    } else {
        leading
    };
    AiSummary {
        summary,
        method: METHOD_AI_UNAVAILABLE.to_string(),
    }
}

/// Human-readable messages for acquisition failures, keyed by kind.
fn friendly_acquisition_message(err: &AcquisitionError) -> String {
    match err {
        AcquisitionError::Forbidden(_) => {
            "This content is behind a paywall or requires authentication. Try a different \
             article or news source."
                .to_string()
        }
        AcquisitionError::NotFound(_) => {
            "Article not found. Please check the URL and try again.".to_string()
        }
        AcquisitionError::UnsupportedContent(kind) => format!(
            "This URL does not point to a readable article (content type: {}).",
            kind
        ),
        AcquisitionError::Parse(_) => {
            "Unable to extract article content. This site may have anti-scraping protection or \
             an unusual format."
                .to_string()
        }
        AcquisitionError::Network(_) => {
            "An error occurred while fetching the article. Please try again or use a different \
             URL."
                .to_string()
        }
    }
}
