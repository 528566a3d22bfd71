//! Abstractive summarization against an OpenRouter-style completion API:
//! bounded input, retries with jittered exponential backoff for transient
//! failures, one secondary-model attempt before giving up.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use nf_core::summarizer::AbstractiveSummarizer;
use nf_core::AiError;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

const BASE_BACKOFF: Duration = Duration::from_millis(500);
const MAX_BACKOFF: Duration = Duration::from_secs(8);
const MAX_JITTER_MS: u64 = 250;

/// Leading slice of the article sent as context for title generation.
const TITLE_CONTEXT_CHARS: usize = 1000;
const MAX_TITLE_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub primary_model: String,
    pub secondary_model: String,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    /// Input budget in characters; text beyond it is truncated before
    /// transmission to stay inside the remote context window.
    pub max_input_chars: usize,
    pub base_url: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            primary_model: "z-ai/glm-4.5-air:free".to_string(),
            secondary_model: "mistralai/mistral-7b-instruct:free".to_string(),
            max_tokens: 3000,
            timeout_seconds: 30,
            max_retries: 3,
            max_input_chars: 12_000,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

pub struct AiClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl fmt::Debug for AiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiClient")
            .field("api_key", &self.config.api_key.as_deref().map(|_| "<redacted>"))
            .field("primary_model", &self.config.primary_model)
            .field("secondary_model", &self.config.secondary_model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl AiClient {
    pub fn new(config: AiConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client, config })
    }

    async fn attempt(&self, model: &str, prompt: &str, api_key: &str) -> Result<String, AiError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.config.max_tokens,
            temperature: 0.3,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(format!("malformed completion body: {}", e)))?;
        let summary = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AiError::InvalidResponse("completion had no choices".to_string()))?;
        Ok(summary)
    }

    /// Retry loop for one model: transient errors back off and retry,
    /// permanent errors return immediately.
    async fn call_with_retries(
        &self,
        model: &str,
        prompt: &str,
        api_key: &str,
    ) -> Result<String, AiError> {
        let mut attempt_no = 0u32;
        loop {
            match self.attempt(model, prompt, api_key).await {
                Ok(summary) => return Ok(summary),
                Err(err) if err.is_transient() && attempt_no < self.config.max_retries => {
                    let delay = backoff_delay(attempt_no);
                    warn!(
                        model,
                        attempt = attempt_no + 1,
                        "transient AI error, retrying in {:?}: {}",
                        delay,
                        err
                    );
                    tokio::time::sleep(delay).await;
                    attempt_no += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl AbstractiveSummarizer for AiClient {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn summarize(&self, text: &str, max_length: usize) -> Result<String, AiError> {
        let api_key = self
            .config
            .api_key
            .clone()
            .ok_or_else(|| AiError::Auth("API key not configured".to_string()))?;

        let input = truncate_chars(text, self.config.max_input_chars);
        let prompt = summarization_prompt(input, max_length);

        match self
            .call_with_retries(&self.config.primary_model, &prompt, &api_key)
            .await
        {
            Ok(summary) => Ok(summary),
            // a bad key will not get better on another model
            Err(err @ AiError::Auth(_)) => Err(err),
            Err(primary_err) => {
                warn!(
                    "primary model {} exhausted ({}), trying secondary {}",
                    self.config.primary_model, primary_err, self.config.secondary_model
                );
                let summary = self
                    .attempt(&self.config.secondary_model, &prompt, &api_key)
                    .await?;
                debug!("secondary model {} answered", self.config.secondary_model);
                Ok(summary)
            }
        }
    }

    async fn generate_title(&self, text: &str) -> Result<String, AiError> {
        let api_key = self
            .config
            .api_key
            .clone()
            .ok_or_else(|| AiError::Auth("API key not configured".to_string()))?;

        let input = truncate_chars(text, TITLE_CONTEXT_CHARS);
        let prompt = title_prompt(input);
        let raw = self
            .call_with_retries(&self.config.primary_model, &prompt, &api_key)
            .await?;
        Ok(clean_title(&raw))
    }
}

fn summarization_prompt(text: &str, max_length: usize) -> String {
    format!(
        "Please provide a concise, accurate summary of the following article in {max_length} \
         words or less.\nFocus on the key points, main events, and important information. Write \
         in a neutral, journalistic style.\n\nArticle:\n{text}\n\nSummary:"
    )
}

fn title_prompt(text: &str) -> String {
    format!(
        "Based on the following article, generate a concise, engaging title (10 words or \
         less).\nMake it catchy and informative.\n\nArticle:\n{text}\n\nTitle:"
    )
}

/// Models like to wrap titles in quotes or echo the `Title:` cue back.
fn clean_title(raw: &str) -> String {
    let mut title = raw.trim();
    title = title.trim_matches(['"', '\'']).trim();
    title = title.strip_prefix("Title:").unwrap_or(title).trim_start();
    truncate_chars(title, MAX_TITLE_CHARS).to_string()
}

/// Exponential backoff with uniform jitter: 500ms, 1s, 2s, ... capped at 8s,
/// plus up to 250ms of noise to avoid synchronized retry storms.
fn backoff_delay(attempt_no: u32) -> Duration {
    let exp = BASE_BACKOFF
        .saturating_mul(1u32 << attempt_no.min(8))
        .min(MAX_BACKOFF);
    exp + Duration::from_millis(rand::thread_rng().gen_range(0..=MAX_JITTER_MS))
}

/// Cuts at a char boundary, never mid-codepoint.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

fn classify_status(status: StatusCode) -> AiError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            AiError::RateLimited(format!("API returned {}", status))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AiError::Auth(format!("API returned {}", status))
        }
        s if s.is_server_error() => {
            AiError::ServiceUnavailable(format!("API returned {}", status))
        }
        _ => AiError::InvalidResponse(format!("API returned unexpected status {}", status)),
    }
}

fn classify_transport(err: reqwest::Error) -> AiError {
    if err.is_timeout() {
        AiError::Timeout(err.to_string())
    } else {
        AiError::ServiceUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // multi-byte chars must not be split
        assert_eq!(truncate_chars("日本語のテキスト", 3), "日本語");
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            AiError::RateLimited(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED),
            AiError::Auth(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY),
            AiError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST),
            AiError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_backoff_grows_and_is_capped() {
        for _ in 0..20 {
            let first = backoff_delay(0);
            let fifth = backoff_delay(5);
            assert!(first >= BASE_BACKOFF);
            assert!(first <= BASE_BACKOFF + Duration::from_millis(MAX_JITTER_MS));
            assert!(fifth <= MAX_BACKOFF + Duration::from_millis(MAX_JITTER_MS));
        }
        // without jitter variance the exponential part must not shrink
        assert!(backoff_delay(3) + Duration::from_millis(MAX_JITTER_MS) >= backoff_delay(1));
    }

    #[test]
    fn test_prompt_carries_length_budget() {
        let prompt = summarization_prompt("body text", 150);
        assert!(prompt.contains("150 words or less"));
        assert!(prompt.contains("body text"));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_fast_without_network() {
        let client = AiClient::new(AiConfig::default()).unwrap();
        let err = client.summarize("some text", 100).await.unwrap_err();
        assert!(matches!(err, AiError::Auth(_)));
    }

    #[tokio::test]
    async fn test_title_generation_without_key_fails_fast() {
        let client = AiClient::new(AiConfig::default()).unwrap();
        let err = client.generate_title("some text").await.unwrap_err();
        assert!(matches!(err, AiError::Auth(_)));
    }

    #[test]
    fn test_title_prompt_carries_article_context() {
        let prompt = title_prompt("article body");
        assert!(prompt.contains("article body"));
        assert!(prompt.ends_with("Title:"));
    }

    #[test]
    fn test_clean_title_strips_quotes_and_cue() {
        assert_eq!(clean_title("\"Harbor Plan Approved\""), "Harbor Plan Approved");
        assert_eq!(clean_title("'Harbor Plan Approved'"), "Harbor Plan Approved");
        assert_eq!(clean_title("Title: Harbor Plan Approved"), "Harbor Plan Approved");
        assert_eq!(
            clean_title("\"Title: Harbor Plan Approved\"\n"),
            "Harbor Plan Approved"
        );
        assert_eq!(clean_title("Plain Headline"), "Plain Headline");
    }

    #[test]
    fn test_clean_title_caps_length_on_char_boundary() {
        let long = "словослово".repeat(20);
        let cleaned = clean_title(&long);
        assert_eq!(cleaned.chars().count(), MAX_TITLE_CHARS);
    }
}
