use async_trait::async_trait;

use crate::error::AiError;

/// Seam for the abstractive branch of the pipeline. The production
/// implementation talks to a remote completion API; tests substitute stubs.
#[async_trait]
pub trait AbstractiveSummarizer: Send + Sync {
    /// Human-readable name of the backing model/provider, for logs.
    fn name(&self) -> &str;

    /// Generate an abstractive summary of at most `max_length` words.
    async fn summarize(&self, text: &str, max_length: usize) -> Result<String, AiError>;

    /// Generate a headline for an article whose page carried no usable title.
    async fn generate_title(&self, text: &str) -> Result<String, AiError>;
}
