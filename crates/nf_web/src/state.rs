use std::sync::Arc;

use nf_core::summarizer::AbstractiveSummarizer;

use crate::cache::ResponseCache;
use crate::pipeline::PipelineConfig;

pub struct AppState {
    /// Shared fetch client for acquisition.
    pub http: reqwest::Client,
    pub summarizer: Arc<dyn AbstractiveSummarizer>,
    pub cache: ResponseCache,
    pub config: PipelineConfig,
}

impl AppState {
    pub fn new(
        http: reqwest::Client,
        summarizer: Arc<dyn AbstractiveSummarizer>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            http,
            summarizer,
            cache: ResponseCache::new(config.cache_ttl),
            config,
        }
    }
}
