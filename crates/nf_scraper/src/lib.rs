//! Content acquisition: fetch a page, then run the extraction fallback
//! chain until one strategy yields enough article text.

pub mod extract;
pub mod fetch;

use std::time::Duration;

use tracing::{debug, info, warn};

use nf_core::text::word_count;
use nf_core::{AcquisitionError, Article};

pub use extract::{Extraction, Strategy};
pub use fetch::build_client;

/// Extracted text shorter than this is treated as a failed attempt and the
/// next strategy is tried.
pub const MIN_WORDS: usize = 100;

const STRATEGY_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches `url` and walks the strategy chain. Each extraction attempt runs
/// on a blocking thread under its own timeout so a pathological page cannot
/// stall the runtime.
pub async fn acquire(client: &reqwest::Client, url: &str) -> Result<Article, AcquisitionError> {
    let page = fetch::fetch_page(client, url).await?;

    for strategy in Strategy::CHAIN {
        let html = page.html.clone();
        let attempt = tokio::time::timeout(
            STRATEGY_TIMEOUT,
            tokio::task::spawn_blocking(move || {
                strategy
                    .extract(&html)
                    .map(|extraction| (word_count(&extraction.text), extraction))
            }),
        )
        .await;

        match attempt {
            Ok(Ok(Some((words, extraction)))) if words >= MIN_WORDS => {
                info!(
                    strategy = strategy.name(),
                    words, "extraction succeeded for {}", page.url
                );
                return Ok(build_article(extraction, &page.url, words));
            }
            Ok(Ok(Some((words, _)))) => {
                debug!(
                    strategy = strategy.name(),
                    words, "below minimum word threshold, trying next strategy"
                );
            }
            Ok(Ok(None)) => {
                debug!(strategy = strategy.name(), "no text found");
            }
            Ok(Err(join_err)) => {
                warn!(strategy = strategy.name(), "extraction task failed: {}", join_err);
            }
            Err(_) => {
                warn!(strategy = strategy.name(), "extraction attempt timed out");
            }
        }
    }

    Err(exhausted(&page.url))
}

/// Synchronous chain over already-fetched HTML. Same acceptance rule as
/// [`acquire`], without the network step.
pub(crate) fn extract_from_html(html: &str, url: &str) -> Result<Article, AcquisitionError> {
    for strategy in Strategy::CHAIN {
        if let Some(extraction) = strategy.extract(html) {
            let words = word_count(&extraction.text);
            if words >= MIN_WORDS {
                return Ok(build_article(extraction, url, words));
            }
        }
    }
    Err(exhausted(url))
}

fn exhausted(url: &str) -> AcquisitionError {
    AcquisitionError::Parse(format!(
        "no strategy produced at least {} words of text for {}",
        MIN_WORDS, url
    ))
}

fn build_article(extraction: Extraction, url: &str, word_count: usize) -> Article {
    Article {
        title: extraction
            .title
            .unwrap_or_else(|| nf_core::UNKNOWN_TITLE.to_string()),
        text: extraction.text,
        authors: extraction.authors,
        publish_date: extraction.publish_date,
        url: url.to_string(),
        word_count,
    }
}
