use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Ai(#[from] AiError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal failures while turning a URL into article text. Any of these
/// short-circuits the pipeline into a `success: false` response.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("access forbidden: {0}")]
    Forbidden(String),

    #[error("page not found: {0}")]
    NotFound(String),

    #[error("unsupported content type: {0}")]
    UnsupportedContent(String),

    #[error("could not extract article content: {0}")]
    Parse(String),
}

/// Failures from the external completion API. These never surface to the
/// caller; the pipeline degrades to an `ai_unavailable` summary instead.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AiError {
    /// Transient errors are worth retrying with backoff; the rest are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AiError::RateLimited(_) | AiError::Timeout(_) | AiError::ServiceUnavailable(_)
        )
    }
}
