pub mod error;
pub mod summarizer;
pub mod text;
pub mod types;
pub mod validate;

pub use error::{AcquisitionError, AiError, Error};
pub type Result<T> = std::result::Result<T, Error>;

pub use types::{
    AiSummary, Article, ArticleRequest, ExtractiveSummary, Keyword, Keywords, SummarizeResponse,
    UNKNOWN_TITLE,
};
