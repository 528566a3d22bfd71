pub mod extractive;
pub mod keywords;
mod stopwords;

pub use extractive::{extractive_summarize, DEFAULT_NUM_SENTENCES};
pub use keywords::{extract_keywords, DEFAULT_NUM_KEYWORDS};

pub mod prelude {
    pub use super::{extract_keywords, extractive_summarize};
    pub use nf_core::{ExtractiveSummary, Keyword, Keywords};
}
