//! Generic body-text extraction: every prose paragraph in the document,
//! wherever it lives, minus boilerplate subtrees.

use scraper::Html;

use super::{collect_text_blocks, title_tag, Extraction};

pub fn extract(document: &Html) -> Option<Extraction> {
    let text = collect_text_blocks(document.root_element());
    if text.is_empty() {
        return None;
    }
    Some(Extraction {
        title: title_tag(document),
        text,
        authors: Vec::new(),
        publish_date: None,
    })
}
