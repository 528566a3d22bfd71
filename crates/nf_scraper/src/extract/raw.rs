//! Last-resort extraction: strip markup and keep whatever visible text the
//! payload contains.

use scraper::{ElementRef, Html};

use nf_core::text::collapse_whitespace;

use super::{title_tag, Extraction};

const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg", "head"];

pub fn extract(document: &Html) -> Option<Extraction> {
    let mut parts: Vec<&str> = Vec::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| INVISIBLE_TAGS.contains(&el.value().name()));
        if !hidden {
            parts.push(text);
        }
    }

    let text = collapse_whitespace(&parts.join(" "));
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
