//! The extraction fallback chain. Strategies share one capability: attempt
//! extraction from parsed HTML and report what they found; the caller
//! decides acceptance by word count.

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};

use nf_core::text::collapse_whitespace;

mod body_text;
mod jsonld;
mod raw;
mod structured;

/// What a single strategy managed to pull out of a page. Missing metadata
/// stays `None`/empty; only the text length decides acceptance.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub title: Option<String>,
    pub text: String,
    pub authors: Vec<String>,
    pub publish_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// News-semantics extraction: content containers + JSON-LD/meta metadata.
    Structured,
    /// Generic paragraph-density extraction across the whole document.
    BodyText,
    /// Minimal markup stripping of the full payload.
    Raw,
}

impl Strategy {
    /// Fixed attempt order.
    pub const CHAIN: [Strategy; 3] = [Strategy::Structured, Strategy::BodyText, Strategy::Raw];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Structured => "structured",
            Strategy::BodyText => "body_text",
            Strategy::Raw => "raw",
        }
    }

    pub fn extract(self, html: &str) -> Option<Extraction> {
        let document = Html::parse_document(html);
        match self {
            Strategy::Structured => structured::extract(&document),
            Strategy::BodyText => body_text::extract(&document),
            Strategy::Raw => raw::extract(&document),
        }
    }
}

const MIN_BLOCK_CHARS: usize = 20;
const MAX_LINK_DENSITY: f64 = 0.5;

const SKIP_MARKERS: &[&str] = &[
    "nav", "navigation", "footer", "sidebar", "menu", "breadcrumb", "social", "share", "comment",
    "related", "promo", "advert",
];

/// True when any ancestor marks the element as page chrome rather than
/// content: nav/header/footer/aside tags, or boilerplate class/id names.
pub(crate) fn in_boilerplate(el: ElementRef) -> bool {
    el.ancestors().filter_map(ElementRef::wrap).any(|ancestor| {
        let value = ancestor.value();
        if matches!(value.name(), "nav" | "header" | "footer" | "aside") {
            return true;
        }
        let class = value.attr("class").unwrap_or_default().to_ascii_lowercase();
        let id = value.attr("id").unwrap_or_default().to_ascii_lowercase();
        SKIP_MARKERS
            .iter()
            .any(|marker| class.contains(marker) || id.contains(marker))
    })
}

/// Share of an element's text that sits inside links. Link-heavy blocks are
/// navigation, not prose.
pub(crate) fn link_density(el: ElementRef) -> f64 {
    let total: usize = el.text().map(str::len).sum();
    if total == 0 {
        return 1.0;
    }
    let anchor = Selector::parse("a").unwrap();
    let linked: usize = el
        .select(&anchor)
        .flat_map(|a| a.text())
        .map(str::len)
        .sum();
    linked as f64 / total as f64
}

/// Gathers paragraph blocks under `root`, dropping boilerplate subtrees,
/// link-dense blocks, and fragments too short to be prose.
pub(crate) fn collect_text_blocks(root: ElementRef) -> String {
    let paragraph = Selector::parse("p").unwrap();
    let blocks: Vec<String> = root
        .select(&paragraph)
        .filter(|p| !in_boilerplate(*p))
        .filter(|p| link_density(*p) <= MAX_LINK_DENSITY)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|text| text.len() >= MIN_BLOCK_CHARS)
        .collect();
    blocks.join("\n\n")
}

pub(crate) fn title_tag(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

pub(crate) fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
