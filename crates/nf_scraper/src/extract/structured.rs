//! News-semantics extraction: known content containers for the body text,
//! JSON-LD and meta tags for metadata.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

use nf_core::text::collapse_whitespace;

use super::{collect_text_blocks, jsonld, parse_date, title_tag, Extraction};

const CONTENT_SELECTORS: &[&str] = &[
    "article",
    r#"[role="main"]"#,
    ".post-content",
    ".entry-content",
    ".article-content",
    ".article-body",
    ".story-body",
    "main",
    "#content",
    "#main",
    ".content",
];

const MAX_AUTHORS: usize = 10;

pub fn extract(document: &Html) -> Option<Extraction> {
    // the container with the most paragraph text wins
    let mut best: Option<String> = None;
    for css in CONTENT_SELECTORS {
        let selector = Selector::parse(css).unwrap();
        for root in document.select(&selector) {
            let text = collect_text_blocks(root);
            if text.is_empty() {
                continue;
            }
            if best.as_ref().map_or(true, |current| text.len() > current.len()) {
                best = Some(text);
            }
        }
    }
    let text = best?;

    let meta = jsonld::extract_metadata(document);
    let title = meta
        .title
        .or_else(|| og_title(document))
        .or_else(|| h1_title(document))
        .or_else(|| title_tag(document));
    let authors = collect_authors(document, meta.authors);
    let publish_date = meta.publish_date.or_else(|| meta_publish_date(document));

    Some(Extraction {
        title,
        text,
        authors,
        publish_date,
    })
}

fn og_title(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|t| collapse_whitespace(t))
        .filter(|t| !t.is_empty())
}

fn h1_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn collect_authors(document: &Html, mut authors: Vec<String>) -> Vec<String> {
    if authors.is_empty() {
        let selector = Selector::parse(r#"meta[name="author"]"#).unwrap();
        if let Some(content) = document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
        {
            authors = content
                .split(',')
                .map(|name| collapse_whitespace(name))
                .filter(|name| !name.is_empty())
                .collect();
        }
    }
    if authors.is_empty() {
        for css in [".byline", ".author", r#"[rel="author"]"#] {
            let selector = Selector::parse(css).unwrap();
            authors = document
                .select(&selector)
                .map(|el| collapse_whitespace(&el.text().collect::<String>()))
                .filter(|name| name.len() > 2)
                .collect();
            if !authors.is_empty() {
                break;
            }
        }
    }
    // bylines often repeat at the top and bottom of a page
    let mut seen = HashSet::new();
    authors.retain(|author| seen.insert(author.to_lowercase()));
    authors.truncate(MAX_AUTHORS);
    authors
}

fn meta_publish_date(document: &Html) -> Option<DateTime<Utc>> {
    let meta = Selector::parse(r#"meta[property="article:published_time"]"#).unwrap();
    if let Some(date) = document
        .select(&meta)
        .next()
        .and_then(|el| el.value().attr("content"))
        .and_then(parse_date)
    {
        return Some(date);
    }
    let time = Selector::parse("time[datetime]").unwrap();
    document
        .select(&time)
        .next()
        .and_then(|el| el.value().attr("datetime"))
        .and_then(parse_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_article_container_with_metadata() {
        let html = r#"
            <html><head>
              <title>Site | Long Piece</title>
              <meta property="og:title" content="The Long Piece">
              <meta name="author" content="Rivera Chen">
              <meta property="article:published_time" content="2024-05-02T10:00:00+00:00">
            </head><body>
              <nav><p>Home World Sports Finance Culture and many more links</p></nav>
              <article>
                <p>The council voted on the new transit plan after months of debate and testimony.</p>
                <p>Construction is expected to begin next spring along the eastern corridor route.</p>
              </article>
            </body></html>
        "#;
        let document = Html::parse_document(html);
        let extraction = extract(&document).unwrap();
        assert_eq!(extraction.title.as_deref(), Some("The Long Piece"));
        assert_eq!(extraction.authors, vec!["Rivera Chen"]);
        assert!(extraction.publish_date.is_some());
        assert!(extraction.text.contains("transit plan"));
        assert!(!extraction.text.contains("Home World Sports"));
    }

    #[test]
    fn test_jsonld_beats_meta_tags() {
        let html = r#"
            <html><head>
              <meta property="og:title" content="OG Title">
              <script type="application/ld+json">
                {"headline": "JsonLd Title", "author": {"name": "Ld Author"}}
              </script>
            </head><body>
              <article><p>Enough text to register as a paragraph block here.</p></article>
            </body></html>
        "#;
        let document = Html::parse_document(html);
        let extraction = extract(&document).unwrap();
        assert_eq!(extraction.title.as_deref(), Some("JsonLd Title"));
        assert_eq!(extraction.authors, vec!["Ld Author"]);
    }

    #[test]
    fn test_repeated_bylines_dedup_across_the_page() {
        let html = r#"
            <html><body>
              <article>
                <div class="byline">Rivera Chen</div>
                <p>The council voted on the new transit plan after months of debate.</p>
                <div class="byline">RIVERA CHEN</div>
              </article>
            </body></html>
        "#;
        let document = Html::parse_document(html);
        let extraction = extract(&document).unwrap();
        assert_eq!(extraction.authors, vec!["Rivera Chen"]);
    }

    #[test]
    fn test_returns_none_without_content_container() {
        let html = "<html><body><div>loose text, no recognized container</div></body></html>";
        let document = Html::parse_document(html);
        assert!(extract(&document).is_none());
    }

    #[test]
    fn test_missing_metadata_stays_none() {
        let html = r#"
            <html><body><article>
              <p>A paragraph long enough to pass the minimum block length filter.</p>
            </article></body></html>
        "#;
        let document = Html::parse_document(html);
        let extraction = extract(&document).unwrap();
        assert!(extraction.title.is_none());
        assert!(extraction.authors.is_empty());
        assert!(extraction.publish_date.is_none());
    }
}
