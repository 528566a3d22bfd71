//! Frequency-based keyword extraction with scores normalized into [0, 1].

use std::collections::HashMap;

use nf_core::types::{Keyword, Keywords};
use unicode_segmentation::UnicodeSegmentation;

use crate::stopwords::is_stopword;

pub const DEFAULT_NUM_KEYWORDS: usize = 10;

/// Keywords shorter than this never qualify.
pub const MIN_TOKEN_CHARS: usize = 4;

struct TermStats {
    count: usize,
    first_seen: usize,
    /// original casing variant -> (count, first position)
    casings: HashMap<String, (usize, usize)>,
}

/// Case-insensitive frequency counting over Unicode word tokens. The top
/// keyword always scores 1.0; ties are broken by first occurrence, and the
/// displayed casing is the most frequent variant observed in the text.
pub fn extract_keywords(text: &str, num_keywords: usize) -> Keywords {
    let mut stats: HashMap<String, TermStats> = HashMap::new();

    for (position, token) in text.unicode_words().enumerate() {
        let lower = token.to_lowercase();
        if lower.chars().count() < MIN_TOKEN_CHARS
            || is_stopword(&lower)
            || !lower.chars().all(char::is_alphabetic)
        {
            continue;
        }
        let entry = stats.entry(lower).or_insert_with(|| TermStats {
            count: 0,
            first_seen: position,
            casings: HashMap::new(),
        });
        entry.count += 1;
        let casing = entry
            .casings
            .entry(token.to_string())
            .or_insert((0, position));
        casing.0 += 1;
    }

    if stats.is_empty() {
        return Keywords::default();
    }

    let max_count = stats.values().map(|s| s.count).max().unwrap_or(1) as f64;

    let mut ranked: Vec<(String, TermStats)> = stats.into_iter().collect();
    ranked.sort_by(|(_, a), (_, b)| b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen)));

    let keywords = ranked
        .into_iter()
        .take(num_keywords)
        .map(|(lower, term_stats)| Keyword {
            term: display_casing(&lower, &term_stats.casings),
            score: term_stats.count as f64 / max_count,
        })
        .collect();

    Keywords { keywords }
}

fn display_casing(lower: &str, casings: &HashMap<String, (usize, usize)>) -> String {
    casings
        .iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(variant, _)| variant.clone())
        .unwrap_or_else(|| lower.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "NASA launched the telescope on Tuesday. The telescope observed distant \
                          galaxies, and NASA scientists confirmed the telescope data. Galaxies \
                          formed early. nasa budgets grew. The telescope cost billions.";

    #[test]
    fn test_scores_non_increasing_and_in_unit_interval() {
        let result = extract_keywords(SAMPLE, 10);
        assert!(!result.keywords.is_empty());
        assert!((result.keywords[0].score - 1.0).abs() < f64::EPSILON);
        for pair in result.keywords.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for kw in &result.keywords {
            assert!(kw.score > 0.0 && kw.score <= 1.0);
        }
    }

    #[test]
    fn test_terms_unique_case_insensitive() {
        let result = extract_keywords(SAMPLE, 10);
        let mut lowered: Vec<String> = result
            .keywords
            .iter()
            .map(|k| k.term.to_lowercase())
            .collect();
        lowered.sort();
        lowered.dedup();
        assert_eq!(lowered.len(), result.keywords.len());
    }

    #[test]
    fn test_display_casing_uses_most_frequent_variant() {
        let result = extract_keywords(SAMPLE, 10);
        let nasa = result
            .keywords
            .iter()
            .find(|k| k.term.eq_ignore_ascii_case("nasa"))
            .expect("nasa should be a keyword");
        // "NASA" appears twice, "nasa" once
        assert_eq!(nasa.term, "NASA");
    }

    #[test]
    fn test_top_keyword_is_most_frequent_term() {
        let result = extract_keywords(SAMPLE, 3);
        assert_eq!(result.keywords[0].term.to_lowercase(), "telescope");
    }

    #[test]
    fn test_stopwords_and_short_tokens_excluded() {
        let result = extract_keywords("the cat and the dog ran far away today", 10);
        for kw in &result.keywords {
            assert!(kw.term.chars().count() >= MIN_TOKEN_CHARS);
            assert!(!is_stopword(&kw.term.to_lowercase()));
        }
    }

    #[test]
    fn test_ties_broken_by_first_occurrence() {
        let result = extract_keywords("zebra appears once. apple appears once.", 10);
        let terms: Vec<&str> = result.keywords.iter().map(|k| k.term.as_str()).collect();
        let zebra = terms.iter().position(|t| *t == "zebra").unwrap();
        let apple = terms.iter().position(|t| *t == "apple").unwrap();
        assert!(zebra < apple);
    }

    #[test]
    fn test_non_latin_tokens_survive() {
        let result = extract_keywords("климат климат климат weather", 10);
        assert!(result.keywords.iter().any(|k| k.term == "климат"));
    }

    #[test]
    fn test_empty_text_yields_no_keywords() {
        assert!(extract_keywords("", 10).keywords.is_empty());
    }

    #[test]
    fn test_deterministic_across_runs() {
        assert_eq!(extract_keywords(SAMPLE, 10), extract_keywords(SAMPLE, 10));
    }
}
