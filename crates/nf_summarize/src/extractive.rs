//! Extractive summarization: pick the most significant sentences and
//! return them in original document order.

use std::collections::HashMap;

use nf_core::text;
use nf_core::types::{ExtractiveSummary, METHOD_EXTRACTIVE};

use crate::stopwords::is_stopword;

pub const DEFAULT_NUM_SENTENCES: usize = 5;

/// Scores sentences by summed term-frequency significance of their content
/// words, normalized by sentence length, then reorders the top picks by
/// document position. Deterministic for fixed input and configuration.
pub fn extractive_summarize(text: &str, num_sentences: usize) -> ExtractiveSummary {
    let sentences = text::sentences(text);
    if sentences.is_empty() {
        return ExtractiveSummary::empty();
    }
    if sentences.len() <= num_sentences {
        return ExtractiveSummary {
            summary: sentences.join(" "),
            sentences,
            method: METHOD_EXTRACTIVE.to_string(),
        };
    }

    let significance = term_significance(&sentences);

    let mut ranked: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| (i, sentence_score(sentence, &significance)))
        .collect();
    // descending score, earlier sentence wins ties
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    let mut selected: Vec<usize> = ranked.iter().take(num_sentences).map(|&(i, _)| i).collect();
    selected.sort_unstable();

    let picked: Vec<String> = selected.into_iter().map(|i| sentences[i].clone()).collect();
    ExtractiveSummary {
        summary: picked.join(" "),
        sentences: picked,
        method: METHOD_EXTRACTIVE.to_string(),
    }
}

/// Corpus term frequency of content words, normalized so the most frequent
/// term has significance 1.0.
fn term_significance(sentences: &[String]) -> HashMap<String, f64> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for sentence in sentences {
        for token in content_tokens(sentence) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }
    let max = counts.values().copied().max().unwrap_or(1) as f64;
    counts
        .into_iter()
        .map(|(term, count)| (term, count as f64 / max))
        .collect()
}

fn sentence_score(sentence: &str, significance: &HashMap<String, f64>) -> f64 {
    let total_words = text::word_count(sentence);
    if total_words == 0 {
        return 0.0;
    }
    let sum: f64 = content_tokens(sentence)
        .into_iter()
        .filter_map(|token| significance.get(&token))
        .sum();
    // length normalization prevents long sentences from winning by bulk
    sum / total_words as f64
}

fn content_tokens(sentence: &str) -> Vec<String> {
    text::words(sentence)
        .into_iter()
        .map(str::to_lowercase)
        .filter(|w| !is_stopword(w) && w.chars().any(char::is_alphabetic))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forty_sentence_article() -> String {
        // 40 sentences of 30 words each: 1,200 words total.
        (1..=40)
            .map(|i| {
                format!(
                    "Chapter {i} describes the harbor town, its fishing fleet, the seasonal storms, \
                     the market square, the lighthouse keeper, and the slow quiet return of migrating \
                     birds across the northern cliffs."
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_selects_exactly_requested_sentences_in_document_order() {
        let article = forty_sentence_article();
        assert_eq!(nf_core::text::word_count(&article), 1200);
        assert_eq!(nf_core::text::sentences(&article).len(), 40);

        let result = extractive_summarize(&article, 5);
        assert_eq!(result.sentences.len(), 5);
        assert_eq!(result.method, "extractive");

        // document order: the chapter numbers must be increasing
        let positions: Vec<usize> = result
            .sentences
            .iter()
            .map(|s| {
                let all = nf_core::text::sentences(&article);
                all.iter().position(|x| x == s).unwrap()
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_short_text_returned_whole() {
        let text = "Only one sentence here. And a second one.";
        let result = extractive_summarize(text, 5);
        assert_eq!(result.sentences.len(), 2);
        assert_eq!(result.summary, "Only one sentence here. And a second one.");
    }

    #[test]
    fn test_empty_text_gives_empty_extractive_summary() {
        let result = extractive_summarize("", 5);
        assert!(result.summary.is_empty());
        assert!(result.sentences.is_empty());
        assert_eq!(result.method, "extractive");
    }

    #[test]
    fn test_deterministic_across_runs() {
        let article = forty_sentence_article();
        let first = extractive_summarize(&article, 5);
        let second = extractive_summarize(&article, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_respects_sentence_budget() {
        let article = forty_sentence_article();
        for n in [1, 3, 7] {
            assert!(extractive_summarize(&article, n).sentences.len() <= n);
        }
    }

    #[test]
    fn test_prefers_sentences_with_frequent_terms() {
        let text = "The reactor design uses sodium coolant. Reactor output doubled this year. \
                    Sodium reactor coolant is cheap. Unrelated filler mentions weather patterns. \
                    Another filler sentence discusses lunch menus. Reactor sodium levels stayed stable.";
        let result = extractive_summarize(text, 2);
        for sentence in &result.sentences {
            assert!(
                sentence.to_lowercase().contains("reactor"),
                "expected reactor sentence, got: {sentence}"
            );
        }
    }
}
