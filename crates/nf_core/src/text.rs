//! Shared tokenization used by acquisition (`word_count`) and by both
//! summarizers, so the counts they report always agree.

use unicode_segmentation::UnicodeSegmentation;

/// Word tokens per UAX #29 word boundaries. Punctuation is dropped;
/// non-Latin scripts survive.
pub fn words(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

/// Tokens that end a period-run without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "approx", "capt", "co", "col", "corp", "dept", "dr", "est", "etc", "fig", "gen", "gov", "inc",
    "jr", "lt", "ltd", "mr", "mrs", "ms", "mt", "no", "prof", "rep", "rev", "sen", "sgt", "sr",
    "st", "vol", "vs", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
    "nov", "dec",
];

/// Splits text into sentences. Rule-based boundary detection: a run of
/// `.`/`!`/`?` ends a sentence unless the period belongs to a decimal
/// number, a single-letter initial, a dotted acronym, or a known
/// abbreviation, or the following text starts lowercase.
pub fn sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        if !matches!(c, '.' | '!' | '?') {
            i += 1;
            continue;
        }
        if c == '.' && !period_is_boundary(&chars, i) {
            i += 1;
            continue;
        }

        // swallow the terminator run plus trailing closers
        let mut end = i + 1;
        while end < chars.len() && matches!(chars[end], '.' | '!' | '?') {
            end += 1;
        }
        while end < chars.len() && matches!(chars[end], '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}') {
            end += 1;
        }
        if end < chars.len() && !chars[end].is_whitespace() {
            i = end;
            continue;
        }

        let sentence = collapse_whitespace_range(&chars[start..end]);
        if !sentence.is_empty() {
            out.push(sentence);
        }
        start = end;
        i = end;
    }

    let tail = collapse_whitespace_range(&chars[start..]);
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

fn period_is_boundary(chars: &[char], i: usize) -> bool {
    // decimal number, e.g. "3.5"
    if i > 0
        && i + 1 < chars.len()
        && chars[i - 1].is_ascii_digit()
        && chars[i + 1].is_ascii_digit()
    {
        return false;
    }

    // the word the period terminates
    let mut j = i;
    while j > 0 && chars[j - 1].is_alphanumeric() {
        j -= 1;
    }
    let word: String = chars[j..i].iter().collect::<String>().to_lowercase();

    // single-letter initial ("J. K. Rowling") or dotted acronym ("U.S.")
    if word.chars().count() == 1 && word.chars().all(char::is_alphabetic) {
        return false;
    }
    if j > 0 && chars[j - 1] == '.' {
        return false;
    }
    if ABBREVIATIONS.contains(&word.as_str()) {
        return false;
    }

    // a lowercase continuation means the period was mid-sentence
    if let Some(next) = chars[i + 1..].iter().find(|c| !c.is_whitespace()) {
        if next.is_lowercase() {
            return false;
        }
    }

    true
}

fn collapse_whitespace_range(chars: &[char]) -> String {
    let raw: String = chars.iter().collect();
    collapse_whitespace(&raw)
}

/// Collapses runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
