//! Surface text feature extraction.
//!
//! All downstream scoring is a function of these counts. The sentence and
//! vocabulary definitions are deliberately the literal split-based ones:
//! ellipses and abbreviations like "U.S." over-count sentences, and that is
//! a known product-level limitation, not something to correct here.

use std::collections::HashSet;

/// Features derived from a single essay text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFeatures {
    /// Whitespace-delimited tokens in the trimmed text.
    pub word_count: usize,
    /// Characters in the untrimmed text, whitespace included.
    pub char_count: usize,
    /// Non-blank fragments after splitting on `.`, `!`, `?`. At least 1.
    pub sentence_count: usize,
    /// `word_count / sentence_count`.
    pub avg_sentence_length: f64,
    /// Distinct case-folded tokens divided by `word_count`.
    pub vocabulary_richness: f64,
}

/// Extract features from raw essay text.
///
/// Pure and idempotent; callers are expected to have validated minimum
/// length upstream, so there is no failure path here.
pub fn extract(text: &str) -> TextFeatures {
    let trimmed = text.trim();
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    let word_count = words.len();
    let char_count = text.chars().count();

    // Min 1 keeps the average well-defined for fragment-free text.
    let sentence_count = sentences(text).len().max(1);
    let avg_sentence_length = word_count as f64 / sentence_count as f64;

    let distinct: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let vocabulary_richness = if word_count == 0 {
        0.0
    } else {
        distinct.len() as f64 / word_count as f64
    };

    TextFeatures {
        word_count,
        char_count,
        sentence_count,
        avg_sentence_length,
        vocabulary_richness,
    }
}

/// Split text into sentences on terminal punctuation, dropping blank
/// fragments. Shared with the feedback synthesizer so both sides agree on
/// what "the first sentence" means.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Word and character counts alone, for update paths that must keep the
/// derived counts consistent with a changed text without a full extraction.
pub fn basic_counts(text: &str) -> (usize, usize) {
    let word_count = text.trim().split_whitespace().count();
    let char_count = text.chars().count();
    (word_count, char_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_simple_text() {
        let features = extract("I like cats. They are great!");
        assert_eq!(features.word_count, 6);
        assert_eq!(features.char_count, 28);
        assert_eq!(features.sentence_count, 2);
        assert!((features.avg_sentence_length - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn char_count_includes_surrounding_whitespace() {
        let features = extract("  hello world  ");
        assert_eq!(features.word_count, 2);
        assert_eq!(features.char_count, 15);
    }

    #[test]
    fn sentence_count_never_zero() {
        let features = extract("no terminal punctuation here");
        assert_eq!(features.sentence_count, 1);
        let features = extract("...!!!???");
        assert_eq!(features.sentence_count, 1);
        assert_eq!(features.word_count, 1);
    }

    #[test]
    fn vocabulary_richness_case_folds() {
        let features = extract("The the THE cat");
        assert_eq!(features.word_count, 4);
        assert!((features.vocabulary_richness - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn consecutive_punctuation_collapses() {
        // "U.S." style abbreviations over-split; the blank fragment between
        // the periods is discarded.
        assert_eq!(sentences("Wait... what? Really!"), vec!["Wait", "what", "Really"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "One sentence here. Another one follows! And a third?";
        let a = extract(text);
        let b = extract(text);
        assert_eq!(a, b);
    }

    #[test]
    fn basic_counts_match_full_extraction() {
        let text = "  Some essay text, with punctuation. And more.  ";
        let (words, chars) = basic_counts(text);
        let features = extract(text);
        assert_eq!(words, features.word_count);
        assert_eq!(chars, features.char_count);
    }
}
