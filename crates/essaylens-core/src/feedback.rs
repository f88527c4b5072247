//! Qualitative feedback synthesis.
//!
//! Every rule is evaluated independently; the trigger conditions are not
//! mutually exclusive. When no rule fires for a list, a fixed default keeps
//! the contract that strengths, improvements, and suggestions are never
//! empty.

use crate::features::{self, TextFeatures};
use crate::model::{Readability, ScoreBreakdown, Suggestion};

/// Maximum trimmed length of an opening sentence worth rewriting.
const SHORT_OPENING_LIMIT: usize = 80;

/// Sentences inspected for rewrite candidates.
const SUGGESTION_WINDOW: usize = 3;

/// Words per minute assumed for the read-time estimate.
const READING_SPEED_WPM: usize = 200;

/// Synthesized qualitative feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub readability: Readability,
    pub estimated_read_time: u32,
}

/// Derive strengths, improvements, rewrite suggestions, and readability
/// from the features and score breakdown.
pub fn synthesize(text: &str, features: &TextFeatures, breakdown: &ScoreBreakdown) -> Feedback {
    Feedback {
        strengths: strengths(features, breakdown),
        improvements: improvements(features, breakdown),
        suggestions: suggestions(text),
        readability: readability(features.avg_sentence_length),
        estimated_read_time: estimated_read_time(features.word_count),
    }
}

fn strengths(features: &TextFeatures, breakdown: &ScoreBreakdown) -> Vec<String> {
    let mut items = Vec::new();
    if breakdown.grammar > 85.0 {
        items.push("Excellent grammar and sentence construction".to_string());
    }
    if breakdown.structure > 80.0 {
        items.push("Well-organized structure with clear progression".to_string());
    }
    if features.word_count > 500 {
        items.push("Comprehensive coverage of the topic".to_string());
    }
    if features.vocabulary_richness > 0.65 {
        items.push("Rich and varied vocabulary".to_string());
    }
    if items.is_empty() {
        items.push("Clear writing style".to_string());
        items.push("Adequate essay structure".to_string());
    }
    items
}

fn improvements(features: &TextFeatures, breakdown: &ScoreBreakdown) -> Vec<String> {
    let mut items = Vec::new();
    if breakdown.coherence < 75.0 {
        items.push("Improve logical flow between paragraphs".to_string());
    }
    if features.avg_sentence_length > 30.0 {
        items.push("Break down complex sentences for better readability".to_string());
    }
    if features.word_count < 300 {
        items.push("Expand your arguments with more supporting detail".to_string());
    }
    if breakdown.arguments < 80.0 {
        items.push("Strengthen arguments with concrete examples".to_string());
    }
    if items.is_empty() {
        items.push("Add more specific examples to support key points".to_string());
        items.push("Vary sentence structure for better rhythm".to_string());
    }
    items
}

fn suggestions(text: &str) -> Vec<Suggestion> {
    // Only the opening sentence produces a targeted rewrite; the window
    // bounds how much of the text is ever inspected.
    let window: Vec<&str> = features::sentences(text)
        .into_iter()
        .take(SUGGESTION_WINDOW)
        .collect();
    if let Some(first) = window.first() {
        let opening = first.trim();
        if opening.chars().count() < SHORT_OPENING_LIMIT {
            return vec![Suggestion {
                original: opening.to_string(),
                improved: "Open with a compelling hook that states your thesis directly."
                    .to_string(),
                reason: "stronger opening statement".to_string(),
            }];
        }
    }
    vec![Suggestion {
        original: "Overall structure".to_string(),
        improved: "Lead each paragraph with a clear topic sentence.".to_string(),
        reason: "improved clarity and flow".to_string(),
    }]
}

fn readability(avg_sentence_length: f64) -> Readability {
    if avg_sentence_length < 15.0 {
        Readability::HighSchool
    } else if avg_sentence_length > 25.0 {
        Readability::Graduate
    } else {
        Readability::College
    }
}

fn estimated_read_time(word_count: usize) -> u32 {
    (word_count.div_ceil(READING_SPEED_WPM)).max(1) as u32
}
