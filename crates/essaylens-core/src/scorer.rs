//! Heuristic score composition.
//!
//! The bonuses reward established proxies for essay quality (appropriate
//! length, sentence rhythm, lexical diversity); the bounded perturbation
//! simulates assessor variance. This is a closed-form heuristic, not a
//! learned model.

use crate::features::TextFeatures;
use crate::model::ScoreBreakdown;
use crate::rng::RandomSource;

const BASE_SCORE: f64 = 70.0;
const SCORE_FLOOR: f64 = 50.0;
const SCORE_CEILING: f64 = 98.0;

/// Half-widths of the per-category perturbation, in breakdown field order.
const GRAMMAR_SPREAD: f64 = 5.0;
const STRUCTURE_SPREAD: f64 = 4.0;
const COHERENCE_SPREAD: f64 = 6.0;
const VOCABULARY_SPREAD: f64 = 5.0;
const ARGUMENTS_SPREAD: f64 = 7.0;

/// Compose the overall score and category breakdown from extracted features.
///
/// Draw order is fixed: one overall perturbation, then grammar, structure,
/// coherence, vocabulary, arguments. Reordering the draws changes seeded
/// results.
pub fn score(features: &TextFeatures, rng: &mut dyn RandomSource) -> (f64, ScoreBreakdown) {
    let mut base = BASE_SCORE;

    if (300..=800).contains(&features.word_count) {
        base += 10.0;
    } else if features.word_count < 100 {
        base -= 15.0;
    }

    if (15.0..=25.0).contains(&features.avg_sentence_length) {
        base += 5.0;
    }

    if features.vocabulary_richness > 0.6 {
        base += 8.0;
    }

    base += rng.uniform(-6.0, 6.0);

    let overall = round_one_decimal(base.clamp(SCORE_FLOOR, SCORE_CEILING));

    let mut category = |spread: f64| (overall + rng.uniform(-spread, spread)).min(100.0);
    let breakdown = ScoreBreakdown {
        grammar: category(GRAMMAR_SPREAD),
        structure: category(STRUCTURE_SPREAD),
        coherence: category(COHERENCE_SPREAD),
        vocabulary: category(VOCABULARY_SPREAD),
        arguments: category(ARGUMENTS_SPREAD),
    };

    (overall, breakdown)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract;
    use crate::rng::{FixedSource, SplitMix64};

    #[test]
    fn long_single_sentence_essay_scores_eighty() {
        // 300 words, one "sentence", every word identical: only the length
        // bonus applies. Zero perturbation pins the result at 80.0.
        let text = "word ".repeat(300);
        let features = extract(&text);
        assert_eq!(features.word_count, 300);
        assert_eq!(features.sentence_count, 1);

        let (overall, breakdown) = score(&features, &mut FixedSource::midpoint());
        assert_eq!(overall, 80.0);
        assert_eq!(breakdown.grammar, 80.0);
        assert_eq!(breakdown.structure, 80.0);
        assert_eq!(breakdown.coherence, 80.0);
        assert_eq!(breakdown.vocabulary, 80.0);
        assert_eq!(breakdown.arguments, 80.0);
    }

    #[test]
    fn three_word_essay_takes_length_penalty() {
        // 3 words < 100 and fully distinct vocabulary: 70 - 15 + 8 = 63.
        let features = extract("I like cats");
        let (overall, _) = score(&features, &mut FixedSource::midpoint());
        assert_eq!(overall, 63.0);
    }

    #[test]
    fn overall_stays_in_bounds_under_any_noise() {
        let text = "word ".repeat(50);
        let features = extract(&text);
        let mut rng = SplitMix64::seeded(1234);
        for _ in 0..500 {
            let (overall, breakdown) = score(&features, &mut rng);
            assert!((50.0..=98.0).contains(&overall), "overall {overall}");
            for value in [
                breakdown.grammar,
                breakdown.structure,
                breakdown.coherence,
                breakdown.vocabulary,
                breakdown.arguments,
            ] {
                assert!(value <= 100.0, "category {value}");
            }
        }
    }

    #[test]
    fn seeded_scoring_is_reproducible() {
        let features = extract("A modest essay. It has two sentences.");
        let (a, bd_a) = score(&features, &mut SplitMix64::seeded(77));
        let (b, bd_b) = score(&features, &mut SplitMix64::seeded(77));
        assert_eq!(a, b);
        assert_eq!(bd_a, bd_b);
    }

    #[test]
    fn sentence_rhythm_bonus_applies() {
        // 20 words in one sentence: avg 20 is inside [15, 25]. Word count 20
        // is under 100, so the penalty also applies: 70 - 15 + 5 + 8 = 68.
        let text = (0..20).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let features = extract(&text);
        assert_eq!(features.word_count, 20);
        let (overall, _) = score(&features, &mut FixedSource::midpoint());
        assert_eq!(overall, 68.0);
    }

    #[test]
    fn overall_rounds_to_one_decimal() {
        let features = extract("word ".repeat(300).as_str());
        let mut rng = SplitMix64::seeded(5);
        let (overall, _) = score(&features, &mut rng);
        assert_eq!(overall, (overall * 10.0).round() / 10.0);
    }
}
