//! Aggregate statistics over persisted submissions.
//!
//! SQL-backed stores compute these server-side; the in-memory store and
//! tests share this reference implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{EssaySubmission, Level};

/// Corpus-wide statistics, the `stats` read model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EssayStats {
    /// Total persisted submissions, evaluated or not.
    pub total_essays: u64,
    /// Mean overall score across submissions that carry an assessment.
    /// Zero when nothing has been evaluated yet.
    pub average_score: f64,
    /// Submission counts grouped by level.
    pub by_level: Vec<LevelCount>,
}

/// Count of submissions at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCount {
    pub level: Level,
    pub count: u64,
}

/// Compute statistics from an in-memory snapshot of submissions.
pub fn compute_stats(submissions: &[EssaySubmission]) -> EssayStats {
    let total_essays = submissions.len() as u64;

    let scores: Vec<f64> = submissions
        .iter()
        .filter_map(|s| s.assessment.as_ref().map(|a| a.overall_score))
        .collect();
    let average_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    let mut counts: HashMap<Level, u64> = HashMap::new();
    for submission in submissions {
        *counts.entry(submission.level).or_default() += 1;
    }
    let mut by_level: Vec<LevelCount> = counts
        .into_iter()
        .map(|(level, count)| LevelCount { level, count })
        .collect();
    // Stable output order regardless of map iteration.
    by_level.sort_by_key(|entry| entry.level.to_string());

    EssayStats {
        total_essays,
        average_score,
        by_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvaluationResult, Readability, ScoreBreakdown, Status, Suggestion};
    use chrono::Utc;
    use uuid::Uuid;

    fn submission(level: Level, score: Option<f64>) -> EssaySubmission {
        EssaySubmission {
            id: Uuid::new_v4(),
            text: "test essay text".into(),
            university: String::new(),
            level,
            word_count: 3,
            char_count: 15,
            assessment: score.map(|overall_score| EvaluationResult {
                overall_score,
                breakdown: ScoreBreakdown {
                    grammar: overall_score,
                    structure: overall_score,
                    coherence: overall_score,
                    vocabulary: overall_score,
                    arguments: overall_score,
                },
                strengths: vec!["Clear writing style".into()],
                improvements: vec!["Expand your arguments with more supporting detail".into()],
                suggestions: vec![Suggestion {
                    original: "test".into(),
                    improved: "better test".into(),
                    reason: "clarity".into(),
                }],
                readability: Readability::HighSchool,
                estimated_read_time: 1,
                word_count: 3,
                char_count: 15,
            }),
            status: if score.is_some() {
                Status::Evaluated
            } else {
                Status::Draft
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_corpus() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_essays, 0);
        assert_eq!(stats.average_score, 0.0);
        assert!(stats.by_level.is_empty());
    }

    #[test]
    fn averages_only_evaluated_submissions() {
        let subs = vec![
            submission(Level::Undergrad, Some(80.0)),
            submission(Level::Undergrad, Some(60.0)),
            submission(Level::Mba, None),
        ];
        let stats = compute_stats(&subs);
        assert_eq!(stats.total_essays, 3);
        assert!((stats.average_score - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn groups_by_level() {
        let subs = vec![
            submission(Level::Undergrad, Some(70.0)),
            submission(Level::Mba, Some(75.0)),
            submission(Level::Mba, None),
        ];
        let stats = compute_stats(&subs);
        let mba = stats
            .by_level
            .iter()
            .find(|entry| entry.level == Level::Mba)
            .unwrap();
        assert_eq!(mba.count, 2);
        let undergrad = stats
            .by_level
            .iter()
            .find(|entry| entry.level == Level::Undergrad)
            .unwrap();
        assert_eq!(undergrad.count, 1);
    }
}
