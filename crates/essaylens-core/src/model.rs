//! Core data model types for essaylens.
//!
//! These are the fundamental types the whole system uses to represent essay
//! submissions and the assessments attached to them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Academic level a submission targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Undergrad,
    Mba,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Undergrad => write!(f, "undergrad"),
            Level::Mba => write!(f, "mba"),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "undergrad" | "undergraduate" => Ok(Level::Undergrad),
            "mba" => Ok(Level::Mba),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

/// Lifecycle state of a submission. `Evaluated` exactly when an assessment
/// is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Draft,
    Evaluated,
    Archived,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Draft => write!(f, "draft"),
            Status::Evaluated => write!(f, "evaluated"),
            Status::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Status::Draft),
            "evaluated" => Ok(Status::Evaluated),
            "archived" => Ok(Status::Archived),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Readability band derived from average sentence length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readability {
    #[serde(rename = "High School Level")]
    HighSchool,
    #[serde(rename = "College Level")]
    College,
    #[serde(rename = "Graduate Level")]
    Graduate,
}

impl fmt::Display for Readability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readability::HighSchool => write!(f, "High School Level"),
            Readability::College => write!(f, "College Level"),
            Readability::Graduate => write!(f, "Graduate Level"),
        }
    }
}

/// Five-category sub-score view of an assessment. Each value is capped at
/// 100; there is no enforced lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub grammar: f64,
    pub structure: f64,
    pub coherence: f64,
    pub vocabulary: f64,
    pub arguments: f64,
}

/// A concrete rewrite suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The sentence (or region) the suggestion applies to.
    pub original: String,
    /// Suggested replacement text.
    pub improved: String,
    /// Why the rewrite helps.
    pub reason: String,
}

/// The assessment attached to a submission once evaluated.
///
/// Immutable after creation: updates to a submission never rewrite an
/// existing assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Overall score in [50, 98], rounded to one decimal place.
    pub overall_score: f64,
    /// Per-category sub-scores.
    pub breakdown: ScoreBreakdown,
    /// What the essay does well. Never empty.
    pub strengths: Vec<String>,
    /// What to work on. Never empty.
    pub improvements: Vec<String>,
    /// Example rewrites. Never empty.
    pub suggestions: Vec<Suggestion>,
    /// Readability band.
    pub readability: Readability,
    /// Estimated reading time in minutes, at least 1.
    pub estimated_read_time: u32,
    /// Word count snapshot at evaluation time.
    pub word_count: usize,
    /// Character count snapshot at evaluation time.
    pub char_count: usize,
}

/// A persisted essay submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EssaySubmission {
    /// Store-assigned identifier, immutable.
    pub id: Uuid,
    /// Original essay body.
    pub text: String,
    /// Optional free-text institution label.
    #[serde(default)]
    pub university: String,
    /// Academic level.
    #[serde(default)]
    pub level: Level,
    /// Derived from `text`; recomputed on every text update.
    pub word_count: usize,
    /// Derived from `text`; recomputed on every text update.
    pub char_count: usize,
    /// The embedded assessment, present once evaluated.
    #[serde(default)]
    pub assessment: Option<EvaluationResult>,
    /// Lifecycle state.
    #[serde(default)]
    pub status: Status,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Store-maintained modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A submission as handed to the store, before it assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub text: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub level: Level,
    pub word_count: usize,
    pub char_count: usize,
    #[serde(default)]
    pub assessment: Option<EvaluationResult>,
    #[serde(default)]
    pub status: Status,
}

/// Partial update applied to an existing submission.
///
/// A text change recomputes the derived counts but never re-runs the
/// evaluation engine or touches an existing assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPatch {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub status: Option<Status>,
}

impl SubmissionPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.university.is_none()
            && self.level.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_display_and_parse() {
        assert_eq!(Level::Undergrad.to_string(), "undergrad");
        assert_eq!(Level::Mba.to_string(), "mba");
        assert_eq!("undergrad".parse::<Level>().unwrap(), Level::Undergrad);
        assert_eq!("MBA".parse::<Level>().unwrap(), Level::Mba);
        assert_eq!("undergraduate".parse::<Level>().unwrap(), Level::Undergrad);
        assert!("phd".parse::<Level>().is_err());
    }

    #[test]
    fn status_display_and_parse() {
        assert_eq!(Status::Evaluated.to_string(), "evaluated");
        assert_eq!("draft".parse::<Status>().unwrap(), Status::Draft);
        assert_eq!("Archived".parse::<Status>().unwrap(), Status::Archived);
        assert!("pending".parse::<Status>().is_err());
    }

    #[test]
    fn readability_serializes_as_label() {
        let json = serde_json::to_string(&Readability::HighSchool).unwrap();
        assert_eq!(json, "\"High School Level\"");
        let back: Readability = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Readability::HighSchool);
    }

    #[test]
    fn submission_serde_roundtrip() {
        let submission = EssaySubmission {
            id: Uuid::nil(),
            text: "An essay about something important.".into(),
            university: "Somewhere State".into(),
            level: Level::Mba,
            word_count: 5,
            char_count: 35,
            assessment: None,
            status: Status::Draft,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&submission).unwrap();
        let back: EssaySubmission = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, Level::Mba);
        assert_eq!(back.word_count, 5);
        assert!(back.assessment.is_none());
    }

    #[test]
    fn patch_is_empty() {
        assert!(SubmissionPatch::default().is_empty());
        let patch = SubmissionPatch {
            text: Some("new text".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
