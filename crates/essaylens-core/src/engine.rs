//! Evaluation orchestrator.
//!
//! Composes the extractor, scorer, and synthesizer into one assessment and
//! hands the finished submission to the store. Evaluation itself is pure,
//! synchronous computation; the single await point is the persistence call.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;

use crate::error::{EssayError, EssayResult};
use crate::features;
use crate::feedback;
use crate::model::{EssaySubmission, EvaluationResult, Level, NewSubmission, Status};
use crate::rng::{RandomSource, SplitMix64};
use crate::scorer;
use crate::traits::SubmissionStore;

/// Minimum trimmed text length accepted for evaluation.
const MIN_TEXT_CHARS: usize = 10;

/// One evaluation request.
#[derive(Debug, Clone, Default)]
pub struct EvaluateRequest {
    /// Raw essay body.
    pub text: String,
    /// Optional institution label.
    pub university: Option<String>,
    /// Academic level; defaults to undergrad.
    pub level: Option<Level>,
}

/// The evaluation engine. Stateless between calls; safe to share and to run
/// evaluations concurrently.
pub struct EvaluationEngine {
    store: Arc<dyn SubmissionStore>,
}

impl EvaluationEngine {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }

    /// Evaluate one essay with entropy-seeded scoring noise.
    pub async fn evaluate(&self, request: EvaluateRequest) -> EssayResult<EssaySubmission> {
        let mut rng = SplitMix64::from_entropy();
        self.evaluate_with(request, &mut rng).await
    }

    /// Evaluate one essay drawing all scoring noise from `rng`.
    ///
    /// Rejects text shorter than 10 characters after trimming before any
    /// extraction or persistence happens. Exactly one submission is created
    /// per successful call; a persistence failure propagates and leaves
    /// nothing partially committed.
    pub async fn evaluate_with(
        &self,
        request: EvaluateRequest,
        rng: &mut dyn RandomSource,
    ) -> EssayResult<EssaySubmission> {
        let trimmed_len = request.text.trim().chars().count();
        if trimmed_len < MIN_TEXT_CHARS {
            return Err(EssayError::Validation(format!(
                "essay text must be at least {MIN_TEXT_CHARS} characters"
            )));
        }

        let features = features::extract(&request.text);
        let (overall_score, breakdown) = scorer::score(&features, rng);
        let feedback = feedback::synthesize(&request.text, &features, &breakdown);

        tracing::debug!(
            words = features.word_count,
            sentences = features.sentence_count,
            score = overall_score,
            "essay scored"
        );

        let assessment = EvaluationResult {
            overall_score,
            breakdown,
            strengths: feedback.strengths,
            improvements: feedback.improvements,
            suggestions: feedback.suggestions,
            readability: feedback.readability,
            estimated_read_time: feedback.estimated_read_time,
            word_count: features.word_count,
            char_count: features.char_count,
        };

        let submission = NewSubmission {
            text: request.text,
            university: request.university.unwrap_or_default(),
            level: request.level.unwrap_or_default(),
            word_count: features.word_count,
            char_count: features.char_count,
            assessment: Some(assessment),
            status: Status::Evaluated,
        };

        self.store.insert(submission).await
    }

    /// Evaluate a batch with bounded parallelism.
    ///
    /// Results come back in input order. With a `seed`, request `i` uses a
    /// generator seeded from `seed + i`, so batch runs are reproducible.
    pub async fn evaluate_many(
        &self,
        requests: Vec<EvaluateRequest>,
        parallelism: usize,
        seed: Option<u64>,
    ) -> Vec<EssayResult<EssaySubmission>> {
        let semaphore = Arc::new(Semaphore::new(parallelism.max(1)));
        let mut futures = FuturesUnordered::new();

        for (index, request) in requests.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let mut rng = match seed {
                Some(base) => SplitMix64::seeded(base.wrapping_add(index as u64)),
                None => SplitMix64::from_entropy(),
            };
            futures.push(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => self.evaluate_with(request, &mut rng).await,
                    Err(_) => Err(EssayError::Internal("semaphore closed".into())),
                };
                (index, result)
            });
        }

        let mut indexed: Vec<(usize, EssayResult<EssaySubmission>)> = Vec::new();
        while let Some(entry) = futures.next().await {
            indexed.push(entry);
        }
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, result)| result).collect()
    }
}
