//! End-to-end engine + store behavior: evaluate, fetch, update, re-derive.

use std::sync::Arc;

use essaylens_core::engine::{EvaluateRequest, EvaluationEngine};
use essaylens_core::error::EssayError;
use essaylens_core::features;
use essaylens_core::model::{Level, Status, SubmissionPatch};
use essaylens_core::query::ListQuery;
use essaylens_core::rng::FixedSource;
use essaylens_core::traits::SubmissionStore;
use essaylens_store::SqliteStore;

const ESSAY: &str = "Cats are great companions. They are independent yet affectionate, \
and their routines teach patience. A household with a cat is rarely silent for long.";

fn engine() -> (EvaluationEngine, Arc<SqliteStore>) {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    (EvaluationEngine::new(store.clone()), store)
}

#[tokio::test]
async fn evaluate_then_fetch_preserves_derived_counts() {
    let (engine, store) = engine();
    let stored = engine
        .evaluate(EvaluateRequest {
            text: ESSAY.into(),
            university: Some("Somewhere State".into()),
            level: Some(Level::Mba),
        })
        .await
        .unwrap();

    let fetched = store.get(stored.id).await.unwrap();
    assert_eq!(fetched.status, Status::Evaluated);

    // The assessment snapshot agrees with counts recomputed from the
    // stored text.
    let recomputed = features::extract(&fetched.text);
    let assessment = fetched.assessment.unwrap();
    assert_eq!(assessment.word_count, recomputed.word_count);
    assert_eq!(assessment.char_count, recomputed.char_count);
    assert_eq!(fetched.word_count, recomputed.word_count);
    assert_eq!(fetched.char_count, recomputed.char_count);
}

#[tokio::test]
async fn rejected_text_leaves_store_empty() {
    let (engine, store) = engine();
    let err = engine
        .evaluate(EvaluateRequest {
            text: "hi".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EssayError::Validation(_)));

    let page = store.list(&ListQuery::default()).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn text_update_does_not_re_evaluate() {
    let (engine, store) = engine();
    let stored = engine
        .evaluate_with(
            EvaluateRequest {
                text: ESSAY.into(),
                ..Default::default()
            },
            &mut FixedSource::midpoint(),
        )
        .await
        .unwrap();
    let original_assessment = stored.assessment.clone().unwrap();

    let new_text = "A completely different essay body, rewritten from scratch.";
    let updated = store
        .update(
            stored.id,
            SubmissionPatch {
                text: Some(new_text.into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let (words, chars) = features::basic_counts(new_text);
    assert_eq!(updated.word_count, words);
    assert_eq!(updated.char_count, chars);
    // Assessment untouched: it still reflects the original text snapshot.
    assert_eq!(updated.assessment.unwrap(), original_assessment);
}

#[tokio::test]
async fn batch_evaluation_persists_each_essay() {
    let (engine, store) = engine();
    let requests: Vec<EvaluateRequest> = (0..5)
        .map(|i| EvaluateRequest {
            text: format!("Essay number {i} discusses a subject at moderate length."),
            ..Default::default()
        })
        .collect();

    let results = engine.evaluate_many(requests, 3, Some(42)).await;
    assert!(results.iter().all(|r| r.is_ok()));

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_essays, 5);
    assert!(stats.average_score >= 50.0);
}
