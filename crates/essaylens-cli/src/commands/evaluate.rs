//! The `essaylens evaluate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use essaylens_core::engine::{EvaluateRequest, EvaluationEngine};
use essaylens_core::model::EssaySubmission;
use essaylens_core::rng::SplitMix64;

use super::{parse_level, Settings};

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    settings: &Settings,
    text: Option<String>,
    files: Vec<PathBuf>,
    university: Option<String>,
    level: Option<String>,
    seed: Option<u64>,
    parallelism: Option<usize>,
    json: bool,
) -> Result<()> {
    anyhow::ensure!(
        text.is_some() || !files.is_empty(),
        "provide --text or at least one file"
    );

    let config = settings.load_config()?;
    let parallelism = parallelism.unwrap_or(config.parallelism);
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");
    let level = match level {
        Some(raw) => Some(parse_level(&raw)?),
        None => Some(parse_level(&config.default_level)?),
    };

    let mut requests = Vec::new();
    let mut labels = Vec::new();
    if let Some(text) = text {
        labels.push("<inline>".to_string());
        requests.push(EvaluateRequest {
            text,
            university: university.clone(),
            level,
        });
    }
    for path in &files {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read essay from {}", path.display()))?;
        labels.push(path.display().to_string());
        requests.push(EvaluateRequest {
            text: body,
            university: university.clone(),
            level,
        });
    }

    let store = settings.open_store()?;
    let engine = EvaluationEngine::new(store);

    if requests.len() == 1 {
        let request = requests.into_iter().next().unwrap();
        let stored = match seed {
            Some(seed) => {
                let mut rng = SplitMix64::seeded(seed);
                engine.evaluate_with(request, &mut rng).await?
            }
            None => engine.evaluate(request).await?,
        };
        if json {
            println!("{}", serde_json::to_string_pretty(&stored)?);
        } else {
            print_submission(&stored);
        }
        return Ok(());
    }

    let results = engine.evaluate_many(requests, parallelism, seed).await;
    let mut failed = 0usize;
    let mut stored_rows = Vec::new();
    for (label, result) in labels.iter().zip(results) {
        match result {
            Ok(stored) => {
                let score = stored
                    .assessment
                    .as_ref()
                    .map(|a| a.overall_score)
                    .unwrap_or_default();
                eprintln!("  {label}: score {score:.1} (id {})", stored.id);
                stored_rows.push(stored);
            }
            Err(e) => {
                eprintln!("  {label}: {e}");
                failed += 1;
            }
        }
    }
    eprintln!(
        "\nEvaluated {}/{} essays, {failed} failed",
        stored_rows.len(),
        stored_rows.len() + failed
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&stored_rows)?);
    }
    if failed > 0 {
        anyhow::bail!("{failed} essay(s) failed evaluation");
    }
    Ok(())
}

fn print_submission(submission: &EssaySubmission) {
    println!("Submission {}", submission.id);
    println!(
        "  level: {}  status: {}  words: {}  chars: {}",
        submission.level, submission.status, submission.word_count, submission.char_count
    );

    let Some(assessment) = &submission.assessment else {
        return;
    };

    let mut table = Table::new();
    table.set_header(vec![
        "Overall",
        "Grammar",
        "Structure",
        "Coherence",
        "Vocabulary",
        "Arguments",
    ]);
    table.add_row(vec![
        Cell::new(format!("{:.1}", assessment.overall_score)),
        Cell::new(format!("{:.1}", assessment.breakdown.grammar)),
        Cell::new(format!("{:.1}", assessment.breakdown.structure)),
        Cell::new(format!("{:.1}", assessment.breakdown.coherence)),
        Cell::new(format!("{:.1}", assessment.breakdown.vocabulary)),
        Cell::new(format!("{:.1}", assessment.breakdown.arguments)),
    ]);
    println!("{table}");

    println!(
        "  readability: {}  read time: {} min",
        assessment.readability, assessment.estimated_read_time
    );
    println!("  strengths:");
    for item in &assessment.strengths {
        println!("    - {item}");
    }
    println!("  improvements:");
    for item in &assessment.improvements {
        println!("    - {item}");
    }
    println!("  suggestions:");
    for suggestion in &assessment.suggestions {
        println!(
            "    - \"{}\" -> \"{}\" ({})",
            suggestion.original, suggestion.improved, suggestion.reason
        );
    }
}
