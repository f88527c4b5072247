//! The `essaylens show` command.

use anyhow::Result;

use essaylens_core::traits::SubmissionStore;

use super::{parse_id, Settings};

pub async fn execute(settings: &Settings, id: String, json: bool) -> Result<()> {
    let id = parse_id(&id)?;
    let store = settings.open_store()?;
    let submission = store.get(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&submission)?);
        return Ok(());
    }

    println!("Submission {}", submission.id);
    if !submission.university.is_empty() {
        println!("  university: {}", submission.university);
    }
    println!(
        "  level: {}  status: {}  words: {}  chars: {}",
        submission.level, submission.status, submission.word_count, submission.char_count
    );
    println!(
        "  created: {}  updated: {}",
        submission.created_at.format("%Y-%m-%d %H:%M:%S"),
        submission.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
    match &submission.assessment {
        Some(assessment) => {
            println!(
                "  score: {:.1}  readability: {}  read time: {} min",
                assessment.overall_score, assessment.readability, assessment.estimated_read_time
            );
        }
        None => println!("  not evaluated"),
    }
    println!("\n{}", submission.text);

    Ok(())
}
