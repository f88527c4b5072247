//! The `essaylens update` command.

use anyhow::Result;

use essaylens_core::model::SubmissionPatch;
use essaylens_core::traits::SubmissionStore;

use super::{parse_id, parse_level, parse_status, Settings};

pub async fn execute(
    settings: &Settings,
    id: String,
    text: Option<String>,
    university: Option<String>,
    level: Option<String>,
    status: Option<String>,
    json: bool,
) -> Result<()> {
    let id = parse_id(&id)?;
    let patch = SubmissionPatch {
        text,
        university,
        level: level.as_deref().map(parse_level).transpose()?,
        status: status.as_deref().map(parse_status).transpose()?,
    };
    anyhow::ensure!(!patch.is_empty(), "nothing to update");

    let store = settings.open_store()?;
    let updated = store.update(id, patch).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!(
            "Updated {} (level {}, status {}, {} words)",
            updated.id, updated.level, updated.status, updated.word_count
        );
    }
    Ok(())
}
