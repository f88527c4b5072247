//! The `essaylens delete` command.

use anyhow::Result;

use essaylens_core::traits::SubmissionStore;

use super::{parse_id, Settings};

pub async fn execute(settings: &Settings, id: String) -> Result<()> {
    let id = parse_id(&id)?;
    let store = settings.open_store()?;
    store.delete(id).await?;
    println!("Deleted {id}");
    Ok(())
}
