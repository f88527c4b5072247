//! The `essaylens stats` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use essaylens_core::traits::SubmissionStore;

use super::Settings;

pub async fn execute(settings: &Settings, json: bool) -> Result<()> {
    let store = settings.open_store()?;
    let stats = store.stats().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!(
        "{} essays, average score {:.1}",
        stats.total_essays, stats.average_score
    );

    if !stats.by_level.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Level", "Count"]);
        for entry in &stats.by_level {
            table.add_row(vec![
                Cell::new(entry.level),
                Cell::new(entry.count),
            ]);
        }
        println!("{table}");
    }

    Ok(())
}
