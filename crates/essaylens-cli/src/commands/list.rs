//! The `essaylens list` command.

use std::str::FromStr;

use anyhow::Result;
use comfy_table::{Cell, Table};

use essaylens_core::query::{ListQuery, SortField, SortOrder};
use essaylens_core::traits::SubmissionStore;

use super::{parse_level, parse_status, Settings};

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    settings: &Settings,
    page: u32,
    limit: Option<u32>,
    status: Option<String>,
    level: Option<String>,
    sort_by: String,
    sort_order: String,
    json: bool,
) -> Result<()> {
    let query = ListQuery {
        page,
        limit,
        status: status.as_deref().map(parse_status).transpose()?,
        level: level.as_deref().map(parse_level).transpose()?,
        sort_by: SortField::from_str(&sort_by).map_err(anyhow::Error::msg)?,
        sort_order: SortOrder::from_str(&sort_order).map_err(anyhow::Error::msg)?,
    };

    let store = settings.open_store()?;
    let result = store.list(&query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Level", "Status", "Score", "Words", "Created"]);
    for submission in &result.data {
        let score = submission
            .assessment
            .as_ref()
            .map(|a| format!("{:.1}", a.overall_score))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(submission.id),
            Cell::new(submission.level),
            Cell::new(submission.status),
            Cell::new(score),
            Cell::new(submission.word_count),
            Cell::new(submission.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");
    println!(
        "page {}/{} ({} total, limit {})",
        result.page,
        result.pages.max(1),
        result.total,
        result.limit
    );

    Ok(())
}
