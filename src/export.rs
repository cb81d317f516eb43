// src/export.rs
use crate::analysis::DisplayRow;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

const HEADERS: [&str; 5] = ["Job Title", "Company", "Offer", "Date Posted", "Allow Remote"];

/// Serialize display rows as CSV, one record per job offer.
pub fn rows_to_csv(rows: &[DisplayRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADERS)
        .context("Failed to write CSV header")?;

    for row in rows {
        writer
            .write_record([
                &row.title,
                &row.company,
                &row.link,
                &row.date_posted,
                &row.allow_remote,
            ])
            .context("Failed to write CSV record")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

pub fn write_csv(rows: &[DisplayRow], path: &Path) -> Result<()> {
    let csv = rows_to_csv(rows)?;
    std::fs::write(path, csv)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    info!("Wrote {} row(s) to {}", rows.len(), path.display());
    Ok(())
}
