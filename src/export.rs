use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

/// Write transactions as CSV, most recent first. Descriptions go in raw;
/// the writer handles quoting and escaping. Returns the row count.
pub(crate) fn write_csv<W: Write>(out: W, txns: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["Date", "Description", "Type", "Category", "Amount"])
        .context("Failed to write CSV header")?;

    let mut ordered: Vec<&Transaction> = txns.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));

    let mut count = 0;
    for t in ordered {
        wtr.write_record([
            t.date.to_string(),
            t.desc.clone(),
            t.kind.to_string(),
            t.category.clone(),
            t.amount.to_string(),
        ])
        .context("Failed to write CSV record")?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}

pub(crate) fn export_to_path(path: &Path, txns: &[Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_csv(file, txns)
}
