use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Reads every record of a headed CSV file. The first malformed record
/// aborts the read.
pub fn read_csv_records<T: DeserializeOwned>(csv_path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?;
    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let mut records = Vec::new();
    for (idx, record) in reader.deserialize::<T>().enumerate() {
        let record = record.with_context(|| format!("failed to parse csv record #{}", idx + 1))?;
        records.push(record);
    }

    Ok(records)
}
