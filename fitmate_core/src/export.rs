//! CSV export of progress history.
//!
//! One row per date that has a weight entry, a workout entry, or both.

use crate::{Result, UserProgress};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, Default, PartialEq, serde::Serialize)]
struct CsvRow {
    date: String,
    weight: Option<f64>,
    completed: Option<bool>,
    calories_burned: Option<u32>,
}

fn rows(progress: &UserProgress) -> Vec<CsvRow> {
    let mut by_date: BTreeMap<NaiveDate, CsvRow> = BTreeMap::new();

    for entry in &progress.weights {
        let row = by_date.entry(entry.date).or_default();
        row.weight = Some(entry.weight);
    }
    for entry in &progress.workouts {
        let row = by_date.entry(entry.date).or_default();
        row.completed = Some(entry.completed);
        row.calories_burned = Some(entry.calories_burned);
    }

    by_date
        .into_iter()
        .map(|(date, mut row)| {
            row.date = date.format("%Y-%m-%d").to_string();
            row
        })
        .collect()
}

/// Write the progress history to a CSV file, replacing any existing file
///
/// Returns the number of rows written.
pub fn write_progress_csv(progress: &UserProgress, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let rows = rows(progress);
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!("Exported {} progress rows to {:?}", rows.len(), path);
    Ok(rows.len())
}
