use std::path::Path;

use crate::cost::calculate_cost_ratio;
use crate::error::Result;
use crate::model::CostHistory;

/// Export cost history to a delimited CSV file readable by the importer.
///
/// Columns: Date ; Budget ; Actual Cost ; Cost Ratio ; Note
/// Rows are written oldest first, dates as YYYY-MM-DD.
/// Returns the number of entries written.
pub fn export_cost_history(history: &[CostHistory], path: &Path, delimiter: u8) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    wtr.write_record(["Date", "Budget", "Actual Cost", "Cost Ratio", "Note"])?;

    let mut ordered: Vec<&CostHistory> = history.iter().collect();
    ordered.sort_by_key(|entry| entry.date);

    for entry in &ordered {
        let ratio = calculate_cost_ratio(entry.budget, entry.actual_cost);
        wtr.write_record([
            entry.date.format("%Y-%m-%d").to_string(),
            entry.budget.to_string(),
            entry.actual_cost.to_string(),
            format!("{:.1}", ratio),
            entry.note.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(ordered.len())
}
