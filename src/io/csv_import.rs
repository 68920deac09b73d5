use std::path::Path;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{DashboardError, Result};
use crate::model::CostHistory;
use crate::numeric::parse_number_from_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Date,
    Budget,
    ActualCost,
    Note,
}

/// Try parsing a date string with several common formats.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_col(normalized: &str) -> Option<Column> {
    match normalized {
        "date" | "recorded" | "recordedon" | "asof" | "날짜" | "일자" => Some(Column::Date),

        "budget" | "approvedbudget" | "예산" => Some(Column::Budget),

        "actualcost" | "actual" | "cost" | "spent" | "spend" | "실제비용" | "비용" => {
            Some(Column::ActualCost)
        }

        "note" | "notes" | "comment" | "comments" | "memo" | "비고" => Some(Column::Note),

        _ => None,
    }
}

/// Import cost-history entries from a CSV file.
///
/// Returns `(entries, skipped_count)` on success.
pub fn import_cost_history(path: &Path) -> Result<(Vec<CostHistory>, usize)> {
    let content = std::fs::read_to_string(path)?;
    parse_cost_history(&content)
}

/// Parse cost-history CSV text.
///
/// Auto-detects the delimiter (comma, semicolon, tab) and matches headers
/// flexibly ("Date", "Actual Cost", "실제비용", ...). Amounts may carry
/// thousands separators or currency marks. Rows without a valid date are skipped.
pub fn parse_cost_history(content: &str) -> Result<(Vec<CostHistory>, usize)> {
    let content = content.trim_start_matches('\u{feff}');
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let has = |col: Column| col_map.iter().any(|c| *c == Some(col));
    if !has(Column::Date) || !has(Column::Budget) || !has(Column::ActualCost) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(DashboardError::CsvFormat(format!(
            "missing required columns. Found headers: {:?}. \
             Need columns for: date, budget, actual cost.",
            found
        )));
    }

    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let line = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(line, error = %e, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };

        let mut date_val = None;
        let mut budget_val = None;
        let mut actual_val = None;
        let mut note_val = None;
        for (field, col) in record.iter().zip(col_map.iter()) {
            match col {
                Some(Column::Date) => date_val = Some(field),
                Some(Column::Budget) => budget_val = Some(field),
                Some(Column::ActualCost) => actual_val = Some(field),
                Some(Column::Note) => note_val = Some(field),
                None => {}
            }
        }

        let date = match date_val.and_then(parse_date) {
            Some(d) => d,
            None => {
                warn!(line, value = date_val.unwrap_or(""), "skipping row with invalid date");
                skipped += 1;
                continue;
            }
        };

        let budget = budget_val.map(parse_number_from_string).unwrap_or(0.0);
        let actual_cost = actual_val.map(parse_number_from_string).unwrap_or(0.0);
        let mut entry = CostHistory::new(date, budget, actual_cost);
        if let Err(e) = entry.validate() {
            warn!(line, error = %e, "skipping row with out-of-range amount");
            skipped += 1;
            continue;
        }
        if let Some(note) = note_val.filter(|n| !n.is_empty()) {
            entry = entry.with_note(note);
        }
        entries.push(entry);
    }

    if entries.is_empty() && skipped > 0 {
        return Err(DashboardError::CsvFormat(format!(
            "no valid cost entries found ({} rows skipped)",
            skipped
        )));
    }
    if entries.is_empty() {
        return Err(DashboardError::CsvFormat(
            "CSV file is empty or has no data rows".to_string(),
        ));
    }

    Ok((entries, skipped))
}
