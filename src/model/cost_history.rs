use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DashboardError, FieldError};

/// A point-in-time snapshot of approved budget and cumulative spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostHistory {
    pub id: String,
    pub date: NaiveDate,
    pub budget: f64,
    pub actual_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CostHistory {
    pub fn new(date: NaiveDate, budget: f64, actual_cost: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            budget,
            actual_cost,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Amounts must be finite; JSON cannot carry infinities or NaN.
    pub fn validate(&self) -> Result<(), DashboardError> {
        let mut errors = Vec::new();
        if !self.budget.is_finite() {
            errors.push(FieldError::new("budget", format!("budget must be a finite amount, got {}", self.budget)));
        }
        if !self.actual_cost.is_finite() {
            errors.push(FieldError::new(
                "actual_cost",
                format!("actual cost must be a finite amount, got {}", self.actual_cost),
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DashboardError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn finite_amounts_pass() {
        assert!(CostHistory::new(day(), 100.0, -5.0).validate().is_ok());
    }

    #[test]
    fn infinite_or_nan_amounts_are_rejected() {
        let err = CostHistory::new(day(), f64::INFINITY, f64::NAN).validate().unwrap_err();
        match err {
            DashboardError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field).collect();
                assert_eq!(names, vec!["budget", "actual_cost"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
