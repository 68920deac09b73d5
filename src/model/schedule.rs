use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DashboardError, FieldError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Delayed,
}

impl ScheduleStatus {
    pub fn label(self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "대기",
            ScheduleStatus::InProgress => "진행중",
            ScheduleStatus::Completed => "완료",
            ScheduleStatus::Delayed => "지연",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScheduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "pending" | "대기" => Ok(ScheduleStatus::Pending),
            "in-progress" | "진행중" => Ok(ScheduleStatus::InProgress),
            "completed" | "done" | "완료" => Ok(ScheduleStatus::Completed),
            "delayed" | "지연" => Ok(ScheduleStatus::Delayed),
            _ => Err(format!("unknown schedule status '{}'", s)),
        }
    }
}

/// A dated work item in a project's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub assignee: String,
    /// Completion percentage, 0 to 100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub status: ScheduleStatus,
}

impl ScheduleItem {
    pub fn new(title: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            start_date,
            end_date,
            assignee: String::new(),
            progress: 0,
            status: ScheduleStatus::Pending,
        }
    }

    /// A title is required and the item may not end before it starts.
    pub fn validate(&self) -> Result<(), DashboardError> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "schedule title is required"));
        }
        if self.end_date < self.start_date {
            errors.push(FieldError::new(
                "end_date",
                format!(
                    "end date {} is before start date {}",
                    self.end_date, self.start_date
                ),
            ));
        }
        if self.progress > 100 {
            errors.push(FieldError::new(
                "progress",
                format!("progress must be between 0 and 100, got {}", self.progress),
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DashboardError::Validation(errors))
        }
    }

    /// Past its end date and not yet completed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.end_date < today && self.status != ScheduleStatus::Completed
    }
}

/// Someone assigned to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub affiliation: String,
    #[serde(default)]
    pub department: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            affiliation: String::new(),
            department: String::new(),
        }
    }
}
