use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CostHistory, EquipmentHistoryEntry, Person, ScheduleItem};
use crate::error::{DashboardError, FieldError};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planned,
    InProgress,
    InProgressNeedsAttention,
    Suspended,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Planned,
        ProjectStatus::InProgress,
        ProjectStatus::InProgressNeedsAttention,
        ProjectStatus::Suspended,
        ProjectStatus::Completed,
    ];

    /// Localized display label.
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Planned => "계획",
            ProjectStatus::InProgress => "진행 중",
            ProjectStatus::InProgressNeedsAttention => "진행 중(관리필요)",
            ProjectStatus::Suspended => "일시 중단",
            ProjectStatus::Completed => "완료",
        }
    }

    /// Work is underway, with or without an attention flag.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            ProjectStatus::InProgress | ProjectStatus::InProgressNeedsAttention
        )
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(status) = ProjectStatus::ALL.iter().find(|st| st.label() == trimmed) {
            return Ok(*status);
        }
        match trimmed.to_lowercase().replace([' ', '-'], "_").as_str() {
            "planned" | "plan" | "new" => Ok(ProjectStatus::Planned),
            "in_progress" | "inprogress" | "active" => Ok(ProjectStatus::InProgress),
            "in_progress_needs_attention" | "needs_attention" | "attention" => {
                Ok(ProjectStatus::InProgressNeedsAttention)
            }
            "suspended" | "on_hold" | "paused" => Ok(ProjectStatus::Suspended),
            "completed" | "complete" | "done" | "finished" => Ok(ProjectStatus::Completed),
            _ => Err(format!("unknown project status '{}'", s)),
        }
    }
}

/// Where a project is physically carried out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub country: String,
    pub city: String,
    pub address: String,
}

impl Default for Location {
    fn default() -> Self {
        // Seoul head office
        Self {
            lat: 37.5665,
            lng: 126.9780,
            country: "Korea".to_string(),
            city: "Seoul".to_string(),
            address: String::new(),
        }
    }
}

/// A tracked project with its cached financial snapshot and history logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub pjt_no: String,
    pub name: String,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Mirrors the latest cost-history entry once synced.
    #[serde(default)]
    pub budget: f64,
    /// Mirrors the latest cost-history entry once synced.
    #[serde(default)]
    pub actual_cost: f64,
    #[serde(default)]
    pub cost_history: Vec<CostHistory>,

    #[serde(default)]
    pub pm: String,
    #[serde(default)]
    pub sales_managers: Vec<String>,
    #[serde(default)]
    pub tech_manager: String,
    /// Completion percentage, 0 to 100.
    #[serde(default)]
    pub progress: u8,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub equipment_history: Vec<EquipmentHistoryEntry>,
    #[serde(default)]
    pub schedule_items: Vec<ScheduleItem>,
    #[serde(default)]
    pub people: Vec<Person>,
}

impl Project {
    pub fn new(
        pjt_no: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: format!("project_{}", Uuid::new_v4().simple()),
            pjt_no: pjt_no.into(),
            name: name.into(),
            status: ProjectStatus::Planned,
            budget: 0.0,
            actual_cost: 0.0,
            cost_history: Vec::new(),
            pm: String::new(),
            sales_managers: Vec::new(),
            tech_manager: String::new(),
            progress: 0,
            start_date,
            end_date,
            note: String::new(),
            location: Location::default(),
            equipment_history: Vec::new(),
            schedule_items: Vec::new(),
            people: Vec::new(),
        }
    }

    /// A blank project dated `today` with a 30-day window and a date-derived number.
    pub fn draft(today: NaiveDate) -> Self {
        let pjt_no = format!("PJT-{}", today.format("%Y%m%d"));
        Self::new(pjt_no, "", today, today + chrono::Duration::days(30))
    }

    /// Check the fields a project cannot be saved without.
    pub fn validate(&self) -> Result<(), DashboardError> {
        let mut errors = Vec::new();
        if self.pjt_no.trim().is_empty() {
            errors.push(FieldError::new("pjt_no", "project number is required"));
        }
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "project name is required"));
        }
        if self.pm.trim().is_empty() {
            errors.push(FieldError::new("pm", "project manager is required"));
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

    /// Parse a comma-separated list of sales managers, dropping blanks.
    pub fn set_sales_managers(&mut self, input: &str) {
        self.sales_managers = input
            .split(',')
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
    }
}
