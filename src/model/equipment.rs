use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DashboardError, FieldError};

/// Which subsystem of the equipment a maintenance record concerns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentPart {
    Mechanical,
    Control,
    #[default]
    Other,
}

impl EquipmentPart {
    pub fn label(self) -> &'static str {
        match self {
            EquipmentPart::Mechanical => "기구",
            EquipmentPart::Control => "제어",
            EquipmentPart::Other => "기타",
        }
    }
}

impl fmt::Display for EquipmentPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl RepairStatus {
    pub fn label(self) -> &'static str {
        match self {
            RepairStatus::Pending => "대기",
            RepairStatus::InProgress => "진행중",
            RepairStatus::Completed => "완료",
        }
    }
}

/// One maintenance record: the problem observed and the action taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentHistoryEntry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub part: EquipmentPart,
    /// Description of the problem.
    pub content: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub status: RepairStatus,
}

impl EquipmentHistoryEntry {
    pub fn new(date: NaiveDate, part: EquipmentPart, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            part,
            content: content.into(),
            action: String::new(),
            manager: String::new(),
            status: RepairStatus::Pending,
        }
    }

    /// A quick (urgent) report only needs the problem description; a full
    /// record also names the responsible manager.
    pub fn validate(&self, quick: bool) -> Result<(), DashboardError> {
        let mut errors = Vec::new();
        if self.content.trim().is_empty() {
            errors.push(FieldError::new("content", "problem description is required"));
        }
        if !quick && self.manager.trim().is_empty() {
            errors.push(FieldError::new("manager", "manager is required"));
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

    fn entry() -> EquipmentHistoryEntry {
        EquipmentHistoryEntry::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            EquipmentPart::Mechanical,
            "컨베이어 벨트 이상 소음",
        )
    }

    #[test]
    fn quick_report_needs_only_content() {
        assert!(entry().validate(true).is_ok());
        assert!(entry().validate(false).is_err());
    }

    #[test]
    fn blank_content_is_rejected() {
        let mut e = entry();
        e.content = "   ".into();
        e.manager = "김기술".into();
        assert!(e.validate(false).is_err());
    }

    #[test]
    fn repair_status_uses_kebab_tags() {
        let json = serde_json::to_string(&RepairStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
