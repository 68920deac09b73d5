use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cost::{calculate_cost_ratio, NEEDS_ATTENTION_RATIO};
use crate::model::{Project, ProjectStatus};

/// Utilisation above which a budget alert is raised.
pub const BUDGET_ALERT_RATIO: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Budget,
    Schedule,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    #[default]
    Active,
    Acknowledged,
    Resolved,
    Escalated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UrgentAlert {
    pub id: String,
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub project_id: String,
    pub project_name: String,
    pub status: AlertStatus,
}

fn budget_alert_id(project_id: &str) -> String {
    format!("budget-{}", project_id)
}

fn schedule_alert_id(project_id: &str) -> String {
    format!("schedule-{}", project_id)
}

fn overdue_alert_prefix(project_id: &str) -> String {
    format!("overdue-{}-", project_id)
}

/// Whether `alert_id` is one of the ids [`urgent_alerts`] can derive for `project`.
pub fn is_alert_for_project(alert_id: &str, project: &Project) -> bool {
    if alert_id == budget_alert_id(&project.id) || alert_id == schedule_alert_id(&project.id) {
        return true;
    }
    alert_id
        .strip_prefix(&overdue_alert_prefix(&project.id))
        .is_some_and(|item_id| project.schedule_items.iter().any(|i| i.id == item_id))
}

/// Derive every alert the given projects warrant on `today`, most severe first.
pub fn urgent_alerts(projects: &[Project], today: NaiveDate) -> Vec<UrgentAlert> {
    let mut alerts = Vec::new();
    for project in projects {
        if let Some(alert) = budget_alert(project) {
            alerts.push(alert);
        }
        if project.status == ProjectStatus::InProgressNeedsAttention {
            alerts.push(UrgentAlert {
                id: schedule_alert_id(&project.id),
                kind: AlertKind::Schedule,
                severity: Severity::High,
                title: "일정 지연 위험".to_string(),
                description: format!("{} needs attention and may slip its schedule", project.name),
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                status: AlertStatus::Active,
            });
        }
        for item in project.schedule_items.iter().filter(|i| i.is_overdue(today)) {
            alerts.push(UrgentAlert {
                id: format!("{}{}", overdue_alert_prefix(&project.id), item.id),
                kind: AlertKind::Schedule,
                severity: Severity::Medium,
                title: "일정 지연".to_string(),
                description: format!(
                    "'{}' was due {} and is {}",
                    item.title, item.end_date, item.status
                ),
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                status: AlertStatus::Active,
            });
        }
    }
    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.project_name.cmp(&b.project_name))
            .then_with(|| a.id.cmp(&b.id))
    });
    alerts
}

fn budget_alert(project: &Project) -> Option<UrgentAlert> {
    if project.budget == 0.0 || project.actual_cost == 0.0 {
        return None;
    }
    let ratio = calculate_cost_ratio(project.budget, project.actual_cost);
    if ratio <= BUDGET_ALERT_RATIO {
        return None;
    }
    let severity = if ratio > NEEDS_ATTENTION_RATIO {
        Severity::Critical
    } else {
        Severity::High
    };
    Some(UrgentAlert {
        id: budget_alert_id(&project.id),
        kind: AlertKind::Budget,
        severity,
        title: "예산 초과 경고".to_string(),
        description: format!(
            "{} has used {}% of its budget",
            project.name,
            ratio.round()
        ),
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        status: AlertStatus::Active,
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UrgentFilter {
    #[default]
    All,
    Critical,
    Unresolved,
}

impl UrgentFilter {
    pub fn matches(self, alert: &UrgentAlert) -> bool {
        match self {
            UrgentFilter::All => true,
            UrgentFilter::Critical => alert.severity == Severity::Critical,
            UrgentFilter::Unresolved => alert.status == AlertStatus::Active,
        }
    }
}

impl FromStr for UrgentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(UrgentFilter::All),
            "critical" => Ok(UrgentFilter::Critical),
            "unresolved" => Ok(UrgentFilter::Unresolved),
            other => Err(format!("unknown alert filter '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertStats {
    pub critical: usize,
    pub high: usize,
    pub unresolved: usize,
    pub total: usize,
}

impl AlertStats {
    pub fn from_alerts(alerts: &[UrgentAlert]) -> Self {
        Self {
            critical: alerts.iter().filter(|a| a.severity == Severity::Critical).count(),
            high: alerts.iter().filter(|a| a.severity == Severity::High).count(),
            unresolved: alerts.iter().filter(|a| a.status == AlertStatus::Active).count(),
            total: alerts.len(),
        }
    }
}
