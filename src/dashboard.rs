use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::cost::{calculate_cost_ratio, sync_project_with_cost_history};
use crate::error::{DashboardError, Result};
use crate::io;
use crate::model::{
    CostHistory, EquipmentHistoryEntry, EquipmentPart, Notification, NotificationCategory,
    NotificationKind, Person, Portfolio, Project, ProjectStatus, RepairStatus, ScheduleItem,
    ScheduleStatus,
};
use crate::portfolio::{is_alert_for_project, urgent_alerts, AlertStatus, UrgentAlert, UrgentFilter};

/// Application state: the portfolio being worked on plus view state that is
/// not persisted with it.
pub struct Dashboard {
    pub portfolio: Portfolio,
    pub file_path: Option<PathBuf>,
    pub status_message: String,
    alert_states: HashMap<String, AlertStatus>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            portfolio: Portfolio::default(),
            file_path: None,
            status_message: "Ready".to_string(),
            alert_states: HashMap::new(),
        }
    }

    /// A dashboard seeded with demonstration projects around `today`.
    pub fn with_sample_data(today: NaiveDate) -> Self {
        let mut dashboard = Self::new();
        dashboard.portfolio = sample_portfolio(today);
        dashboard
    }

    pub fn projects(&self) -> &[Project] {
        &self.portfolio.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.portfolio.project(id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.portfolio
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DashboardError::ProjectNotFound(id.to_string()))
    }

    // --- Project operations ---

    /// Create and insert a new project, returning its id.
    pub fn create_project(
        &mut self,
        today: NaiveDate,
        name: impl Into<String>,
        pm: impl Into<String>,
    ) -> Result<String> {
        let mut project = Project::draft(today);
        project.name = name.into();
        project.pm = pm.into();
        let id = project.id.clone();
        self.upsert_project(project)?;
        Ok(id)
    }

    /// Replace the project with the same id, or insert it at the front.
    pub fn upsert_project(&mut self, project: Project) -> Result<()> {
        project.validate()?;
        match self.portfolio.projects.iter().position(|p| p.id == project.id) {
            Some(idx) => {
                self.status_message = format!("Updated '{}'", project.name);
                self.portfolio.projects[idx] = project;
            }
            None => {
                self.status_message = format!("Created '{}'", project.name);
                self.portfolio.projects.insert(0, project);
            }
        }
        self.portfolio.touch();
        Ok(())
    }

    pub fn delete_project(&mut self, id: &str) -> bool {
        let Some(idx) = self.portfolio.projects.iter().position(|p| p.id == id) else {
            return false;
        };
        let project = self.portfolio.projects.remove(idx);
        self.alert_states
            .retain(|alert_id, _| !is_alert_for_project(alert_id, &project));
        self.portfolio.touch();
        self.status_message = "Project deleted".to_string();
        true
    }

    // --- Cost history ---

    /// Replace a project's cost history and re-sync its budget, cost and status.
    pub fn save_cost_history(&mut self, project_id: &str, history: Vec<CostHistory>) -> Result<&Project> {
        let idx = self.position(project_id)?;
        for entry in &history {
            entry.validate()?;
        }
        let current = &self.portfolio.projects[idx];
        let previous_status = current.status;

        let updated = Project {
            cost_history: history,
            ..current.clone()
        };
        let synced = sync_project_with_cost_history(&updated);

        if synced.status == ProjectStatus::InProgressNeedsAttention
            && previous_status != ProjectStatus::InProgressNeedsAttention
        {
            let ratio = calculate_cost_ratio(synced.budget, synced.actual_cost);
            self.push_notification(
                Notification::new(
                    NotificationKind::Urgent,
                    NotificationCategory::Budget,
                    "예산 초과 경고",
                    format!("{} has used {:.1}% of its budget", synced.name, ratio),
                )
                .related_to(synced.id.clone()),
            );
        }

        debug!(project = %synced.id, status = ?synced.status, "saved cost history");
        self.status_message = format!(
            "Cost history saved for '{}' ({} entries)",
            synced.name,
            synced.cost_history.len()
        );
        self.portfolio.projects[idx] = synced;
        self.portfolio.touch();
        Ok(&self.portfolio.projects[idx])
    }

    /// Append one budget/cost snapshot and re-sync.
    pub fn record_cost_entry(
        &mut self,
        project_id: &str,
        date: NaiveDate,
        budget: f64,
        actual_cost: f64,
    ) -> Result<&Project> {
        let idx = self.position(project_id)?;
        let mut history = self.portfolio.projects[idx].cost_history.clone();
        history.push(CostHistory::new(date, budget, actual_cost));
        self.save_cost_history(project_id, history)
    }

    // --- Equipment history ---

    /// Edit the entry with the same id in place, or add it as the newest record.
    pub fn save_equipment_entry(
        &mut self,
        project_id: &str,
        entry: EquipmentHistoryEntry,
        quick: bool,
    ) -> Result<()> {
        entry.validate(quick)?;
        let idx = self.position(project_id)?;
        let project = &mut self.portfolio.projects[idx];
        match project.equipment_history.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => project.equipment_history.insert(0, entry),
        }
        self.status_message = "Equipment history saved".to_string();
        self.portfolio.touch();
        Ok(())
    }

    // --- Schedule ---

    /// Edit the item with the same id in place, or append it to the schedule.
    pub fn save_schedule_item(&mut self, project_id: &str, item: ScheduleItem) -> Result<()> {
        item.validate()?;
        let idx = self.position(project_id)?;
        let project = &mut self.portfolio.projects[idx];
        self.status_message = match project.schedule_items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                let message = format!("Updated schedule item '{}'", item.title);
                *existing = item;
                message
            }
            None => {
                let message = format!("Added schedule item '{}'", item.title);
                project.schedule_items.push(item);
                message
            }
        };
        self.portfolio.touch();
        Ok(())
    }

    pub fn update_schedule_status(
        &mut self,
        project_id: &str,
        item_id: &str,
        status: ScheduleStatus,
    ) -> Result<()> {
        let idx = self.position(project_id)?;
        let item = self.portfolio.projects[idx]
            .schedule_items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| DashboardError::ScheduleItemNotFound(item_id.to_string()))?;
        item.status = status;
        if status == ScheduleStatus::Completed {
            item.progress = 100;
        }
        self.status_message = format!("'{}' is now {}", item.title, status);
        self.portfolio.touch();
        Ok(())
    }

    // --- Notifications ---

    pub fn notifications(&self) -> &[Notification] {
        &self.portfolio.notifications
    }

    /// Newest first.
    pub fn push_notification(&mut self, notification: Notification) {
        self.portfolio.notifications.insert(0, notification);
    }

    pub fn mark_as_read(&mut self, id: &str) -> bool {
        match self.portfolio.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_as_read(&mut self) {
        for n in &mut self.portfolio.notifications {
            n.is_read = true;
        }
    }

    pub fn delete_notification(&mut self, id: &str) -> bool {
        let before = self.portfolio.notifications.len();
        self.portfolio.notifications.retain(|n| n.id != id);
        self.portfolio.notifications.len() != before
    }

    pub fn unread_count(&self) -> usize {
        self.portfolio.notifications.iter().filter(|n| !n.is_read).count()
    }

    // --- Alerts ---

    /// Current alerts with any acknowledged/resolved/escalated state applied.
    pub fn alerts(&self, today: NaiveDate, filter: UrgentFilter) -> Vec<UrgentAlert> {
        urgent_alerts(&self.portfolio.projects, today)
            .into_iter()
            .map(|mut alert| {
                if let Some(status) = self.alert_states.get(&alert.id) {
                    alert.status = *status;
                }
                alert
            })
            .filter(|alert| filter.matches(alert))
            .collect()
    }

    pub fn set_alert_status(&mut self, alert_id: &str, status: AlertStatus) {
        self.alert_states.insert(alert_id.to_string(), status);
    }

    // --- File operations ---

    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.portfolio = io::load_portfolio(path)?;
        self.file_path = Some(path.to_path_buf());
        self.alert_states.clear();
        self.status_message = "Portfolio loaded".to_string();
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        let path = self
            .file_path
            .clone()
            .ok_or_else(|| DashboardError::Config("no file path set for this portfolio".into()))?;
        self.save_as(&path)
    }

    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.portfolio.touch();
        io::save_portfolio(&self.portfolio, path)?;
        self.file_path = Some(path.to_path_buf());
        self.status_message = "Portfolio saved".to_string();
        Ok(())
    }

    /// Re-sync every project with its cost history; returns how many changed.
    pub fn resync_all(&mut self) -> usize {
        let mut changed = 0;
        for project in &mut self.portfolio.projects {
            let synced = sync_project_with_cost_history(project);
            if synced != *project {
                *project = synced;
                changed += 1;
            }
        }
        if changed > 0 {
            self.portfolio.touch();
        }
        self.status_message = format!("Synced {} projects", changed);
        changed
    }

    /// Append entries from a CSV file to a project's cost history.
    pub fn import_cost_history(&mut self, project_id: &str, csv_path: &Path) -> Result<usize> {
        let idx = self.position(project_id)?;
        let (entries, skipped) = io::csv_import::import_cost_history(csv_path)?;
        let count = entries.len();
        let mut history = self.portfolio.projects[idx].cost_history.clone();
        history.extend(entries);
        self.save_cost_history(project_id, history)?;

        info!(project = project_id, count, skipped, "imported cost history");
        self.status_message = if skipped > 0 {
            format!("Imported {} entries ({} rows skipped)", count, skipped)
        } else {
            format!("Imported {} entries", count)
        };
        Ok(count)
    }

    pub fn export_cost_history(&mut self, project_id: &str, csv_path: &Path, delimiter: u8) -> Result<usize> {
        let idx = self.position(project_id)?;
        let count = io::csv_export::export_cost_history(
            &self.portfolio.projects[idx].cost_history,
            csv_path,
            delimiter,
        )?;
        self.status_message = format!("Exported {} entries to CSV", count);
        Ok(count)
    }
}

/// Generate a sample portfolio for demonstration.
fn sample_portfolio(today: NaiveDate) -> Portfolio {
    let days = chrono::Duration::days;
    let mut portfolio = Portfolio::new("Sample Portfolio");

    // ── Dryer retrofit: spend close to budget ───────────────────
    let mut dryer = Project::new("PJT-2024-001", "건조기 개조", today - days(90), today + days(30));
    dryer.id = "project-1".into();
    dryer.pm = "최관리".into();
    dryer.tech_manager = "김기술".into();
    dryer.sales_managers = vec!["박영업".into()];
    dryer.progress = 70;
    dryer.status = ProjectStatus::InProgress;
    dryer.cost_history = vec![
        CostHistory::new(today - days(60), 100_000_000.0, 40_000_000.0),
        CostHistory::new(today - days(7), 120_000_000.0, 115_000_000.0),
    ];
    let mut belt = EquipmentHistoryEntry::new(
        today - days(3),
        EquipmentPart::Mechanical,
        "컨베이어 벨트에서 이상 소음 발생. 작업 중단 필요.",
    );
    belt.action = "벨트 장력 조정 및 베어링 교체 완료".into();
    belt.manager = "김기술".into();
    belt.status = RepairStatus::Completed;
    let mut sensor =
        EquipmentHistoryEntry::new(today - days(4), EquipmentPart::Control, "온도 센서 오류로 인한 자동 제어 불가");
    sensor.action = "센서 점검 중".into();
    sensor.manager = "이전기".into();
    sensor.status = RepairStatus::InProgress;
    dryer.equipment_history = vec![belt, sensor];
    dryer.people = vec![Person::new("김기술"), Person::new("이전기")];

    // ── Conveyor install: on track, one slipping task ───────────
    let mut conveyor = Project::new("PJT-2024-002", "컨베이어 설치", today - days(30), today + days(60));
    conveyor.id = "project-2".into();
    conveyor.pm = "김개발".into();
    conveyor.progress = 35;
    conveyor.location.country = "Vietnam".into();
    conveyor.location.city = "Hanoi".into();
    conveyor.cost_history = vec![CostHistory::new(today - days(10), 80_000_000.0, 30_000_000.0)];
    let mut install = ScheduleItem::new("Frame installation", today - days(20), today - days(2));
    install.assignee = "김개발".into();
    install.progress = 60;
    install.status = ScheduleStatus::InProgress;
    conveyor.schedule_items = vec![
        install,
        ScheduleItem::new("Commissioning", today + days(5), today + days(20)),
    ];

    // ── Boiler overhaul: finished over budget ───────────────────
    let mut boiler = Project::new("PJT-2023-014", "보일러 정비", today - days(200), today - days(20));
    boiler.id = "project-3".into();
    boiler.pm = "이정비".into();
    boiler.progress = 100;
    boiler.status = ProjectStatus::Completed;
    boiler.cost_history = vec![CostHistory::new(today - days(25), 50_000_000.0, 53_000_000.0)];

    // ── Warehouse automation: not started ───────────────────────
    let mut warehouse = Project::new("PJT-2024-003", "물류창고 자동화", today + days(14), today + days(180));
    warehouse.id = "project-4".into();
    warehouse.pm = "정계획".into();

    portfolio.projects = [dryer, conveyor, boiler, warehouse]
        .iter()
        .map(sync_project_with_cost_history)
        .collect();

    portfolio.notifications = vec![
        Notification::new(
            NotificationKind::Warning,
            NotificationCategory::Schedule,
            "일정 지연 알림",
            "컨베이어 설치 작업이 예정보다 2일 지연되고 있습니다.",
        )
        .related_to("project-2"),
        Notification::new(
            NotificationKind::Info,
            NotificationCategory::Project,
            "새로운 설비 이력 등록",
            "김기술님이 온도 센서 점검 이력을 등록했습니다.",
        )
        .related_to("project-1"),
    ];
    portfolio
}
