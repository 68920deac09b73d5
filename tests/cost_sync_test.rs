//! Cost-history sync rules exercised through the public API.

use chrono::NaiveDate;
use ops_dashboard::cost::{
    calculate_cost_ratio, cost_ratio_color_class, determine_project_status,
    sync_project_with_cost_history, CostRatioBand,
};
use ops_dashboard::model::{CostHistory, Project, ProjectStatus};
use ops_dashboard::numeric::parse_number_from_string;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn project_with(status: ProjectStatus, history: Vec<CostHistory>) -> Project {
    let mut p = Project::new("PJT-2024-001", "Dryer retrofit", date(2024, 1, 1), date(2024, 12, 31));
    p.pm = "최관리".into();
    p.status = status;
    p.cost_history = history;
    p
}

#[test]
fn test_latest_entry_wins() {
    let p = project_with(
        ProjectStatus::Planned,
        vec![
            CostHistory::new(date(2024, 3, 1), 200.0, 190.0),
            CostHistory::new(date(2024, 1, 1), 100.0, 50.0),
        ],
    );
    let synced = sync_project_with_cost_history(&p);
    assert_eq!(synced.budget, 200.0);
    assert_eq!(synced.actual_cost, 190.0);
    assert_eq!(calculate_cost_ratio(synced.budget, synced.actual_cost), 95.0);
    assert_eq!(synced.status, ProjectStatus::InProgressNeedsAttention);
}

#[test]
fn test_sync_twice_equals_sync_once() {
    let p = project_with(
        ProjectStatus::Suspended,
        vec![CostHistory::new(date(2024, 2, 1), 1_000.0, 400.0)],
    );
    let once = sync_project_with_cost_history(&p);
    assert_eq!(sync_project_with_cost_history(&once), once);
    assert_eq!(once.status, ProjectStatus::InProgress);
}

#[test]
fn test_empty_history_is_identity() {
    let mut p = project_with(ProjectStatus::Suspended, Vec::new());
    p.budget = 500.0;
    p.actual_cost = 499.0;
    assert_eq!(sync_project_with_cost_history(&p), p);
}

#[test]
fn test_completed_is_sticky() {
    let p = project_with(
        ProjectStatus::Completed,
        vec![CostHistory::new(date(2024, 5, 1), 100.0, 150.0)],
    );
    assert_eq!(
        sync_project_with_cost_history(&p).status,
        ProjectStatus::Completed
    );
}

#[test]
fn test_threshold_boundaries() {
    let current = ProjectStatus::Planned;
    assert_eq!(
        determine_project_status(95.0, current),
        ProjectStatus::InProgressNeedsAttention
    );
    assert_eq!(determine_project_status(94.999, current), ProjectStatus::InProgress);
    assert_eq!(determine_project_status(70.0, current), ProjectStatus::InProgress);
    assert_eq!(determine_project_status(0.0, current), ProjectStatus::Planned);
}

#[test]
fn test_zero_budget_guard() {
    assert_eq!(calculate_cost_ratio(0.0, 500.0), 0.0);
    let p = project_with(
        ProjectStatus::InProgress,
        vec![CostHistory::new(date(2024, 1, 1), 0.0, 500.0)],
    );
    assert_eq!(sync_project_with_cost_history(&p).status, ProjectStatus::Planned);
}

#[test]
fn test_number_parsing() {
    assert_eq!(parse_number_from_string("1,234,567"), 1_234_567.0);
    assert_eq!(parse_number_from_string("abc"), 0.0);
    assert_eq!(parse_number_from_string(""), 0.0);
}

#[test]
fn test_color_band_boundaries() {
    assert_eq!(cost_ratio_color_class(100.01), cost_ratio_color_class(150.0));
    assert_eq!(CostRatioBand::from_ratio(150.0), CostRatioBand::OverBudget);
    assert_eq!(CostRatioBand::from_ratio(94.9), CostRatioBand::Warning);
    assert_ne!(cost_ratio_color_class(94.9), cost_ratio_color_class(95.0));
}
