//! End-to-end store workflow: seed, persist, import, export, reload.

use chrono::NaiveDate;
use ops_dashboard::model::{ProjectStatus, ScheduleItem, ScheduleStatus};
use ops_dashboard::portfolio::{
    schedule_entries, FinancialOverview, ScheduleFilter, ScheduleStats, StatusOverview, UrgentFilter,
};
use ops_dashboard::{Dashboard, DashboardError};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn test_save_import_export_reload() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("portfolio.json");
    let import = dir.path().join("costs.csv");
    let export = dir.path().join("export.csv");

    let mut dashboard = Dashboard::with_sample_data(today());
    dashboard.save_as(&data).unwrap();

    std::fs::write(
        &import,
        "날짜;예산;실제비용;비고\n2024-07-01;100,000,000;99,000,000;overrun\nlater;1;1;\n",
    )
    .unwrap();

    let mut reloaded = Dashboard::new();
    reloaded.load(&data).unwrap();
    assert_eq!(reloaded.projects().len(), 4);

    // The warehouse project has no history yet and is Planned.
    let imported = reloaded.import_cost_history("project-4", &import).unwrap();
    assert_eq!(imported, 1);
    assert!(reloaded.status_message.contains("1 rows skipped"));
    let warehouse = reloaded.project("project-4").unwrap();
    assert_eq!(warehouse.status, ProjectStatus::InProgressNeedsAttention);
    assert_eq!(warehouse.budget, 100_000_000.0);

    assert_eq!(
        reloaded
            .export_cost_history("project-4", &export, b';')
            .unwrap(),
        1
    );
    let exported = std::fs::read_to_string(&export).unwrap();
    assert!(exported.contains("2024-07-01;100000000;99000000;99.0;overrun"));

    reloaded.save().unwrap();
    let mut again = Dashboard::new();
    again.load(&data).unwrap();
    assert_eq!(
        again.project("project-4").unwrap().status,
        ProjectStatus::InProgressNeedsAttention
    );
}

#[test]
fn test_overviews_over_sample_data() {
    let dashboard = Dashboard::with_sample_data(today());
    let overview = StatusOverview::from_projects(dashboard.projects());
    assert_eq!(overview.total, 4);
    assert_eq!(overview.count(ProjectStatus::InProgressNeedsAttention), 1);
    assert_eq!(overview.count(ProjectStatus::Completed), 1);

    let money = FinancialOverview::from_projects(dashboard.projects());
    assert_eq!(money.total_budget, 250_000_000.0);
    assert_eq!(money.total_actual_cost, 198_000_000.0);

    let critical = dashboard.alerts(today(), UrgentFilter::Critical);
    assert_eq!(critical.len(), 2);
}

#[test]
fn test_import_into_unknown_project() {
    let dir = tempfile::tempdir().unwrap();
    let import = dir.path().join("costs.csv");
    std::fs::write(&import, "date;budget;actual cost\n2024-01-01;1;1\n").unwrap();

    let mut dashboard = Dashboard::with_sample_data(today());
    let err = dashboard.import_cost_history("missing", &import).unwrap_err();
    assert!(matches!(err, DashboardError::ProjectNotFound(_)));
}

#[test]
fn test_schedule_planning_across_projects() {
    let today = today();
    let mut dashboard = Dashboard::with_sample_data(today);

    let overdue = schedule_entries(dashboard.projects(), today, ScheduleFilter::Overdue);
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].item.title, "Frame installation");
    assert_eq!(overdue[0].project_id, "project-2");

    let mut survey = ScheduleItem::new("Site survey", today, today + chrono::Duration::days(3));
    survey.status = ScheduleStatus::InProgress;
    dashboard.save_schedule_item("project-4", survey).unwrap();

    let backwards = ScheduleItem::new("Backwards", today, today - chrono::Duration::days(1));
    assert!(matches!(
        dashboard.save_schedule_item("project-4", backwards),
        Err(DashboardError::Validation(_))
    ));

    let running = schedule_entries(dashboard.projects(), today, ScheduleFilter::Today);
    assert_eq!(running.len(), 1);
    assert_eq!(running[0].item.title, "Site survey");

    let all = schedule_entries(dashboard.projects(), today, ScheduleFilter::All);
    let stats = ScheduleStats::from_entries(&all, today);
    assert_eq!(all.len(), 3);
    assert_eq!(stats.today, 1);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.in_progress, 2);
    assert_eq!(stats.completed, 0);
}
