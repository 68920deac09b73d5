//! Read-only views computed over a list of projects.

pub mod alerts;
pub mod filter;
pub mod overview;
pub mod schedule;

pub use alerts::{
    is_alert_for_project, urgent_alerts, AlertKind, AlertStats, AlertStatus, Severity, UrgentAlert, UrgentFilter,
};
pub use filter::filter_projects;
pub use overview::{location_summary, FinancialOverview, LocationStat, StatusCount, StatusOverview};
pub use schedule::{schedule_entries, ScheduleEntry, ScheduleFilter, ScheduleStats};
