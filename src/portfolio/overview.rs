use std::collections::HashMap;

use crate::cost::calculate_cost_ratio;
use crate::model::{Project, ProjectStatus};

/// Country bucket for projects without one.
pub const UNKNOWN_COUNTRY: &str = "기타";

#[derive(Debug, Clone, PartialEq)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub count: usize,
    /// Share of all projects, rounded to a whole percent.
    pub percentage: u32,
}

/// Per-status project counts plus the average completion.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusOverview {
    pub total: usize,
    /// One entry per status, in declaration order.
    pub counts: Vec<StatusCount>,
    pub average_progress: u32,
}

impl StatusOverview {
    pub fn from_projects(projects: &[Project]) -> Self {
        let total = projects.len();
        let counts = ProjectStatus::ALL
            .iter()
            .map(|&status| {
                let count = projects.iter().filter(|p| p.status == status).count();
                StatusCount {
                    status,
                    count,
                    percentage: rounded_share(count, total),
                }
            })
            .collect();
        let average_progress = if total == 0 {
            0
        } else {
            let sum: u32 = projects.iter().map(|p| u32::from(p.progress)).sum();
            (f64::from(sum) / total as f64).round() as u32
        };
        Self {
            total,
            counts,
            average_progress,
        }
    }

    pub fn count(&self, status: ProjectStatus) -> usize {
        self.counts
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

fn rounded_share(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Portfolio-wide money figures.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialOverview {
    pub total: usize,
    pub in_progress: usize,
    pub needs_attention: usize,
    pub completed: usize,
    pub total_budget: f64,
    pub total_actual_cost: f64,
    /// Actual cost over budget across all projects, rounded to a whole percent.
    pub budget_utilization: u32,
}

impl FinancialOverview {
    pub fn from_projects(projects: &[Project]) -> Self {
        let count = |status: ProjectStatus| projects.iter().filter(|p| p.status == status).count();
        let total_budget: f64 = projects.iter().map(|p| p.budget).sum();
        let total_actual_cost: f64 = projects.iter().map(|p| p.actual_cost).sum();
        let utilization = calculate_cost_ratio(total_budget, total_actual_cost).round();
        Self {
            total: projects.len(),
            in_progress: count(ProjectStatus::InProgress),
            needs_attention: count(ProjectStatus::InProgressNeedsAttention),
            completed: count(ProjectStatus::Completed),
            total_budget,
            total_actual_cost,
            budget_utilization: utilization.max(0.0) as u32,
        }
    }
}

/// Project counts and budget for one country.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationStat {
    pub country: String,
    pub total: usize,
    /// Projects currently in progress, flagged or not.
    pub active: usize,
    pub budget: f64,
}

/// Countries ranked by project count (ties by name), at most `limit` of them.
pub fn location_summary(projects: &[Project], limit: usize) -> Vec<LocationStat> {
    let mut by_country: HashMap<&str, LocationStat> = HashMap::new();
    for project in projects {
        let country = match project.location.country.trim() {
            "" => UNKNOWN_COUNTRY,
            c => c,
        };
        let stat = by_country.entry(country).or_insert_with(|| LocationStat {
            country: country.to_string(),
            total: 0,
            active: 0,
            budget: 0.0,
        });
        stat.total += 1;
        if project.status.is_active() {
            stat.active += 1;
        }
        stat.budget += project.budget;
    }

    let mut stats: Vec<LocationStat> = by_country.into_values().collect();
    stats.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.country.cmp(&b.country)));
    stats.truncate(limit);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn project(status: ProjectStatus, country: &str, budget: f64, actual: f64, progress: u8) -> Project {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut p = Project::new("PJT", "p", start, start);
        p.status = status;
        p.location.country = country.to_string();
        p.budget = budget;
        p.actual_cost = actual;
        p.progress = progress;
        p
    }

    fn sample() -> Vec<Project> {
        vec![
            project(ProjectStatus::InProgress, "Korea", 100.0, 50.0, 40),
            project(ProjectStatus::InProgressNeedsAttention, "Korea", 200.0, 196.0, 70),
            project(ProjectStatus::Completed, "Vietnam", 300.0, 280.0, 100),
            project(ProjectStatus::Planned, "", 0.0, 0.0, 0),
        ]
    }

    #[test]
    fn status_overview_counts_every_status() {
        let overview = StatusOverview::from_projects(&sample());
        assert_eq!(overview.total, 4);
        assert_eq!(overview.counts.len(), 5);
        assert_eq!(overview.count(ProjectStatus::InProgress), 1);
        assert_eq!(overview.count(ProjectStatus::Suspended), 0);
        assert_eq!(overview.counts[0].percentage, 25);
        assert_eq!(overview.average_progress, 53);
    }

    #[test]
    fn empty_overview_is_all_zero() {
        let overview = StatusOverview::from_projects(&[]);
        assert_eq!(overview.total, 0);
        assert!(overview.counts.iter().all(|c| c.count == 0 && c.percentage == 0));
        assert_eq!(overview.average_progress, 0);
        let money = FinancialOverview::from_projects(&[]);
        assert_eq!(money.budget_utilization, 0);
    }

    #[test]
    fn financial_overview_sums_and_rounds() {
        let money = FinancialOverview::from_projects(&sample());
        assert_eq!(money.total_budget, 600.0);
        assert_eq!(money.total_actual_cost, 526.0);
        assert_eq!(money.budget_utilization, 88);
        assert_eq!(money.needs_attention, 1);
        assert_eq!(money.completed, 1);
    }

    #[test]
    fn locations_rank_by_count_and_bucket_unknown() {
        let stats = location_summary(&sample(), 4);
        assert_eq!(stats[0].country, "Korea");
        assert_eq!(stats[0].total, 2);
        assert_eq!(stats[0].active, 2);
        assert_eq!(stats[0].budget, 300.0);
        let names: Vec<_> = stats.iter().map(|s| s.country.as_str()).collect();
        assert_eq!(names, vec!["Korea", "Vietnam", UNKNOWN_COUNTRY]);
        assert_eq!(location_summary(&sample(), 1).len(), 1);
    }
}
