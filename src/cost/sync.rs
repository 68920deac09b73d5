use tracing::debug;

use crate::model::{CostHistory, Project, ProjectStatus};

/// Utilisation percentage at or above which a project needs attention.
pub const NEEDS_ATTENTION_RATIO: f64 = 95.0;

/// The entry with the latest date, or `None` for an empty history.
///
/// When several entries share the latest date the earliest inserted one wins.
pub fn latest_cost_history(history: &[CostHistory]) -> Option<&CostHistory> {
    // `max_by_key` yields the last of equal maxima, so walk backwards.
    history.iter().rev().max_by_key(|entry| entry.date)
}

/// Percentage of `budget` consumed by `actual_cost`.
///
/// Returns 0 when there is no positive budget. The result is not capped at 100.
pub fn calculate_cost_ratio(budget: f64, actual_cost: f64) -> f64 {
    if budget.is_nan() || budget <= 0.0 {
        return 0.0;
    }
    (actual_cost / budget) * 100.0
}

/// Derive a project status from its cost ratio. `Completed` is never overridden.
pub fn determine_project_status(cost_ratio: f64, current: ProjectStatus) -> ProjectStatus {
    if current == ProjectStatus::Completed {
        return current;
    }
    if cost_ratio >= NEEDS_ATTENTION_RATIO {
        ProjectStatus::InProgressNeedsAttention
    } else if cost_ratio > 0.0 {
        ProjectStatus::InProgress
    } else {
        ProjectStatus::Planned
    }
}

/// Return a copy of `project` whose budget, actual cost and status follow its
/// latest cost-history entry. Without history the copy is unchanged.
pub fn sync_project_with_cost_history(project: &Project) -> Project {
    let Some(latest) = latest_cost_history(&project.cost_history) else {
        return project.clone();
    };

    let ratio = calculate_cost_ratio(latest.budget, latest.actual_cost);
    let status = determine_project_status(ratio, project.status);
    debug!(
        project = %project.id,
        entry = %latest.id,
        ratio,
        from = ?project.status,
        to = ?status,
        "synced project with cost history"
    );

    Project {
        budget: latest.budget,
        actual_cost: latest.actual_cost,
        status,
        ..project.clone()
    }
}

/// Cost ratio of the latest history entry, 0 without history.
pub fn current_cost_ratio(project: &Project) -> f64 {
    latest_cost_history(&project.cost_history)
        .map(|latest| calculate_cost_ratio(latest.budget, latest.actual_cost))
        .unwrap_or(0.0)
}

/// `"95.0%"` style rendering of [`current_cost_ratio`], `"-"` when there is none.
pub fn current_cost_ratio_string(project: &Project) -> String {
    let ratio = current_cost_ratio(project);
    if ratio > 0.0 {
        format!("{:.1}%", ratio)
    } else {
        "-".to_string()
    }
}
