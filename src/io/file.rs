use std::path::Path;

use tracing::info;

use crate::cost::sync_project_with_cost_history;
use crate::error::Result;
use crate::model::Portfolio;

/// Save a portfolio to a JSON file, creating parent directories as needed.
pub fn save_portfolio(portfolio: &Portfolio, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(portfolio)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), projects = portfolio.projects.len(), "saved portfolio");
    Ok(())
}

/// Load a portfolio from a JSON file. Every project is re-synced with its cost
/// history so hand-edited files cannot carry stale figures.
pub fn load_portfolio(path: &Path) -> Result<Portfolio> {
    let json = std::fs::read_to_string(path)?;
    let mut portfolio: Portfolio = serde_json::from_str(&json)?;
    portfolio.projects = portfolio
        .projects
        .iter()
        .map(sync_project_with_cost_history)
        .collect();
    info!(path = %path.display(), projects = portfolio.projects.len(), "loaded portfolio");
    Ok(portfolio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CostHistory, Project, ProjectStatus};
    use chrono::NaiveDate;

    #[test]
    fn save_then_load_resyncs_projects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("portfolio.json");

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut project = Project::new("PJT-1", "Dryer retrofit", start, start);
        project.cost_history = vec![CostHistory::new(start, 100.0, 97.0)];
        // Stale cached figures, as a hand edit would leave them.
        project.budget = 1.0;
        let mut portfolio = Portfolio::new("Ops");
        portfolio.projects.push(project);

        save_portfolio(&portfolio, &path).unwrap();
        let loaded = load_portfolio(&path).unwrap();
        assert_eq!(loaded.name, "Ops");
        assert_eq!(loaded.projects[0].budget, 100.0);
        assert_eq!(
            loaded.projects[0].status,
            ProjectStatus::InProgressNeedsAttention
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_portfolio(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::error::DashboardError::Io { .. }));
    }
}
