use crate::model::{Project, ProjectStatus};

/// Projects matching a free-text query and an optional exact status.
///
/// The query is trimmed and compared case-insensitively against the name,
/// project number, managers and location. An empty query matches everything.
pub fn filter_projects<'a>(
    projects: &'a [Project],
    query: &str,
    status: Option<ProjectStatus>,
) -> Vec<&'a Project> {
    let needle = query.trim().to_lowercase();
    projects
        .iter()
        .filter(|p| status.map_or(true, |s| p.status == s))
        .filter(|p| needle.is_empty() || matches_query(p, &needle))
        .collect()
}

fn matches_query(project: &Project, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);
    contains(&project.name)
        || contains(&project.pjt_no)
        || contains(&project.pm)
        || contains(&project.tech_manager)
        || project.sales_managers.iter().any(|m| contains(m))
        || contains(&project.location.country)
        || contains(&project.location.city)
}
