use std::str::FromStr;

use chrono::NaiveDate;

use crate::model::{Project, ScheduleItem, ScheduleStatus};

/// Which schedule items to show across the portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScheduleFilter {
    #[default]
    All,
    /// Running on the given day.
    Today,
    Overdue,
    /// Not started yet.
    Upcoming,
}

impl ScheduleFilter {
    pub fn matches(self, item: &ScheduleItem, today: NaiveDate) -> bool {
        match self {
            ScheduleFilter::All => true,
            ScheduleFilter::Today => is_running(item, today),
            ScheduleFilter::Overdue => item.is_overdue(today),
            ScheduleFilter::Upcoming => item.start_date > today,
        }
    }
}

impl FromStr for ScheduleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ScheduleFilter::All),
            "today" => Ok(ScheduleFilter::Today),
            "overdue" => Ok(ScheduleFilter::Overdue),
            "upcoming" => Ok(ScheduleFilter::Upcoming),
            other => Err(format!("unknown schedule filter '{}'", other)),
        }
    }
}

fn is_running(item: &ScheduleItem, today: NaiveDate) -> bool {
    item.start_date <= today && today <= item.end_date
}

/// A schedule item together with the project it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleEntry<'a> {
    pub project_id: &'a str,
    pub project_name: &'a str,
    pub item: &'a ScheduleItem,
}

/// Every schedule item across `projects` that passes `filter`, ordered by start date.
pub fn schedule_entries<'a>(
    projects: &'a [Project],
    today: NaiveDate,
    filter: ScheduleFilter,
) -> Vec<ScheduleEntry<'a>> {
    let mut entries: Vec<ScheduleEntry<'a>> = projects
        .iter()
        .flat_map(|project| {
            project.schedule_items.iter().map(move |item| ScheduleEntry {
                project_id: &project.id,
                project_name: &project.name,
                item,
            })
        })
        .filter(|entry| filter.matches(entry.item, today))
        .collect();
    entries.sort_by_key(|entry| entry.item.start_date);
    entries
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleStats {
    pub today: usize,
    pub overdue: usize,
    pub completed: usize,
    pub in_progress: usize,
}

impl ScheduleStats {
    pub fn from_entries(entries: &[ScheduleEntry<'_>], today: NaiveDate) -> Self {
        let count = |pred: fn(&ScheduleItem, NaiveDate) -> bool| {
            entries.iter().filter(|e| pred(e.item, today)).count()
        };
        Self {
            today: count(is_running),
            overdue: count(|i, day| i.is_overdue(day)),
            completed: count(|i, _| i.status == ScheduleStatus::Completed),
            in_progress: count(|i, _| i.status == ScheduleStatus::InProgress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn item(title: &str, start: u32, end: u32, status: ScheduleStatus) -> ScheduleItem {
        let mut i = ScheduleItem::new(title, date(start), date(end));
        i.status = status;
        i
    }

    fn sample() -> Vec<Project> {
        let mut a = Project::new("PJT-1", "Dryer", date(1), date(31));
        a.id = "a".into();
        a.schedule_items = vec![
            item("Survey", 1, 5, ScheduleStatus::Completed),
            item("Install", 3, 9, ScheduleStatus::InProgress),
            item("Commissioning", 20, 25, ScheduleStatus::Pending),
        ];
        let mut b = Project::new("PJT-2", "Boiler", date(1), date(31));
        b.id = "b".into();
        b.schedule_items = vec![item("Overhaul", 8, 15, ScheduleStatus::InProgress)];
        vec![a, b]
    }

    fn titles(entries: &[ScheduleEntry<'_>]) -> Vec<String> {
        entries.iter().map(|e| e.item.title.clone()).collect()
    }

    #[test]
    fn filters_by_day() {
        let projects = sample();
        let today = date(10);
        assert_eq!(
            titles(&schedule_entries(&projects, today, ScheduleFilter::All)),
            vec!["Survey", "Install", "Overhaul", "Commissioning"]
        );
        assert_eq!(
            titles(&schedule_entries(&projects, today, ScheduleFilter::Today)),
            vec!["Overhaul"]
        );
        assert_eq!(
            titles(&schedule_entries(&projects, today, ScheduleFilter::Overdue)),
            vec!["Install"]
        );
        assert_eq!(
            titles(&schedule_entries(&projects, today, ScheduleFilter::Upcoming)),
            vec!["Commissioning"]
        );
    }

    #[test]
    fn running_includes_both_boundary_days() {
        let projects = sample();
        let on_end = schedule_entries(&projects, date(15), ScheduleFilter::Today);
        assert_eq!(titles(&on_end), vec!["Overhaul"]);
        assert_eq!(on_end[0].project_id, "b");
        let on_start = schedule_entries(&projects, date(20), ScheduleFilter::Today);
        assert_eq!(titles(&on_start), vec!["Commissioning"]);
    }

    #[test]
    fn stats_count_the_filtered_entries() {
        let projects = sample();
        let today = date(10);
        let all = schedule_entries(&projects, today, ScheduleFilter::All);
        assert_eq!(
            ScheduleStats::from_entries(&all, today),
            ScheduleStats {
                today: 1,
                overdue: 1,
                completed: 1,
                in_progress: 2,
            }
        );
        let upcoming = schedule_entries(&projects, today, ScheduleFilter::Upcoming);
        assert_eq!(ScheduleStats::from_entries(&upcoming, today), ScheduleStats::default());
    }

    #[test]
    fn filter_parses_names() {
        assert_eq!("Overdue".parse::<ScheduleFilter>().unwrap(), ScheduleFilter::Overdue);
        assert!("soon".parse::<ScheduleFilter>().is_err());
    }
}
