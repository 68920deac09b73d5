use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ops_dashboard::config::Settings;
use ops_dashboard::cost::{current_cost_ratio, current_cost_ratio_string, CostRatioBand};
use ops_dashboard::model::{ProjectStatus, ScheduleItem};
use ops_dashboard::numeric::{format_amount, parse_number_from_string};
use ops_dashboard::portfolio::{
    filter_projects, location_summary, schedule_entries, AlertStats, FinancialOverview,
    ScheduleFilter, ScheduleStats, StatusOverview, UrgentFilter,
};
use ops_dashboard::Dashboard;

#[derive(Parser)]
#[command(name = "ops-dashboard", about = "Track project status, cost history and maintenance")]
struct Cli {
    /// Portfolio file to use instead of the configured one
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a sample portfolio to the data file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Status, money and location overview
    Summary,
    /// List projects, optionally filtered
    List {
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long, short)]
        status: Option<ProjectStatus>,
    },
    /// Re-sync every project with its latest cost entry
    Sync,
    /// Record a budget/actual-cost snapshot for a project
    Record {
        /// Project id or project number
        project: String,
        date: NaiveDate,
        /// Budget, e.g. "120,000,000"
        budget: String,
        /// Cumulative actual cost
        actual_cost: String,
    },
    /// Show urgent budget and schedule alerts
    Alerts {
        #[arg(long, default_value = "all")]
        filter: UrgentFilter,
    },
    /// List schedule items across all projects
    Schedule {
        #[arg(long, default_value = "all")]
        filter: ScheduleFilter,
    },
    /// Add a schedule item to a project
    AddTask {
        /// Project id or project number
        project: String,
        title: String,
        start: NaiveDate,
        end: NaiveDate,
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Append cost history rows from a CSV file
    ImportCosts { project: String, csv: PathBuf },
    /// Write a project's cost history to a CSV file
    ExportCosts { project: String, csv: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default().with_env_overrides(), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = settings_error {
        warn!(error = %e, "ignoring settings file, using defaults");
    }

    let cli = Cli::parse();
    let data_file = cli.data.unwrap_or_else(|| settings.data_file.clone());
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Init { force } => {
            if data_file.exists() && !force {
                return Err(anyhow!(
                    "{} already exists (use --force to overwrite)",
                    data_file.display()
                ));
            }
            let mut dashboard = Dashboard::with_sample_data(today);
            dashboard.save_as(&data_file)?;
            println!("Wrote sample portfolio to {}", data_file.display());
        }
        Command::Summary => print_summary(&open(&data_file)?),
        Command::List { query, status } => {
            let dashboard = open(&data_file)?;
            let projects = filter_projects(dashboard.projects(), query.as_deref().unwrap_or(""), status);
            for p in &projects {
                println!(
                    "{:<14} {:<24} {:<18} {:>16} {:>8}",
                    p.pjt_no,
                    p.name,
                    p.status.label(),
                    format_amount(p.budget),
                    current_cost_ratio_string(p)
                );
            }
            println!("{} project(s)", projects.len());
        }
        Command::Sync => {
            let mut dashboard = open(&data_file)?;
            let changed = dashboard.resync_all();
            dashboard.save()?;
            println!("{}", dashboard.status_message);
            info!(changed, "resynced portfolio");
        }
        Command::Record {
            project,
            date,
            budget,
            actual_cost,
        } => {
            let mut dashboard = open(&data_file)?;
            let id = resolve_project(&dashboard, &project)?;
            let synced = dashboard.record_cost_entry(
                &id,
                date,
                parse_number_from_string(&budget),
                parse_number_from_string(&actual_cost),
            )?;
            println!(
                "{}: budget {} / actual {} ({}) -> {}",
                synced.name,
                format_amount(synced.budget),
                format_amount(synced.actual_cost),
                current_cost_ratio_string(synced),
                synced.status.label()
            );
            dashboard.save()?;
        }
        Command::Alerts { filter } => {
            let dashboard = open(&data_file)?;
            let alerts = dashboard.alerts(today, filter);
            for alert in &alerts {
                println!(
                    "[{:?}] {} - {}: {}",
                    alert.severity, alert.title, alert.project_name, alert.description
                );
            }
            let stats = AlertStats::from_alerts(&alerts);
            println!(
                "{} alert(s): {} critical, {} high, {} unresolved",
                stats.total, stats.critical, stats.high, stats.unresolved
            );
        }
        Command::Schedule { filter } => {
            let dashboard = open(&data_file)?;
            let entries = schedule_entries(dashboard.projects(), today, filter);
            for entry in &entries {
                println!(
                    "{} ~ {}  {:<20} {:<6} {:>3}%  {}",
                    entry.item.start_date,
                    entry.item.end_date,
                    entry.item.title,
                    entry.item.status.label(),
                    entry.item.progress,
                    entry.project_name
                );
            }
            let stats = ScheduleStats::from_entries(&entries, today);
            println!(
                "{} item(s): {} today, {} overdue, {} in progress, {} completed",
                entries.len(),
                stats.today,
                stats.overdue,
                stats.in_progress,
                stats.completed
            );
        }
        Command::AddTask {
            project,
            title,
            start,
            end,
            assignee,
        } => {
            let mut dashboard = open(&data_file)?;
            let id = resolve_project(&dashboard, &project)?;
            let mut item = ScheduleItem::new(title, start, end);
            item.assignee = assignee.unwrap_or_default();
            dashboard.save_schedule_item(&id, item)?;
            dashboard.save()?;
            println!("{}", dashboard.status_message);
        }
        Command::ImportCosts { project, csv } => {
            let mut dashboard = open(&data_file)?;
            let id = resolve_project(&dashboard, &project)?;
            dashboard.import_cost_history(&id, &csv)?;
            dashboard.save()?;
            println!("{}", dashboard.status_message);
        }
        Command::ExportCosts { project, csv } => {
            let mut dashboard = open(&data_file)?;
            let id = resolve_project(&dashboard, &project)?;
            dashboard.export_cost_history(&id, &csv, settings.csv_delimiter_byte()?)?;
            println!("{}", dashboard.status_message);
        }
    }

    Ok(())
}

fn open(data_file: &Path) -> anyhow::Result<Dashboard> {
    let mut dashboard = Dashboard::new();
    dashboard
        .load(data_file)
        .with_context(|| format!("failed to load {}", data_file.display()))?;
    info!(path = %data_file.display(), "portfolio ready");
    Ok(dashboard)
}

/// Accept either the internal id or the human-facing project number.
fn resolve_project(dashboard: &Dashboard, key: &str) -> anyhow::Result<String> {
    dashboard
        .projects()
        .iter()
        .find(|p| p.id == key || p.pjt_no.eq_ignore_ascii_case(key))
        .map(|p| p.id.clone())
        .ok_or_else(|| anyhow!("no project with id or number '{}'", key))
}

fn print_summary(dashboard: &Dashboard) {
    let projects = dashboard.projects();
    let overview = StatusOverview::from_projects(projects);
    println!("Projects: {}", overview.total);
    for c in &overview.counts {
        println!("  {:<18} {:>3} ({:>3}%)", c.status.label(), c.count, c.percentage);
    }
    println!("  Average progress: {}%", overview.average_progress);

    let money = FinancialOverview::from_projects(projects);
    println!(
        "Budget: {}  Actual: {}  Utilization: {}%",
        format_amount(money.total_budget),
        format_amount(money.total_actual_cost),
        money.budget_utilization
    );

    println!("Locations:");
    for loc in location_summary(projects, 4) {
        println!("  {:<12} total {:>2}  active {:>2}", loc.country, loc.total, loc.active);
    }

    println!("Cost ratios:");
    for p in projects {
        let ratio = current_cost_ratio(p);
        println!(
            "  {:<24} {:>8}  {:?}",
            p.name,
            current_cost_ratio_string(p),
            CostRatioBand::from_ratio(ratio)
        );
    }

    println!("Unread notifications: {}", dashboard.unread_count());
}
