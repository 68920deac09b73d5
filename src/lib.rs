//! Operations dashboard core: projects, cost history, equipment maintenance
//! and the rules that keep a project's status in step with its spending.

pub mod config;
pub mod cost;
pub mod dashboard;
pub mod error;
pub mod io;
pub mod model;
pub mod numeric;
pub mod portfolio;

pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
