use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Notification, Project};

/// The persisted set of projects and notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: String,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            name: "Untitled Portfolio".to_string(),
            projects: Vec::new(),
            notifications: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Portfolio {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}
