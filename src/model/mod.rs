pub mod cost_history;
pub mod equipment;
pub mod notification;
pub mod portfolio;
pub mod project;
pub mod schedule;

pub use cost_history::CostHistory;
pub use equipment::{EquipmentHistoryEntry, EquipmentPart, RepairStatus};
pub use notification::{Notification, NotificationCategory, NotificationKind};
pub use portfolio::Portfolio;
pub use project::{Location, Project, ProjectStatus};
pub use schedule::{Person, ScheduleItem, ScheduleStatus};
