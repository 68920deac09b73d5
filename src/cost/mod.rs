//! Cost-history driven derivations: latest entry, cost ratio, status and
//! the presentation band a ratio falls into.

pub mod band;
pub mod sync;

pub use band::{cost_ratio_color, cost_ratio_color_class, CostRatioBand};
pub use sync::{
    calculate_cost_ratio, current_cost_ratio, current_cost_ratio_string,
    determine_project_status, latest_cost_history, sync_project_with_cost_history,
    NEEDS_ATTENTION_RATIO,
};
