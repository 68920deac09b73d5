/// Severity bucket for a cost ratio, used to colour badges and map markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostRatioBand {
    /// Above 100%.
    OverBudget,
    /// 95% up to 100%.
    Critical,
    /// 80% up to 95%.
    Warning,
    /// 70% up to 80%.
    Caution,
    Healthy,
}

impl CostRatioBand {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 100.0 {
            CostRatioBand::OverBudget
        } else if ratio >= 95.0 {
            CostRatioBand::Critical
        } else if ratio >= 80.0 {
            CostRatioBand::Warning
        } else if ratio >= 70.0 {
            CostRatioBand::Caution
        } else {
            CostRatioBand::Healthy
        }
    }

    /// Text colour class token.
    pub fn css_class(self) -> &'static str {
        match self {
            CostRatioBand::OverBudget => "text-red-600",
            CostRatioBand::Critical => "text-red-500",
            CostRatioBand::Warning => "text-orange-500",
            CostRatioBand::Caution => "text-yellow-600",
            CostRatioBand::Healthy => "text-green-600",
        }
    }

    /// Background colour for map markers.
    pub fn hex_color(self) -> &'static str {
        match self {
            CostRatioBand::OverBudget => "#DC2626",
            CostRatioBand::Critical => "#EF4444",
            CostRatioBand::Warning => "#F97316",
            CostRatioBand::Caution => "#EAB308",
            CostRatioBand::Healthy => "#16A34A",
        }
    }
}

pub fn cost_ratio_color_class(ratio: f64) -> &'static str {
    CostRatioBand::from_ratio(ratio).css_class()
}

pub fn cost_ratio_color(ratio: f64) -> &'static str {
    CostRatioBand::from_ratio(ratio).hex_color()
}
