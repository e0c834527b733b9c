use crate::schema::{ReportConfig, YearlySummary};
use serde::{Deserialize, Serialize};

/// Headline figures for the projected year, derived from the yearly
/// summary table. All ratios are 0.0 when their denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub projected_revenue: f64,
    pub projected_net_income: f64,
    /// Projected net income over projected revenue, as a percentage.
    pub projected_margin: f64,
    /// Projected revenue vs the latest actual year, as a percentage.
    pub revenue_growth_pct: f64,
    pub latest_actual_revenue: f64,
}

pub fn derive_kpis(yearly_summary: &[YearlySummary], config: &ReportConfig) -> Kpis {
    let projected = yearly_summary
        .iter()
        .find(|row| row.year == config.projected_year_label);
    let latest_actual = config
        .latest_actual_year()
        .ok()
        .and_then(|year| yearly_summary.iter().find(|row| row.year == year));

    let projected_revenue = projected.map_or(0.0, |row| row.revenue);
    let projected_net_income = projected.map_or(0.0, |row| row.net_income);
    let latest_actual_revenue = latest_actual.map_or(0.0, |row| row.revenue);

    let projected_margin = if projected_revenue > 0.0 {
        projected_net_income / projected_revenue * 100.0
    } else {
        0.0
    };

    let revenue_growth_pct = if latest_actual_revenue != 0.0 {
        (projected_revenue - latest_actual_revenue) / latest_actual_revenue * 100.0
    } else {
        0.0
    };

    Kpis {
        projected_revenue,
        projected_net_income,
        projected_margin,
        revenue_growth_pct,
        latest_actual_revenue,
    }
}
