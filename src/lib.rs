//! # P&L Projection
//!
//! A library for turning a small table of yearly profit-and-loss line items
//! into the derived data a financial dashboard renders: a projected next
//! year per line item, revenue/expense/net-income summaries, headline KPIs,
//! and per-category breakdowns.
//!
//! ## Core Concepts
//!
//! - **Line Item**: one input row, a named account within a category, with
//!   one amount per historical year. Blank cells are zero-filled at load.
//! - **Projection**: a growth-trend heuristic extrapolating the next year
//!   from the last three historical values. Not a statistical forecast.
//! - **Classification**: a fixed partition of categories into revenue and
//!   expense sets; categories in neither set stay out of the totals.
//! - **Yearly Summary**: revenue, expenses, net income and profit margin per
//!   year, historical years plus the projected year.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pnl_projection::{load_dashboard_data, ReportConfig};
//!
//! let config = ReportConfig::default();
//! let dashboard = load_dashboard_data(&config, "profit_and_loss.csv")?;
//!
//! for row in &dashboard.yearly_summary {
//!     println!("{}: net income {:.2}", row.year, row.net_income);
//! }
//! println!("Projected revenue: {:.0}", dashboard.kpis.projected_revenue);
//! ```

pub mod aggregation;
pub mod breakdown;
pub mod error;
pub mod ingestion;
pub mod kpis;
pub mod projection;
pub mod schema;

pub use aggregation::{build_category_summary, build_yearly_summary, CategorySummary};
pub use breakdown::{
    expense_breakdown, revenue_by_account, top_expense_items, AccountAmount, CategorySlice,
    ExpenseItem,
};
pub use error::{PnlError, Result};
pub use ingestion::{load_line_items, load_line_items_from_reader};
pub use kpis::{derive_kpis, Kpis};
pub use projection::{project_line_items, project_next_year};
pub use schema::{
    CategoryClassification, LineItem, ProjectedLineItem, ReportConfig, YearlySummary,
};

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How many expense items the top-expenses ranking keeps by default.
pub const DEFAULT_TOP_EXPENSES: usize = 10;

/// Everything the presentation layer reads: the summary table, category
/// aggregates, headline KPIs and chart-feeding breakdowns. Recomputed from
/// scratch on every build; there is no incremental update path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub organization_name: String,
    pub generated_on: NaiveDate,
    pub yearly_summary: Vec<YearlySummary>,
    pub category_summary: CategorySummary,
    pub kpis: Kpis,
    /// Expense totals per category for the latest actual year, largest first.
    pub expense_breakdown: Vec<CategorySlice>,
    /// Revenue per source row for the latest actual year, smallest first.
    pub revenue_by_source: Vec<AccountAmount>,
    /// Largest expense items ranked by latest-actual plus projected amount.
    pub top_expenses: Vec<ExpenseItem>,
}

pub struct DashboardBuilder;

impl DashboardBuilder {
    /// Runs the full batch pipeline over already-loaded line items:
    /// validate config, project, aggregate, derive KPIs and breakdowns.
    pub fn build(config: &ReportConfig, items: &[LineItem]) -> Result<DashboardData> {
        config.validate()?;

        info!(
            "Building dashboard data for organization: {}",
            config.organization_name
        );
        debug!(
            "{} line items across {} historical years",
            items.len(),
            config.historical_years.len()
        );

        let projected_items = project_line_items(items, config);
        let yearly_summary = build_yearly_summary(&projected_items, config);
        let category_summary = build_category_summary(&projected_items, config);
        let kpis = derive_kpis(&yearly_summary, config);

        let latest_year = config.latest_actual_year()?.to_string();
        let expense_breakdown = expense_breakdown(&projected_items, config, &latest_year);
        let revenue_by_source = revenue_by_account(&projected_items, config, &latest_year);
        let top_expenses = top_expense_items(&projected_items, config, DEFAULT_TOP_EXPENSES);

        debug!(
            "Summary spans {} years, {} categories",
            yearly_summary.len(),
            category_summary.len()
        );

        Ok(DashboardData {
            organization_name: config.organization_name.clone(),
            generated_on: chrono::Local::now().date_naive(),
            yearly_summary,
            category_summary,
            kpis,
            expense_breakdown,
            revenue_by_source,
            top_expenses,
        })
    }

    /// Loads line items from a CSV file and runs the pipeline.
    pub fn load_and_build<P: AsRef<Path>>(
        config: &ReportConfig,
        path: P,
    ) -> Result<DashboardData> {
        config.validate()?;
        let items = load_line_items(path, config)?;
        Self::build(config, &items)
    }
}

pub fn build_dashboard_data(config: &ReportConfig, items: &[LineItem]) -> Result<DashboardData> {
    DashboardBuilder::build(config, items)
}

pub fn load_dashboard_data<P: AsRef<Path>>(
    config: &ReportConfig,
    path: P,
) -> Result<DashboardData> {
    DashboardBuilder::load_and_build(config, path)
}
