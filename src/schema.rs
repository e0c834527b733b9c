use crate::error::{PnlError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the profit-and-loss table: a named account within a category,
/// with one amount per configured historical year.
///
/// Every year in `ReportConfig::historical_years` has an entry in
/// `yearly_values`; cells that were blank in the source are stored as 0.0.
/// A true zero and a missing cell are indistinguishable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub category: String,
    pub account: String,
    pub yearly_values: BTreeMap<String, f64>,
}

impl LineItem {
    pub fn value_for(&self, year: &str) -> f64 {
        self.yearly_values.get(year).copied().unwrap_or(0.0)
    }
}

/// A line item plus its derived next-year projection. Produced by the
/// projection stage as a new structure; the loaded `LineItem` is never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedLineItem {
    pub category: String,
    pub account: String,
    pub yearly_values: BTreeMap<String, f64>,
    pub projected_value: f64,
}

impl ProjectedLineItem {
    pub fn value_for(&self, year: &str) -> f64 {
        self.yearly_values.get(year).copied().unwrap_or(0.0)
    }
}

/// One row of the derived summary table, covering a single year
/// (historical or projected).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub year: String,
    pub revenue: f64,
    pub expenses: f64,
    pub net_income: f64,
    /// Net income as a percentage of revenue. Defined as 0.0 when revenue
    /// is zero rather than NaN, so serde consumers get a plain number.
    pub profit_margin: f64,
}

/// Fixed partition of category labels into revenue-contributing and
/// expense-contributing sets. A category in neither set still appears in
/// per-category breakdowns but is excluded from revenue/expense totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryClassification {
    #[schemars(description = "Category labels whose line items count toward revenue totals")]
    pub revenue_categories: Vec<String>,

    #[schemars(description = "Category labels whose line items count toward expense totals")]
    pub expense_categories: Vec<String>,
}

impl CategoryClassification {
    pub fn is_revenue(&self, category: &str) -> bool {
        self.revenue_categories.iter().any(|c| c == category)
    }

    pub fn is_expense(&self, category: &str) -> bool {
        self.expense_categories.iter().any(|c| c == category)
    }
}

/// Immutable configuration for one report run: column names, the ordered
/// historical year list, the projected-year label, and the category
/// classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportConfig {
    #[schemars(description = "Display name of the organization the report covers")]
    pub organization_name: String,

    #[schemars(description = "Header of the column holding the category label")]
    pub category_column: String,

    #[schemars(description = "Header of the column holding the distribution-account name")]
    pub account_column: String,

    #[schemars(
        description = "Historical year column headers, oldest first. Ordering is authoritative: the projection basis is the last three entries and the summary table follows this order."
    )]
    pub historical_years: Vec<String>,

    #[schemars(description = "Label used for the projected year in summaries, e.g. '2026 (Projected)'")]
    pub projected_year_label: String,

    #[schemars(description = "Partition of categories into revenue and expense sets")]
    pub classification: CategoryClassification,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            organization_name: "Farmer's Fresh LLC".to_string(),
            category_column: "category".to_string(),
            account_column: "Distribution account".to_string(),
            historical_years: vec![
                "2022".to_string(),
                "2023".to_string(),
                "2024".to_string(),
                "2025".to_string(),
            ],
            projected_year_label: "2026 (Projected)".to_string(),
            classification: CategoryClassification {
                revenue_categories: vec!["Income".to_string(), "Other income".to_string()],
                expense_categories: vec![
                    "Cost of Goods Sold".to_string(),
                    "Inventory Shrinkage".to_string(),
                    "Expenses".to_string(),
                    "Insurance".to_string(),
                    "Interest paid".to_string(),
                    "Legal & accounting services".to_string(),
                    "Meals".to_string(),
                    "Office expenses".to_string(),
                    "Payroll expenses".to_string(),
                    "Payroll Processing Fees".to_string(),
                    "Taxes paid".to_string(),
                    "Travel".to_string(),
                    "Utilities".to_string(),
                    "Other Expenses".to_string(),
                    "Vehicle expenses".to_string(),
                ],
            },
        }
    }
}

impl ReportConfig {
    /// The most recent historical year, used as the comparison point for
    /// growth KPIs and the breakdown aggregates.
    pub fn latest_actual_year(&self) -> Result<&str> {
        self.historical_years
            .last()
            .map(String::as_str)
            .ok_or(PnlError::EmptyYearList)
    }

    /// The last up-to-three historical years, oldest first. This is the
    /// basis window for the per-item projection.
    pub fn projection_basis_years(&self) -> &[String] {
        let n = self.historical_years.len();
        &self.historical_years[n.saturating_sub(3)..]
    }

    pub fn validate(&self) -> Result<()> {
        if self.historical_years.is_empty() {
            return Err(PnlError::EmptyYearList);
        }

        for (idx, year) in self.historical_years.iter().enumerate() {
            if self.historical_years[..idx].contains(year) {
                return Err(PnlError::InvalidConfig {
                    details: format!("Duplicate historical year '{}'", year),
                });
            }
        }

        if self.historical_years.contains(&self.projected_year_label) {
            return Err(PnlError::InvalidConfig {
                details: format!(
                    "Projected year label '{}' collides with a historical year",
                    self.projected_year_label
                ),
            });
        }

        for category in &self.classification.revenue_categories {
            if self.classification.is_expense(category) {
                return Err(PnlError::OverlappingClassification(category.clone()));
            }
        }

        Ok(())
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ReportConfig)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
