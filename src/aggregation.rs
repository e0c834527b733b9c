use crate::schema::{ProjectedLineItem, ReportConfig, YearlySummary};
use log::debug;
use std::collections::BTreeMap;

/// Per-category totals: category label -> year label -> summed amount.
/// Year labels cover every historical year plus the projected year.
pub type CategorySummary = BTreeMap<String, BTreeMap<String, f64>>;

/// Resolves an item's amount for a year label, where the projected-year
/// label maps to the derived projection.
fn amount_for_label(item: &ProjectedLineItem, label: &str, config: &ReportConfig) -> f64 {
    if label == config.projected_year_label {
        item.projected_value
    } else {
        item.value_for(label)
    }
}

/// All year labels a summary spans, historical first, projected last.
pub fn summary_year_labels(config: &ReportConfig) -> Vec<String> {
    let mut labels = config.historical_years.clone();
    labels.push(config.projected_year_label.clone());
    labels
}

/// Sums every line item into its category's per-year totals. Every item
/// contributes exactly once per year, regardless of classification, so the
/// grand total per year equals the raw input column sum after zero-filling.
pub fn build_category_summary(
    items: &[ProjectedLineItem],
    config: &ReportConfig,
) -> CategorySummary {
    let labels = summary_year_labels(config);
    let mut summary: CategorySummary = BTreeMap::new();

    for item in items {
        let totals = summary.entry(item.category.clone()).or_default();
        for label in &labels {
            *totals.entry(label.clone()).or_insert(0.0) += amount_for_label(item, label, config);
        }
    }

    debug!("Category summary covers {} categories", summary.len());
    summary
}

/// Builds the yearly revenue/expense/net-income table across the historical
/// years and the projected year.
///
/// Classification is total and exclusive: a classified item feeds either
/// revenue or expenses, never both, and an unclassified category feeds
/// neither. Profit margin is 0.0 when revenue is zero.
pub fn build_yearly_summary(
    items: &[ProjectedLineItem],
    config: &ReportConfig,
) -> Vec<YearlySummary> {
    summary_year_labels(config)
        .into_iter()
        .map(|label| {
            let mut revenue = 0.0;
            let mut expenses = 0.0;

            for item in items {
                let amount = amount_for_label(item, &label, config);
                if config.classification.is_revenue(&item.category) {
                    revenue += amount;
                } else if config.classification.is_expense(&item.category) {
                    expenses += amount;
                }
            }

            let net_income = revenue - expenses;
            let profit_margin = if revenue == 0.0 {
                0.0
            } else {
                net_income / revenue * 100.0
            };

            YearlySummary {
                year: label,
                revenue,
                expenses,
                net_income,
                profit_margin,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn item(category: &str, account: &str, values: &[(&str, f64)], projected: f64) -> ProjectedLineItem {
        let yearly_values: BTreeMap<String, f64> = values
            .iter()
            .map(|(year, value)| (year.to_string(), *value))
            .collect();
        ProjectedLineItem {
            category: category.to_string(),
            account: account.to_string(),
            yearly_values,
            projected_value: projected,
        }
    }

    fn fixture() -> (Vec<ProjectedLineItem>, ReportConfig) {
        let config = ReportConfig::default();
        let items = vec![
            item(
                "Income",
                "Produce Sales",
                &[("2022", 100.0), ("2023", 200.0), ("2024", 300.0), ("2025", 400.0)],
                500.0,
            ),
            item(
                "Income",
                "Market Stall",
                &[("2022", 10.0), ("2023", 20.0), ("2024", 30.0), ("2025", 40.0)],
                50.0,
            ),
            item(
                "Cost of Goods Sold",
                "Seed & Feed",
                &[("2022", 50.0), ("2023", 60.0), ("2024", 70.0), ("2025", 80.0)],
                90.0,
            ),
            // Unclassified: counted per category, excluded from totals.
            item(
                "Adjustments",
                "Rounding",
                &[("2022", 1.0), ("2023", 1.0), ("2024", 1.0), ("2025", 1.0)],
                1.0,
            ),
        ];
        (items, config)
    }

    #[test]
    fn test_category_summary_sums_within_category() {
        let (items, config) = fixture();
        let summary = build_category_summary(&items, &config);

        assert_eq!(summary["Income"]["2025"], 440.0);
        assert_eq!(summary["Income"]["2026 (Projected)"], 550.0);
        assert_eq!(summary["Cost of Goods Sold"]["2022"], 50.0);
        assert_eq!(summary["Adjustments"]["2023"], 1.0);
    }

    #[test]
    fn test_category_totals_conserve_raw_input() {
        let (items, config) = fixture();
        let summary = build_category_summary(&items, &config);

        for year in &config.historical_years {
            let from_categories: f64 = summary.values().map(|totals| totals[year]).sum();
            let from_items: f64 = items.iter().map(|i| i.value_for(year)).sum();
            assert!(
                (from_categories - from_items).abs() < 1e-9,
                "mismatch for {}",
                year
            );
        }
    }

    #[test]
    fn test_yearly_summary_identities() {
        let (items, config) = fixture();
        let summary = build_yearly_summary(&items, &config);

        assert_eq!(summary.len(), 5);
        assert_eq!(summary[0].year, "2022");
        assert_eq!(summary[4].year, "2026 (Projected)");

        for row in &summary {
            assert!((row.net_income - (row.revenue - row.expenses)).abs() < 1e-9);
        }

        // 2025: revenue 440, expenses 80; Adjustments excluded.
        assert_eq!(summary[3].revenue, 440.0);
        assert_eq!(summary[3].expenses, 80.0);
        assert_eq!(summary[3].net_income, 360.0);
    }

    #[test]
    fn test_projected_row_uses_projected_values() {
        let (items, config) = fixture();
        let summary = build_yearly_summary(&items, &config);

        let projected = &summary[4];
        assert_eq!(projected.revenue, 550.0);
        assert_eq!(projected.expenses, 90.0);
        assert_eq!(projected.net_income, 460.0);
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let config = ReportConfig::default();
        let items = vec![item(
            "Utilities",
            "Electricity",
            &[("2022", 10.0), ("2023", 10.0), ("2024", 10.0), ("2025", 10.0)],
            10.0,
        )];

        let summary = build_yearly_summary(&items, &config);
        for row in &summary {
            assert_eq!(row.revenue, 0.0);
            assert_eq!(row.profit_margin, 0.0);
            assert!(row.profit_margin.is_finite());
        }
    }

    #[test]
    fn test_summation_is_order_independent() {
        let (mut items, config) = fixture();
        let forward = build_yearly_summary(&items, &config);
        items.reverse();
        let reversed = build_yearly_summary(&items, &config);

        for (a, b) in forward.iter().zip(reversed.iter()) {
            assert!((a.revenue - b.revenue).abs() < 1e-9);
            assert!((a.expenses - b.expenses).abs() < 1e-9);
        }
    }
}
