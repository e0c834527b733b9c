use crate::aggregation::{build_category_summary, CategorySummary};
use crate::schema::{ProjectedLineItem, ReportConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One slice of a per-category breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: f64,
}

/// One bar of an account-level breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAmount {
    pub account: String,
    pub amount: f64,
}

/// One entry of the top-expenses ranking: an account within a category with
/// its latest actual amount and its projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub category: String,
    pub account: String,
    pub latest_actual: f64,
    pub projected: f64,
}

/// Expense totals per category for the given year, strictly-positive entries
/// only, largest first.
pub fn expense_breakdown(
    items: &[ProjectedLineItem],
    config: &ReportConfig,
    year: &str,
) -> Vec<CategorySlice> {
    let expense_items: Vec<ProjectedLineItem> = items
        .iter()
        .filter(|item| config.classification.is_expense(&item.category))
        .cloned()
        .collect();
    let summary: CategorySummary = build_category_summary(&expense_items, config);

    let mut slices: Vec<CategorySlice> = summary
        .into_iter()
        .filter_map(|(category, totals)| {
            let amount = totals.get(year).copied().unwrap_or(0.0);
            (amount > 0.0).then_some(CategorySlice { category, amount })
        })
        .collect();

    slices.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    slices
}

/// Revenue amounts per source row for the given year, strictly-positive
/// only, smallest first. Rows are not merged by account name; duplicate
/// accounts appear as separate entries, as in the source table.
pub fn revenue_by_account(
    items: &[ProjectedLineItem],
    config: &ReportConfig,
    year: &str,
) -> Vec<AccountAmount> {
    let mut amounts: Vec<AccountAmount> = items
        .iter()
        .filter(|item| config.classification.is_revenue(&item.category))
        .filter_map(|item| {
            let amount = if year == config.projected_year_label {
                item.projected_value
            } else {
                item.value_for(year)
            };
            (amount > 0.0).then(|| AccountAmount {
                account: item.account.clone(),
                amount,
            })
        })
        .collect();

    amounts.sort_by(|a, b| a.amount.total_cmp(&b.amount));
    amounts
}

/// The `limit` largest expense items, grouped by (category, account) and
/// ranked by latest-actual plus projected amount. Items with no
/// latest-actual amount are excluded so dormant historical accounts do not
/// crowd the ranking.
pub fn top_expense_items(
    items: &[ProjectedLineItem],
    config: &ReportConfig,
    limit: usize,
) -> Vec<ExpenseItem> {
    let latest_year = match config.latest_actual_year() {
        Ok(year) => year.to_string(),
        Err(_) => return Vec::new(),
    };

    let mut grouped: BTreeMap<(String, String), (f64, f64)> = BTreeMap::new();
    for item in items {
        if !config.classification.is_expense(&item.category) {
            continue;
        }
        let entry = grouped
            .entry((item.category.clone(), item.account.clone()))
            .or_insert((0.0, 0.0));
        entry.0 += item.value_for(&latest_year);
        entry.1 += item.projected_value;
    }

    let mut ranked: Vec<ExpenseItem> = grouped
        .into_iter()
        .filter(|(_, (latest_actual, _))| *latest_actual > 0.0)
        .map(|((category, account), (latest_actual, projected))| ExpenseItem {
            category,
            account,
            latest_actual,
            projected,
        })
        .collect();

    ranked.sort_by(|a, b| {
        (b.latest_actual + b.projected).total_cmp(&(a.latest_actual + a.projected))
    });
    ranked.truncate(limit);
    ranked
}
