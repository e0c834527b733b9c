use pnl_projection::{build_dashboard_data, LineItem, ReportConfig};
use std::collections::BTreeMap;

fn line_item(category: &str, account: &str, values: [f64; 4]) -> LineItem {
    let years = ["2022", "2023", "2024", "2025"];
    LineItem {
        category: category.to_string(),
        account: account.to_string(),
        yearly_values: years
            .iter()
            .zip(values.iter())
            .map(|(year, value)| (year.to_string(), *value))
            .collect::<BTreeMap<String, f64>>(),
    }
}

fn main() {
    let config = ReportConfig::default();

    let items = vec![
        line_item("Income", "Produce Sales", [52_000.0, 61_500.0, 70_200.0, 84_100.0]),
        line_item("Income", "Farmers Market Stall", [0.0, 4_000.0, 5_500.0, 7_000.0]),
        line_item("Other income", "Equipment Rental", [1_200.0, 1_500.0, 0.0, 1_800.0]),
        line_item("Cost of Goods Sold", "Seed & Feed", [21_000.0, 24_500.0, 27_800.0, 31_200.0]),
        line_item("Payroll expenses", "Field Wages", [12_000.0, 13_500.0, 15_000.0, 16_800.0]),
        line_item("Utilities", "Electricity", [2_400.0, 2_500.0, 2_650.0, 2_800.0]),
        line_item("Insurance", "Crop Insurance", [3_100.0, 3_100.0, 3_300.0, 3_400.0]),
    ];

    let dashboard = build_dashboard_data(&config, &items).expect("pipeline should run");

    println!(
        "{} — generated on {}",
        dashboard.organization_name, dashboard.generated_on
    );
    println!();

    println!(
        "{:<18} {:>12} {:>12} {:>12} {:>8}",
        "Year", "Revenue", "Expenses", "Net Income", "Margin"
    );
    for row in &dashboard.yearly_summary {
        println!(
            "{:<18} {:>12.0} {:>12.0} {:>12.0} {:>7.1}%",
            row.year, row.revenue, row.expenses, row.net_income, row.profit_margin
        );
    }
    println!();

    println!(
        "Projected revenue: ${:.0} ({:+.1}% vs latest actual)",
        dashboard.kpis.projected_revenue, dashboard.kpis.revenue_growth_pct
    );
    println!(
        "Projected net income: ${:.0} (margin {:.1}%)",
        dashboard.kpis.projected_net_income, dashboard.kpis.projected_margin
    );
    println!();

    println!("Top expense items (latest actual + projected):");
    for entry in &dashboard.top_expenses {
        println!(
            " - {} / {}: {:.0} actual, {:.0} projected",
            entry.category, entry.account, entry.latest_actual, entry.projected
        );
    }
}
