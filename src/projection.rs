use crate::schema::{LineItem, ProjectedLineItem, ReportConfig};

/// Projects a next-year value from up to three historical values,
/// oldest first.
///
/// Zeros are treated as "not present": the loader already converted missing
/// cells to zero, so a true zero and an absent value cannot be told apart
/// here. With two or more non-zero values, the period-over-period growth
/// rates are averaged and applied to the most recent non-zero value; the
/// result is floored at zero. With exactly one non-zero value, the
/// projection is that value (mean of one). With none, it is zero.
pub fn project_next_year(values: &[f64]) -> f64 {
    let non_zero: Vec<f64> = values.iter().copied().filter(|v| *v != 0.0).collect();

    if non_zero.len() >= 2 {
        let growth_rates: Vec<f64> = non_zero
            .windows(2)
            .filter(|pair| pair[0] != 0.0)
            .map(|pair| (pair[1] - pair[0]) / pair[0].abs())
            .collect();

        if !growth_rates.is_empty() {
            let avg_growth = growth_rates.iter().sum::<f64>() / growth_rates.len() as f64;
            let last_value = non_zero[non_zero.len() - 1];
            return (last_value * (1.0 + avg_growth)).max(0.0);
        }
    }

    if non_zero.is_empty() {
        0.0
    } else {
        non_zero.iter().sum::<f64>() / non_zero.len() as f64
    }
}

/// Runs the projection over every line item, reading the basis window
/// (the last up-to-three configured historical years) and returning new
/// structures with the derived value attached. Source order is preserved.
pub fn project_line_items(items: &[LineItem], config: &ReportConfig) -> Vec<ProjectedLineItem> {
    let basis_years = config.projection_basis_years();

    items
        .iter()
        .map(|item| {
            let basis: Vec<f64> = basis_years.iter().map(|year| item.value_for(year)).collect();

            ProjectedLineItem {
                category: item.category.clone(),
                account: item.account.clone(),
                yearly_values: item.yearly_values.clone(),
                projected_value: project_next_year(&basis),
            }
        })
        .collect()
}
