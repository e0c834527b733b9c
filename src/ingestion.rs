use crate::error::{PnlError, Result};
use crate::schema::{LineItem, ReportConfig};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Loads line items from a CSV file with a header row.
///
/// Required columns are the configured category column, account column, and
/// one column per historical year; any of them missing is a fatal load
/// error. Blank or non-numeric amount cells become 0.0.
pub fn load_line_items<P: AsRef<Path>>(path: P, config: &ReportConfig) -> Result<Vec<LineItem>> {
    info!(
        "Loading line items from {}",
        path.as_ref().to_string_lossy()
    );
    let file = File::open(path)?;
    load_line_items_from_reader(file, config)
}

/// Loads line items from any CSV source with a header row. Row order is
/// preserved from the input.
pub fn load_line_items_from_reader<R: Read>(
    reader: R,
    config: &ReportConfig,
) -> Result<Vec<LineItem>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let category_idx = find_column(&headers, &config.category_column)?;
    let account_idx = find_column(&headers, &config.account_column)?;

    let mut year_indices = Vec::with_capacity(config.historical_years.len());
    for year in &config.historical_years {
        year_indices.push((year.clone(), find_column(&headers, year)?));
    }

    let mut items = Vec::new();
    for record in csv_reader.records() {
        let record = record?;

        let mut yearly_values = BTreeMap::new();
        for (year, idx) in &year_indices {
            let raw = record.get(*idx).unwrap_or("");
            yearly_values.insert(year.clone(), parse_amount(raw));
        }

        items.push(LineItem {
            category: record.get(category_idx).unwrap_or("").trim().to_string(),
            account: record.get(account_idx).unwrap_or("").trim().to_string(),
            yearly_values,
        });
    }

    debug!("Loaded {} line items", items.len());
    Ok(items)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| PnlError::MissingColumn {
            column: name.to_string(),
        })
}

/// Parses an amount cell the way a P&L export writes it: optional currency
/// symbol, thousands separators, and parentheses for negatives. Anything
/// blank or unparseable is 0.0; missing and zero are indistinguishable
/// downstream.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let (body, negated) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
        (&trimmed[1..trimmed.len() - 1], true)
    } else {
        (trimmed, false)
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if negated => -value,
        Ok(value) => value,
        Err(_) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
category,Distribution account,2022,2023,2024,2025
Income,Produce Sales,50000,60000,72000,86400
Income,Market Stall,,1000,2000,3000
Cost of Goods Sold,Seed & Feed,20000,22000,24200,26620
Utilities,Electricity,1200,1250,not a number,1350
Uncategorized,Misc,10,20,30,40
";

    #[test]
    fn test_load_preserves_row_order() {
        let config = ReportConfig::default();
        let items = load_line_items_from_reader(SAMPLE_CSV.as_bytes(), &config).unwrap();

        assert_eq!(items.len(), 5);
        assert_eq!(items[0].account, "Produce Sales");
        assert_eq!(items[1].account, "Market Stall");
        assert_eq!(items[4].category, "Uncategorized");
    }

    #[test]
    fn test_blank_and_unparseable_cells_become_zero() {
        let config = ReportConfig::default();
        let items = load_line_items_from_reader(SAMPLE_CSV.as_bytes(), &config).unwrap();

        assert_eq!(items[1].value_for("2022"), 0.0);
        assert_eq!(items[3].value_for("2024"), 0.0);
        assert_eq!(items[3].value_for("2025"), 1350.0);
    }

    #[test]
    fn test_missing_year_column_is_fatal() {
        let config = ReportConfig::default();
        let csv_without_2025 = "\
category,Distribution account,2022,2023,2024
Income,Sales,1,2,3
";
        let result = load_line_items_from_reader(csv_without_2025.as_bytes(), &config);
        match result {
            Err(PnlError::MissingColumn { column }) => assert_eq!(column, "2025"),
            other => panic!("Expected missing column error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_account_column_is_fatal() {
        let config = ReportConfig::default();
        let csv_without_account = "\
category,2022,2023,2024,2025
Income,1,2,3,4
";
        let result = load_line_items_from_reader(csv_without_account.as_bytes(), &config);
        assert!(matches!(result, Err(PnlError::MissingColumn { .. })));
    }

    #[test]
    fn test_parse_amount_formats() {
        assert_eq!(parse_amount("1234.5"), 1234.5);
        assert_eq!(parse_amount("$1,234.50"), 1234.5);
        assert_eq!(parse_amount("(250)"), -250.0);
        assert_eq!(parse_amount("($1,000)"), -1000.0);
        assert_eq!(parse_amount(" 42 "), 42.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("n/a"), 0.0);
    }

    #[test]
    fn test_headers_with_padding_still_match() {
        let config = ReportConfig::default();
        let padded = "\
category, Distribution account , 2022 ,2023,2024,2025
Income,Sales,1,2,3,4
";
        let items = load_line_items_from_reader(padded.as_bytes(), &config).unwrap();
        assert_eq!(items[0].value_for("2022"), 1.0);
    }
}
