use anyhow::{anyhow, Result};

/// A fully materialized table of string fields with named columns.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Look up a column by name, ignoring case, surrounding whitespace and a
    /// UTF-8 BOM on the first header (common in Excel exports).
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| {
                h.trim()
                    .trim_start_matches('\u{feff}')
                    .eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| anyhow!("Column '{}' not found", name))
    }
}

#[derive(Debug, Clone)]
pub struct SellerRecord {
    pub state: String,
    pub city: String,
}

#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub category: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub payment_type: String,
    pub value: f64,
}

/// Missing categorical values are bucketed under this label instead of being
/// dropped, so the category and payment charts account for every row.
pub const UNKNOWN_LABEL: &str = "unknown";

fn field(row: &[String], idx: usize) -> Option<&str> {
    row.get(idx).map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Extract seller records from a sellers table.
///
/// Rows with an empty city or state carry no usable location and are skipped;
/// the second tuple element reports how many were.
pub fn seller_records(table: &Table) -> Result<(Vec<SellerRecord>, usize)> {
    let city_idx = table.column_index("seller_city")?;
    let state_idx = table.column_index("seller_state")?;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut skipped = 0;
    for row in &table.rows {
        match (field(row, city_idx), field(row, state_idx)) {
            (Some(city), Some(state)) => records.push(SellerRecord {
                state: state.to_string(),
                city: city.to_string(),
            }),
            _ => skipped += 1,
        }
    }
    Ok((records, skipped))
}

/// Extract product records from a products table.
///
/// An empty category is a valid observation (`None`), not a malformed row, so
/// nothing is ever skipped here.
pub fn product_records(table: &Table) -> Result<(Vec<ProductRecord>, usize)> {
    let cat_idx = table.column_index("product_category_name")?;

    let records = table
        .rows
        .iter()
        .map(|row| ProductRecord {
            category: field(row, cat_idx).map(str::to_string),
        })
        .collect();
    Ok((records, 0))
}

/// Extract payment records from a payments table.
///
/// Rows whose value is missing or not a finite number are skipped and counted.
/// An empty payment type is bucketed as [`UNKNOWN_LABEL`].
pub fn payment_records(table: &Table) -> Result<(Vec<PaymentRecord>, usize)> {
    let type_idx = table.column_index("payment_type")?;
    let value_idx = table.column_index("payment_value")?;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut skipped = 0;
    for row in &table.rows {
        let value = field(row, value_idx).and_then(|s| s.parse::<f64>().ok());
        match value {
            Some(v) if v.is_finite() => records.push(PaymentRecord {
                payment_type: field(row, type_idx).unwrap_or(UNKNOWN_LABEL).to_string(),
                value: v,
            }),
            _ => skipped += 1,
        }
    }
    Ok((records, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_column_lookup_ignores_case_and_bom() {
        let t = table(&["\u{feff}Seller_City", "seller_state"], &[]);
        assert_eq!(t.column_index("seller_city").unwrap(), 0);
        assert_eq!(t.column_index("SELLER_STATE").unwrap(), 1);
        assert!(t.column_index("payment_type").is_err());
    }

    #[test]
    fn test_seller_records_skip_missing_fields() {
        let t = table(
            &["seller_id", "seller_city", "seller_state"],
            &[
                &["1", "campinas", "SP"],
                &["2", "", "SP"],
                &["3", "niteroi", "RJ"],
            ],
        );
        let (records, skipped) = seller_records(&t).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(skipped, 1);
        assert_eq!(records[0].city, "campinas");
        assert_eq!(records[1].state, "RJ");
    }

    #[test]
    fn test_product_records_keep_empty_category() {
        let t = table(
            &["product_id", "product_category_name"],
            &[&["a", "beleza_saude"], &["b", ""]],
        );
        let (records, skipped) = product_records(&t).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(records[0].category.as_deref(), Some("beleza_saude"));
        assert_eq!(records[1].category, None);
    }

    #[test]
    fn test_payment_records_skip_bad_values() {
        let t = table(
            &["order_id", "payment_type", "payment_value"],
            &[
                &["o1", "credit_card", "99.9"],
                &["o2", "boleto", "abc"],
                &["o3", "", "10.0"],
                &["o4", "voucher", ""],
            ],
        );
        let (records, skipped) = payment_records(&t).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(skipped, 2);
        assert_eq!(records[0].payment_type, "credit_card");
        assert_eq!(records[1].payment_type, UNKNOWN_LABEL);
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let t = table(&["payment_type"], &[&["credit_card"]]);
        assert!(payment_records(&t).is_err());
    }
}
