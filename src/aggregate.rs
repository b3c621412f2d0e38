use std::collections::HashMap;

use crate::data::{PaymentRecord, ProductRecord, SellerRecord, UNKNOWN_LABEL};

/// Seller count for one (state, city) group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityCount {
    pub city: String,
    pub state: String,
    pub count: u64,
}

/// Group sellers by (state, city) and sort descending by count.
///
/// Ties keep their first-seen order: the sort is stable and groups are
/// created in input order.
pub fn count_sellers_by_city(records: &[SellerRecord]) -> Vec<CityCount> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut counts: Vec<CityCount> = Vec::new();

    for record in records {
        let key = (record.state.clone(), record.city.clone());
        match index.get(&key) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(key, counts.len());
                counts.push(CityCount {
                    city: record.city.clone(),
                    state: record.state.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Count products per category, descending. Records without a category are
/// counted under [`UNKNOWN_LABEL`] rather than dropped.
pub fn count_categories(records: &[ProductRecord]) -> Vec<(String, u64)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();

    for record in records {
        let category = record.category.as_deref().unwrap_or(UNKNOWN_LABEL);
        match index.get(category) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(category.to_string(), counts.len());
                counts.push((category.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Sum payment values per payment type, descending by total.
pub fn sum_payments_by_type(records: &[PaymentRecord]) -> Vec<(String, f64)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<(String, f64)> = Vec::new();

    for record in records {
        match index.get(&record.payment_type) {
            Some(&i) => totals[i].1 += record.value,
            None => {
                index.insert(record.payment_type.clone(), totals.len());
                totals.push((record.payment_type.clone(), record.value));
            }
        }
    }

    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    totals
}

/// Transaction-value band over half-open intervals:
/// [0, 100) small, [100, 500) medium, [500, inf) large.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueBand {
    Small,
    Medium,
    Large,
}

impl ValueBand {
    pub const ALL: [ValueBand; 3] = [ValueBand::Small, ValueBand::Medium, ValueBand::Large];

    pub fn classify(value: f64) -> Self {
        if value >= 500.0 {
            ValueBand::Large
        } else if value >= 100.0 {
            ValueBand::Medium
        } else {
            ValueBand::Small
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ValueBand::Small => "Small Transaction",
            ValueBand::Medium => "Medium Transaction",
            ValueBand::Large => "Large Transaction",
        }
    }
}

/// Record count for one value band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandCount {
    pub band: ValueBand,
    pub count: u64,
}

/// Count payments per value band, in band order. Bands with no records are
/// omitted so percentage labels never divide a zero share.
pub fn bin_transaction_values(records: &[PaymentRecord]) -> Vec<BandCount> {
    let mut counts = [0u64; 3];
    for record in records {
        let slot = match ValueBand::classify(record.value) {
            ValueBand::Small => 0,
            ValueBand::Medium => 1,
            ValueBand::Large => 2,
        };
        counts[slot] += 1;
    }

    ValueBand::ALL
        .iter()
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .map(|(&band, count)| BandCount { band, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller(state: &str, city: &str) -> SellerRecord {
        SellerRecord {
            state: state.to_string(),
            city: city.to_string(),
        }
    }

    fn payment(payment_type: &str, value: f64) -> PaymentRecord {
        PaymentRecord {
            payment_type: payment_type.to_string(),
            value,
        }
    }

    #[test]
    fn test_city_counts_sorted_and_complete() {
        let records = vec![
            seller("SP", "campinas"),
            seller("RJ", "niteroi"),
            seller("SP", "campinas"),
            seller("SP", "campinas"),
        ];
        let counts = count_sellers_by_city(&records);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].city, "campinas");
        assert_eq!(counts[0].state, "SP");
        assert_eq!(counts[0].count, 3);
        assert_eq!(counts[1].city, "niteroi");
        // Sum of counts equals input record count
        let total: u64 = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, records.len() as u64);
        // Non-increasing counts
        assert!(counts.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_city_counts_tie_break_keeps_insertion_order() {
        let records = vec![
            seller("SP", "sao paulo"),
            seller("MG", "belo horizonte"),
            seller("MG", "belo horizonte"),
            seller("SP", "sao paulo"),
        ];
        let counts = count_sellers_by_city(&records);
        assert_eq!(counts[0].city, "sao paulo");
        assert_eq!(counts[1].city, "belo horizonte");
    }

    #[test]
    fn test_same_city_name_in_two_states_stays_separate() {
        let records = vec![
            seller("SP", "valinhos"),
            seller("RS", "valinhos"),
            seller("SP", "valinhos"),
        ];
        let counts = count_sellers_by_city(&records);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].state, "SP");
        assert_eq!(counts[0].count, 2);
    }

    #[test]
    fn test_category_counts_bucket_missing_as_unknown() {
        let records = vec![
            ProductRecord { category: Some("moveis".to_string()) },
            ProductRecord { category: None },
            ProductRecord { category: Some("moveis".to_string()) },
            ProductRecord { category: None },
            ProductRecord { category: None },
        ];
        let counts = count_categories(&records);
        assert_eq!(counts[0], (UNKNOWN_LABEL.to_string(), 3));
        assert_eq!(counts[1], ("moveis".to_string(), 2));
    }

    #[test]
    fn test_payment_totals_preserve_grand_total() {
        let records = vec![
            payment("credit_card", 120.0),
            payment("boleto", 80.0),
            payment("credit_card", 30.0),
            payment("voucher", 10.0),
        ];
        let totals = sum_payments_by_type(&records);
        assert_eq!(totals[0].0, "credit_card");
        assert!((totals[0].1 - 150.0).abs() < 1e-9);
        let grand: f64 = totals.iter().map(|(_, v)| v).sum();
        let expected: f64 = records.iter().map(|r| r.value).sum();
        assert!((grand - expected).abs() < 1e-9);
        assert!(totals.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_band_boundaries_are_half_open() {
        assert_eq!(ValueBand::classify(0.0), ValueBand::Small);
        assert_eq!(ValueBand::classify(99.99), ValueBand::Small);
        assert_eq!(ValueBand::classify(100.0), ValueBand::Medium);
        assert_eq!(ValueBand::classify(499.99), ValueBand::Medium);
        assert_eq!(ValueBand::classify(500.0), ValueBand::Large);
        assert_eq!(ValueBand::classify(12000.0), ValueBand::Large);
    }

    #[test]
    fn test_binning_counts_every_record_once() {
        let records = vec![
            payment("credit_card", 50.0),
            payment("credit_card", 100.0),
            payment("boleto", 500.0),
            payment("boleto", 499.0),
        ];
        let bands = bin_transaction_values(&records);
        let total: u64 = bands.iter().map(|b| b.count).sum();
        assert_eq!(total, records.len() as u64);
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[0].band, ValueBand::Small);
        assert_eq!(bands[1].count, 2); // 100.0 and 499.0
    }

    #[test]
    fn test_empty_bands_are_omitted() {
        let records = vec![payment("credit_card", 10.0), payment("boleto", 20.0)];
        let bands = bin_transaction_values(&records);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].band, ValueBand::Small);
        assert_eq!(bands[0].count, 2);
    }

    #[test]
    fn test_empty_input_yields_empty_aggregations() {
        assert!(count_sellers_by_city(&[]).is_empty());
        assert!(count_categories(&[]).is_empty());
        assert!(sum_payments_by_type(&[]).is_empty());
        assert!(bin_transaction_values(&[]).is_empty());
    }
}
