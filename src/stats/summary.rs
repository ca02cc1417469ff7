use crate::record::{COUNTY, MAKE, Record};
use crate::stats::types::ScalarStats;
use crate::stats::utility::{distinct_count, mean};

/// Computes the headline metrics over `records`.
///
/// Every record counts toward `total`. The average only sees records whose
/// `Electric Range` parses, and the distinct counts skip absent values.
pub fn summarize(records: &[Record]) -> ScalarStats {
    let ranges: Vec<f64> = records.iter().filter_map(Record::electric_range).collect();

    ScalarStats {
        total: records.len(),
        average_range: mean(&ranges),
        manufacturers: distinct_count(records.iter().filter_map(|r| r.get(MAKE))),
        counties: distinct_count(records.iter().filter_map(|r| r.get(COUNTY))),
    }
}
