use crate::record::Record;
use crate::stats::types::RangeBucket;

/// Labels of the range bands, in display order.
pub const RANGE_LABELS: [&str; 8] = [
    "0-50", "51-100", "101-150", "151-200", "201-250", "251-300", "301-350", "351+",
];

/// Inclusive upper edge of every band except the open-ended last one.
const UPPER_EDGES: [f64; 7] = [50.0, 100.0, 150.0, 200.0, 250.0, 300.0, 350.0];

/// Index of the band containing `miles`.
fn band_index(miles: f64) -> usize {
    UPPER_EDGES
        .iter()
        .position(|&upper| miles <= upper)
        .unwrap_or(UPPER_EDGES.len())
}

/// Histogram of electric range over eight fixed bands.
///
/// All bands are always present, in order. Records whose range does not
/// parse are not counted anywhere.
pub fn range_distribution(records: &[Record]) -> [RangeBucket; 8] {
    let mut counts = [0usize; 8];

    for miles in records.iter().filter_map(Record::electric_range) {
        counts[band_index(miles)] += 1;
    }

    std::array::from_fn(|i| RangeBucket {
        label: RANGE_LABELS[i],
        count: counts[i],
    })
}
