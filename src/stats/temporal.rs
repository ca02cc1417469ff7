use std::collections::BTreeMap;

use crate::record::Record;
use crate::stats::types::YearBucket;

/// Earliest model year included in the year distribution.
pub const RECENCY_CUTOFF: i32 = 2010;

/// Registrations per model year from `min_year` onward, oldest first.
///
/// Records with an absent or non-integer year are skipped. Only years that
/// actually occur are returned; gaps are not filled with zeros.
pub fn year_distribution(records: &[Record], min_year: i32) -> Vec<YearBucket> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();

    for year in records.iter().filter_map(Record::model_year) {
        if year >= min_year {
            *counts.entry(year).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(year, count)| YearBucket {
            year: format!("{year:04}"),
            count,
        })
        .collect()
}

/// Registrations per model year since [`RECENCY_CUTOFF`].
pub fn model_year_distribution(records: &[Record]) -> Vec<YearBucket> {
    year_distribution(records, RECENCY_CUTOFF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MODEL_YEAR;

    fn years(values: &[Option<&str>]) -> Vec<Record> {
        values
            .iter()
            .map(|&y| [(MODEL_YEAR, y)].into_iter().collect())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(model_year_distribution(&[]).is_empty());
    }

    #[test]
    fn test_sorted_ascending_and_sparse() {
        let records = years(&[
            Some("2022"),
            Some("2015"),
            Some("2022"),
            Some("2011"),
            Some("2015"),
            Some("2022"),
        ]);

        let buckets = model_year_distribution(&records);

        assert_eq!(
            buckets,
            vec![
                YearBucket { year: "2011".into(), count: 1 },
                YearBucket { year: "2015".into(), count: 2 },
                YearBucket { year: "2022".into(), count: 3 },
            ]
        );
    }

    #[test]
    fn test_years_before_cutoff_are_dropped() {
        let records = years(&[Some("1999"), Some("2009"), Some("2010"), Some("2024")]);

        let buckets = model_year_distribution(&records);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].year, "2010");
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_unparseable_years_are_skipped() {
        let records = years(&[None, Some(""), Some("new"), Some("2020"), Some(" 2020 ")]);

        let buckets = model_year_distribution(&records);

        assert_eq!(buckets, vec![YearBucket { year: "2020".into(), count: 2 }]);
    }
}
