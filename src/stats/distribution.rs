use crate::record::{MAKE, Record};
use crate::stats::types::CategoryBucket;
use crate::stats::utility::counts_in_order;

/// Label of the bucket that absorbs the long tail.
pub const OTHERS_LABEL: &str = "Others";

/// Maximum number of manufacturer buckets shown before collapsing.
pub const MAX_MANUFACTURER_BUCKETS: usize = 8;

/// Frequency distribution of `field`, most frequent first.
///
/// Absent values are not counted. Equal counts keep first-seen order. When
/// there are more than `max_buckets` distinct values, the first
/// `max_buckets - 1` are kept and the rest are summed into a trailing
/// [`OTHERS_LABEL`] bucket.
pub fn categorical_distribution(
    records: &[Record],
    field: &str,
    max_buckets: usize,
) -> Vec<CategoryBucket> {
    let mut counts = counts_in_order(records.iter().filter_map(|r| r.get(field)));
    // stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let collapse = max_buckets > 0 && counts.len() > max_buckets;
    let keep = if collapse { max_buckets - 1 } else { counts.len() };

    let mut buckets: Vec<CategoryBucket> = counts[..keep]
        .iter()
        .map(|&(label, count)| CategoryBucket {
            label: label.to_string(),
            count,
            is_other: false,
        })
        .collect();

    if collapse {
        buckets.push(CategoryBucket {
            label: OTHERS_LABEL.to_string(),
            count: counts[keep..].iter().map(|&(_, c)| c).sum(),
            is_other: true,
        });
    }

    buckets
}

/// Distribution of registrations by `Make`, capped at eight buckets.
pub fn manufacturer_distribution(records: &[Record]) -> Vec<CategoryBucket> {
    categorical_distribution(records, MAKE, MAX_MANUFACTURER_BUCKETS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn makes(entries: &[(&str, usize)]) -> Vec<Record> {
        entries.iter()
            .flat_map(|&(make, n)| std::iter::repeat_n(make, n))
            .map(|make| [(MAKE, Some(make))].into_iter().collect())
            .collect()
    }

    fn labels(buckets: &[CategoryBucket]) -> Vec<&str> {
        buckets.iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(manufacturer_distribution(&[]).is_empty());
    }

    #[test]
    fn test_sorted_descending_without_collapse() {
        let records = makes(&[("NISSAN", 2), ("TESLA", 5), ("KIA", 3)]);

        let buckets = manufacturer_distribution(&records);

        assert_eq!(labels(&buckets), vec!["TESLA", "KIA", "NISSAN"]);
        assert_eq!(buckets[0].count, 5);
        assert!(buckets.iter().all(|b| !b.is_other));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = makes(&[("FORD", 2), ("BMW", 2), ("AUDI", 2)]);

        let buckets = manufacturer_distribution(&records);

        assert_eq!(labels(&buckets), vec!["FORD", "BMW", "AUDI"]);
    }

    #[test]
    fn test_nine_makes_collapse_into_others() {
        let records = makes(&[
            ("A", 50),
            ("B", 40),
            ("C", 30),
            ("D", 20),
            ("E", 10),
            ("F", 8),
            ("G", 6),
            ("H", 4),
            ("I", 2),
        ]);

        let buckets = manufacturer_distribution(&records);

        assert_eq!(buckets.len(), 8);
        assert_eq!(labels(&buckets), vec!["A", "B", "C", "D", "E", "F", "G", "Others"]);
        let others = buckets.last().unwrap();
        assert_eq!(others.count, 6);
        assert!(others.is_other);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 170);
    }

    #[test]
    fn test_exactly_eight_makes_are_not_collapsed() {
        let records = makes(&[
            ("A", 8),
            ("B", 7),
            ("C", 6),
            ("D", 5),
            ("E", 4),
            ("F", 3),
            ("G", 2),
            ("H", 1),
        ]);

        let buckets = manufacturer_distribution(&records);

        assert_eq!(buckets.len(), 8);
        assert_eq!(buckets.last().unwrap().label, "H");
    }

    #[test]
    fn test_others_stays_last_even_when_largest() {
        let mut entries = vec![("TOP", 3)];
        let tail: Vec<String> = (0..10).map(|i| format!("TAIL{i}")).collect();
        entries.extend(tail.iter().map(|s| (s.as_str(), 2)));
        let records = makes(&entries);

        let buckets = categorical_distribution(&records, MAKE, 3);

        assert_eq!(labels(&buckets), vec!["TOP", "TAIL0", "Others"]);
        assert_eq!(buckets[2].count, 18);
    }

    #[test]
    fn test_absent_values_are_not_counted() {
        let mut records = makes(&[("TESLA", 2)]);
        records.push([(MAKE, None::<&str>)].into_iter().collect());
        records.push(Record::default());

        let buckets = manufacturer_distribution(&records);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 2);
    }
}
