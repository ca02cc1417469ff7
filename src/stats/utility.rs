use std::collections::{HashMap, HashSet};

/// Computes the arithmetic mean of a slice of values.
///
/// Uses a running mean so large finite inputs cannot overflow the sum.
/// Returns `None` for empty input or a non-finite result.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let avg = values
        .iter()
        .enumerate()
        .fold(0.0_f64, |acc, (i, v)| acc + (v - acc) / (i + 1) as f64);
    Some(avg).filter(|a| a.is_finite())
}

/// Counts occurrences of each value, keeping first-seen order.
///
/// The returned order is what makes later stable sorts break ties by
/// first appearance in the input.
pub fn counts_in_order<'a, I>(values: I) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts
}

/// Number of distinct values.
pub fn distinct_count<'a, I>(values: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().collect::<HashSet<_>>().len()
}
