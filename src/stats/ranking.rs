use std::collections::HashMap;

use crate::record::{MAKE, MODEL, Record};
use crate::stats::types::RankedModel;

/// Number of models shown in the leaderboard.
pub const TOP_MODELS: usize = 5;

/// The `n` most frequent values of `key`, each paired with the value of
/// `representative` from the first record seen for that key.
///
/// Records missing either field are ignored. Equal counts keep first-seen
/// order.
pub fn top_ranked(records: &[Record], key: &str, representative: &str, n: usize) -> Vec<RankedModel> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, usize, &str)> = Vec::new();

    for record in records {
        let (Some(k), Some(rep)) = (record.get(key), record.get(representative)) else {
            continue;
        };

        match index.get(k) {
            Some(&i) => groups[i].1 += 1,
            None => {
                index.insert(k, groups.len());
                groups.push((k, 1, rep));
            }
        }
    }

    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups.truncate(n);

    groups
        .into_iter()
        .map(|(model, count, make)| RankedModel {
            model: model.to_string(),
            count,
            make: make.to_string(),
        })
        .collect()
}

/// Top five models by registration count, with their manufacturer.
pub fn top_models(records: &[Record]) -> Vec<RankedModel> {
    top_ranked(records, MODEL, MAKE, TOP_MODELS)
}
