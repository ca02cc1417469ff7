//! Registration records as produced by the CSV parser.
//!
//! A [`Record`] maps column names to optional cell values. Empty cells are
//! stored as `None`, so every consumer sees a single notion of "absent".

use std::collections::HashMap;

pub const MAKE: &str = "Make";
pub const MODEL: &str = "Model";
pub const MODEL_YEAR: &str = "Model Year";
pub const ELECTRIC_RANGE: &str = "Electric Range";
pub const COUNTY: &str = "County";

/// One row of the registration dataset, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, Option<String>>,
}

impl Record {
    pub fn new(fields: HashMap<String, Option<String>>) -> Self {
        Self { fields }
    }

    /// Returns the value of `field`, or `None` when the column is missing,
    /// explicitly absent, or an empty string.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.is_empty())
    }

    /// Parsed `Electric Range`, see [`parse_range`].
    pub fn electric_range(&self) -> Option<f64> {
        self.get(ELECTRIC_RANGE).and_then(parse_range)
    }

    /// Parsed `Model Year`, see [`parse_year`].
    pub fn model_year(&self) -> Option<i32> {
        self.get(MODEL_YEAR).and_then(parse_year)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| {
                let v = v.map(Into::into).filter(|s: &String| !s.is_empty());
                (k.into(), v)
            })
            .collect();
        Self { fields }
    }
}

/// Parses an electric range in miles.
///
/// Accepts any finite, non-negative decimal after trimming whitespace.
/// Everything else (empty, text, `NaN`, `inf`, negatives) yields `None`.
pub fn parse_range(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parses a model year as an integer after trimming whitespace.
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}
