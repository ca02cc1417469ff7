//! Derived structures returned by the aggregation functions.

use serde::Serialize;

/// Headline metrics for the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScalarStats {
    pub total: usize,
    /// `None` when no record carries a parseable range.
    pub average_range: Option<f64>,
    pub manufacturers: usize,
    pub counties: usize,
}

/// Count for one category value, or the collapsed long tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBucket {
    pub label: String,
    pub count: usize,
    /// Set only on the synthetic "Others" bucket.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_other: bool,
}

/// Count for one model year, labelled with the four-digit year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearBucket {
    pub year: String,
    pub count: usize,
}

/// Count for one fixed electric range band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeBucket {
    pub label: &'static str,
    pub count: usize,
}

/// A ranked model with the manufacturer first seen alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedModel {
    pub model: String,
    pub count: usize,
    pub make: String,
}
