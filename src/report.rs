//! Bundles every aggregate view of one dataset load.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::record::Record;
use crate::stats::{
    CategoryBucket, RangeBucket, RankedModel, ScalarStats, YearBucket, manufacturer_distribution,
    model_year_distribution, range_distribution, summarize, top_models,
};

/// All dashboard views computed from a single record collection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub source: Option<String>,
    pub stats: ScalarStats,
    pub manufacturers: Vec<CategoryBucket>,
    pub model_years: Vec<YearBucket>,
    pub ranges: [RangeBucket; 8],
    pub top_models: Vec<RankedModel>,
}

impl DashboardReport {
    pub fn from_records(records: &[Record]) -> Self {
        let report = DashboardReport {
            generated_at: Utc::now(),
            source: None,
            stats: summarize(records),
            manufacturers: manufacturer_distribution(records),
            model_years: model_year_distribution(records),
            ranges: range_distribution(records),
            top_models: top_models(records),
        };

        debug!(
            total = report.stats.total,
            manufacturer_buckets = report.manufacturers.len(),
            year_buckets = report.model_years.len(),
            top_models = report.top_models.len(),
            "Report computed"
        );

        report
    }

    /// Set the label of the dataset the report was built from
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{COUNTY, ELECTRIC_RANGE, MAKE, MODEL, MODEL_YEAR};

    #[test]
    fn test_from_records_empty() {
        let report = DashboardReport::from_records(&[]);

        assert_eq!(report.stats, ScalarStats::default());
        assert!(report.manufacturers.is_empty());
        assert!(report.model_years.is_empty());
        assert_eq!(report.ranges.len(), 8);
        assert!(report.ranges.iter().all(|b| b.count == 0));
        assert!(report.top_models.is_empty());
        assert!(report.source.is_none());
    }

    #[test]
    fn test_from_records_single_vehicle() {
        let record: Record = [
            (MAKE, Some("TESLA")),
            (MODEL, Some("MODEL S")),
            (MODEL_YEAR, Some("2016")),
            (ELECTRIC_RANGE, Some("210")),
            (COUNTY, Some("King")),
        ]
        .into_iter()
        .collect();

        let report = DashboardReport::from_records(&[record]).with_source("inline");

        assert_eq!(report.source.as_deref(), Some("inline"));
        assert_eq!(report.stats.total, 1);
        assert_eq!(report.stats.average_range, Some(210.0));
        assert_eq!(report.manufacturers[0].label, "TESLA");
        assert_eq!(report.model_years[0].year, "2016");
        assert_eq!(report.ranges[4].count, 1);
        assert_eq!(report.top_models[0].make, "TESLA");
    }

    #[test]
    fn test_serializes_undefined_average_as_null() {
        let report = DashboardReport::from_records(&[]);
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["stats"]["average_range"].is_null());
        assert_eq!(json["ranges"].as_array().unwrap().len(), 8);
    }
}
