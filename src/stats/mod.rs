//! Aggregations over a collection of registration records.
//!
//! Each view is a pure function of the input slice: no component reads
//! another's output, so they can be computed in any order.

pub mod distribution;
pub mod percentage;
pub mod range;
pub mod ranking;
pub mod summary;
pub mod temporal;
pub mod types;
pub mod utility;

pub use distribution::{categorical_distribution, manufacturer_distribution};
pub use percentage::percentage;
pub use range::range_distribution;
pub use ranking::{top_models, top_ranked};
pub use summary::summarize;
pub use temporal::{model_year_distribution, year_distribution};
pub use types::{CategoryBucket, RangeBucket, RankedModel, ScalarStats, YearBucket};
