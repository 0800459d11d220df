//! Report value types.

mod summary;

pub use summary::{DailySalesSummary, TopSellingItem};
