//! # Dashboard Module
//!
//! Filtering and metrics behind the interactive dashboard view.

mod filter;
mod metrics;

pub use filter::DashboardFilter;
pub use metrics::{sample_reviews, DashboardMetrics, SampleReview, TrendPoint};
