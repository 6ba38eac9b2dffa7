//! # Review Insights
//!
//! Batch pipeline turning raw customer product reviews into sentiment
//! scores, topic categories and a plain-language executive summary.
//!
//! ## Modules
//!
//! - `data` - Review records, CSV artifacts and the cleaning stage
//! - `sentiment` - Lexicon sentiment analyzers, scoring and statistics
//! - `insights` - Topic categorization, topic extraction and the summary
//! - `dashboard` - Filters and metrics for the dashboard view
//! - `pipeline` - Stage orchestration over the persisted artifacts
//! - `utils` - Configuration and formatting helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use review_insights::{ReviewCleaner, ReviewLoader, SentimentScorer, TopicReport};
//!
//! fn main() -> review_insights::Result<()> {
//!     let raw = ReviewLoader::load_raw("data/reviews.csv")?;
//!     let (clean, report) = ReviewCleaner::new().with_sample_size(Some(5000)).clean(raw);
//!     println!("Kept {} of {} reviews", report.final_count, report.input_count);
//!
//!     let scored = SentimentScorer::new().score(clean);
//!     let topics = TopicReport::from_table(&scored);
//!     println!("{topics}");
//!     Ok(())
//! }
//! ```

pub mod dashboard;
pub mod data;
pub mod error;
pub mod insights;
pub mod pipeline;
pub mod sentiment;
pub mod utils;

// Re-exports for convenience
pub use dashboard::{sample_reviews, DashboardFilter, DashboardMetrics, SampleReview};
pub use data::{CleaningReport, RawTable, ReviewCleaner, ReviewLoader, ReviewRecord, ReviewTable};
pub use error::{Error, Result};
pub use insights::{
    categorize, categorize_table, extract_topics, summarize, ExecutiveSummary, TopicCategory,
    TopicFinding, TopicReport,
};
pub use pipeline::{InsightsOutcome, Pipeline, RunOutcome};
pub use sentiment::{
    PatternLexicon, SentimentCategory, SentimentModel, SentimentScorer, SentimentScores,
    SentimentSignal, SentimentStats, ValenceLexicon,
};
pub use utils::{load_config, save_config, PipelineConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Compound score at or above which a review is Positive
    pub const POSITIVE_THRESHOLD: f64 = 0.05;

    /// Compound score at or below which a review is Negative
    pub const NEGATIVE_THRESHOLD: f64 = -0.05;

    /// Reviews with this many characters or fewer are dropped
    pub const MIN_TEXT_LENGTH: usize = 20;

    /// Rows sampled from the raw input
    pub const SAMPLE_SIZE: usize = 5000;

    /// Seed for reproducible sampling
    pub const SAMPLE_SEED: u64 = 42;

    /// Entries in the negative-word frequency table
    pub const TOP_NEGATIVE_WORDS: usize = 20;

    /// Entries in the topic report
    pub const TOP_TOPICS: usize = 5;

    /// Issues named in the executive summary
    pub const TOP_ISSUES: usize = 3;

    /// Topic categories shown on the dashboard
    pub const DASHBOARD_TOP_TOPICS: usize = 6;

    /// Sample reviews shown on the dashboard
    pub const SAMPLE_REVIEWS: usize = 5;

    /// Characters of review text shown before truncation
    pub const SAMPLE_TEXT_CHARS: usize = 300;
}
