//! # Insights Module
//!
//! Topic categorization, topic extraction over negative reviews and the
//! executive summary.

mod summary;
mod topics;

pub use summary::{summarize, ExecutiveSummary, IssueShare, FALLBACK_ISSUES};
pub use topics::{
    categorize, categorize_table, extract_topics, topic_counts, TopicCategory, TopicFinding,
    TopicReport, CATEGORY_RULES, TOPIC_KEYWORDS,
};
