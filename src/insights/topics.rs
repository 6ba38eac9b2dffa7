//! # Topic Categorization
//!
//! Keyword rules that bucket reviews into customer-feedback themes, and the
//! ranked topic report over negative reviews.

use crate::data::{ReviewRecord, ReviewTable};
use crate::defaults;
use crate::sentiment::SentimentCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Customer-feedback theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TopicCategory {
    #[serde(rename = "Product Quality")]
    ProductQuality,
    #[serde(rename = "Shipping/Delivery")]
    ShippingDelivery,
    #[serde(rename = "Customer Service")]
    CustomerService,
    #[serde(rename = "Price/Value")]
    PriceValue,
    Packaging,
    #[serde(rename = "Taste/Flavor")]
    TasteFlavor,
    Other,
}

impl TopicCategory {
    pub const ALL: [TopicCategory; 7] = [
        TopicCategory::ProductQuality,
        TopicCategory::ShippingDelivery,
        TopicCategory::CustomerService,
        TopicCategory::PriceValue,
        TopicCategory::Packaging,
        TopicCategory::TasteFlavor,
        TopicCategory::Other,
    ];

    /// Label as written to artifacts and reports
    pub fn label(&self) -> &'static str {
        match self {
            TopicCategory::ProductQuality => "Product Quality",
            TopicCategory::ShippingDelivery => "Shipping/Delivery",
            TopicCategory::CustomerService => "Customer Service",
            TopicCategory::PriceValue => "Price/Value",
            TopicCategory::Packaging => "Packaging",
            TopicCategory::TasteFlavor => "Taste/Flavor",
            TopicCategory::Other => "Other",
        }
    }

    /// One-line description used in the topic report
    pub fn description(&self) -> String {
        format!(
            "Predominantly negative mentions related to {}",
            self.label().to_lowercase()
        )
    }
}

impl fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TopicCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TopicCategory::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown topic category: {s}"))
    }
}

/// Categorization rules, checked in priority order
pub const CATEGORY_RULES: &[(TopicCategory, &[&str])] = &[
    (
        TopicCategory::ShippingDelivery,
        &["shipping", "delivery", "arrived", "package", "late", "delayed", "never received"],
    ),
    (
        TopicCategory::CustomerService,
        &["customer service", "support", "refund", "return", "customer"],
    ),
    (
        TopicCategory::ProductQuality,
        &["quality", "defective", "broke", "broken", "damaged", "poor"],
    ),
    (
        TopicCategory::TasteFlavor,
        &["taste", "flavor", "bland", "bitter", "delicious", "disgusting", "stale"],
    ),
    (
        TopicCategory::PriceValue,
        &["price", "expensive", "overpriced", "cost", "waste", "money"],
    ),
    (
        TopicCategory::Packaging,
        &["packaging", "box", "wrapped", "crushed"],
    ),
];

/// Keyword sets for topic extraction over negative reviews
///
/// Broader than [`CATEGORY_RULES`]; every topic is counted independently.
pub const TOPIC_KEYWORDS: &[(TopicCategory, &[&str])] = &[
    (
        TopicCategory::ProductQuality,
        &[
            "quality", "defective", "broke", "broken", "damaged", "poor", "cheap", "terrible",
            "awful", "bad",
        ],
    ),
    (
        TopicCategory::ShippingDelivery,
        &[
            "shipping", "delivery", "arrived", "package", "late", "delayed", "never received",
            "lost", "weeks",
        ],
    ),
    (
        TopicCategory::CustomerService,
        &[
            "customer service", "support", "refund", "return", "response", "contact", "help",
            "customer",
        ],
    ),
    (
        TopicCategory::PriceValue,
        &["price", "expensive", "overpriced", "cost", "value", "money", "worth", "waste"],
    ),
    (
        TopicCategory::Packaging,
        &["packaging", "box", "wrapped", "container", "sealed", "package", "crushed"],
    ),
    (
        TopicCategory::TasteFlavor,
        &[
            "taste", "flavor", "bland", "bitter", "sweet", "salty", "disgusting", "delicious",
            "stale",
        ],
    ),
];

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Assign a review text to the first matching topic, else `Other`
///
/// Matching is case-insensitive substring containment.
pub fn categorize(text: &str) -> TopicCategory {
    let text = text.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| mentions_any(&text, keywords))
        .map_or(TopicCategory::Other, |(topic, _)| *topic)
}

/// Categorize every record of a table, appending the topic column
pub fn categorize_table(mut table: ReviewTable) -> ReviewTable {
    for record in &mut table.records {
        record.topic = Some(categorize(&record.text));
    }
    table
}

/// Topic counts over the categorized records, most frequent first
///
/// Ties keep the order in which topics were first seen.
pub fn topic_counts<'a, I>(records: I) -> Vec<(TopicCategory, usize)>
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let mut counts: Vec<(TopicCategory, usize)> = Vec::new();
    for topic in records.into_iter().filter_map(|r| r.topic) {
        match counts.iter_mut().find(|(t, _)| *t == topic) {
            Some((_, n)) => *n += 1,
            None => counts.push((topic, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// One ranked entry of the topic report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicFinding {
    /// 1-based rank
    pub rank: usize,
    pub topic: TopicCategory,
    pub description: String,
    pub sentiment: SentimentCategory,
    /// Share of negative reviews mentioning the topic (0 to 100)
    pub prevalence: f64,
}

impl fmt::Display for TopicFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TOPIC {}: {}", self.rank, self.topic)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Sentiment: {}", self.sentiment)?;
        writeln!(f, "Prevalence: {:.1}%", self.prevalence)
    }
}

/// Ranked topics discovered in negative reviews
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicReport {
    /// Number of negative reviews examined
    pub negative_count: usize,
    pub findings: Vec<TopicFinding>,
}

impl TopicReport {
    /// Extract topics from the Negative records of a table
    pub fn from_table(table: &ReviewTable) -> Self {
        extract_topics(table.negatives())
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl fmt::Display for TopicReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, finding) in self.findings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{finding}")?;
        }
        Ok(())
    }
}

/// Rank the topics mentioned by negative reviews
///
/// Each topic counts the reviews containing at least one of its extraction
/// keywords. Topics with no mentions are dropped and at most five are kept,
/// ordered by prevalence with ties in table order. An empty input gives an
/// empty report.
pub fn extract_topics<'a, I>(negatives: I) -> TopicReport
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let mut counts = vec![0usize; TOPIC_KEYWORDS.len()];
    let mut total = 0usize;

    for record in negatives {
        total += 1;
        let text = record.text.to_lowercase();
        for (i, (_, keywords)) in TOPIC_KEYWORDS.iter().enumerate() {
            if mentions_any(&text, keywords) {
                counts[i] += 1;
            }
        }
    }

    if total == 0 {
        return TopicReport::default();
    }

    let mut ranked: Vec<(TopicCategory, usize)> = TOPIC_KEYWORDS
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|((topic, _), count)| (*topic, count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let findings = ranked
        .into_iter()
        .take(defaults::TOP_TOPICS)
        .enumerate()
        .map(|(i, (topic, count))| TopicFinding {
            rank: i + 1,
            topic,
            description: topic.description(),
            sentiment: SentimentCategory::Negative,
            prevalence: count as f64 / total as f64 * 100.0,
        })
        .collect();

    TopicReport {
        negative_count: total,
        findings,
    }
}
