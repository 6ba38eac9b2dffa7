//! # Executive Summary
//!
//! Three-paragraph narrative over the whole scored dataset.

use super::topics::{topic_counts, TopicCategory};
use crate::data::ReviewRecord;
use crate::defaults;
use crate::error::{Error, Result};
use crate::sentiment::SentimentCategory;
use crate::utils::format_thousands;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Issues named when no categorized negative reviews are available
pub const FALLBACK_ISSUES: &str = "product quality, shipping, and customer service";

/// A topic's share of the negative reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueShare {
    pub topic: TopicCategory,
    pub count: usize,
    /// Percentage of negative reviews (0 to 100)
    pub percentage: f64,
}

impl fmt::Display for IssueShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.0}% of negative reviews)", self.topic, self.percentage)
    }
}

/// Figures behind the executive summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub total_reviews: usize,
    pub average_rating: f64,
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    /// Top topics among negative reviews; empty when none are categorized
    pub top_issues: Vec<IssueShare>,
}

impl ExecutiveSummary {
    /// Compute the summary figures
    ///
    /// Fails with [`Error::EmptyDataset`] on zero records and with a schema
    /// error if a record carries no sentiment category.
    pub fn from_records(records: &[ReviewRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyDataset(
                "cannot summarize zero reviews".to_string(),
            ));
        }

        let total = records.len();
        let mut counts = [0usize; 3];
        let mut rating_sum: u64 = 0;
        for record in records {
            let category = record
                .sentiment()
                .ok_or_else(|| Error::MissingColumn("sentiment_category".to_string()))?;
            let slot = match category {
                SentimentCategory::Positive => 0,
                SentimentCategory::Negative => 1,
                SentimentCategory::Neutral => 2,
            };
            counts[slot] += 1;
            rating_sum += u64::from(record.rating);
        }
        let pct = |n: usize| n as f64 / total as f64 * 100.0;

        let negatives: Vec<&ReviewRecord> = records.iter().filter(|r| r.is_negative()).collect();
        let top_issues = topic_counts(negatives.iter().copied())
            .into_iter()
            .take(defaults::TOP_ISSUES)
            .map(|(topic, count)| IssueShare {
                topic,
                count,
                percentage: count as f64 / negatives.len() as f64 * 100.0,
            })
            .collect();

        Ok(Self {
            total_reviews: total,
            average_rating: rating_sum as f64 / total as f64,
            positive_pct: pct(counts[0]),
            negative_pct: pct(counts[1]),
            neutral_pct: pct(counts[2]),
            top_issues,
        })
    }

    /// The issues clause of the second paragraph
    pub fn issues_text(&self) -> String {
        if self.top_issues.is_empty() {
            return FALLBACK_ISSUES.to_string();
        }
        self.top_issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Distribution, issues and recommendation paragraphs
    pub fn paragraphs(&self) -> [String; 3] {
        let distribution = format!(
            "Analysis of {} customer reviews reveals a rating average of {:.2} out of 5 stars, \
             with {:.0}% expressing positive sentiment, {:.0}% negative, and {:.0}% neutral. \
             This distribution suggests that while the majority of customers are satisfied, \
             there is a significant segment experiencing issues that require attention.",
            format_thousands(self.total_reviews),
            self.average_rating,
            self.positive_pct,
            self.negative_pct,
            self.neutral_pct,
        );

        let issues = format!(
            "The primary concerns identified in negative feedback center around {}. \
             These recurring themes represent the most critical areas for improvement and \
             offer clear opportunities to enhance customer satisfaction. Addressing these \
             specific pain points could potentially convert a substantial portion of \
             dissatisfied customers into brand advocates.",
            self.issues_text(),
        );

        let recommendation = "Moving forward, we recommend prioritizing improvements in the \
             areas with highest negative mention rates. Implementing targeted solutions for \
             these top issues could result in measurable improvements to both customer \
             satisfaction scores and repeat purchase rates. Regular monitoring of review \
             sentiment will help track the effectiveness of any corrective measures implemented."
            .to_string();

        [distribution, issues, recommendation]
    }
}

impl fmt::Display for ExecutiveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.paragraphs().join("\n\n"))
    }
}

/// Render the executive summary text for a scored dataset
pub fn summarize(records: &[ReviewRecord]) -> Result<String> {
    ExecutiveSummary::from_records(records).map(|summary| summary.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentScores;

    fn record(text: &str, rating: u8, category: SentimentCategory) -> ReviewRecord {
        ReviewRecord::new(text, rating).with_scores(SentimentScores {
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            polarity: 0.0,
            subjectivity: 0.0,
            category,
        })
    }

    fn sixty_thirty_ten() -> Vec<ReviewRecord> {
        let mut records = Vec::new();
        for _ in 0..60 {
            records.push(record("lovely coffee with a rich aroma", 5, SentimentCategory::Positive));
        }
        for _ in 0..30 {
            records.push(record("arrived late and the box was crushed", 2, SentimentCategory::Negative));
        }
        for _ in 0..10 {
            records.push(record("it is a can of coffee beans", 4, SentimentCategory::Neutral));
        }
        records
    }

    #[test]
    fn test_distribution_paragraph() {
        let text = summarize(&sixty_thirty_ten()).unwrap();
        assert!(text.starts_with("Analysis of 100 customer reviews"));
        assert!(text.contains("4.00 out of 5"));
        assert!(text.contains("60% expressing positive sentiment, 30% negative, and 10% neutral"));
        assert_eq!(text.split("\n\n").count(), 3);
    }

    #[test]
    fn test_fallback_without_categories() {
        let text = summarize(&sixty_thirty_ten()).unwrap();
        assert!(text.contains(&format!("center around {FALLBACK_ISSUES}.")));
    }

    #[test]
    fn test_top_issues_from_categories() {
        let mut records: Vec<ReviewRecord> = sixty_thirty_ten()
            .into_iter()
            .map(|r| r.with_topic(TopicCategory::Other))
            .collect();
        for record in &mut records[60..80] {
            record.topic = Some(TopicCategory::ShippingDelivery);
        }
        for record in &mut records[80..90] {
            record.topic = Some(TopicCategory::Packaging);
        }

        let summary = ExecutiveSummary::from_records(&records).unwrap();
        assert_eq!(
            summary.issues_text(),
            "Shipping/Delivery (67% of negative reviews), Packaging (33% of negative reviews)"
        );
    }

    #[test]
    fn test_fallback_without_negatives() {
        let records = vec![
            record("lovely coffee with a rich aroma", 5, SentimentCategory::Positive)
                .with_topic(TopicCategory::Other),
        ];
        let summary = ExecutiveSummary::from_records(&records).unwrap();
        assert_eq!(summary.issues_text(), FALLBACK_ISSUES);
        assert_eq!(summary.negative_pct, 0.0);
    }

    #[test]
    fn test_thousands_separator() {
        let records: Vec<ReviewRecord> = (0..1500)
            .map(|_| record("lovely coffee with a rich aroma", 5, SentimentCategory::Positive))
            .collect();
        let text = summarize(&records).unwrap();
        assert!(text.starts_with("Analysis of 1,500 customer reviews"));
    }

    #[test]
    fn test_empty_dataset() {
        assert!(matches!(summarize(&[]), Err(Error::EmptyDataset(_))));
    }

    #[test]
    fn test_unscored_records() {
        let records = vec![ReviewRecord::new("never scored review text", 3)];
        let err = summarize(&records).unwrap_err();
        assert!(err.is_schema_error());
    }
}
