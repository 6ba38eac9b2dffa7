//! # Dashboard Metrics
//!
//! Headline figures, distributions and the monthly trend for a filtered
//! view of the final dataset.

use crate::data::{sample_indices, ReviewRecord};
use crate::defaults;
use crate::insights::{topic_counts, TopicCategory};
use crate::sentiment::SentimentCategory;
use crate::utils::truncate_chars;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Review count for one month and sentiment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Monthly bucket, e.g. `2011-04`
    pub year_month: String,
    pub sentiment: SentimentCategory,
    pub count: usize,
}

/// Everything the dashboard shows for a filtered view
///
/// Averages are `None` when the filtered view is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_reviews: usize,
    pub filtered_reviews: usize,
    /// `filtered_reviews - total_reviews`
    pub count_delta: i64,
    pub average_rating: Option<f64>,
    /// Filtered mean minus overall mean
    pub rating_delta: Option<f64>,
    pub positive_pct: Option<f64>,
    pub negative_pct: Option<f64>,
    pub average_word_count: Option<f64>,
    pub average_compound: Option<f64>,
    /// Mode of the ratings, smallest on ties
    pub most_common_rating: Option<u8>,
    pub rating_distribution: BTreeMap<u8, usize>,
    pub sentiment_distribution: BTreeMap<SentimentCategory, usize>,
    /// Most frequent topic categories
    pub top_topics: Vec<(TopicCategory, usize)>,
    /// Month × sentiment counts, ordered by month then category
    pub sentiment_trend: Vec<TrendPoint>,
}

fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

impl DashboardMetrics {
    /// Compute metrics for `filtered`, a subset of `all`
    pub fn compute(all: &[ReviewRecord], filtered: &[&ReviewRecord]) -> Self {
        let overall_rating = mean(all.iter().map(|r| f64::from(r.rating)));
        let average_rating = mean(filtered.iter().map(|r| f64::from(r.rating)));

        let share = |category: SentimentCategory| {
            (!filtered.is_empty()).then(|| {
                let n = filtered
                    .iter()
                    .filter(|r| r.sentiment() == Some(category))
                    .count();
                n as f64 / filtered.len() as f64 * 100.0
            })
        };

        let mut rating_distribution = BTreeMap::new();
        let mut sentiment_distribution = BTreeMap::new();
        let mut trend: BTreeMap<(String, SentimentCategory), usize> = BTreeMap::new();
        for record in filtered {
            *rating_distribution.entry(record.rating).or_insert(0) += 1;
            if let Some(category) = record.sentiment() {
                *sentiment_distribution.entry(category).or_insert(0) += 1;
                if let Some(time) = record.time {
                    *trend.entry((time.year_month(), category)).or_insert(0) += 1;
                }
            }
        }

        // BTreeMap iterates ratings ascending, so the first maximum is the smallest
        let most_common_rating = rating_distribution
            .iter()
            .fold(None, |best: Option<(u8, usize)>, (&rating, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((rating, count)),
            })
            .map(|(rating, _)| rating);

        let mut top_topics = topic_counts(filtered.iter().copied());
        top_topics.truncate(defaults::DASHBOARD_TOP_TOPICS);

        Self {
            total_reviews: all.len(),
            filtered_reviews: filtered.len(),
            count_delta: filtered.len() as i64 - all.len() as i64,
            average_rating,
            rating_delta: average_rating.zip(overall_rating).map(|(f, o)| f - o),
            positive_pct: share(SentimentCategory::Positive),
            negative_pct: share(SentimentCategory::Negative),
            average_word_count: mean(filtered.iter().map(|r| r.word_count as f64)),
            average_compound: mean(
                filtered
                    .iter()
                    .filter_map(|r| r.scores.as_ref().map(|s| s.compound)),
            ),
            most_common_rating,
            rating_distribution,
            sentiment_distribution,
            top_topics,
            sentiment_trend: trend
                .into_iter()
                .map(|((year_month, sentiment), count)| TrendPoint {
                    year_month,
                    sentiment,
                    count,
                })
                .collect(),
        }
    }
}

/// A review prepared for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleReview {
    pub rating: u8,
    pub sentiment: Option<SentimentCategory>,
    pub topic: Option<TopicCategory>,
    /// Text cut to the display limit
    pub text: String,
}

/// Pick up to `n` reviews for display, optionally of one sentiment
///
/// Deterministic for a given seed; picks keep their filtered order.
pub fn sample_reviews(
    filtered: &[&ReviewRecord],
    sentiment: Option<SentimentCategory>,
    n: usize,
    seed: u64,
) -> Vec<SampleReview> {
    let pool: Vec<&ReviewRecord> = filtered
        .iter()
        .copied()
        .filter(|r| sentiment.is_none() || r.sentiment() == sentiment)
        .collect();

    sample_indices(pool.len(), n.min(pool.len()), seed)
        .into_iter()
        .map(|i| {
            let record = pool[i];
            SampleReview {
                rating: record.rating,
                sentiment: record.sentiment(),
                topic: record.topic,
                text: truncate_chars(&record.text, defaults::SAMPLE_TEXT_CHARS),
            }
        })
        .collect()
}
