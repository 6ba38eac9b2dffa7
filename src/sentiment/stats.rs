//! # Sentiment Statistics
//!
//! Aggregates over a scored table: category distribution, mean ratings and
//! the most frequent words in negative reviews.

use super::analyzer::SentimentCategory;
use crate::data::ReviewRecord;
use crate::defaults;
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

/// Alphabetic tokens of at least four letters
static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-z]{4,}\b").unwrap());

/// Words excluded from the negative-review frequency table
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "is", "was",
    "are", "were", "been", "be", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "it", "this", "that", "these", "those", "i", "you", "he", "she", "we",
    "they",
];

/// Count and share of one sentiment category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub count: usize,
    /// Percentage of all reviews (0 to 100)
    pub percentage: f64,
}

/// A word and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Statistics artifact written by the sentiment stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentStats {
    pub total_reviews: usize,
    /// Only categories that occur
    pub sentiment_distribution: BTreeMap<SentimentCategory, CategoryShare>,
    pub average_rating: f64,
    pub average_rating_by_sentiment: BTreeMap<SentimentCategory, f64>,
    pub top_negative_words: Vec<WordCount>,
}

impl SentimentStats {
    /// Aggregate over scored records
    ///
    /// Fails on an empty slice or if any record has not been scored.
    pub fn compute(records: &[ReviewRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyDataset(
                "cannot compute sentiment statistics over zero reviews".to_string(),
            ));
        }

        let mut counts: BTreeMap<SentimentCategory, usize> = BTreeMap::new();
        let mut rating_sums: BTreeMap<SentimentCategory, u64> = BTreeMap::new();
        let mut rating_total: u64 = 0;

        for record in records {
            let category = record
                .sentiment()
                .ok_or_else(|| Error::MissingColumn("sentiment_category".to_string()))?;
            *counts.entry(category).or_default() += 1;
            *rating_sums.entry(category).or_default() += u64::from(record.rating);
            rating_total += u64::from(record.rating);
        }

        let total = records.len();
        let sentiment_distribution = counts
            .iter()
            .map(|(&category, &count)| {
                let share = CategoryShare {
                    count,
                    percentage: count as f64 / total as f64 * 100.0,
                };
                (category, share)
            })
            .collect();

        let average_rating_by_sentiment = rating_sums
            .iter()
            .map(|(category, &sum)| (*category, sum as f64 / counts[category] as f64))
            .collect();

        let negative_texts = records
            .iter()
            .filter(|r| r.is_negative())
            .map(|r| r.text.as_str());

        Ok(Self {
            total_reviews: total,
            sentiment_distribution,
            average_rating: rating_total as f64 / total as f64,
            average_rating_by_sentiment,
            top_negative_words: top_words(negative_texts, defaults::TOP_NEGATIVE_WORDS),
        })
    }

    /// Count for a category, zero if absent
    pub fn count(&self, category: SentimentCategory) -> usize {
        self.sentiment_distribution
            .get(&category)
            .map_or(0, |share| share.count)
    }

    /// Percentage for a category, zero if absent
    pub fn percentage(&self, category: SentimentCategory) -> f64 {
        self.sentiment_distribution
            .get(&category)
            .map_or(0.0, |share| share.percentage)
    }
}

/// Most frequent non-stop-words across `texts`
///
/// Words are `[a-z]{4,}` on word boundaries; ties keep the order in which
/// words were first encountered.
pub fn top_words<'a, I>(texts: I, limit: usize) -> Vec<WordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for text in texts {
        for m in WORD_REGEX.find_iter(text) {
            let word = m.as_str();
            if stop_words.contains(word) {
                continue;
            }
            match positions.get(word) {
                Some(&i) => counts[i].count += 1,
                None => {
                    positions.insert(word, counts.len());
                    counts.push(WordCount {
                        word: word.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    // Stable sort keeps first-encounter order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
