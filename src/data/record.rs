//! # Review Records
//!
//! The unit flowing through the pipeline and the table that carries it
//! between stages.

use crate::insights::TopicCategory;
use crate::sentiment::{SentimentCategory, SentimentScores};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Column names used by the pipeline artifacts
pub mod columns {
    pub const TEXT: &str = "Text";
    pub const SCORE: &str = "Score";
    pub const TIME: &str = "Time";

    pub const DATE: &str = "Date";
    pub const YEAR: &str = "Year";
    pub const MONTH: &str = "Month";
    pub const YEAR_MONTH: &str = "YearMonth";

    pub const REVIEW_LENGTH: &str = "review_length";
    pub const WORD_COUNT: &str = "word_count";

    pub const VADER_COMPOUND: &str = "vader_compound";
    pub const VADER_POS: &str = "vader_pos";
    pub const VADER_NEG: &str = "vader_neg";
    pub const VADER_NEU: &str = "vader_neu";
    pub const TEXTBLOB_POLARITY: &str = "textblob_polarity";
    pub const TEXTBLOB_SUBJECTIVITY: &str = "textblob_subjectivity";
    pub const SENTIMENT_CATEGORY: &str = "sentiment_category";

    pub const AI_CATEGORY: &str = "ai_category";

    /// Time bucket columns, in artifact order
    pub const TIME_FEATURES: [&str; 4] = [DATE, YEAR, MONTH, YEAR_MONTH];

    /// Sentiment columns, in artifact order
    pub const SENTIMENT: [&str; 7] = [
        VADER_COMPOUND,
        VADER_POS,
        VADER_NEG,
        VADER_NEU,
        TEXTBLOB_POLARITY,
        TEXTBLOB_SUBJECTIVITY,
        SENTIMENT_CATEGORY,
    ];

    /// Columns the pipeline derives itself; everything else is carried through
    pub fn is_derived(name: &str) -> bool {
        TIME_FEATURES.contains(&name)
            || SENTIMENT.contains(&name)
            || name == REVIEW_LENGTH
            || name == WORD_COUNT
            || name == AI_CATEGORY
    }
}

/// Format used for the `Date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time bucket features derived from an epoch timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeFeatures {
    /// UTC date and time of the review
    pub date: NaiveDateTime,
}

impl TimeFeatures {
    /// Derive features from epoch seconds
    pub fn from_timestamp(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(|dt| Self {
            date: dt.naive_utc(),
        })
    }

    /// Parse a `Date` cell, accepting either a full timestamp or a bare date
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        NaiveDateTime::parse_from_str(value, DATE_FORMAT)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .map(|date| Self { date })
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Calendar day of the review
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Monthly bucket, e.g. `2011-04`
    pub fn year_month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// A row as read from the raw input, before cleaning
#[derive(Debug, Clone, PartialEq)]
pub struct RawReview {
    /// All cell values, aligned with [`RawTable::columns`]
    pub fields: Vec<String>,
    /// Review text, `None` when the cell is empty
    pub text: Option<String>,
    /// Star rating, `None` when empty or not an integer in 1..=5
    pub rating: Option<u8>,
    /// Epoch seconds, `None` when absent or unparseable
    pub timestamp: Option<i64>,
}

/// Raw input table
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column names in file order
    pub columns: Vec<String>,
    /// Index of the `Text` column
    pub text_index: usize,
    /// Whether the input carries a `Time` column
    pub has_time: bool,
    pub rows: Vec<RawReview>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A cleaned review, enriched by later stages
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    /// Pass-through cell values, aligned with [`ReviewTable::columns`]
    pub fields: Vec<String>,
    /// Normalized (lowercase, trimmed) review text
    pub text: String,
    /// Star rating in 1..=5
    pub rating: u8,
    /// Epoch seconds, if the input had them
    pub timestamp: Option<i64>,
    /// Time buckets, present only when the timestamp is
    pub time: Option<TimeFeatures>,
    /// Character count of `text`
    pub review_length: usize,
    /// Whitespace-delimited token count of `text`
    pub word_count: usize,
    /// Sentiment scores, added by the scorer
    pub scores: Option<SentimentScores>,
    /// Topic bucket, added by the categorizer
    pub topic: Option<TopicCategory>,
}

impl ReviewRecord {
    /// Create a record with length features derived from `text`
    pub fn new(text: impl Into<String>, rating: u8) -> Self {
        let text = text.into();
        let review_length = text.chars().count();
        let word_count = text.split_whitespace().count();
        Self {
            fields: Vec::new(),
            text,
            rating,
            timestamp: None,
            time: None,
            review_length,
            word_count,
            scores: None,
            topic: None,
        }
    }

    /// Attach a timestamp and its derived time buckets
    pub fn with_timestamp(mut self, secs: i64) -> Self {
        self.timestamp = Some(secs);
        self.time = TimeFeatures::from_timestamp(secs);
        self
    }

    pub fn with_scores(mut self, scores: SentimentScores) -> Self {
        self.scores = Some(scores);
        self
    }

    pub fn with_topic(mut self, topic: TopicCategory) -> Self {
        self.topic = Some(topic);
        self
    }

    /// Sentiment label, once scored
    pub fn sentiment(&self) -> Option<SentimentCategory> {
        self.scores.as_ref().map(|s| s.category)
    }

    pub fn is_negative(&self) -> bool {
        self.sentiment() == Some(SentimentCategory::Negative)
    }
}

/// Table of cleaned reviews handed between stages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewTable {
    /// Pass-through column names in original file order (includes `Text`,
    /// `Score` and `Time` when present)
    pub columns: Vec<String>,
    /// Whether time bucket columns are emitted
    pub has_time: bool,
    pub records: Vec<ReviewRecord>,
}

impl ReviewTable {
    /// Build a table without pass-through columns
    pub fn from_records(records: Vec<ReviewRecord>) -> Self {
        let has_time = records.iter().any(|r| r.timestamp.is_some());
        Self {
            columns: Vec::new(),
            has_time,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReviewRecord> {
        self.records.iter()
    }

    /// True when at least one record carries sentiment scores
    pub fn is_scored(&self) -> bool {
        self.records.iter().any(|r| r.scores.is_some())
    }

    /// True when at least one record carries a topic
    pub fn is_categorized(&self) -> bool {
        self.records.iter().any(|r| r.topic.is_some())
    }

    /// Records labeled Negative, in table order
    pub fn negatives(&self) -> impl Iterator<Item = &ReviewRecord> {
        self.records.iter().filter(|r| r.is_negative())
    }
}

impl<'a> IntoIterator for &'a ReviewTable {
    type Item = &'a ReviewRecord;
    type IntoIter = std::slice::Iter<'a, ReviewRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parse a star rating cell
///
/// Accepts integers and integral floats (`"4"`, `"4.0"`); anything outside
/// 1..=5 is treated as missing.
pub fn parse_rating(value: &str) -> Option<u8> {
    let value = value.trim();
    let rating = value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })?;
    (1..=5).contains(&rating).then_some(rating as u8)
}

/// Parse an epoch-seconds cell
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64)
    })
}
