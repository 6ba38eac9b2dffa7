//! # Dashboard Filter
//!
//! Sentiment, rating and date selection over the final dataset.

use crate::data::{ReviewRecord, ReviewTable};
use crate::sentiment::SentimentCategory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Record selection used by the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilter {
    /// Categories to keep; an empty set keeps nothing
    pub sentiments: BTreeSet<SentimentCategory>,
    /// Inclusive rating range
    pub min_rating: u8,
    pub max_rating: u8,
    /// Inclusive calendar-day range; records without a date fail a set bound
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl Default for DashboardFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardFilter {
    /// A filter that keeps every scored record
    pub fn new() -> Self {
        Self {
            sentiments: SentimentCategory::ALL.into_iter().collect(),
            min_rating: 1,
            max_rating: 5,
            date_from: None,
            date_to: None,
        }
    }

    pub fn with_sentiments<I>(mut self, sentiments: I) -> Self
    where
        I: IntoIterator<Item = SentimentCategory>,
    {
        self.sentiments = sentiments.into_iter().collect();
        self
    }

    pub fn with_rating_range(mut self, min: u8, max: u8) -> Self {
        self.min_rating = min;
        self.max_rating = max;
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    fn has_date_range(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// Whether a record passes every criterion
    pub fn matches(&self, record: &ReviewRecord) -> bool {
        let Some(category) = record.sentiment() else {
            return false;
        };
        if !self.sentiments.contains(&category) {
            return false;
        }
        if record.rating < self.min_rating || record.rating > self.max_rating {
            return false;
        }
        if self.has_date_range() {
            let Some(day) = record.time.map(|t| t.day()) else {
                return false;
            };
            if self.date_from.is_some_and(|from| day < from)
                || self.date_to.is_some_and(|to| day > to)
            {
                return false;
            }
        }
        true
    }

    /// Records of `table` passing the filter, in table order
    pub fn apply<'a>(&self, table: &'a ReviewTable) -> Vec<&'a ReviewRecord> {
        table.iter().filter(|r| self.matches(r)).collect()
    }
}
