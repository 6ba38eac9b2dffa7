//! # Review Cleaning
//!
//! First pipeline stage: sampling, dropping incomplete, duplicate and
//! too-short reviews, text normalization and length/time features.

use super::record::{RawTable, ReviewRecord, ReviewTable, TimeFeatures};
use crate::defaults;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Counts describing what the cleaner removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows read from the input
    pub input_count: usize,
    /// Rows left after sampling
    pub sampled_count: usize,
    /// Rows dropped for missing text or rating
    pub removed_missing: usize,
    /// Rows dropped as duplicates of an earlier normalized text
    pub removed_duplicates: usize,
    /// Rows dropped because the normalized text was too short
    pub removed_short: usize,
    /// Rows that survived
    pub final_count: usize,
    /// Mean character length of the surviving texts
    pub average_length: f64,
    /// Surviving rows per star rating, index 0 is one star
    pub rating_counts: [usize; 5],
}

impl CleaningReport {
    pub fn removed_total(&self) -> usize {
        self.removed_missing + self.removed_duplicates + self.removed_short
    }

    /// `(rating, count)` pairs for one to five stars
    pub fn rating_distribution(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        (1u8..=5).zip(self.rating_counts.iter().copied())
    }
}

/// Cleaner for raw review tables
#[derive(Debug, Clone)]
pub struct ReviewCleaner {
    /// Number of rows to sample, `None` keeps everything
    sample_size: Option<usize>,
    /// Seed for reproducible sampling
    seed: u64,
    /// Texts of this many characters or fewer are dropped
    min_text_length: usize,
}

impl Default for ReviewCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewCleaner {
    /// Create a cleaner that keeps every row
    pub fn new() -> Self {
        Self {
            sample_size: None,
            seed: defaults::SAMPLE_SEED,
            min_text_length: defaults::MIN_TEXT_LENGTH,
        }
    }

    /// Sample this many rows before cleaning
    pub fn with_sample_size(mut self, sample_size: Option<usize>) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_min_text_length(mut self, len: usize) -> Self {
        self.min_text_length = len;
        self
    }

    /// Clean a raw table
    ///
    /// Steps, in order:
    /// 1. Deterministic sampling (if a sample size below the row count is set)
    /// 2. Drop rows with missing text or rating
    /// 3. Normalize text (lowercase, trim)
    /// 4. Drop duplicates of an earlier normalized text
    /// 5. Drop texts of `min_text_length` characters or fewer
    /// 6. Derive time buckets and length features
    pub fn clean(&self, raw: RawTable) -> (ReviewTable, CleaningReport) {
        let mut report = CleaningReport {
            input_count: raw.len(),
            ..Default::default()
        };

        let RawTable {
            columns,
            has_time,
            rows,
            ..
        } = raw;

        let rows = match self.sample_size {
            Some(n) if n < rows.len() => {
                let keep: HashSet<usize> = sample_indices(rows.len(), n, self.seed)
                    .into_iter()
                    .collect();
                rows.into_iter()
                    .enumerate()
                    .filter(|(i, _)| keep.contains(i))
                    .map(|(_, row)| row)
                    .collect()
            }
            _ => rows,
        };
        report.sampled_count = rows.len();

        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            let (Some(text), Some(rating)) = (row.text, row.rating) else {
                report.removed_missing += 1;
                continue;
            };

            let text = normalize_text(&text);
            if !seen.insert(text.clone()) {
                report.removed_duplicates += 1;
                continue;
            }
            if text.chars().count() <= self.min_text_length {
                report.removed_short += 1;
                continue;
            }

            let mut record = ReviewRecord::new(text, rating);
            record.fields = row.fields;
            if has_time {
                record.timestamp = row.timestamp;
                record.time = row.timestamp.and_then(TimeFeatures::from_timestamp);
            }
            records.push(record);
        }

        report.final_count = records.len();
        if !records.is_empty() {
            let total: usize = records.iter().map(|r| r.review_length).sum();
            report.average_length = total as f64 / records.len() as f64;
        }
        for record in &records {
            let slot = usize::from(record.rating).checked_sub(1);
            if let Some(count) = slot.and_then(|i| report.rating_counts.get_mut(i)) {
                *count += 1;
            }
        }
        let table = ReviewTable {
            columns,
            has_time,
            records,
        };
        (table, report)
    }
}

/// Lowercase and strip surrounding whitespace
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Pick `n` distinct row indices out of `len`, reproducibly for a seed
///
/// Indices are returned in ascending order so sampling never reorders rows.
pub fn sample_indices(len: usize, n: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices = rand::seq::index::sample(&mut rng, len, n.min(len)).into_vec();
    indices.sort_unstable();
    indices
}
