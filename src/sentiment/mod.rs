//! # Sentiment Module
//!
//! Lexicon analyzers, the per-review scorer and dataset statistics.

mod analyzer;
mod lexicon;
mod model;
mod pattern;
mod stats;

pub use analyzer::{SentimentCategory, SentimentScorer, SentimentScores};
pub use lexicon::{ValenceLexicon, ValenceScores};
pub use model::{SentimentModel, SentimentSignal, ValenceMass};
pub use pattern::{PatternEntry, PatternLexicon, PatternScores};
pub use stats::{top_words, CategoryShare, SentimentStats, WordCount, STOP_WORDS};
