//! # Sentiment Models
//!
//! Common interface shared by the sentiment analyzers.

use serde::{Deserialize, Serialize};

/// Proportions of positive, negative and neutral mass in a text
///
/// The three shares sum to 1 (up to rounding).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValenceMass {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl ValenceMass {
    /// All mass on the neutral share
    pub fn neutral() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
        }
    }
}

impl Default for ValenceMass {
    fn default() -> Self {
        Self::neutral()
    }
}

/// What a sentiment model reports about a text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentSignal {
    /// Direction of sentiment (-1 to 1)
    pub polarity: f64,
    /// Opinion vs fact leaning (0 to 1), if the model measures it
    pub subjectivity: Option<f64>,
    /// Positive/negative/neutral proportions, if the model measures them
    pub mass: Option<ValenceMass>,
}

impl SentimentSignal {
    pub fn new(polarity: f64) -> Self {
        Self {
            polarity,
            subjectivity: None,
            mass: None,
        }
    }

    pub fn with_subjectivity(mut self, subjectivity: f64) -> Self {
        self.subjectivity = Some(subjectivity);
        self
    }

    pub fn with_mass(mut self, mass: ValenceMass) -> Self {
        self.mass = Some(mass);
        self
    }
}

/// A text → sentiment signal capability
///
/// Implemented by the lexicon analyzers; tests substitute their own.
pub trait SentimentModel: Send + Sync {
    /// Short model name used in logs
    fn name(&self) -> &str;

    /// Score a single text
    fn analyze(&self, text: &str) -> SentimentSignal;
}

impl<F> SentimentModel for F
where
    F: Fn(&str) -> SentimentSignal + Send + Sync,
{
    fn name(&self) -> &str {
        "fn"
    }

    fn analyze(&self, text: &str) -> SentimentSignal {
        self(text)
    }
}
