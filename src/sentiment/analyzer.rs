//! # Sentiment Scorer
//!
//! Second pipeline stage: runs both analyzers over every cleaned review and
//! labels it from the compound score.

use super::lexicon::ValenceLexicon;
use super::model::{SentimentModel, ValenceMass};
use super::pattern::PatternLexicon;
use crate::data::ReviewTable;
use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

impl SentimentCategory {
    /// All categories, in reporting order
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Positive,
        SentimentCategory::Negative,
        SentimentCategory::Neutral,
    ];

    /// Label a compound score
    ///
    /// `>= 0.05` is Positive, `<= -0.05` is Negative, anything between is
    /// Neutral.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= defaults::POSITIVE_THRESHOLD {
            SentimentCategory::Positive
        } else if compound <= defaults::NEGATIVE_THRESHOLD {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "Positive",
            SentimentCategory::Negative => "Negative",
            SentimentCategory::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(SentimentCategory::Positive),
            "negative" => Ok(SentimentCategory::Negative),
            "neutral" => Ok(SentimentCategory::Neutral),
            other => Err(format!("unknown sentiment category: {other}")),
        }
    }
}

/// Per-review sentiment columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    /// Compound valence score (-1 to 1)
    pub compound: f64,
    /// Positive share of valence mass
    pub positive: f64,
    /// Negative share of valence mass
    pub negative: f64,
    /// Neutral share of valence mass
    pub neutral: f64,
    /// Pattern polarity (-1 to 1)
    pub polarity: f64,
    /// Pattern subjectivity (0 to 1)
    pub subjectivity: f64,
    /// Label derived from `compound`
    pub category: SentimentCategory,
}

/// Scorer combining a compound-valence model with a polarity model
pub struct SentimentScorer {
    /// Produces `compound` and the valence mass
    valence: Box<dyn SentimentModel>,
    /// Produces `polarity` and `subjectivity`
    pattern: Box<dyn SentimentModel>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    /// Create a scorer with the built-in lexicons
    pub fn new() -> Self {
        Self {
            valence: Box::new(ValenceLexicon::new()),
            pattern: Box::new(PatternLexicon::new()),
        }
    }

    /// Create a scorer from any two models
    pub fn with_models(
        valence: impl SentimentModel + 'static,
        pattern: impl SentimentModel + 'static,
    ) -> Self {
        Self {
            valence: Box::new(valence),
            pattern: Box::new(pattern),
        }
    }

    /// Names of the two models, for logging
    pub fn model_names(&self) -> (&str, &str) {
        (self.valence.name(), self.pattern.name())
    }

    /// Score a single text
    pub fn score_text(&self, text: &str) -> SentimentScores {
        let valence = self.valence.analyze(text);
        let pattern = self.pattern.analyze(text);
        let mass = valence.mass.unwrap_or_else(ValenceMass::neutral);
        let compound = valence.polarity.clamp(-1.0, 1.0);

        SentimentScores {
            compound,
            positive: mass.positive,
            negative: mass.negative,
            neutral: mass.neutral,
            polarity: pattern.polarity.clamp(-1.0, 1.0),
            subjectivity: pattern.subjectivity.unwrap_or(0.0).clamp(0.0, 1.0),
            category: SentimentCategory::from_compound(compound),
        }
    }

    /// Score every record of a table, appending the sentiment columns
    pub fn score(&self, mut table: ReviewTable) -> ReviewTable {
        for record in &mut table.records {
            record.scores = Some(self.score_text(&record.text));
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReviewRecord;
    use crate::sentiment::SentimentSignal;

    #[test]
    fn test_category_thresholds() {
        assert_eq!(SentimentCategory::from_compound(0.05), SentimentCategory::Positive);
        assert_eq!(SentimentCategory::from_compound(0.9), SentimentCategory::Positive);
        assert_eq!(SentimentCategory::from_compound(-0.05), SentimentCategory::Negative);
        assert_eq!(SentimentCategory::from_compound(-1.0), SentimentCategory::Negative);
        assert_eq!(SentimentCategory::from_compound(0.0), SentimentCategory::Neutral);
        assert_eq!(SentimentCategory::from_compound(0.0499), SentimentCategory::Neutral);
        assert_eq!(SentimentCategory::from_compound(-0.0499), SentimentCategory::Neutral);
    }

    #[test]
    fn test_category_exhaustive() {
        for i in -100..=100 {
            let compound = i as f64 / 100.0;
            let category = SentimentCategory::from_compound(compound);
            let expected = if compound >= 0.05 {
                SentimentCategory::Positive
            } else if compound <= -0.05 {
                SentimentCategory::Negative
            } else {
                SentimentCategory::Neutral
            };
            assert_eq!(category, expected, "compound {compound}");
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Negative".parse::<SentimentCategory>(), Ok(SentimentCategory::Negative));
        assert_eq!(" positive ".parse::<SentimentCategory>(), Ok(SentimentCategory::Positive));
        assert!("Mixed".parse::<SentimentCategory>().is_err());
        assert_eq!(SentimentCategory::Neutral.to_string(), "Neutral");
    }

    #[test]
    fn test_mocked_models() {
        let scorer = SentimentScorer::with_models(
            |_: &str| SentimentSignal::new(-0.3),
            |_: &str| SentimentSignal::new(0.2).with_subjectivity(0.4),
        );
        let scores = scorer.score_text("anything at all");
        assert_eq!(scores.compound, -0.3);
        assert_eq!(scores.category, SentimentCategory::Negative);
        assert_eq!(scores.neutral, 1.0);
        assert_eq!(scores.polarity, 0.2);
        assert_eq!(scores.subjectivity, 0.4);
    }

    #[test]
    fn test_score_table_preserves_order() {
        let table = ReviewTable::from_records(vec![
            ReviewRecord::new("this coffee is great, i love it", 5),
            ReviewRecord::new("terrible taste and awful smell", 1),
            ReviewRecord::new("the box contains twelve cans", 3),
        ]);
        let scored = SentimentScorer::new().score(table);

        assert_eq!(scored.len(), 3);
        assert_eq!(scored.records[0].sentiment(), Some(SentimentCategory::Positive));
        assert_eq!(scored.records[1].sentiment(), Some(SentimentCategory::Negative));
        assert_eq!(scored.records[2].sentiment(), Some(SentimentCategory::Neutral));
        assert_eq!(scored.records[1].text, "terrible taste and awful smell");
    }
}
