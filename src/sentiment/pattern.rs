//! # Pattern Lexicon
//!
//! Adjective-lexicon heuristic producing a polarity and a subjectivity
//! score. Each known word is an assessment; intensifiers scale the word that
//! follows them and negation multiplies the next assessment by -0.5. The
//! result is the mean over all assessments.

use super::model::{SentimentModel, SentimentSignal};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Polarity multiplier applied after a negation
const NEGATION_FACTOR: f64 = -0.5;

/// (word, polarity, subjectivity)
const ADJECTIVES: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.667),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("bitter", -0.1, 0.3),
    ("bland", -0.3, 0.6),
    ("broken", -0.4, 0.4),
    ("cheap", 0.4, 0.7),
    ("damaged", -0.4, 0.5),
    ("defective", -0.5, 0.6),
    ("delicious", 1.0, 1.0),
    ("disappointed", -0.75, 0.75),
    ("disappointing", -0.6, 0.7),
    ("disgusting", -1.0, 1.0),
    ("easy", 0.433, 0.833),
    ("excellent", 1.0, 1.0),
    ("expensive", -0.5, 0.7),
    ("fake", -0.5, 1.0),
    ("fantastic", 0.4, 0.9),
    ("fast", 0.2, 0.6),
    ("favorite", 0.5, 1.0),
    ("fine", 0.417, 0.5),
    ("free", 0.4, 0.8),
    ("fresh", 0.3, 0.5),
    ("friendly", 0.375, 0.5),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("hard", -0.292, 0.542),
    ("healthy", 0.5, 0.5),
    ("helpful", 0.4, 0.6),
    ("horrible", -1.0, 1.0),
    ("incredible", 0.9, 0.9),
    ("late", -0.3, 0.6),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("nasty", -1.0, 1.0),
    ("nice", 0.6, 1.0),
    ("ok", 0.5, 0.5),
    ("okay", 0.5, 0.5),
    ("perfect", 1.0, 1.0),
    ("pleased", 0.5, 1.0),
    ("poor", -0.4, 0.6),
    ("rude", -0.3, 0.6),
    ("sad", -0.5, 1.0),
    ("salty", -0.1, 0.4),
    ("satisfied", 0.5, 1.0),
    ("slow", -0.3, 0.4),
    ("stale", -0.5, 0.5),
    ("strong", 0.433, 0.733),
    ("sweet", 0.35, 0.65),
    ("tasty", 0.5, 0.6),
    ("terrible", -1.0, 1.0),
    ("useless", -0.5, 0.2),
    ("weak", -0.375, 0.625),
    ("wonderful", 1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.9),
];

/// (word, polarity, subjectivity, intensity)
const INTENSIFIERS: &[(&str, f64, f64, f64)] = &[
    ("absolutely", 0.2, 0.9, 1.8),
    ("extremely", 0.0, 1.0, 1.5),
    ("incredibly", 0.9, 0.9, 1.5),
    ("pretty", 0.25, 1.0, 1.1),
    ("quite", 0.0, 1.0, 1.1),
    ("really", 0.2, 0.2, 1.2),
    ("slightly", -0.167, 0.167, 0.6),
    ("so", 0.0, 0.0, 1.1),
    ("somewhat", 0.0, 0.5, 0.8),
    ("super", 0.333, 0.667, 1.5),
    ("too", 0.0, 0.0, 1.1),
    ("totally", 0.0, 0.75, 1.3),
    ("very", 0.2, 0.3, 1.3),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "without", "nothing", "none"];

/// A lexicon entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub polarity: f64,
    pub subjectivity: f64,
    /// Multiplier applied to the next word when this one is an intensifier
    pub intensity: f64,
}

impl PatternEntry {
    fn is_intensifier(&self) -> bool {
        self.intensity != 1.0
    }
}

/// Scores produced by the pattern lexicon
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternScores {
    /// Mean polarity (-1 to 1)
    pub polarity: f64,
    /// Mean subjectivity (0 to 1)
    pub subjectivity: f64,
    /// Number of words assessed
    pub assessments: usize,
}

/// Polarity/subjectivity lexicon
pub struct PatternLexicon {
    entries: HashMap<String, PatternEntry>,
}

impl Default for PatternLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternLexicon {
    /// Create a lexicon with the built-in adjectives and intensifiers
    pub fn new() -> Self {
        let adjectives = ADJECTIVES.iter().map(|&(word, polarity, subjectivity)| {
            (
                word.to_string(),
                PatternEntry {
                    polarity,
                    subjectivity,
                    intensity: 1.0,
                },
            )
        });
        let intensifiers = INTENSIFIERS
            .iter()
            .map(|&(word, polarity, subjectivity, intensity)| {
                (
                    word.to_string(),
                    PatternEntry {
                        polarity,
                        subjectivity,
                        intensity,
                    },
                )
            });

        Self {
            entries: adjectives.chain(intensifiers).collect(),
        }
    }

    pub fn get_entry(&self, word: &str) -> Option<&PatternEntry> {
        self.entries.get(&word.to_lowercase())
    }

    /// Add or replace a word
    pub fn add_word(&mut self, word: &str, polarity: f64, subjectivity: f64) {
        self.entries.insert(
            word.to_lowercase(),
            PatternEntry {
                polarity,
                subjectivity,
                intensity: 1.0,
            },
        );
    }

    fn is_negation(word: &str) -> bool {
        NEGATIONS.contains(&word) || word.ends_with("n't")
    }

    /// Score a text
    pub fn analyze(&self, text: &str) -> PatternScores {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\'')
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect();

        let mut assessments: Vec<(f64, f64)> = Vec::new();
        let mut negate = false;
        let mut intensity: Option<f64> = None;

        for (i, word) in words.iter().enumerate() {
            if Self::is_negation(word) {
                negate = true;
                continue;
            }

            let Some(entry) = self.entries.get(word) else {
                intensity = None;
                continue;
            };

            // An intensifier followed by a scored word modifies it instead of
            // being assessed itself
            let next_scored = words
                .get(i + 1)
                .and_then(|next| self.entries.get(next))
                .is_some_and(|next| !next.is_intensifier());
            if entry.is_intensifier() && next_scored {
                intensity = Some(entry.intensity);
                continue;
            }

            let factor = intensity.take().unwrap_or(1.0);
            let mut polarity = entry.polarity * factor;
            let subjectivity = (entry.subjectivity * factor).clamp(0.0, 1.0);
            if negate {
                polarity *= NEGATION_FACTOR;
                negate = false;
            }
            assessments.push((polarity.clamp(-1.0, 1.0), subjectivity));
        }

        if assessments.is_empty() {
            return PatternScores::default();
        }
        let n = assessments.len() as f64;
        PatternScores {
            polarity: assessments.iter().map(|a| a.0).sum::<f64>() / n,
            subjectivity: assessments.iter().map(|a| a.1).sum::<f64>() / n,
            assessments: assessments.len(),
        }
    }
}

impl SentimentModel for PatternLexicon {
    fn name(&self) -> &str {
        "textblob"
    }

    fn analyze(&self, text: &str) -> SentimentSignal {
        let scores = PatternLexicon::analyze(self, text);
        SentimentSignal::new(scores.polarity).with_subjectivity(scores.subjectivity)
    }
}
