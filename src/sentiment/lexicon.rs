//! # Valence Lexicon
//!
//! Lexicon-and-rule based sentiment analysis producing a normalized compound
//! score plus positive/negative/neutral proportions.
//!
//! Word valences are on a -4..4 scale. Rules applied on top of the lookup:
//! booster/dampener words, negation (including `n't` contractions), "least",
//! contrastive "but", ALL-CAPS emphasis in mixed-case text, and `!`/`?`
//! emphasis.

use super::model::{SentimentModel, SentimentSignal, ValenceMass};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Booster increment
const B_INCR: f64 = 0.293;
/// Dampener decrement
const B_DECR: f64 = -0.293;
/// ALL-CAPS emphasis increment
const C_INCR: f64 = 0.733;
/// Negation scalar
const N_SCALAR: f64 = -0.74;
/// Normalization constant for the compound score
const ALPHA: f64 = 15.0;

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("clean", 1.7),
    ("comfortable", 1.5),
    ("cool", 1.3),
    ("delicious", 2.7),
    ("delight", 2.9),
    ("delighted", 2.6),
    ("easy", 1.9),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fine", 0.8),
    ("fresh", 1.3),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("healthy", 1.7),
    ("helpful", 1.8),
    ("hope", 1.9),
    ("impressed", 2.1),
    ("like", 1.5),
    ("liked", 1.8),
    ("likes", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("loves", 2.7),
    ("nice", 1.8),
    ("ok", 1.2),
    ("okay", 0.9),
    ("outstanding", 3.0),
    ("perfect", 2.7),
    ("perfectly", 3.2),
    ("pleasant", 2.3),
    ("pleased", 1.9),
    ("positive", 2.6),
    ("pretty", 2.2),
    ("recommend", 1.5),
    ("recommended", 1.7),
    ("reliable", 1.6),
    ("satisfied", 1.8),
    ("smile", 1.5),
    ("strong", 2.3),
    ("super", 2.9),
    ("superb", 3.1),
    ("sweet", 2.0),
    ("tasty", 2.1),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("useful", 1.9),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("wow", 2.8),
    ("yum", 2.2),
    ("yummy", 2.4),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("avoid", -1.2),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bitter", -1.8),
    ("bland", -0.9),
    ("boring", -1.3),
    ("broke", -1.8),
    ("broken", -1.9),
    ("complaint", -1.5),
    ("crap", -1.6),
    ("damaged", -2.2),
    ("dead", -3.3),
    ("defective", -1.9),
    ("difficult", -1.5),
    ("dirty", -1.9),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disappointment", -2.3),
    ("disgusting", -2.4),
    ("dislike", -1.6),
    ("fail", -2.5),
    ("failed", -2.3),
    ("fake", -2.1),
    ("gross", -2.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("junk", -1.5),
    ("leak", -1.4),
    ("lost", -1.3),
    ("lousy", -2.5),
    ("mediocre", -1.0),
    ("mess", -1.5),
    ("nasty", -2.4),
    ("no", -1.2),
    ("pain", -2.3),
    ("poor", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("rotten", -2.3),
    ("rude", -2.0),
    ("sad", -2.1),
    ("scam", -2.7),
    ("sick", -2.3),
    ("sorry", -0.3),
    ("spoiled", -1.7),
    ("stale", -1.3),
    ("stink", -1.7),
    ("stupid", -2.4),
    ("terrible", -2.1),
    ("ugly", -2.3),
    ("unfortunately", -1.8),
    ("unhappy", -1.8),
    ("upset", -1.6),
    ("useless", -1.8),
    ("waste", -1.8),
    ("wasted", -2.2),
    ("weak", -1.9),
    ("weird", -0.7),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
    ("yuck", -1.8),
];

const BOOSTERS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
    "deeply", "enormously", "entirely", "especially", "exceptionally", "extremely",
    "fabulously", "fully", "greatly", "highly", "hugely", "incredibly", "intensely",
    "majorly", "more", "most", "particularly", "purely", "quite", "really",
    "remarkably", "so", "substantially", "thoroughly", "totally", "tremendously",
    "unbelievably", "unusually", "utterly", "very",
];

const DAMPENERS: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "little", "marginally",
    "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont",
    "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt",
    "never", "none", "nope", "nor", "not", "nothing", "nowhere", "oughtnt", "shant",
    "shouldnt", "uhuh", "wasnt", "werent", "without", "wont", "wouldnt", "rarely",
    "seldom", "despite",
];

/// Scores produced by the valence lexicon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValenceScores {
    /// Normalized aggregate polarity (-1 to 1), rounded to 4 decimals
    pub compound: f64,
    /// Positive share, rounded to 3 decimals
    pub positive: f64,
    /// Negative share, rounded to 3 decimals
    pub negative: f64,
    /// Neutral share, rounded to 3 decimals
    pub neutral: f64,
}

impl ValenceScores {
    pub fn mass(&self) -> ValenceMass {
        ValenceMass {
            positive: self.positive,
            negative: self.negative,
            neutral: self.neutral,
        }
    }
}

/// Valence sentiment lexicon
pub struct ValenceLexicon {
    /// Word to valence mapping
    words: HashMap<String, f64>,
    /// Booster (positive) and dampener (negative) increments
    boosters: HashMap<String, f64>,
    /// Negation words
    negations: HashSet<String>,
}

impl Default for ValenceLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl ValenceLexicon {
    /// Create a lexicon with the built-in review vocabulary
    pub fn new() -> Self {
        let words = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS)
            .map(|&(word, valence)| (word.to_string(), valence))
            .collect();

        let boosters = BOOSTERS
            .iter()
            .map(|&w| (w.to_string(), B_INCR))
            .chain(DAMPENERS.iter().map(|&w| (w.to_string(), B_DECR)))
            .collect();

        let negations = NEGATIONS.iter().map(|&w| w.to_string()).collect();

        Self {
            words,
            boosters,
            negations,
        }
    }

    /// Get valence for a word
    pub fn get_valence(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    /// Check if a word negates what follows
    pub fn is_negation(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.negations.contains(&lower) || lower.contains("n't")
    }

    /// Get booster/dampener increment
    pub fn get_booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(&word.to_lowercase()).copied()
    }

    /// Add a custom word to the lexicon
    pub fn add_word(&mut self, word: &str, valence: f64) {
        self.words.insert(word.to_lowercase(), valence);
    }

    fn in_lexicon(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    /// Score a text
    pub fn analyze(&self, text: &str) -> ValenceScores {
        let tokens = tokenize(text);
        let lower: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let cap_diff = is_cap_diff(&tokens);

        let mut sentiments: Vec<f64> = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            let is_modifier = self.boosters.contains_key(&lower[i])
                || (lower[i] == "kind" && lower.get(i + 1).is_some_and(|w| w == "of"));
            if is_modifier {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.word_valence(&tokens, &lower, i, cap_diff));
        }

        apply_but_rule(&lower, &mut sentiments);
        score_valence(&sentiments, text)
    }

    /// Valence of token `i` in context
    fn word_valence(&self, tokens: &[String], lower: &[String], i: usize, cap_diff: bool) -> f64 {
        let Some(base) = self.words.get(&lower[i]).copied() else {
            return 0.0;
        };
        let mut valence = base;

        // "no" directly before another lexicon word acts as negation, not as a word
        if lower[i] == "no" && lower.get(i + 1).is_some_and(|w| self.in_lexicon(w)) {
            valence = 0.0;
        }
        if (i > 0 && lower[i - 1] == "no")
            || (i > 1 && lower[i - 2] == "no")
            || (i > 2 && lower[i - 3] == "no" && (lower[i - 1] == "or" || lower[i - 1] == "nor"))
        {
            valence = base * N_SCALAR;
        }

        if is_upper(&tokens[i]) && cap_diff {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for start in 0..3 {
            if i <= start {
                break;
            }
            let prev = i - (start + 1);
            if self.in_lexicon(&lower[prev]) {
                continue;
            }
            let mut scalar = self.booster_scalar(&tokens[prev], valence, cap_diff);
            if start == 1 {
                scalar *= 0.95;
            } else if start == 2 {
                scalar *= 0.9;
            }
            valence += scalar;
            valence = self.negation_check(valence, lower, start, i);
        }

        self.least_check(valence, lower, i)
    }

    fn booster_scalar(&self, word: &str, valence: f64, cap_diff: bool) -> f64 {
        let Some(mut scalar) = self.get_booster(word) else {
            return 0.0;
        };
        if valence < 0.0 {
            scalar = -scalar;
        }
        if is_upper(word) && cap_diff {
            scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
        }
        scalar
    }

    fn negation_check(&self, valence: f64, lower: &[String], start: usize, i: usize) -> f64 {
        let is_so_this = |w: &str| w == "so" || w == "this";
        match start {
            0 => {
                if self.is_negation(&lower[i - 1]) {
                    return valence * N_SCALAR;
                }
            }
            1 => {
                if lower[i - 2] == "never" && is_so_this(&lower[i - 1]) {
                    return valence * 1.25;
                }
                if lower[i - 2] == "without" && lower[i - 1] == "doubt" {
                    return valence;
                }
                if self.is_negation(&lower[i - 2]) {
                    return valence * N_SCALAR;
                }
            }
            _ => {
                if lower[i - 3] == "never"
                    && (is_so_this(&lower[i - 2]) || is_so_this(&lower[i - 1]))
                {
                    return valence * 1.25;
                }
                if lower[i - 3] == "without" && (lower[i - 2] == "doubt" || lower[i - 1] == "doubt") {
                    return valence;
                }
                if self.is_negation(&lower[i - 3]) {
                    return valence * N_SCALAR;
                }
            }
        }
        valence
    }

    /// "least" flips the following word unless it is "at least" / "very least"
    fn least_check(&self, valence: f64, lower: &[String], i: usize) -> f64 {
        if i > 0 && lower[i - 1] == "least" && !self.in_lexicon(&lower[i - 1]) {
            if i > 1 && (lower[i - 2] == "at" || lower[i - 2] == "very") {
                return valence;
            }
            return valence * N_SCALAR;
        }
        valence
    }
}

impl SentimentModel for ValenceLexicon {
    fn name(&self) -> &str {
        "vader"
    }

    fn analyze(&self, text: &str) -> SentimentSignal {
        let scores = ValenceLexicon::analyze(self, text);
        SentimentSignal::new(scores.compound).with_mass(scores.mass())
    }
}

/// Split on whitespace, stripping surrounding punctuation from words longer
/// than two characters (short tokens such as emoticons are kept verbatim)
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token.to_string()
            } else {
                stripped.to_string()
            }
        })
        .collect()
}

fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// Some, but not all, tokens are ALL CAPS
fn is_cap_diff(tokens: &[String]) -> bool {
    let upper = tokens.iter().filter(|t| is_upper(t)).count();
    upper > 0 && upper < tokens.len()
}

/// Sentiment before "but" is halved, sentiment after it is boosted by half
fn apply_but_rule(lower: &[String], sentiments: &mut [f64]) {
    let Some(but) = lower.iter().position(|w| w == "but") else {
        return;
    };
    for (i, s) in sentiments.iter_mut().enumerate() {
        if i < but {
            *s *= 0.5;
        } else if i > but {
            *s *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + question_amp
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn score_valence(sentiments: &[f64], text: &str) -> ValenceScores {
    if sentiments.is_empty() {
        return ValenceScores {
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
        };
    }

    let amplifier = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += amplifier;
    } else if sum < 0.0 {
        sum -= amplifier;
    }
    let compound = normalize(sum);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }
    if pos_sum > neg_sum.abs() {
        pos_sum += amplifier;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= amplifier;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    ValenceScores {
        compound: round_to(compound, 4),
        positive: round_to((pos_sum / total).abs(), 3),
        negative: round_to((neg_sum / total).abs(), 3),
        neutral: round_to((neu_count / total).abs(), 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_valences() {
        let lexicon = ValenceLexicon::new();
        assert!(lexicon.get_valence("great").unwrap() > 0.0);
        assert!(lexicon.get_valence("terrible").unwrap() < 0.0);
        assert!(lexicon.get_valence("coffee").is_none());
    }

    #[test]
    fn test_custom_word() {
        let mut lexicon = ValenceLexicon::new();
        assert_eq!(lexicon.analyze("zesty coffee").compound, 0.0);

        lexicon.add_word("Zesty", 1.5);
        assert_eq!(lexicon.get_valence("zesty"), Some(1.5));
        // 1.5 / sqrt(1.5^2 + 15)
        assert!((lexicon.analyze("zesty coffee").compound - 0.3612).abs() < 1e-4);
    }

    #[test]
    fn test_negation_words() {
        let lexicon = ValenceLexicon::new();
        assert!(lexicon.is_negation("not"));
        assert!(lexicon.is_negation("didn't"));
        assert!(lexicon.is_negation("never"));
        assert!(!lexicon.is_negation("great"));
    }

    #[test]
    fn test_single_positive_word() {
        let lexicon = ValenceLexicon::new();
        let scores = lexicon.analyze("this coffee is great");
        assert!((scores.compound - 0.6249).abs() < 1e-4);
        assert!(scores.positive > 0.5);
        assert_eq!(scores.negative, 0.0);
    }

    #[test]
    fn test_negation_flips() {
        let lexicon = ValenceLexicon::new();
        assert!(lexicon.analyze("this coffee is great").compound > 0.05);
        assert!(lexicon.analyze("this coffee is not great").compound < -0.05);
    }

    #[test]
    fn test_no_before_lexicon_word() {
        let lexicon = ValenceLexicon::new();
        assert!(lexicon.analyze("no problems with this order at all").compound > 0.05);
    }

    #[test]
    fn test_booster_increases_intensity() {
        let lexicon = ValenceLexicon::new();
        let plain = lexicon.analyze("the coffee is great");
        let boosted = lexicon.analyze("the coffee is really great");
        assert!(boosted.compound > plain.compound);

        let plain_neg = lexicon.analyze("the coffee is bad");
        let boosted_neg = lexicon.analyze("the coffee is very bad");
        assert!(boosted_neg.compound < plain_neg.compound);
    }

    #[test]
    fn test_but_shifts_weight() {
        let lexicon = ValenceLexicon::new();
        let scores = lexicon.analyze("the taste is great but the price is bad");
        assert!(scores.compound < 0.0);
    }

    #[test]
    fn test_exclamation_emphasis() {
        let lexicon = ValenceLexicon::new();
        let plain = lexicon.analyze("the coffee is great");
        let excited = lexicon.analyze("the coffee is great!!");
        assert!(excited.compound > plain.compound);
    }

    #[test]
    fn test_caps_emphasis() {
        let lexicon = ValenceLexicon::new();
        let plain = lexicon.analyze("the coffee is great");
        let shouted = lexicon.analyze("the coffee is GREAT");
        assert!(shouted.compound > plain.compound);
    }

    #[test]
    fn test_mass_sums_to_one() {
        let lexicon = ValenceLexicon::new();
        for text in [
            "the coffee is great",
            "terrible packaging and stale taste, but good price",
            "the box has twelve cans inside it",
        ] {
            let s = lexicon.analyze(text);
            assert!((s.positive + s.negative + s.neutral - 1.0).abs() < 0.002, "{text}");
            assert!((-1.0..=1.0).contains(&s.compound));
        }
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let lexicon = ValenceLexicon::new();
        let scores = lexicon.analyze("   ");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neutral, 1.0);
    }

    #[test]
    fn test_model_signal() {
        let lexicon = ValenceLexicon::new();
        let signal = SentimentModel::analyze(&lexicon, "this coffee is great");
        assert!(signal.polarity > 0.0);
        assert!(signal.mass.is_some());
        assert!(signal.subjectivity.is_none());
    }
}
