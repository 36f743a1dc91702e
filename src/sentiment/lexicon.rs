//! Word-level polarity lexicon.
//!
//! Scores text by averaging the polarity of every lexicon word it contains.
//! Intensifiers ("very", "slightly") scale the next word and negations
//! ("not", "never") flip it at half strength, so "not good" is mildly
//! negative rather than as negative as "bad".

use super::PolarityScorer;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap());

/// Factor applied to a word that follows a negation.
const NEGATION_FACTOR: f64 = -0.5;

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("excellent", 1.0),
    ("outstanding", 0.9),
    ("wonderful", 0.9),
    ("best", 0.9),
    ("brilliant", 0.9),
    ("great", 0.8),
    ("amazing", 0.8),
    ("happy", 0.8),
    ("celebrate", 0.7),
    ("celebrated", 0.7),
    ("good", 0.7),
    ("success", 0.7),
    ("successful", 0.7),
    ("win", 0.6),
    ("wins", 0.6),
    ("won", 0.6),
    ("victory", 0.7),
    ("peace", 0.6),
    ("hope", 0.5),
    ("hopeful", 0.5),
    ("welcome", 0.5),
    ("welcomed", 0.5),
    ("praise", 0.6),
    ("praised", 0.6),
    ("boost", 0.5),
    ("growth", 0.5),
    ("gain", 0.4),
    ("gains", 0.4),
    ("improve", 0.5),
    ("improved", 0.5),
    ("improvement", 0.5),
    ("recovery", 0.4),
    ("rescue", 0.4),
    ("rescued", 0.4),
    ("safe", 0.5),
    ("strong", 0.4),
    ("support", 0.3),
    ("benefit", 0.5),
    ("benefits", 0.5),
    ("positive", 0.5),
    ("progress", 0.5),
    ("record", 0.2),
    ("relief", 0.4),
    ("innovative", 0.5),
    ("achieve", 0.5),
    ("achieved", 0.5),
    ("new", 0.1),
    ("better", 0.5),
    ("love", 0.6),
    ("nice", 0.6),
    ("fair", 0.4),
    ("free", 0.4),
    ("stable", 0.3),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("terrible", -1.0),
    ("horrible", -1.0),
    ("worst", -1.0),
    ("disaster", -0.9),
    ("tragedy", -0.9),
    ("tragic", -0.9),
    ("killed", -0.8),
    ("dead", -0.8),
    ("death", -0.8),
    ("deaths", -0.8),
    ("murder", -0.9),
    ("attack", -0.7),
    ("attacks", -0.7),
    ("violence", -0.8),
    ("war", -0.7),
    ("crisis", -0.7),
    ("bad", -0.7),
    ("fear", -0.6),
    ("fears", -0.6),
    ("injured", -0.6),
    ("accident", -0.6),
    ("crash", -0.7),
    ("fraud", -0.8),
    ("scam", -0.8),
    ("corruption", -0.7),
    ("arrested", -0.5),
    ("protest", -0.3),
    ("protests", -0.3),
    ("conflict", -0.6),
    ("failure", -0.6),
    ("failed", -0.5),
    ("fail", -0.5),
    ("loss", -0.5),
    ("losses", -0.5),
    ("decline", -0.4),
    ("fall", -0.3),
    ("drop", -0.3),
    ("weak", -0.4),
    ("risk", -0.3),
    ("concern", -0.4),
    ("concerns", -0.4),
    ("worried", -0.5),
    ("warning", -0.4),
    ("threat", -0.6),
    ("threats", -0.6),
    ("damage", -0.6),
    ("damaged", -0.6),
    ("flood", -0.5),
    ("floods", -0.5),
    ("poor", -0.5),
    ("angry", -0.6),
    ("sad", -0.6),
    ("hate", -0.8),
    ("wrong", -0.5),
    ("problem", -0.4),
    ("problems", -0.4),
    ("shortage", -0.4),
    ("negative", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("very", 1.3),
    ("really", 1.3),
    ("highly", 1.3),
    ("deeply", 1.3),
    ("most", 1.2),
    ("quite", 1.1),
    ("somewhat", 0.7),
    ("fairly", 0.7),
    ("slightly", 0.5),
    ("barely", 0.4),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nor", "neither", "without", "hardly", "don't", "doesn't", "didn't",
    "isn't", "wasn't", "aren't", "weren't", "won't", "can't", "cannot", "couldn't", "shouldn't",
];

/// A polarity lexicon with intensifier and negation handling.
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl Lexicon {
    /// Add or replace a word, clamping its polarity to `[-1.0, 1.0]`.
    pub fn with_word(mut self, word: &str, polarity: f64) -> Self {
        self.words.insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
        self
    }

    /// Apply every entry of `overrides` with [`Lexicon::with_word`].
    ///
    /// # Arguments
    ///
    /// * `overrides` - Word to polarity map, usually `lexicon_overrides` from the site config
    ///
    /// # Returns
    ///
    /// The lexicon with each word added or replaced.
    pub fn with_overrides(self, overrides: &BTreeMap<String, f64>) -> Self {
        overrides
            .iter()
            .fold(self, |lexicon, (word, polarity)| lexicon.with_word(word, *polarity))
    }

    /// Number of scored words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        let words = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS)
            .map(|(w, p)| (w.to_string(), *p))
            .collect();
        let intensifiers = INTENSIFIERS.iter().map(|(w, f)| (w.to_string(), *f)).collect();
        let negations = NEGATIONS.iter().map(|w| w.to_string()).collect();
        Self {
            words,
            intensifiers,
            negations,
        }
    }
}

impl PolarityScorer for Lexicon {
    fn polarity(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let mut scores = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for token in WORD_RE.find_iter(&lower) {
            let word = token.as_str();
            if self.negations.contains(word) {
                negated = true;
                continue;
            }
            if let Some(factor) = self.intensifiers.get(word) {
                intensity *= factor;
                continue;
            }
            if let Some(base) = self.words.get(word) {
                let mut score = base * intensity;
                if negated {
                    score *= NEGATION_FACTOR;
                }
                scores.push(score.clamp(-1.0, 1.0));
            }
            // Modifiers only reach the token right after them.
            intensity = 1.0;
            negated = false;
        }

        if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_lexicon_words_is_zero() {
        assert_eq!(Lexicon::default().polarity("The committee met on Tuesday."), 0.0);
        assert_eq!(Lexicon::default().polarity(""), 0.0);
    }

    #[test]
    fn test_single_word_polarity() {
        let lexicon = Lexicon::default();
        assert!(approx(lexicon.polarity("good"), 0.7));
        assert!(approx(lexicon.polarity("Bad!"), -0.7));
    }

    #[test]
    fn test_mean_over_hits() {
        let lexicon = Lexicon::default();
        // (0.7 + -0.7) / 2
        assert!(approx(lexicon.polarity("good news and bad news"), 0.0));
    }

    #[test]
    fn test_negation_flips_at_half_strength() {
        let lexicon = Lexicon::default();
        assert!(approx(lexicon.polarity("not good"), -0.35));
        assert!(approx(lexicon.polarity("It isn't bad"), 0.35));
    }

    #[test]
    fn test_intensifier_scales_and_clamps() {
        let lexicon = Lexicon::default();
        assert!(approx(lexicon.polarity("very good"), 0.91));
        assert!(approx(lexicon.polarity("extremely excellent"), 1.0));
        assert!(approx(lexicon.polarity("slightly bad"), -0.35));
    }

    #[test]
    fn test_modifiers_only_reach_next_token() {
        let lexicon = Lexicon::default();
        // "not" is consumed by "the", leaving "good" unmodified.
        assert!(approx(lexicon.polarity("not the good one"), 0.7));
    }

    #[test]
    fn test_with_word_adds_and_clamps() {
        let base = Lexicon::default();
        let lexicon = base.clone().with_word("Stellar", 3.0);
        assert_eq!(lexicon.len(), base.len() + 1);
        assert!(approx(lexicon.polarity("stellar"), 1.0));
        assert!(approx(lexicon.polarity("not stellar"), -0.5));
    }

    #[test]
    fn test_with_word_replaces_existing() {
        let lexicon = Lexicon::default().with_word("record", -0.4);
        assert!(approx(lexicon.polarity("a record flood"), -0.45));
    }

    #[test]
    fn test_with_overrides_applies_every_entry() {
        let base = Lexicon::default();
        let overrides = BTreeMap::from([
            ("Stellar".to_string(), 0.6),
            ("good".to_string(), -0.2),
            ("collapse".to_string(), -5.0),
        ]);
        let lexicon = base.clone().with_overrides(&overrides);

        assert!(approx(lexicon.polarity("stellar"), 0.6));
        assert!(approx(lexicon.polarity("good"), -0.2));
        assert!(approx(lexicon.polarity("collapse"), -1.0));
        assert!(lexicon.len() >= base.len() + 1);
    }

    #[test]
    fn test_with_overrides_empty_map_is_identity() {
        let base = Lexicon::default();
        let lexicon = base.clone().with_overrides(&BTreeMap::new());
        assert_eq!(lexicon.len(), base.len());
        assert!(approx(lexicon.polarity("good"), 0.7));
    }

    #[test]
    fn test_is_empty() {
        assert!(!Lexicon::default().is_empty());
        let empty = Lexicon {
            words: HashMap::new(),
            intensifiers: HashMap::new(),
            negations: HashSet::new(),
        };
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.polarity("good"), 0.0);
    }
}
