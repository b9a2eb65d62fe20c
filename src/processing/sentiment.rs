//! Lexicon-based sentiment scoring
//!
//! Each adjective in the lexicon carries a polarity in `[-1, 1]` and a
//! subjectivity in `[0, 1]`. An intensifier directly before a scored word
//! multiplies both values. A negation within the three preceding words flips
//! the polarity and halves it. The document score is the mean over all scored
//! words, clamped to the valid ranges.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6), ("great", 0.8, 0.75), ("excellent", 1.0, 1.0), ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0), ("wonderful", 1.0, 1.0), ("fantastic", 0.4, 0.9), ("brilliant", 0.9, 1.0),
    ("perfect", 1.0, 1.0), ("best", 1.0, 0.3), ("better", 0.5, 0.5), ("nice", 0.6, 1.0),
    ("happy", 0.8, 1.0), ("glad", 0.5, 1.0), ("beautiful", 0.85, 1.0), ("lovely", 0.5, 0.75),
    ("pleasant", 0.73, 0.97), ("delightful", 1.0, 1.0), ("superb", 1.0, 1.0), ("outstanding", 0.5, 0.65),
    ("impressive", 1.0, 1.0), ("positive", 0.23, 0.55), ("successful", 0.75, 0.95), ("fine", 0.42, 0.5),
    ("favorite", 0.5, 1.0), ("fun", 0.3, 0.2), ("funny", 0.25, 1.0), ("interesting", 0.5, 0.5),
    ("exciting", 0.3, 0.8), ("useful", 0.3, 0.0), ("helpful", 0.5, 0.5), ("easy", 0.43, 0.83),
    ("clean", 0.37, 0.69), ("smart", 0.21, 0.64), ("kind", 0.6, 0.9), ("friendly", 0.38, 0.5),
    ("fast", 0.2, 0.6), ("strong", 0.43, 0.73), ("rich", 0.38, 0.62), ("cool", 0.35, 0.65),
    ("right", 0.29, 0.54), ("correct", 0.0, 0.0), ("true", 0.35, 0.65), ("important", 0.4, 1.0),
    ("free", 0.4, 0.8), ("popular", 0.6, 0.9), ("famous", 0.5, 1.0), ("safe", 0.5, 0.5),
    ("healthy", 0.5, 0.5), ("calm", 0.3, 0.75), ("proud", 0.8, 1.0), ("grateful", 0.8, 1.0),
    ("bad", -0.7, 0.67), ("terrible", -1.0, 1.0), ("awful", -1.0, 1.0), ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0), ("worse", -0.4, 0.6), ("poor", -0.4, 0.6), ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0), ("ugly", -0.7, 1.0), ("boring", -1.0, 1.0), ("dull", -0.31, 0.58),
    ("stupid", -0.8, 1.0), ("dumb", -0.38, 0.5), ("wrong", -0.5, 0.9), ("difficult", -0.5, 1.0),
    ("hard", -0.29, 0.54), ("slow", -0.3, 0.39), ("weak", -0.38, 0.63), ("dangerous", -0.6, 0.9),
    ("dirty", -0.6, 0.8), ("disappointing", -0.6, 0.7), ("annoying", -0.8, 0.9), ("painful", -0.7, 0.9),
    ("sick", -0.71, 0.86), ("unhappy", -0.6, 0.9), ("negative", -0.3, 0.4), ("useless", -0.5, 0.0),
    ("broken", -0.4, 0.4), ("nasty", -1.0, 1.0), ("evil", -1.0, 1.0), ("cruel", -1.0, 1.0),
    ("lazy", -0.25, 1.0), ("expensive", -0.5, 0.7), ("cheap", 0.4, 0.7), ("mediocre", -0.3, 0.7),
    ("scary", -0.5, 1.0), ("unfortunate", -0.5, 1.0), ("hopeless", -0.8, 0.9), ("miserable", -1.0, 1.0),
    ("quick", 0.33, 0.5), ("new", 0.14, 0.45), ("old", 0.1, 0.2), ("big", 0.0, 0.1),
    ("small", -0.25, 0.4), ("large", 0.21, 0.43), ("little", -0.19, 0.5), ("high", 0.16, 0.54),
    ("low", 0.0, 0.3), ("real", 0.2, 0.3), ("sure", 0.5, 0.89), ("clear", 0.1, 0.38),
];

/// (word, multiplier)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.2), ("extremely", 1.5), ("incredibly", 1.4), ("absolutely", 1.4),
    ("totally", 1.2), ("so", 1.3), ("too", 1.2), ("quite", 1.1), ("highly", 1.3),
    ("remarkably", 1.3), ("particularly", 1.2), ("especially", 1.2), ("truly", 1.2),
    ("slightly", 0.8), ("somewhat", 0.8), ("fairly", 0.9), ("rather", 0.9),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "n't", "neither", "nor", "without"];

/// How many words back a negation still applies
const NEGATION_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl Sentiment {
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.polarity > 0.05 {
            "Positive"
        } else if self.polarity < -0.05 {
            "Negative"
        } else {
            "Neutral"
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sentiment(polarity={:.4}, subjectivity={:.4})",
            self.polarity, self.subjectivity
        )
    }
}

/// One scored word and the modifiers applied to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub words: Vec<String>,
    pub polarity: f64,
    pub subjectivity: f64,
}

pub struct SentimentAnalyzer {
    lexicon: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
    word_pattern: Regex,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            word_pattern: Regex::new(r"[A-Za-z]+(?:['\u{2019}][A-Za-z]+)*")
                .expect("Invalid word regex"),
        }
    }

    /// Adjectives the lexicon can score
    pub fn adjectives(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.lexicon.keys().copied()
    }

    pub fn score(&self, text: &str) -> Sentiment {
        let assessments = self.assess(text);
        if assessments.is_empty() {
            return Sentiment::neutral();
        }
        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|a| a.polarity).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|a| a.subjectivity).sum::<f64>() / n;
        Sentiment {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }

    pub fn assess(&self, text: &str) -> Vec<Assessment> {
        let words = self.words(text);
        let mut assessments = Vec::new();

        for (i, word) in words.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = self.lexicon.get(word.as_str()) else {
                continue;
            };
            let mut span = vec![word.clone()];

            let mut lookback = i;
            if i > 0 {
                if let Some(&multiplier) = self.intensifiers.get(words[i - 1].as_str()) {
                    polarity *= multiplier;
                    subjectivity *= multiplier;
                    span.insert(0, words[i - 1].clone());
                    lookback = i - 1;
                }
            }

            let window_start = lookback.saturating_sub(NEGATION_WINDOW);
            if let Some(negation) = words[window_start..lookback]
                .iter()
                .rev()
                .find(|w| NEGATIONS.contains(&w.as_str()))
            {
                polarity *= -0.5;
                span.insert(0, negation.clone());
            }

            assessments.push(Assessment {
                words: span,
                polarity: polarity.clamp(-1.0, 1.0),
                subjectivity: subjectivity.clamp(0.0, 1.0),
            });
        }

        assessments
    }

    /// Lowercased words with "n't" split off as its own word
    fn words(&self, text: &str) -> Vec<String> {
        let mut words = Vec::new();
        for m in self.word_pattern.find_iter(text) {
            let word = m.as_str().to_lowercase().replace('\u{2019}', "'");
            match word.strip_suffix("n't") {
                Some(head) if !head.is_empty() => {
                    words.push(head.to_string());
                    words.push("n't".to_string());
                }
                _ => words.push(word),
            }
        }
        words
    }
}
