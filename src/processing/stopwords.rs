//! Stopword filtering
//!
//! Backed by the `stop-words` crate. Lookups are case-insensitive.

use std::collections::HashSet;
use stop_words::{get, LANGUAGE};

#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: HashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl StopwordFilter {
    /// Create a new stopword filter for the given language
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        if self.stopwords.contains(&lower) {
            return true;
        }
        // Curly apostrophes spell the same contraction
        lower.contains('\u{2019}') && self.stopwords.contains(&lower.replace('\u{2019}', "'"))
    }

    /// Drop stopwords from whitespace-separated text, rejoining with single spaces
    pub fn remove_stopwords(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|word| !self.is_stopword(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Count whitespace-separated words that are stopwords
    pub fn count_stopwords(&self, text: &str) -> usize {
        text.split_whitespace().filter(|word| self.is_stopword(word)).count()
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(language: &str) -> HashSet<String> {
        let lang = match language.to_lowercase().as_str() {
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            _ => LANGUAGE::English,
        };

        get(lang).iter().map(|s| s.to_string().to_lowercase()).collect()
    }
}
