//! Character and word level statistics

use crate::processing::stopwords::StopwordFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const VOWELS: &str = "aeiou";
pub const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStats {
    #[serde(rename = "Length of Text")]
    pub length: usize,
    #[serde(rename = "Num of Vowels")]
    pub vowels: usize,
    #[serde(rename = "Num of Consonants")]
    pub consonants: usize,
    #[serde(rename = "Num of Stopwords")]
    pub stopwords: usize,
    #[serde(rename = "Stats of Vowels")]
    pub vowel_counts: BTreeMap<char, usize>,
    #[serde(rename = "Stats of Consonants")]
    pub consonant_counts: BTreeMap<char, usize>,
    #[serde(rename = "Num of Words")]
    pub word_count: usize,
    #[serde(rename = "Num of Sentences")]
    pub sentence_count: usize,
}

/// Letters are counted case-insensitively; every vowel and consonant has an
/// entry even when its count is zero.
pub fn word_stats(text: &str, stopwords: &StopwordFilter) -> WordStats {
    let mut vowel_counts: BTreeMap<char, usize> = VOWELS.chars().map(|c| (c, 0)).collect();
    let mut consonant_counts: BTreeMap<char, usize> = CONSONANTS.chars().map(|c| (c, 0)).collect();

    for c in text.chars().flat_map(char::to_lowercase) {
        if let Some(count) = vowel_counts.get_mut(&c) {
            *count += 1;
        } else if let Some(count) = consonant_counts.get_mut(&c) {
            *count += 1;
        }
    }

    WordStats {
        length: text.chars().count(),
        vowels: vowel_counts.values().sum(),
        consonants: consonant_counts.values().sum(),
        stopwords: stopwords.count_stopwords(text),
        vowel_counts,
        consonant_counts,
        word_count: text.split_whitespace().count(),
        sentence_count: count_sentences(text),
    }
}

fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut in_sentence = false;
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') {
            if in_sentence {
                count += 1;
            }
            in_sentence = false;
        } else if c.is_alphanumeric() {
            in_sentence = true;
        }
    }
    if in_sentence {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_counts() {
        let filter = StopwordFilter::from_list(&["the"]);
        let stats = word_stats("The cat ate.", &filter);
        assert_eq!(stats.length, 12);
        assert_eq!(stats.vowels, 4);
        assert_eq!(stats.consonants, 5);
        assert_eq!(stats.vowel_counts[&'a'], 2);
        assert_eq!(stats.vowel_counts[&'u'], 0);
        assert_eq!(stats.consonant_counts[&'t'], 3);
        assert_eq!(stats.stopwords, 1);
        assert_eq!(stats.word_count, 3);
        assert_eq!(stats.sentence_count, 1);
    }

    #[test]
    fn test_maps_are_complete() {
        let stats = word_stats("", &StopwordFilter::default());
        assert_eq!(stats.vowel_counts.len(), 5);
        assert_eq!(stats.consonant_counts.len(), 21);
        assert_eq!(stats.sentence_count, 0);
    }

    #[test]
    fn test_sentence_count() {
        let filter = StopwordFilter::from_list(&[]);
        assert_eq!(word_stats("Hi! How are you? Fine...", &filter).sentence_count, 3);
        assert_eq!(word_stats("no terminal punctuation", &filter).sentence_count, 1);
    }
}
