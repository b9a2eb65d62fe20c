//! Keyword frequency over whitespace-separated tokens

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Words with their counts, most frequent first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordFrequency {
    pub entries: Vec<(String, usize)>,
}

impl KeywordFrequency {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }
}

/// The `n` most common tokens. Counting is case-sensitive and ties keep
/// the order in which the words first appeared.
pub fn get_most_common_tokens(text: &str, n: usize) -> KeywordFrequency {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, word) in text.split_whitespace().enumerate() {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    KeywordFrequency {
        entries: ranked
            .into_iter()
            .take(n)
            .map(|(word, count, _)| (word.to_string(), count))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_order() {
        let freq = get_most_common_tokens("b a b c a b d", 3);
        assert_eq!(
            freq.entries,
            vec![("b".to_string(), 3), ("a".to_string(), 2), ("c".to_string(), 1)]
        );
    }

    #[test]
    fn test_never_exceeds_n() {
        let text = "one two three four five six seven";
        for n in 0..10 {
            assert!(get_most_common_tokens(text, n).len() <= n);
        }
        assert!(get_most_common_tokens("", 5).is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        let freq = get_most_common_tokens("Cat cat cat", 5);
        assert_eq!(freq.get("cat"), Some(2));
        assert_eq!(freq.get("Cat"), Some(1));
    }
}
