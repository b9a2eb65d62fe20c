//! Rule-based tokenization on Unicode word boundaries

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Clitic suffixes split off the end of a word ("don't" -> "do" + "n't")
const CLITICS: &[&str] = &["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

/// A token before tagging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawToken {
    pub text: String,
    /// Byte offset into the source text
    pub start: usize,
    pub end: usize,
    /// Followed by a single space that was absorbed into this token
    pub whitespace: bool,
    pub is_space: bool,
    pub sentence_start: bool,
}

#[derive(Debug, Default, Clone)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    pub fn tokenize(&self, text: &str) -> Vec<RawToken> {
        let mut tokens: Vec<RawToken> = Vec::new();
        let mut space_run: Option<(usize, usize)> = None;

        for (start, segment) in text.split_word_bound_indices() {
            let end = start + segment.len();
            if segment.chars().all(char::is_whitespace) {
                space_run = Some(match space_run {
                    Some((run_start, _)) => (run_start, end),
                    None => (start, end),
                });
                continue;
            }
            if let Some((run_start, run_end)) = space_run.take() {
                self.flush_space(text, run_start, run_end, &mut tokens);
            }
            self.push_word(segment, start, &mut tokens);
        }
        if let Some((run_start, run_end)) = space_run {
            self.flush_space(text, run_start, run_end, &mut tokens);
        }

        mark_sentence_starts(&mut tokens);
        tokens
    }

    /// A single space after a token is absorbed; any other whitespace run becomes a token
    fn flush_space(&self, text: &str, mut start: usize, end: usize, tokens: &mut Vec<RawToken>) {
        if let Some(prev) = tokens.last_mut() {
            if !prev.is_space && text[start..end].starts_with(' ') {
                prev.whitespace = true;
                start += 1;
            }
        }
        if start < end {
            tokens.push(RawToken {
                text: text[start..end].to_string(),
                start,
                end,
                whitespace: false,
                is_space: true,
                sentence_start: false,
            });
        }
    }

    fn push_word(&self, segment: &str, start: usize, tokens: &mut Vec<RawToken>) {
        let normalized = segment.replace('\u{2019}', "'");
        let lower = normalized.to_lowercase();
        for clitic in CLITICS {
            if lower.len() > clitic.len() && lower.ends_with(clitic) {
                // Count in chars: a curly apostrophe is wider than ' in bytes
                let clitic_chars = clitic.chars().count();
                let split_char = segment.chars().count() - clitic_chars;
                let split_byte = segment
                    .char_indices()
                    .nth(split_char)
                    .map(|(i, _)| i)
                    .unwrap_or(segment.len());
                let (head, tail) = segment.split_at(split_byte);
                tokens.push(word_token(head, start));
                tokens.push(word_token(tail, start + split_byte));
                return;
            }
        }
        tokens.push(word_token(segment, start));
    }
}

fn word_token(text: &str, start: usize) -> RawToken {
    RawToken {
        text: text.to_string(),
        start,
        end: start + text.len(),
        whitespace: false,
        is_space: false,
        sentence_start: false,
    }
}

fn mark_sentence_starts(tokens: &mut [RawToken]) {
    let mut at_boundary = true;
    for token in tokens.iter_mut() {
        if token.is_space {
            if token.text.contains("\n\n") {
                at_boundary = true;
            }
            continue;
        }
        if at_boundary && !is_closing_punct(&token.text) {
            token.sentence_start = true;
            at_boundary = false;
        }
        if matches!(token.text.as_str(), "." | "!" | "?" | "...") {
            at_boundary = true;
        }
    }
}

fn is_closing_punct(text: &str) -> bool {
    matches!(text, "\"" | "'" | ")" | "]" | "\u{201D}")
}

/// Orthographic shape: X upper, x lower, d digit, other characters kept; runs capped at 4
pub fn word_shape(text: &str) -> String {
    let mut shape = String::new();
    let mut last: Option<char> = None;
    let mut seq = 0;
    for c in text.chars() {
        let shape_char = if c.is_alphabetic() {
            if c.is_uppercase() { 'X' } else { 'x' }
        } else if c.is_numeric() {
            'd'
        } else {
            c
        };
        if Some(shape_char) == last {
            seq += 1;
        } else {
            seq = 0;
            last = Some(shape_char);
        }
        if seq < 4 {
            shape.push(shape_char);
        }
    }
    shape
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[RawToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_basic_tokenization() {
        let tokens = Tokenizer::new().tokenize("Apple is buying a U.K. startup for $1 billion.");
        let words = texts(&tokens);
        assert_eq!(words[0], "Apple");
        assert!(words.contains(&"$"));
        assert!(words.contains(&"billion"));
        assert_eq!(*words.last().unwrap(), ".");
        assert!(tokens[0].whitespace);
        assert!(tokens.iter().all(|t| !t.is_space));
    }

    #[test]
    fn test_contractions_split() {
        let tokens = Tokenizer::new().tokenize("I don't think it's done");
        assert_eq!(texts(&tokens), vec!["I", "do", "n't", "think", "it", "'s", "done"]);
        let nt = &tokens[2];
        assert_eq!(nt.start, 4);
        assert_eq!(nt.end, 7);
    }

    #[test]
    fn test_whitespace_tokens() {
        let tokens = Tokenizer::new().tokenize("One.\n\nTwo");
        assert_eq!(texts(&tokens), vec!["One", ".", "\n\n", "Two"]);
        assert!(tokens[2].is_space);
        assert!(tokens[3].sentence_start);
    }

    #[test]
    fn test_offsets_cover_text() {
        let text = "Hello, wörld! Ça va?";
        for token in Tokenizer::new().tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_word_shape() {
        assert_eq!(word_shape("Apple"), "Xxxxx");
        assert_eq!(word_shape("Sebastian"), "Xxxxx");
        assert_eq!(word_shape("2023"), "dddd");
        assert_eq!(word_shape("U.K."), "X.X.");
        assert_eq!(word_shape("$"), "$");
        assert_eq!(word_shape("iPhone"), "xXxxxx");
    }
}
