//! Rule-based lemmatization keyed on the part-of-speech tag

use crate::processing::lexicon::Lexicon;
use crate::processing::pos_tagger::{PosTag, Tagged};

pub struct Lemmatizer {
    lexicon: Lexicon,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::new(),
        }
    }

    pub fn lemmatize(&self, text: &str, tagged: Tagged) -> String {
        let lower = text.to_lowercase().replace('\u{2019}', "'");
        match tagged.pos {
            PosTag::Punct | PosTag::Num | PosTag::Space | PosTag::Sym | PosTag::X => text.to_string(),
            PosTag::Propn => text.to_string(),
            PosTag::Pron => self
                .lexicon
                .pronoun_lemmas
                .get(lower.as_str())
                .map(|lemma| lemma.to_string())
                .unwrap_or(lower),
            PosTag::Verb | PosTag::Aux => self.verb(&lower, tagged.tag),
            PosTag::Noun => self.noun(&lower),
            PosTag::Adj => self.adjective(&lower, tagged.tag),
            PosTag::Part => match lower.as_str() {
                "n't" => "not".to_string(),
                "'s" => "'s".to_string(),
                _ => lower,
            },
            _ => lower,
        }
    }

    fn verb(&self, word: &str, tag: &str) -> String {
        match word {
            "n't" => return "not".to_string(),
            "'s" if tag == "VBZ" => return "be".to_string(),
            _ => {}
        }
        if tag == "MD" {
            return self
                .lexicon
                .irregular_verbs
                .get(word)
                .map(|&(lemma, _)| lemma.to_string())
                .unwrap_or_else(|| word.to_string());
        }
        if let Some(lemma) = self.lexicon.verb_lemma(word) {
            return lemma;
        }
        for (suffix, replacement) in [("ies", "y"), ("ied", "y"), ("ing", ""), ("ed", ""), ("es", ""), ("s", "")] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.chars().count() >= 3 {
                    if suffix == "s" && (stem.ends_with('s') || stem.ends_with('u')) {
                        break;
                    }
                    return format!("{}{}", stem, replacement);
                }
            }
        }
        word.to_string()
    }

    fn noun(&self, word: &str) -> String {
        if let Some(&singular) = self.lexicon.irregular_nouns.get(word) {
            return singular.to_string();
        }
        if word.chars().count() <= 3 {
            return word.to_string();
        }
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{}y", stem);
        }
        if let Some(stem) = word.strip_suffix("ves") {
            return format!("{}f", stem);
        }
        if let Some(stem) = word.strip_suffix("sses") {
            return format!("{}ss", stem);
        }
        for suffix in ["ches", "shes", "xes", "zes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
        if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is") {
            return word[..word.len() - 1].to_string();
        }
        word.to_string()
    }

    fn adjective(&self, word: &str, tag: &str) -> String {
        if let Some(&(lemma, _)) = self.lexicon.irregular_adjectives.get(word) {
            return lemma.to_string();
        }
        if tag != "JJR" && tag != "JJS" {
            return word.to_string();
        }
        for suffix in ["iest", "ier"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.chars().count() >= 2 {
                    return format!("{}y", stem);
                }
            }
        }
        for suffix in ["est", "er"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.chars().count() >= 2 {
                    return undouble(stem).unwrap_or_else(|| stem.to_string());
                }
            }
        }
        word.to_string()
    }
}

/// "bigg" -> "big"
fn undouble(stem: &str) -> Option<String> {
    let mut chars = stem.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a == b && !matches!(a, 'l' | 's' | 'e') => {
            Some(stem[..stem.len() - a.len_utf8()].to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(text: &str, pos: PosTag, tag: &'static str) -> String {
        Lemmatizer::new().lemmatize(text, Tagged { pos, tag })
    }

    #[test]
    fn test_verbs() {
        assert_eq!(lemma("was", PosTag::Aux, "VBD"), "be");
        assert_eq!(lemma("running", PosTag::Verb, "VBG"), "run");
        assert_eq!(lemma("n't", PosTag::Part, "RB"), "not");
        assert_eq!(lemma("ca", PosTag::Aux, "MD"), "can");
        assert_eq!(lemma("'ll", PosTag::Aux, "MD"), "will");
        assert_eq!(lemma("Bought", PosTag::Verb, "VBD"), "buy");
    }

    #[test]
    fn test_nouns() {
        assert_eq!(lemma("cities", PosTag::Noun, "NNS"), "city");
        assert_eq!(lemma("boxes", PosTag::Noun, "NNS"), "box");
        assert_eq!(lemma("children", PosTag::Noun, "NNS"), "child");
        assert_eq!(lemma("Cats", PosTag::Noun, "NNS"), "cat");
        assert_eq!(lemma("glass", PosTag::Noun, "NN"), "glass");
        assert_eq!(lemma("status", PosTag::Noun, "NN"), "status");
    }

    #[test]
    fn test_adjectives_and_others() {
        assert_eq!(lemma("better", PosTag::Adj, "JJR"), "good");
        assert_eq!(lemma("happiest", PosTag::Adj, "JJS"), "happy");
        assert_eq!(lemma("biggest", PosTag::Adj, "JJS"), "big");
        assert_eq!(lemma("Apple", PosTag::Propn, "NNP"), "Apple");
        assert_eq!(lemma("me", PosTag::Pron, "PRP"), "I");
        assert_eq!(lemma("I", PosTag::Pron, "PRP"), "I");
        assert_eq!(lemma(",", PosTag::Punct, ","), ",");
    }
}
