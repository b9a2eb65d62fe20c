//! Part-of-speech tagging
//!
//! Assigns a coarse Universal POS tag and a fine-grained Penn Treebank tag to
//! every token. Tagging is lexical first (closed-class table, irregular forms,
//! suffix morphology), then a left-to-right pass applies contextual fixes.

use crate::processing::lexicon::Lexicon;
use crate::processing::tokenizer::RawToken;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
    Space,
}

impl PosTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
            PosTag::X => "X",
            PosTag::Space => "SPACE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let tag = match s {
            "ADJ" => PosTag::Adj,
            "ADP" => PosTag::Adp,
            "ADV" => PosTag::Adv,
            "AUX" => PosTag::Aux,
            "CCONJ" => PosTag::Cconj,
            "DET" => PosTag::Det,
            "INTJ" => PosTag::Intj,
            "NOUN" => PosTag::Noun,
            "NUM" => PosTag::Num,
            "PART" => PosTag::Part,
            "PRON" => PosTag::Pron,
            "PROPN" => PosTag::Propn,
            "PUNCT" => PosTag::Punct,
            "SCONJ" => PosTag::Sconj,
            "SYM" => PosTag::Sym,
            "VERB" => PosTag::Verb,
            "X" => PosTag::X,
            "SPACE" => PosTag::Space,
            _ => return None,
        };
        Some(tag)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse and fine tag for one token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tagged {
    pub pos: PosTag,
    pub tag: &'static str,
}

const fn t(pos: PosTag, tag: &'static str) -> Tagged {
    Tagged { pos, tag }
}

const CLOSED_CLASS: &[(&str, Tagged)] = &[
    ("the", t(PosTag::Det, "DT")), ("a", t(PosTag::Det, "DT")), ("an", t(PosTag::Det, "DT")),
    ("this", t(PosTag::Det, "DT")), ("these", t(PosTag::Det, "DT")), ("those", t(PosTag::Det, "DT")),
    ("every", t(PosTag::Det, "DT")), ("each", t(PosTag::Det, "DT")), ("some", t(PosTag::Det, "DT")),
    ("any", t(PosTag::Det, "DT")), ("no", t(PosTag::Det, "DT")), ("all", t(PosTag::Det, "DT")),
    ("both", t(PosTag::Det, "DT")), ("another", t(PosTag::Det, "DT")), ("either", t(PosTag::Det, "DT")),
    ("neither", t(PosTag::Det, "DT")), ("that", t(PosTag::Det, "DT")),
    ("i", t(PosTag::Pron, "PRP")), ("you", t(PosTag::Pron, "PRP")), ("he", t(PosTag::Pron, "PRP")),
    ("she", t(PosTag::Pron, "PRP")), ("it", t(PosTag::Pron, "PRP")), ("we", t(PosTag::Pron, "PRP")),
    ("they", t(PosTag::Pron, "PRP")), ("me", t(PosTag::Pron, "PRP")), ("him", t(PosTag::Pron, "PRP")),
    ("us", t(PosTag::Pron, "PRP")), ("them", t(PosTag::Pron, "PRP")), ("her", t(PosTag::Pron, "PRP$")),
    ("my", t(PosTag::Pron, "PRP$")), ("your", t(PosTag::Pron, "PRP$")), ("his", t(PosTag::Pron, "PRP$")),
    ("its", t(PosTag::Pron, "PRP$")), ("our", t(PosTag::Pron, "PRP$")), ("their", t(PosTag::Pron, "PRP$")),
    ("mine", t(PosTag::Pron, "PRP")), ("yours", t(PosTag::Pron, "PRP")), ("ours", t(PosTag::Pron, "PRP")),
    ("theirs", t(PosTag::Pron, "PRP")), ("myself", t(PosTag::Pron, "PRP")), ("yourself", t(PosTag::Pron, "PRP")),
    ("himself", t(PosTag::Pron, "PRP")), ("herself", t(PosTag::Pron, "PRP")), ("itself", t(PosTag::Pron, "PRP")),
    ("ourselves", t(PosTag::Pron, "PRP")), ("themselves", t(PosTag::Pron, "PRP")),
    ("someone", t(PosTag::Pron, "NN")), ("something", t(PosTag::Pron, "NN")), ("everyone", t(PosTag::Pron, "NN")),
    ("everything", t(PosTag::Pron, "NN")), ("nothing", t(PosTag::Pron, "NN")), ("nobody", t(PosTag::Pron, "NN")),
    ("anyone", t(PosTag::Pron, "NN")), ("anything", t(PosTag::Pron, "NN")),
    ("who", t(PosTag::Pron, "WP")), ("whom", t(PosTag::Pron, "WP")), ("what", t(PosTag::Pron, "WP")),
    ("whose", t(PosTag::Det, "WP$")), ("which", t(PosTag::Det, "WDT")),
    ("where", t(PosTag::Sconj, "WRB")), ("when", t(PosTag::Sconj, "WRB")), ("why", t(PosTag::Sconj, "WRB")),
    ("how", t(PosTag::Sconj, "WRB")),
    ("in", t(PosTag::Adp, "IN")), ("on", t(PosTag::Adp, "IN")), ("at", t(PosTag::Adp, "IN")),
    ("by", t(PosTag::Adp, "IN")), ("for", t(PosTag::Adp, "IN")), ("with", t(PosTag::Adp, "IN")),
    ("from", t(PosTag::Adp, "IN")), ("of", t(PosTag::Adp, "IN")), ("about", t(PosTag::Adp, "IN")),
    ("into", t(PosTag::Adp, "IN")), ("over", t(PosTag::Adp, "IN")), ("under", t(PosTag::Adp, "IN")),
    ("between", t(PosTag::Adp, "IN")), ("through", t(PosTag::Adp, "IN")), ("during", t(PosTag::Adp, "IN")),
    ("before", t(PosTag::Adp, "IN")), ("after", t(PosTag::Adp, "IN")), ("above", t(PosTag::Adp, "IN")),
    ("below", t(PosTag::Adp, "IN")), ("without", t(PosTag::Adp, "IN")), ("within", t(PosTag::Adp, "IN")),
    ("across", t(PosTag::Adp, "IN")), ("against", t(PosTag::Adp, "IN")), ("among", t(PosTag::Adp, "IN")),
    ("around", t(PosTag::Adp, "IN")), ("behind", t(PosTag::Adp, "IN")), ("beyond", t(PosTag::Adp, "IN")),
    ("near", t(PosTag::Adp, "IN")), ("since", t(PosTag::Adp, "IN")), ("toward", t(PosTag::Adp, "IN")),
    ("towards", t(PosTag::Adp, "IN")), ("upon", t(PosTag::Adp, "IN")), ("via", t(PosTag::Adp, "IN")),
    ("per", t(PosTag::Adp, "IN")), ("like", t(PosTag::Adp, "IN")), ("than", t(PosTag::Adp, "IN")),
    ("to", t(PosTag::Adp, "IN")),
    ("and", t(PosTag::Cconj, "CC")), ("or", t(PosTag::Cconj, "CC")), ("but", t(PosTag::Cconj, "CC")),
    ("nor", t(PosTag::Cconj, "CC")), ("yet", t(PosTag::Cconj, "CC")), ("&", t(PosTag::Cconj, "CC")),
    ("because", t(PosTag::Sconj, "IN")), ("although", t(PosTag::Sconj, "IN")), ("though", t(PosTag::Sconj, "IN")),
    ("if", t(PosTag::Sconj, "IN")), ("while", t(PosTag::Sconj, "IN")), ("whereas", t(PosTag::Sconj, "IN")),
    ("unless", t(PosTag::Sconj, "IN")), ("whether", t(PosTag::Sconj, "IN")),
    ("can", t(PosTag::Aux, "MD")), ("could", t(PosTag::Aux, "MD")), ("will", t(PosTag::Aux, "MD")),
    ("would", t(PosTag::Aux, "MD")), ("shall", t(PosTag::Aux, "MD")), ("should", t(PosTag::Aux, "MD")),
    ("may", t(PosTag::Aux, "MD")), ("might", t(PosTag::Aux, "MD")), ("must", t(PosTag::Aux, "MD")),
    ("'ll", t(PosTag::Aux, "MD")), ("ca", t(PosTag::Aux, "MD")), ("wo", t(PosTag::Aux, "MD")),
    ("'d", t(PosTag::Aux, "MD")),
    ("not", t(PosTag::Part, "RB")), ("n't", t(PosTag::Part, "RB")), ("'s", t(PosTag::Part, "POS")),
    ("very", t(PosTag::Adv, "RB")), ("too", t(PosTag::Adv, "RB")), ("also", t(PosTag::Adv, "RB")),
    ("just", t(PosTag::Adv, "RB")), ("only", t(PosTag::Adv, "RB")), ("now", t(PosTag::Adv, "RB")),
    ("then", t(PosTag::Adv, "RB")), ("here", t(PosTag::Adv, "RB")), ("there", t(PosTag::Adv, "RB")),
    ("never", t(PosTag::Adv, "RB")), ("always", t(PosTag::Adv, "RB")), ("often", t(PosTag::Adv, "RB")),
    ("quite", t(PosTag::Adv, "RB")), ("so", t(PosTag::Adv, "RB")), ("still", t(PosTag::Adv, "RB")),
    ("already", t(PosTag::Adv, "RB")), ("even", t(PosTag::Adv, "RB")), ("again", t(PosTag::Adv, "RB")),
    ("soon", t(PosTag::Adv, "RB")), ("ever", t(PosTag::Adv, "RB")), ("almost", t(PosTag::Adv, "RB")),
    ("rather", t(PosTag::Adv, "RB")), ("perhaps", t(PosTag::Adv, "RB")), ("away", t(PosTag::Adv, "RB")),
    ("together", t(PosTag::Adv, "RB")), ("however", t(PosTag::Adv, "RB")), ("today", t(PosTag::Noun, "NN")),
    ("yesterday", t(PosTag::Noun, "NN")), ("tomorrow", t(PosTag::Noun, "NN")),
    ("oh", t(PosTag::Intj, "UH")), ("hello", t(PosTag::Intj, "UH")), ("hi", t(PosTag::Intj, "UH")),
    ("wow", t(PosTag::Intj, "UH")), ("yes", t(PosTag::Intj, "UH")), ("please", t(PosTag::Intj, "UH")),
    ("thanks", t(PosTag::Intj, "UH")), ("ok", t(PosTag::Intj, "UH")), ("okay", t(PosTag::Intj, "UH")),
    ("one", t(PosTag::Num, "CD")), ("two", t(PosTag::Num, "CD")), ("three", t(PosTag::Num, "CD")),
    ("four", t(PosTag::Num, "CD")), ("five", t(PosTag::Num, "CD")), ("six", t(PosTag::Num, "CD")),
    ("seven", t(PosTag::Num, "CD")), ("eight", t(PosTag::Num, "CD")), ("nine", t(PosTag::Num, "CD")),
    ("ten", t(PosTag::Num, "CD")), ("eleven", t(PosTag::Num, "CD")), ("twelve", t(PosTag::Num, "CD")),
    ("twenty", t(PosTag::Num, "CD")), ("hundred", t(PosTag::Num, "CD")), ("thousand", t(PosTag::Num, "CD")),
    ("million", t(PosTag::Num, "CD")), ("billion", t(PosTag::Num, "CD")), ("trillion", t(PosTag::Num, "CD")),
];

const BE_FORMS: &[&str] = &["am", "are", "is", "was", "were", "be", "been", "being", "'m", "'re"];
const HAVE_FORMS: &[&str] = &["have", "has", "had", "having", "'ve"];
const DO_FORMS: &[&str] = &["do", "does", "did"];
const THIRD_PERSON: &[&str] = &["he", "she", "it", "this", "that", "who", "which"];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ance", "ence", "ship", "ism", "ist", "hood", "dom", "age",
];
const ADJ_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish", "ary", "ian",
];

pub struct PosTagger {
    closed_class: HashMap<&'static str, Tagged>,
    lexicon: Lexicon,
    extra_adjectives: HashSet<String>,
}

impl Default for PosTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl PosTagger {
    pub fn new() -> Self {
        Self {
            closed_class: CLOSED_CLASS.iter().copied().collect(),
            lexicon: Lexicon::new(),
            extra_adjectives: HashSet::new(),
        }
    }

    /// Words known to be adjectives, e.g. the entries of a sentiment lexicon
    pub fn with_adjectives<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_adjectives.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn tag(&self, tokens: &[RawToken]) -> Vec<Tagged> {
        let mut tags: Vec<Tagged> = tokens.iter().map(|token| self.lexical_tag(token)).collect();
        self.apply_context(tokens, &mut tags);
        tags
    }

    fn lexical_tag(&self, token: &RawToken) -> Tagged {
        let text = token.text.as_str();
        if token.is_space {
            return t(PosTag::Space, "_SP");
        }
        if let Some(tagged) = punct_tag(text) {
            return tagged;
        }
        if is_number(text) {
            return t(PosTag::Num, "CD");
        }

        let lower = text.to_lowercase().replace('\u{2019}', "'");
        let capitalized = text.chars().next().is_some_and(char::is_uppercase);

        // Mid-sentence capitals are proper nouns unless they are "I"
        if capitalized && !token.sentence_start && lower != "i" {
            return t(PosTag::Propn, "NNP");
        }
        if let Some(&tagged) = self.closed_class.get(lower.as_str()) {
            return tagged;
        }
        if let Some(&(lemma, tag)) = self.lexicon.irregular_verbs.get(lower.as_str()) {
            let pos = if matches!(lemma, "be" | "will" | "would" | "can") || tag == "MD" {
                PosTag::Aux
            } else {
                PosTag::Verb
            };
            return t(pos, tag);
        }
        if HAVE_FORMS.contains(&lower.as_str()) || DO_FORMS.contains(&lower.as_str()) {
            return t(PosTag::Verb, "VBP");
        }
        if let Some(&(_, tag)) = self.lexicon.irregular_adjectives.get(lower.as_str()) {
            return t(PosTag::Adj, tag);
        }
        if self.lexicon.irregular_nouns.contains_key(lower.as_str()) {
            return t(PosTag::Noun, "NNS");
        }
        if self.lexicon.adjectives.contains(lower.as_str()) || self.extra_adjectives.contains(&lower) {
            return t(PosTag::Adj, "JJ");
        }
        if self.lexicon.is_verb_base(&lower) {
            return t(PosTag::Verb, "VB");
        }
        if is_acronym(text) {
            return t(PosTag::Propn, "NNP");
        }
        self.morphological_tag(&lower)
    }

    fn morphological_tag(&self, lower: &str) -> Tagged {
        let len = lower.chars().count();
        if lower.ends_with("ing") && len > 4 && self.lexicon.verb_lemma(lower).is_some() {
            return t(PosTag::Verb, "VBG");
        }
        if lower.ends_with("ed") && len > 3 && self.lexicon.verb_lemma(lower).is_some() {
            return t(PosTag::Verb, "VBD");
        }
        if lower.ends_with("ly") && len > 3 {
            return t(PosTag::Adv, "RB");
        }
        if lower.ends_with("est") && len > 5 {
            return t(PosTag::Adj, "JJS");
        }
        if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s) && len > s.len() + 2) {
            return t(PosTag::Noun, "NN");
        }
        if ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s) && len > s.len() + 2) {
            return t(PosTag::Adj, "JJ");
        }
        if lower.ends_with("ing") && len > 4 {
            return t(PosTag::Verb, "VBG");
        }
        if lower.ends_with("ed") && len > 3 {
            return t(PosTag::Verb, "VBD");
        }
        if lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") && !lower.ends_with("is") && len > 3 {
            if self.lexicon.verb_lemma(lower).is_some() {
                return t(PosTag::Verb, "VBZ");
            }
            return t(PosTag::Noun, "NNS");
        }
        if lower.chars().all(char::is_alphabetic) {
            t(PosTag::Noun, "NN")
        } else {
            t(PosTag::X, "XX")
        }
    }

    /// Left-to-right contextual corrections
    fn apply_context(&self, tokens: &[RawToken], tags: &mut [Tagged]) {
        let words: Vec<String> = tokens
            .iter()
            .map(|token| token.text.to_lowercase().replace('\u{2019}', "'"))
            .collect();

        for i in 0..tokens.len() {
            if tags[i].pos == PosTag::Space {
                continue;
            }
            let word = words[i].as_str();
            let next = next_word(tags, i);
            // Look through negation: "do n't want" is governed by "do"
            let mut prev = previous_word(tags, i);
            if tags[i].pos == PosTag::Verb {
                while let Some(p) = prev {
                    if matches!(words[p].as_str(), "not" | "n't" | "never") {
                        prev = previous_word(tags, p);
                    } else {
                        break;
                    }
                }
            }

            // Sentence-initial capitals: a following capital makes a name ("Barack Obama")
            if tokens[i].sentence_start
                && matches!(tags[i].pos, PosTag::Noun | PosTag::Adj)
                && !self.closed_class.contains_key(word)
                && tokens[i].text.chars().next().is_some_and(char::is_uppercase)
                && next.is_some_and(|j| tags[j].pos == PosTag::Propn)
            {
                tags[i] = t(PosTag::Propn, "NNP");
            }

            match word {
                "to" => {
                    if let Some(j) = next {
                        if self.lexicon.is_verb_base(&words[j]) || BE_FORMS.contains(&words[j].as_str()) {
                            tags[i] = t(PosTag::Part, "TO");
                        }
                    }
                }
                "'s" => {
                    if prev.is_some_and(|j| tags[j].pos == PosTag::Pron || words[j] == "there" || words[j] == "that") {
                        tags[i] = t(PosTag::Aux, "VBZ");
                    }
                }
                "that" => {
                    if let Some(j) = next {
                        if matches!(tags[j].pos, PosTag::Pron | PosTag::Det | PosTag::Propn) {
                            tags[i] = t(PosTag::Sconj, "IN");
                        } else if !matches!(tags[j].pos, PosTag::Noun | PosTag::Adj | PosTag::Num) {
                            tags[i] = t(PosTag::Pron, "DT");
                        }
                    } else {
                        tags[i] = t(PosTag::Pron, "DT");
                    }
                }
                "there" => {
                    if next.is_some_and(|j| BE_FORMS.contains(&words[j].as_str()) || words[j] == "'s") {
                        tags[i] = t(PosTag::Pron, "EX");
                    }
                }
                _ => {}
            }

            if let Some(p) = prev {
                let prev_tag = tags[p];
                match tags[i].pos {
                    PosTag::Verb => {
                        let prev_word = words[p].as_str();
                        if prev_tag.pos == PosTag::Det || prev_tag.tag == "PRP$" || prev_tag.pos == PosTag::Adj {
                            // "the building", "a run"
                            let plural = tags[i].tag == "VBZ";
                            tags[i] = t(PosTag::Noun, if plural { "NNS" } else { "NN" });
                        } else if prev_tag.tag == "MD" || prev_tag.tag == "TO" || DO_FORMS.contains(&prev_word) {
                            if self.lexicon.is_verb_base(word) || HAVE_FORMS.contains(&word) {
                                tags[i] = t(tags[i].pos, "VB");
                            }
                        } else if BE_FORMS.contains(&prev_word) || HAVE_FORMS.contains(&prev_word) {
                            if tags[i].tag == "VBD" || self.is_participle(word) {
                                tags[i] = t(PosTag::Verb, "VBN");
                            }
                        } else if tags[i].tag == "VB" {
                            let third = THIRD_PERSON.contains(&prev_word)
                                || matches!(prev_tag.pos, PosTag::Noun | PosTag::Propn) && prev_tag.tag != "NNS";
                            tags[i] = t(PosTag::Verb, if third && word.ends_with('s') { "VBZ" } else { "VBP" });
                        }
                    }
                    PosTag::Noun => {
                        if tags[i].tag == "NNS" && (THIRD_PERSON.contains(&words[p].as_str()) || prev_tag.pos == PosTag::Propn)
                            && self.lexicon.verb_lemma(word).is_some()
                        {
                            tags[i] = t(PosTag::Verb, "VBZ");
                        }
                    }
                    _ => {}
                }
            }

            // Auxiliaries: have/do followed (possibly after "not") by a verb
            if HAVE_FORMS.contains(&word) || DO_FORMS.contains(&word) {
                let mut k = next;
                while let Some(j) = k {
                    if tags[j].pos == PosTag::Part {
                        k = next_word(tags, j);
                    } else {
                        break;
                    }
                }
                let tag = self
                    .lexicon
                    .irregular_verbs
                    .get(word)
                    .map(|&(_, tag)| tag)
                    .unwrap_or("VBP");
                let verb_follows = k.is_some_and(|j| {
                    tags[j].pos == PosTag::Verb || self.lexicon.verb_lemma(&words[j]).is_some()
                });
                tags[i] = t(if verb_follows { PosTag::Aux } else { PosTag::Verb }, tag);
            }
        }
    }

    fn is_participle(&self, word: &str) -> bool {
        self.lexicon
            .irregular_verbs
            .get(word)
            .is_some_and(|&(_, tag)| tag == "VBN" || tag == "VBD")
            || word.ends_with("ed")
    }
}

fn previous_word(tags: &[Tagged], i: usize) -> Option<usize> {
    (0..i).rev().find(|&j| tags[j].pos != PosTag::Space)
}

fn next_word(tags: &[Tagged], i: usize) -> Option<usize> {
    (i + 1..tags.len()).find(|&j| tags[j].pos != PosTag::Space)
}

fn punct_tag(text: &str) -> Option<Tagged> {
    if !text.chars().all(|c| !c.is_alphanumeric()) {
        return None;
    }
    let tagged = match text {
        "." | "!" | "?" | "..." => t(PosTag::Punct, "."),
        "," => t(PosTag::Punct, ","),
        ":" | ";" | "--" => t(PosTag::Punct, ":"),
        "(" | "[" | "{" => t(PosTag::Punct, "-LRB-"),
        ")" | "]" | "}" => t(PosTag::Punct, "-RRB-"),
        "\"" | "\u{201C}" | "`" => t(PosTag::Punct, "``"),
        "\u{201D}" | "'" | "\u{2019}" => t(PosTag::Punct, "''"),
        "-" | "\u{2013}" | "\u{2014}" => t(PosTag::Punct, "HYPH"),
        "$" | "\u{20AC}" | "\u{00A3}" => t(PosTag::Sym, "$"),
        "#" => t(PosTag::Sym, "$"),
        "%" => t(PosTag::Noun, "NN"),
        "&" => t(PosTag::Cconj, "CC"),
        "+" | "=" | "<" | ">" | "/" | "*" | "@" => t(PosTag::Sym, "SYM"),
        _ => t(PosTag::Punct, "NFP"),
    };
    Some(tagged)
}

fn is_number(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
}

fn is_acronym(text: &str) -> bool {
    text.chars().count() >= 2
        && text.chars().all(|c| c.is_uppercase() || c == '.' || c == '&')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::tokenizer::Tokenizer;

    fn tag_text(text: &str) -> Vec<(String, &'static str, &'static str)> {
        let tokens = Tokenizer::new().tokenize(text);
        let tags = PosTagger::new().tag(&tokens);
        tokens
            .into_iter()
            .zip(tags)
            .map(|(tok, tagged)| (tok.text, tagged.pos.as_str(), tagged.tag))
            .collect()
    }

    fn pos_of<'a>(tagged: &'a [(String, &'static str, &'static str)], word: &str) -> &'a str {
        tagged.iter().find(|(w, _, _)| w == word).map(|(_, p, _)| *p).unwrap_or("?")
    }

    #[test]
    fn test_simple_sentence() {
        let tagged = tag_text("The quick brown fox jumps over the lazy dog.");
        assert_eq!(pos_of(&tagged, "The"), "DET");
        assert_eq!(pos_of(&tagged, "quick"), "ADJ");
        assert_eq!(pos_of(&tagged, "fox"), "NOUN");
        assert_eq!(pos_of(&tagged, "over"), "ADP");
        assert_eq!(pos_of(&tagged, "dog"), "NOUN");
        assert_eq!(pos_of(&tagged, "."), "PUNCT");
    }

    #[test]
    fn test_proper_nouns_and_numbers() {
        let tagged = tag_text("Yesterday Apple paid 300 dollars to Google.");
        assert_eq!(pos_of(&tagged, "Apple"), "PROPN");
        assert_eq!(pos_of(&tagged, "Google"), "PROPN");
        assert_eq!(pos_of(&tagged, "300"), "NUM");
        assert_eq!(pos_of(&tagged, "paid"), "VERB");
    }

    #[test]
    fn test_auxiliaries_and_particles() {
        let tagged = tag_text("I do n't want to go");
        assert_eq!(pos_of(&tagged, "I"), "PRON");
        assert_eq!(pos_of(&tagged, "do"), "AUX");
        assert_eq!(pos_of(&tagged, "n't"), "PART");
        assert_eq!(pos_of(&tagged, "to"), "PART");
        assert_eq!(pos_of(&tagged, "go"), "VERB");
    }

    #[test]
    fn test_space_tokens() {
        let tagged = tag_text("Hi.\n\nBye.");
        assert!(tagged.iter().any(|(_, pos, tag)| *pos == "SPACE" && *tag == "_SP"));
    }

    #[test]
    fn test_pos_round_trips_through_str() {
        for pos in [PosTag::Cconj, PosTag::Propn, PosTag::Space] {
            assert_eq!(PosTag::parse(pos.as_str()), Some(pos));
        }
    }
}
