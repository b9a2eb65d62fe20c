//! Word lists shared by the tagger and the lemmatizer

use std::collections::{HashMap, HashSet};

/// Irregular verb forms: (form, lemma, Penn tag)
pub const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("am", "be", "VBP"), ("are", "be", "VBP"), ("is", "be", "VBZ"), ("was", "be", "VBD"),
    ("were", "be", "VBD"), ("been", "be", "VBN"), ("being", "be", "VBG"), ("be", "be", "VB"),
    ("'m", "be", "VBP"), ("'re", "be", "VBP"),
    ("has", "have", "VBZ"), ("had", "have", "VBD"), ("having", "have", "VBG"), ("'ve", "have", "VBP"),
    ("does", "do", "VBZ"), ("did", "do", "VBD"), ("done", "do", "VBN"), ("doing", "do", "VBG"),
    ("'ll", "will", "MD"), ("ca", "can", "MD"), ("wo", "will", "MD"), ("'d", "would", "MD"),
    ("went", "go", "VBD"), ("gone", "go", "VBN"), ("goes", "go", "VBZ"),
    ("said", "say", "VBD"), ("made", "make", "VBD"), ("took", "take", "VBD"), ("taken", "take", "VBN"),
    ("saw", "see", "VBD"), ("seen", "see", "VBN"), ("came", "come", "VBD"), ("knew", "know", "VBD"),
    ("known", "know", "VBN"), ("got", "get", "VBD"), ("gotten", "get", "VBN"), ("gave", "give", "VBD"),
    ("given", "give", "VBN"), ("found", "find", "VBD"), ("thought", "think", "VBD"), ("told", "tell", "VBD"),
    ("became", "become", "VBD"), ("left", "leave", "VBD"), ("felt", "feel", "VBD"), ("brought", "bring", "VBD"),
    ("began", "begin", "VBD"), ("begun", "begin", "VBN"), ("kept", "keep", "VBD"), ("held", "hold", "VBD"),
    ("wrote", "write", "VBD"), ("written", "write", "VBN"), ("stood", "stand", "VBD"), ("heard", "hear", "VBD"),
    ("meant", "mean", "VBD"), ("met", "meet", "VBD"), ("ran", "run", "VBD"), ("paid", "pay", "VBD"),
    ("sat", "sit", "VBD"), ("spoke", "speak", "VBD"), ("spoken", "speak", "VBN"), ("led", "lead", "VBD"),
    ("grew", "grow", "VBD"), ("grown", "grow", "VBN"), ("lost", "lose", "VBD"), ("fell", "fall", "VBD"),
    ("fallen", "fall", "VBN"), ("sent", "send", "VBD"), ("built", "build", "VBD"), ("understood", "understand", "VBD"),
    ("drew", "draw", "VBD"), ("drawn", "draw", "VBN"), ("broke", "break", "VBD"), ("broken", "break", "VBN"),
    ("spent", "spend", "VBD"), ("rose", "rise", "VBD"), ("risen", "rise", "VBN"), ("drove", "drive", "VBD"),
    ("driven", "drive", "VBN"), ("bought", "buy", "VBD"), ("wore", "wear", "VBD"), ("worn", "wear", "VBN"),
    ("chose", "choose", "VBD"), ("chosen", "choose", "VBN"), ("ate", "eat", "VBD"), ("eaten", "eat", "VBN"),
    ("won", "win", "VBD"), ("sold", "sell", "VBD"), ("taught", "teach", "VBD"), ("caught", "catch", "VBD"),
    ("fought", "fight", "VBD"), ("flew", "fly", "VBD"), ("flown", "fly", "VBN"), ("forgot", "forget", "VBD"),
    ("forgotten", "forget", "VBN"), ("slept", "sleep", "VBD"), ("sang", "sing", "VBD"), ("sung", "sing", "VBN"),
    ("swam", "swim", "VBD"), ("threw", "throw", "VBD"), ("thrown", "throw", "VBN"), ("woke", "wake", "VBD"),
    ("hid", "hide", "VBD"), ("hidden", "hide", "VBN"), ("shook", "shake", "VBD"), ("stole", "steal", "VBD"),
    ("struck", "strike", "VBD"), ("dug", "dig", "VBD"), ("fed", "feed", "VBD"), ("fled", "flee", "VBD"),
    ("lit", "light", "VBD"), ("rode", "ride", "VBD"), ("ridden", "ride", "VBN"), ("shot", "shoot", "VBD"),
];

/// Base forms of common verbs
pub const VERB_BASES: &[&str] = &[
    "go", "say", "make", "take", "see", "come", "know", "get", "give", "find", "think", "tell",
    "become", "show", "leave", "feel", "put", "bring", "begin", "keep", "hold", "write", "stand",
    "hear", "let", "mean", "set", "meet", "run", "pay", "sit", "speak", "lead", "read", "grow",
    "lose", "fall", "send", "build", "understand", "draw", "break", "spend", "cut", "rise", "drive",
    "buy", "wear", "choose", "eat", "win", "sell", "teach", "catch", "fight", "fly", "forget",
    "sleep", "sing", "swim", "throw", "wake", "hide", "shake", "steal", "strike", "dig", "feed",
    "flee", "ride", "shoot", "love", "like", "want", "need", "use", "work", "look", "help", "ask",
    "try", "call", "play", "move", "live", "believe", "seem", "develop", "create", "announce",
    "release", "launch", "open", "close", "hate", "enjoy", "start", "stop", "talk", "walk", "watch",
    "learn", "change", "follow", "visit", "plan", "happen", "include", "continue", "provide",
    "allow", "add", "offer", "remember", "consider", "appear", "wait", "serve", "die", "expect",
    "stay", "reach", "kill", "remain", "suggest", "raise", "pass", "report", "decide", "pull",
    "push", "carry", "return", "explain", "hope", "receive", "agree", "support", "hit", "produce",
    "cover", "describe", "improve", "increase", "reduce", "join", "travel", "analyze", "study",
    "wish", "share", "design", "fix", "test", "deliver", "invest", "acquire", "sign", "found",
    "arrive", "save", "prefer", "recommend", "fail", "succeed", "attend", "apply", "manage",
    "hire", "visit", "complete", "lift", "jump", "laugh", "cry", "smile", "dance", "cook",
    "clean", "drink", "fill", "finish", "kiss", "listen", "miss", "order", "pick", "rain", "rest",
    "turn", "worry", "bake", "rate", "vote", "invite", "describe", "discover", "exist", "admire",
];

/// Irregular noun plurals: (plural, singular)
pub const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"), ("men", "man"), ("women", "woman"), ("mice", "mouse"), ("feet", "foot"),
    ("teeth", "tooth"), ("geese", "goose"), ("people", "people"), ("oxen", "ox"), ("lives", "life"),
    ("knives", "knife"), ("wives", "wife"), ("leaves", "leaf"), ("analyses", "analysis"),
    ("crises", "crisis"), ("data", "datum"), ("criteria", "criterion"), ("phenomena", "phenomenon"),
    ("news", "news"), ("series", "series"), ("species", "species"),
];

/// Irregular comparatives and superlatives: (form, lemma, Penn tag)
pub const IRREGULAR_ADJECTIVES: &[(&str, &str, &str)] = &[
    ("better", "good", "JJR"), ("best", "good", "JJS"), ("worse", "bad", "JJR"),
    ("worst", "bad", "JJS"), ("more", "many", "JJR"), ("most", "many", "JJS"),
    ("less", "little", "JJR"), ("least", "little", "JJS"), ("further", "far", "JJR"),
    ("farther", "far", "JJR"), ("furthest", "far", "JJS"),
];

/// Common adjectives outside the sentiment lexicon
pub const ADJECTIVES: &[&str] = &[
    "new", "old", "big", "small", "large", "long", "short", "high", "low", "young", "early", "late",
    "little", "own", "other", "same", "different", "few", "many", "much", "important", "public",
    "able", "black", "white", "red", "blue", "green", "yellow", "whole", "free", "full", "hot",
    "cold", "real", "local", "sure", "clear", "recent", "certain", "major", "open", "human",
    "main", "quick", "brown", "lazy", "dark", "light", "simple", "hard", "easy", "strong", "weak",
    "rich", "poor", "true", "false", "next", "last", "final", "past", "top", "fast", "slow",
    "deep", "wide", "various", "several", "available", "likely", "possible", "global", "social",
];

/// Object and possessive pronoun lemmas
pub const PRONOUN_LEMMAS: &[(&str, &str)] = &[
    ("i", "I"), ("me", "I"), ("my", "my"), ("mine", "mine"), ("myself", "myself"),
    ("him", "he"), ("her", "she"), ("us", "we"), ("them", "they"),
];

pub struct Lexicon {
    pub irregular_verbs: HashMap<&'static str, (&'static str, &'static str)>,
    pub verb_bases: HashSet<&'static str>,
    pub irregular_nouns: HashMap<&'static str, &'static str>,
    pub irregular_adjectives: HashMap<&'static str, (&'static str, &'static str)>,
    pub adjectives: HashSet<&'static str>,
    pub pronoun_lemmas: HashMap<&'static str, &'static str>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            irregular_verbs: IRREGULAR_VERBS.iter().map(|&(f, l, t)| (f, (l, t))).collect(),
            verb_bases: VERB_BASES.iter().copied().collect(),
            irregular_nouns: IRREGULAR_NOUNS.iter().copied().collect(),
            irregular_adjectives: IRREGULAR_ADJECTIVES.iter().map(|&(f, l, t)| (f, (l, t))).collect(),
            adjectives: ADJECTIVES.iter().copied().collect(),
            pronoun_lemmas: PRONOUN_LEMMAS.iter().copied().collect(),
        }
    }

    pub fn is_verb_base(&self, word: &str) -> bool {
        self.verb_bases.contains(word)
    }

    /// Recover a verb base from an inflected stem, e.g. "mak" -> "make", "runn" -> "run"
    pub fn restore_verb_stem(&self, stem: &str) -> Option<String> {
        if self.verb_bases.contains(stem) {
            return Some(stem.to_string());
        }
        let with_e = format!("{}e", stem);
        if self.verb_bases.contains(with_e.as_str()) {
            return Some(with_e);
        }
        let mut chars = stem.chars().rev();
        if let (Some(last), Some(prev)) = (chars.next(), chars.next()) {
            if last == prev {
                let undoubled = &stem[..stem.len() - last.len_utf8()];
                if self.verb_bases.contains(undoubled) {
                    return Some(undoubled.to_string());
                }
            }
        }
        if let Some(base) = stem.strip_suffix('i') {
            let with_y = format!("{}y", base);
            if self.verb_bases.contains(with_y.as_str()) {
                return Some(with_y);
            }
        }
        None
    }

    /// Known verb in any inflection
    pub fn verb_lemma(&self, word: &str) -> Option<String> {
        if let Some(&(lemma, _)) = self.irregular_verbs.get(word) {
            return Some(lemma.to_string());
        }
        if self.verb_bases.contains(word) {
            return Some(word.to_string());
        }
        for suffix in ["ing", "ed", "es", "s", "d"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.len() >= 2 {
                    if let Some(base) = self.restore_verb_stem(stem) {
                        return Some(base);
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_lemma() {
        let lexicon = Lexicon::new();
        assert_eq!(lexicon.verb_lemma("making").as_deref(), Some("make"));
        assert_eq!(lexicon.verb_lemma("running").as_deref(), Some("run"));
        assert_eq!(lexicon.verb_lemma("tried").as_deref(), Some("try"));
        assert_eq!(lexicon.verb_lemma("watches").as_deref(), Some("watch"));
        assert_eq!(lexicon.verb_lemma("went").as_deref(), Some("go"));
        assert_eq!(lexicon.verb_lemma("opened").as_deref(), Some("open"));
        assert_eq!(lexicon.verb_lemma("table"), None);
    }
}
