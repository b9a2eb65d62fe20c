//! The NLP pipeline: tokenize, tag, lemmatize, flag stopwords, recognize entities
//!
//! `NlpPipeline` is built once and shared by reference. Every operation takes
//! the raw text and returns an owned result.

use crate::error::{NlpLensError, Result};
use crate::processing::entities::{render_entities_html, Entity, EntityRecognizer};
use crate::processing::keywords::{get_most_common_tokens, KeywordFrequency};
use crate::processing::lemmatizer::Lemmatizer;
use crate::processing::pos_tagger::{PosTag, PosTagger};
use crate::processing::sentiment::{Sentiment, SentimentAnalyzer};
use crate::processing::stopwords::StopwordFilter;
use crate::processing::tokenizer::{word_shape, Tokenizer};
use crate::processing::word_stats::{word_stats, WordStats};
use log::debug;
use serde::{Deserialize, Serialize};

/// CSV header of the token table
pub const TOKEN_TABLE_HEADERS: [&str; 7] = ["Token", "Shape", "PoS", "Tag", "Lemma", "IsAlpha", "Is_Stop_Word"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub whitespace: bool,
    pub is_space: bool,
    pub sentence_start: bool,
    pub shape: String,
    pub pos: PosTag,
    pub tag: String,
    pub lemma: String,
    pub is_alpha: bool,
    pub is_stop: bool,
}

/// An analyzed text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doc {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Doc {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// One row of the token table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: String,
    pub shape: String,
    pub pos: PosTag,
    pub tag: String,
    pub lemma: String,
    pub is_alpha: bool,
    pub is_stop: bool,
}

impl From<&Token> for TokenRecord {
    fn from(token: &Token) -> Self {
        Self {
            token: token.text.clone(),
            shape: token.shape.clone(),
            pos: token.pos,
            tag: token.tag.clone(),
            lemma: token.lemma.clone(),
            is_alpha: token.is_alpha,
            is_stop: token.is_stop,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenTable {
    pub rows: Vec<TokenRecord>,
}

impl TokenTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize with Python-style `True`/`False` booleans
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(TOKEN_TABLE_HEADERS)?;
        for row in &self.rows {
            writer.write_record([
                row.token.as_str(),
                row.shape.as_str(),
                row.pos.as_str(),
                row.tag.as_str(),
                row.lemma.as_str(),
                py_bool(row.is_alpha),
                py_bool(row.is_stop),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| NlpLensError::OutputFormatting(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| NlpLensError::OutputFormatting(format!("CSV is not UTF-8: {}", e)))
    }

    pub fn from_csv(data: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let headers = reader.headers()?.clone();
        if headers.iter().ne(TOKEN_TABLE_HEADERS.iter().copied()) {
            return Err(NlpLensError::InvalidInput(format!(
                "Unexpected token table header: {}",
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let field = |i: usize| record.get(i).unwrap_or_default().to_string();
            let pos = PosTag::parse(&field(2))
                .ok_or_else(|| NlpLensError::InvalidInput(format!("Unknown PoS tag: {}", field(2))))?;
            rows.push(TokenRecord {
                token: field(0),
                shape: field(1),
                pos,
                tag: field(3),
                lemma: field(4),
                is_alpha: parse_py_bool(&field(5))?,
                is_stop: parse_py_bool(&field(6))?,
            });
        }
        Ok(Self { rows })
    }

    pub fn column_names() -> Vec<String> {
        TOKEN_TABLE_HEADERS.iter().map(|h| h.to_string()).collect()
    }
}

fn py_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn parse_py_bool(value: &str) -> Result<bool> {
    match value {
        "True" | "true" => Ok(true),
        "False" | "false" => Ok(false),
        other => Err(NlpLensError::InvalidInput(format!("Not a boolean: {}", other))),
    }
}

pub struct NlpPipeline {
    tokenizer: Tokenizer,
    tagger: PosTagger,
    lemmatizer: Lemmatizer,
    stopwords: StopwordFilter,
    recognizer: EntityRecognizer,
    sentiment: SentimentAnalyzer,
}

impl NlpPipeline {
    pub fn new(language: &str) -> Result<Self> {
        let sentiment = SentimentAnalyzer::new();
        let tagger = PosTagger::new().with_adjectives(sentiment.adjectives());
        Ok(Self {
            tokenizer: Tokenizer::new(),
            tagger,
            lemmatizer: Lemmatizer::new(),
            stopwords: StopwordFilter::new(language),
            recognizer: EntityRecognizer::new()?,
            sentiment,
        })
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    pub fn analyze(&self, text: &str) -> Doc {
        let raw = self.tokenizer.tokenize(text);
        let tags = self.tagger.tag(&raw);

        let tokens: Vec<Token> = raw
            .into_iter()
            .zip(tags)
            .map(|(raw, tagged)| {
                let lemma = self.lemmatizer.lemmatize(&raw.text, tagged);
                let is_alpha = !raw.text.is_empty() && raw.text.chars().all(char::is_alphabetic);
                let is_stop = !raw.is_space && self.stopwords.is_stopword(&raw.text);
                Token {
                    shape: word_shape(&raw.text),
                    pos: tagged.pos,
                    tag: tagged.tag.to_string(),
                    lemma,
                    is_alpha,
                    is_stop,
                    text: raw.text,
                    start: raw.start,
                    end: raw.end,
                    whitespace: raw.whitespace,
                    is_space: raw.is_space,
                    sentence_start: raw.sentence_start,
                }
            })
            .collect();

        debug!("Analyzed {} tokens", tokens.len());
        Doc {
            text: text.to_string(),
            tokens,
        }
    }

    /// One row per token
    pub fn text_analyzer(&self, text: &str) -> TokenTable {
        let doc = self.analyze(text);
        TokenTable {
            rows: doc.tokens.iter().map(TokenRecord::from).collect(),
        }
    }

    pub fn get_entities(&self, text: &str) -> Vec<Entity> {
        let doc = self.analyze(text);
        self.entities_of(&doc)
    }

    pub fn entities_of(&self, doc: &Doc) -> Vec<Entity> {
        self.recognizer.recognize(&doc.text, &doc.tokens)
    }

    pub fn render_entities(&self, text: &str) -> String {
        render_entities_html(text, &self.get_entities(text))
    }

    pub fn get_sentiments(&self, text: &str) -> Sentiment {
        self.sentiment.score(text)
    }

    pub fn word_stats(&self, text: &str) -> WordStats {
        word_stats(text, &self.stopwords)
    }

    pub fn remove_stopwords(&self, text: &str) -> String {
        self.stopwords.remove_stopwords(text)
    }

    pub fn get_most_common_tokens(&self, text: &str, n: usize) -> KeywordFrequency {
        get_most_common_tokens(text, n)
    }
}

/// Count of each coarse tag, in order of first appearance
pub fn pos_counts(table: &TokenTable) -> Vec<(PosTag, usize)> {
    let mut counts: Vec<(PosTag, usize)> = Vec::new();
    for row in &table.rows {
        match counts.iter_mut().find(|(pos, _)| *pos == row.pos) {
            Some((_, count)) => *count += 1,
            None => counts.push((row.pos, 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> NlpPipeline {
        NlpPipeline::new("en").unwrap()
    }

    #[test]
    fn test_row_count_matches_tokens() {
        let nlp = pipeline();
        let text = "Apple is looking at buying a U.K. startup for $1 billion.\n\nIt's big news.";
        let doc = nlp.analyze(text);
        let table = nlp.text_analyzer(text);
        assert_eq!(table.len(), doc.len());
        assert!(nlp.text_analyzer("").is_empty());
    }

    #[test]
    fn test_token_attributes() {
        let nlp = pipeline();
        let table = nlp.text_analyzer("The children were running.");
        let children = &table.rows[1];
        assert_eq!(children.token, "children");
        assert_eq!(children.lemma, "child");
        assert_eq!(children.shape, "xxxx");
        assert!(children.is_alpha);
        assert!(table.rows[0].is_stop);
        let period = table.rows.last().unwrap();
        assert_eq!(period.pos, PosTag::Punct);
        assert!(!period.is_alpha);
    }

    #[test]
    fn test_csv_round_trip() {
        let nlp = pipeline();
        let table = nlp.text_analyzer("Hello, \"quoted\" world!");
        let csv = table.to_csv().unwrap();
        assert_eq!(csv.lines().next(), Some("Token,Shape,PoS,Tag,Lemma,IsAlpha,Is_Stop_Word"));
        assert!(csv.contains("True") && csv.contains("False"));
        let parsed = TokenTable::from_csv(&csv).unwrap();
        assert_eq!(parsed.len(), table.len());
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_from_csv_rejects_wrong_header() {
        assert!(TokenTable::from_csv("a,b,c\n1,2,3\n").is_err());
    }

    #[test]
    fn test_entities_in_text() {
        let nlp = pipeline();
        let entities = nlp.get_entities("Yesterday Tim Cook said Apple will open a store in London.");
        let found: Vec<(&str, &str)> = entities
            .iter()
            .map(|e| (e.text.as_str(), e.label.as_str()))
            .collect();
        assert!(found.contains(&("Tim Cook", "PERSON")));
        assert!(found.contains(&("Apple", "ORG")));
        assert!(found.contains(&("London", "GPE")));
        assert!(found.contains(&("Yesterday", "DATE")));
    }

    #[test]
    fn test_render_entities_marks_spans() {
        let nlp = pipeline();
        let html = nlp.render_entities("Google hired 300 engineers in Paris.");
        assert!(html.contains("<mark class=\"entity\""));
        assert!(html.contains(">GPE</span>"));
        assert!(html.contains(">CARDINAL</span>"));
    }

    #[test]
    fn test_pos_counts_first_appearance_order() {
        let nlp = pipeline();
        let table = nlp.text_analyzer("The dog barked. The cat slept.");
        let counts = pos_counts(&table);
        assert_eq!(counts[0], (PosTag::Det, 2));
        assert_eq!(counts.iter().map(|(_, c)| c).sum::<usize>(), table.len());
    }

    #[test]
    fn test_remove_stopwords_and_keywords() {
        let nlp = pipeline();
        let processed = nlp.remove_stopwords("the zebra and the giraffe and the zebra");
        assert_eq!(processed, "zebra giraffe zebra");
        let keywords = nlp.get_most_common_tokens(&processed, 5);
        assert_eq!(keywords.entries[0], ("zebra".to_string(), 2));
    }
}
