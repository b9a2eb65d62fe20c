//! Text processing and analysis module

pub mod document;
pub mod lexicon;
pub mod tokenizer;
pub mod pos_tagger;
pub mod lemmatizer;
pub mod stopwords;
pub mod entities;
pub mod keywords;
pub mod sentiment;
pub mod word_stats;
pub mod pipeline;
pub mod analyzer;

pub use pipeline::{NlpPipeline, TokenTable};
