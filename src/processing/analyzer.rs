//! Main analysis engine running the fixed battery of analyses over one document

use crate::config::Config;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use crate::processing::document::Document;
use crate::processing::entities::{render_entities_html, Entity};
use crate::processing::keywords::KeywordFrequency;
use crate::processing::pipeline::{pos_counts, NlpPipeline, TokenRecord, TokenTable};
use crate::processing::pos_tagger::PosTag;
use crate::processing::sentiment::Sentiment;
use crate::processing::word_stats::WordStats;
use crate::visualization::wordcloud::{WordCloud, WordCloudLayout};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Main analysis engine that coordinates all analysis components
pub struct AnalysisEngine {
    pipeline: NlpPipeline,
    wordcloud: WordCloud,
    config: Config,
}

/// Raw results of every analysis, before panels are rendered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub token_table: TokenTable,
    pub entities: Vec<Entity>,
    pub entities_html: String,
    pub word_stats: WordStats,
    pub top_keywords: KeywordFrequency,
    pub word_freq: KeywordFrequency,
    pub top_n: usize,
    pub sentiment: Sentiment,
    pub pos_counts: Vec<(PosTag, usize)>,
    #[serde(skip)]
    pub word_cloud: Option<WordCloudLayout>,
    pub processing_time_ms: u64,
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Result<Self> {
        let pipeline = NlpPipeline::new(&config.analysis.language)?;
        let wordcloud = WordCloud::new(config.wordcloud.clone(), pipeline.stopwords().clone());
        Ok(Self {
            pipeline,
            wordcloud,
            config: config.clone(),
        })
    }

    pub fn pipeline(&self) -> &NlpPipeline {
        &self.pipeline
    }

    /// Analyze a document and lay out every panel
    pub fn run(&self, document: &Document, top_n: Option<usize>) -> Result<AnalysisReport> {
        let results = self.analyze(document, top_n);
        AnalysisReport::from_analysis(document, results)
    }

    pub fn analyze(&self, document: &Document, top_n: Option<usize>) -> AnalysisResults {
        let start_time = Instant::now();
        let text = document.content.as_str();
        let top_n = self.config.clamp_top_n(top_n);
        log::info!("Analyzing {} ({} characters)", document.source, document.metadata.character_count);

        // 1. Token table
        let doc = self.pipeline.analyze(text);
        let token_table = TokenTable {
            rows: doc.tokens.iter().map(TokenRecord::from).collect(),
        };
        log::info!("Tokenized into {} tokens", token_table.len());

        // 2. Entities
        let entities = self.pipeline.entities_of(&doc);
        let entities_html = render_entities_html(text, &entities);
        log::info!("Recognized {} entities", entities.len());

        // 3. Word statistics
        let word_stats = self.pipeline.word_stats(text);

        // 4. Keywords: a fixed-size summary and the user-sized plot
        let processed_text = self.pipeline.remove_stopwords(text);
        let top_keywords = self
            .pipeline
            .get_most_common_tokens(&processed_text, self.config.analysis.keyword_summary_count);
        let word_freq = self.pipeline.get_most_common_tokens(&processed_text, top_n);

        // 5. Sentiment
        let sentiment = self.pipeline.get_sentiments(text);
        log::debug!("{}", sentiment);

        // 6. Chart data
        let pos_counts = pos_counts(&token_table);
        let word_cloud = match self.wordcloud.generate(text) {
            Ok(layout) => Some(layout),
            Err(e) => {
                log::warn!("Word cloud unavailable: {}", e);
                None
            }
        };

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        log::info!("Analysis completed in {}ms", processing_time_ms);

        AnalysisResults {
            token_table,
            entities,
            entities_html,
            word_stats,
            top_keywords,
            word_freq,
            top_n,
            sentiment,
            pos_counts,
            word_cloud,
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_top_n_is_clamped() {
        let engine = engine();
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu nu xi omicron pi rho";
        let doc = Document::from_text(text);
        assert_eq!(engine.analyze(&doc, Some(1)).top_n, 5);
        let results = engine.analyze(&doc, Some(50));
        assert_eq!(results.top_n, 15);
        assert!(results.word_freq.len() <= 15);
        assert!(results.top_keywords.len() <= 5);
    }

    #[test]
    fn test_results_are_consistent() {
        let engine = engine();
        let doc = Document::from_text("Google opened an office in Accra. The office is great.");
        let results = engine.analyze(&doc, None);
        assert_eq!(
            results.pos_counts.iter().map(|(_, c)| c).sum::<usize>(),
            results.token_table.len()
        );
        assert!(results.entities.iter().any(|e| e.text == "Google"));
        assert!(results.sentiment.polarity > 0.0);
        assert!(results.word_cloud.is_some());
    }

    #[test]
    fn test_empty_document() {
        let engine = engine();
        let results = engine.analyze(&Document::from_text(""), None);
        assert!(results.token_table.is_empty());
        assert!(results.pos_counts.is_empty());
        assert!(results.word_cloud.is_none());
        assert_eq!(results.sentiment, Sentiment::neutral());
    }

    #[test]
    fn test_nul_characters_are_analyzed() {
        let engine = engine();
        let report = engine.run(&Document::from_text("a\0b and more text"), None).unwrap();
        assert!(!report.token_table.is_empty());
        assert_eq!(report.original_text, "a\0b and more text");
    }
}
