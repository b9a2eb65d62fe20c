//! The analysis report: every panel of the results page, ready to format

use crate::error::Result;
use crate::output::download::{make_downloadable, DownloadLink};
use crate::processing::analyzer::AnalysisResults;
use crate::processing::document::Document;
use crate::processing::entities::Entity;
use crate::processing::keywords::KeywordFrequency;
use crate::processing::pipeline::TokenTable;
use crate::processing::pos_tagger::PosTag;
use crate::processing::sentiment::Sentiment;
use crate::processing::word_stats::WordStats;
use crate::visualization::{BarChart, ChartPanel};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Panel headings, in page order
pub const PANEL_TITLES: [&str; 10] = [
    "Original Text",
    "Text Analysis",
    "Entities",
    "Word Stats",
    "Top Keywords",
    "Sentiments",
    "Plot Word Freq",
    "Plot Part of Speech",
    "Plot Word Cloud",
    "Download Text Analysis Results",
];

/// Everything one run shows, in the order it is shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,

    pub original_text: String,

    /// Per-token attributes
    pub token_table: TokenTable,

    pub entities: Vec<Entity>,

    /// displaCy-style markup of the text with entities highlighted
    pub entities_html: String,

    pub word_stats: WordStats,

    /// Fixed-size keyword summary
    pub top_keywords: KeywordFrequency,

    pub sentiment: Sentiment,

    /// Keyword counts behind the frequency plot
    pub word_freq: KeywordFrequency,
    pub word_freq_plot: ChartPanel,

    pub pos_counts: Vec<(PosTag, usize)>,
    pub pos_plot: ChartPanel,

    pub word_cloud: ChartPanel,

    pub download: DownloadLink,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: SystemTime,
    pub version: String,
    pub source: String,
    pub title: Option<String>,
    pub word_count: usize,
    pub character_count: usize,
    pub top_n: usize,
    pub processing_time_ms: u64,
}

impl AnalysisReport {
    pub fn from_analysis(document: &Document, results: AnalysisResults) -> Result<Self> {
        Self::from_analysis_at(document, results, Local::now())
    }

    /// Build the report with an explicit timestamp for the download name
    pub fn from_analysis_at(
        document: &Document,
        results: AnalysisResults,
        timestamp: DateTime<Local>,
    ) -> Result<Self> {
        let word_freq_plot = ChartPanel::from_result(
            "Plot Word Freq",
            BarChart::new(format!("Top {} tokens", results.top_n))
                .bars(results.word_freq.iter().map(|(w, c)| (w.to_string(), c)))
                .render_svg(),
        );

        let pos_plot = ChartPanel::from_result(
            "Plot Part of Speech",
            BarChart::new("Part of speech counts")
                .bars(results.pos_counts.iter().map(|(pos, c)| (pos.as_str(), *c)))
                .rotate_labels(true)
                .multicolor(true)
                .render_svg(),
        );

        let word_cloud = ChartPanel::from_result(
            "Plot Word Cloud",
            results
                .word_cloud
                .as_ref()
                .map(|layout| layout.to_svg())
                .ok_or_else(|| {
                    crate::error::NlpLensError::Rendering("No word cloud layout".to_string())
                }),
        );

        let download = make_downloadable(&results.token_table, timestamp)?;

        let metadata = ReportMetadata {
            generated_at: SystemTime::from(timestamp),
            version: env!("CARGO_PKG_VERSION").to_string(),
            source: document.source_label(),
            title: document.metadata.title.clone(),
            word_count: document.metadata.word_count,
            character_count: document.metadata.character_count,
            top_n: results.top_n,
            processing_time_ms: results.processing_time_ms,
        };

        Ok(Self {
            metadata,
            original_text: document.content.clone(),
            token_table: results.token_table,
            entities: results.entities,
            entities_html: results.entities_html,
            word_stats: results.word_stats,
            top_keywords: results.top_keywords,
            sentiment: results.sentiment,
            word_freq: results.word_freq,
            word_freq_plot,
            pos_counts: results.pos_counts,
            pos_plot,
            word_cloud,
            download,
        })
    }

    pub fn charts(&self) -> [(&'static str, &ChartPanel); 3] {
        [
            (PANEL_TITLES[6], &self.word_freq_plot),
            (PANEL_TITLES[7], &self.pos_plot),
            (PANEL_TITLES[8], &self.word_cloud),
        ]
    }

    /// Word statistics as display rows, letter tallies flattened to `a: 3, e: 1`
    pub fn word_stats_rows(&self) -> Vec<(&'static str, String)> {
        let stats = &self.word_stats;
        let tally = |counts: &std::collections::BTreeMap<char, usize>| {
            counts
                .iter()
                .map(|(ch, n)| format!("{}: {}", ch, n))
                .collect::<Vec<_>>()
                .join(", ")
        };
        vec![
            ("Length of Text", stats.length.to_string()),
            ("Num of Vowels", stats.vowels.to_string()),
            ("Num of Consonants", stats.consonants.to_string()),
            ("Num of Stopwords", stats.stopwords.to_string()),
            ("Stats of Vowels", tally(&stats.vowel_counts)),
            ("Stats of Consonants", tally(&stats.consonant_counts)),
            ("Num of Words", stats.word_count.to_string()),
            ("Num of Sentences", stats.sentence_count.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::input::MediaType;
    use crate::processing::analyzer::AnalysisEngine;
    use chrono::TimeZone;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_report_panels() {
        let report = engine()
            .run(
                &Document::from_text("Amazon hired Maria Lopez in Seattle. The team was happy and the office was bright."),
                Some(7),
            )
            .unwrap();
        assert_eq!(report.metadata.top_n, 7);
        assert!(report.word_freq_plot.is_rendered());
        assert!(report.pos_plot.is_rendered());
        assert!(report.word_cloud.is_rendered());
        assert!(report.pos_plot.svg().unwrap().contains("rotate(-45"));
        assert_eq!(report.metadata.source, "Manual text");
        assert!(report.download.html.contains("Click here!"));
    }

    #[test]
    fn test_empty_document_charts_unavailable_in_both_modes() {
        let engine = engine();
        let manual = Document::from_text("");
        let uploaded = Document::from_file(String::new(), "empty.txt", MediaType::Text);
        for document in [manual, uploaded] {
            let report = engine.run(&document, None).unwrap();
            assert_eq!(
                report.pos_plot,
                ChartPanel::Unavailable(crate::visualization::INSUFFICIENT_DATA.to_string())
            );
            assert!(!report.word_freq_plot.is_rendered());
            assert!(!report.word_cloud.is_rendered());
        }
    }

    #[test]
    fn test_download_uses_timestamp() {
        let engine = engine();
        let document = Document::from_text("Short text here.");
        let results = engine.analyze(&document, None);
        let ts = Local.with_ymd_and_hms(2022, 1, 2, 3, 4, 5).unwrap();
        let report = AnalysisReport::from_analysis_at(&document, results, ts).unwrap();
        assert_eq!(report.download.filename, "nlp_result_20220102-030405_.csv");
        let csv = report.download.csv().unwrap();
        assert_eq!(TokenTable::from_csv(&csv).unwrap(), report.token_table);
    }

    #[test]
    fn test_word_stats_rows() {
        let report = engine().run(&Document::from_text("Hello there."), None).unwrap();
        let rows = report.word_stats_rows();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], ("Length of Text", "12".to_string()));
    }
}
