//! Configuration management for nlp-lens

use crate::error::{NlpLensError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub input: InputConfig,
    pub wordcloud: WordCloudConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Bars shown in the keyword frequency plot when `--top` is absent
    pub default_top_n: usize,
    pub min_top_n: usize,
    pub max_top_n: usize,
    /// Entries in the "Top Keywords" panel
    pub keyword_summary_count: usize,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub pdf_pages: PdfPages,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PdfPages {
    /// Extract every page
    All,
    /// Extract page 1 only
    First,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudConfig {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub max_font_size: f32,
    pub min_font_size: f32,
    pub relative_scaling: f32,
    pub background: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub include_styles: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
    Csv,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                default_top_n: 5,
                min_top_n: 5,
                max_top_n: 15,
                keyword_summary_count: 5,
                language: "en".to_string(),
            },
            input: InputConfig {
                pdf_pages: PdfPages::All,
                enable_cache: true,
            },
            wordcloud: WordCloudConfig {
                width: 400,
                height: 200,
                max_words: 200,
                max_font_size: 60.0,
                min_font_size: 4.0,
                relative_scaling: 0.5,
                background: "#000000".to_string(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                include_styles: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::read(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load from an explicit path, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::read(path)
        } else {
            log::warn!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| NlpLensError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| NlpLensError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("nlp-lens")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        if analysis.min_top_n == 0 || analysis.min_top_n > analysis.max_top_n {
            return Err(NlpLensError::Configuration(format!(
                "analysis.min_top_n ({}) must be between 1 and max_top_n ({})",
                analysis.min_top_n, analysis.max_top_n
            )));
        }
        if self.wordcloud.width == 0 || self.wordcloud.height == 0 {
            return Err(NlpLensError::Configuration(
                "wordcloud canvas must have a non-zero size".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.wordcloud.relative_scaling) {
            return Err(NlpLensError::Configuration(
                "wordcloud.relative_scaling must lie in [0, 1]".to_string(),
            ));
        }
        if self.wordcloud.min_font_size <= 0.0
            || self.wordcloud.min_font_size > self.wordcloud.max_font_size
        {
            return Err(NlpLensError::Configuration(
                "wordcloud font sizes must satisfy 0 < min_font_size <= max_font_size".to_string(),
            ));
        }
        Ok(())
    }

    /// Clamp a requested "most common tokens" count into the allowed range
    pub fn clamp_top_n(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.analysis.default_top_n)
            .clamp(self.analysis.min_top_n, self.analysis.max_top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_clamp_top_n() {
        let config = Config::default();
        assert_eq!(config.clamp_top_n(None), 5);
        assert_eq!(config.clamp_top_n(Some(2)), 5);
        assert_eq!(config.clamp_top_n(Some(9)), 9);
        assert_eq!(config.clamp_top_n(Some(40)), 15);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.input.pdf_pages = PdfPages::First;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.input.pdf_pages, PdfPages::First);
        assert_eq!(loaded.wordcloud.max_words, 200);
    }

    #[test]
    fn test_missing_path_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.analysis.keyword_summary_count, 5);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let mut config = Config::default();
        config.analysis.min_top_n = 20;
        assert!(config.validate().is_err());
    }
}
