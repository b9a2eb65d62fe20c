//! Error handling for nlp-lens

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NlpLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Rendering error: {0}")]
    Rendering(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, NlpLensError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for NlpLensError {
    fn from(err: anyhow::Error) -> Self {
        NlpLensError::Analysis(err.to_string())
    }
}

impl From<askama::Error> for NlpLensError {
    fn from(err: askama::Error) -> Self {
        NlpLensError::OutputFormatting(err.to_string())
    }
}
