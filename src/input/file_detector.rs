//! File type detection

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl MediaType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => MediaType::Pdf,
            "docx" => MediaType::Docx,
            "txt" => MediaType::Text,
            "md" | "markdown" => MediaType::Markdown,
            _ => MediaType::Unknown,
        }
    }

    /// Parse a declared MIME type such as `application/pdf`; parameters after `;` are ignored
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or_default().trim().to_lowercase();
        match essence.as_str() {
            "application/pdf" => MediaType::Pdf,
            "text/plain" => MediaType::Text,
            "text/markdown" | "text/x-markdown" => MediaType::Markdown,
            DOCX_MIME => MediaType::Docx,
            _ => MediaType::Unknown,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Docx => DOCX_MIME,
            MediaType::Text => "text/plain",
            MediaType::Markdown => "text/markdown",
            MediaType::Unknown => "application/octet-stream",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mime())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(MediaType::from_extension("PDF"), MediaType::Pdf);
        assert_eq!(MediaType::from_extension("docx"), MediaType::Docx);
        assert_eq!(MediaType::from_extension("doc"), MediaType::Unknown);
    }

    #[test]
    fn test_from_mime() {
        assert_eq!(MediaType::from_mime("text/plain; charset=utf-8"), MediaType::Text);
        assert_eq!(MediaType::from_mime(DOCX_MIME), MediaType::Docx);
        assert_eq!(MediaType::from_mime("image/png"), MediaType::Unknown);
        assert_eq!(MediaType::from_mime(MediaType::Pdf.mime()), MediaType::Pdf);
    }
}
