//! The document under analysis

use crate::input::MediaType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub source: InputSource,
    pub metadata: DocumentMetadata,
}

/// Where the text came from: the two menu input modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputSource {
    ManualText,
    UploadedFile { name: String, media_type: MediaType },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub word_count: usize,
    pub character_count: usize,
    pub line_count: usize,
}

impl Document {
    pub fn new(content: String, source: InputSource) -> Self {
        let word_count = content.split_whitespace().count();
        let character_count = content.chars().count();
        let line_count = content.lines().count();

        let mut document = Self {
            content,
            source,
            metadata: DocumentMetadata {
                title: None,
                word_count,
                character_count,
                line_count,
            },
        };
        document.extract_title();
        document
    }

    pub fn from_text(content: impl Into<String>) -> Self {
        Self::new(content.into(), InputSource::ManualText)
    }

    pub fn from_file(content: String, name: impl Into<String>, media_type: MediaType) -> Self {
        Self::new(
            content,
            InputSource::UploadedFile {
                name: name.into(),
                media_type,
            },
        )
    }

    /// First short non-empty line, if the text looks like it has one
    fn extract_title(&mut self) {
        for line in self.content.lines().take(5) {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.chars().count() <= 80 && !trimmed.ends_with('.') && self.content.lines().count() > 1 {
                self.metadata.title = Some(trimmed.to_string());
            }
            break;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn source_label(&self) -> String {
        self.source.to_string()
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::ManualText => write!(f, "Manual text"),
            InputSource::UploadedFile { name, media_type } => write!(f, "{} ({})", name, media_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_counts() {
        let doc = Document::from_text("Hello world.\nSecond line here.");
        assert_eq!(doc.metadata.word_count, 5);
        assert_eq!(doc.metadata.character_count, 30);
        assert_eq!(doc.metadata.line_count, 2);
        assert_eq!(doc.source, InputSource::ManualText);
    }

    #[test]
    fn test_title_detection() {
        let doc = Document::from_text("Quarterly Report\n\nRevenue grew.");
        assert_eq!(doc.metadata.title.as_deref(), Some("Quarterly Report"));

        let single = Document::from_text("Just one sentence.");
        assert_eq!(single.metadata.title, None);
    }

    #[test]
    fn test_source_label() {
        let doc = Document::from_file("text".to_string(), "notes.txt", MediaType::Text);
        assert_eq!(doc.source_label(), "notes.txt (text/plain)");
        assert!(Document::from_text("  \n").is_empty());
    }
}
