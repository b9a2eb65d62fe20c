//! Input manager for handling different file types

use crate::config::{InputConfig, PdfPages};
use crate::error::{NlpLensError, Result};
use crate::input::file_detector::MediaType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Extracted text depends on how the file was read, not just where it lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    media_type: MediaType,
    pdf_pages: PdfPages,
}

pub struct InputManager {
    cache: HashMap<CacheKey, String>,
    enable_cache: bool,
    pdf: PdfExtractor,
    docx: DocxExtractor,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            pdf: PdfExtractor { pages: PdfPages::All },
            docx: DocxExtractor::new(),
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new()
            .with_cache(config.enable_cache)
            .with_pdf_pages(config.pdf_pages)
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_pdf_pages(mut self, pages: PdfPages) -> Self {
        self.pdf = PdfExtractor { pages };
        self
    }

    /// Extract text from a file on disk; `declared` overrides extension detection
    pub async fn extract_text(&mut self, path: &Path, declared: Option<MediaType>) -> Result<String> {
        let media_type = match declared {
            Some(media_type) => media_type,
            None => self.detect_media_type(path)?,
        };
        let cache_key = CacheKey {
            path: path.to_path_buf(),
            media_type,
            pdf_pages: self.pdf.pages,
        };

        // Check cache first
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&cache_key) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(NlpLensError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let text = match media_type {
            MediaType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                self.pdf.extract(path).await?
            },
            MediaType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            },
            MediaType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                self.docx.extract(path).await?
            },
            MediaType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            },
            MediaType::Unknown => {
                return Err(NlpLensError::UnsupportedFormat(
                    format!("Unsupported file type for: {}", path.display())
                ));
            }
        };
        debug!("Extracted {} characters from {}", text.chars().count(), path.display());

        if self.enable_cache {
            self.cache.insert(cache_key, text.clone());
        }

        Ok(text)
    }

    /// Extract text from an upload held in memory
    pub fn extract_bytes(&self, name: &str, bytes: &[u8], media_type: MediaType) -> Result<String> {
        info!("Extracting {} bytes from upload '{}' ({})", bytes.len(), name, media_type);
        match media_type {
            MediaType::Pdf => self.pdf.extract_bytes(name, bytes),
            MediaType::Text => PlainTextExtractor.extract_bytes(name, bytes),
            MediaType::Docx => self.docx.extract_bytes(name, bytes),
            MediaType::Markdown => MarkdownExtractor.extract_bytes(name, bytes),
            MediaType::Unknown => Err(NlpLensError::UnsupportedFormat(format!(
                "Unsupported file type for upload: {}",
                name
            ))),
        }
    }

    pub fn detect_media_type(&self, path: &Path) -> Result<MediaType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| NlpLensError::InvalidInput(
                format!("File has no extension: {}", path.display())
            ))?;

        Ok(MediaType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
