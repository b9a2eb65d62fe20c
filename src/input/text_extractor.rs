//! Text extraction from various file formats

use crate::config::PdfPages;
use crate::error::{NlpLensError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;
use zip::ZipArchive;

pub trait TextExtractor {
    /// Extract text from an in-memory upload; `source` names it in error messages
    fn extract_bytes(&self, source: &str, bytes: &[u8]) -> Result<String>;

    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor {
    pub pages: PdfPages,
}

impl TextExtractor for PdfExtractor {
    fn extract_bytes(&self, source: &str, bytes: &[u8]) -> Result<String> {
        match self.pages {
            PdfPages::All => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
                NlpLensError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", source, e))
            }),
            PdfPages::First => {
                let doc = lopdf::Document::load_mem(bytes).map_err(|e| {
                    NlpLensError::PdfExtraction(format!("Failed to load PDF '{}': {}", source, e))
                })?;
                let first_page = doc.get_pages().keys().next().copied().ok_or_else(|| {
                    NlpLensError::PdfExtraction(format!("PDF '{}' has no pages", source))
                })?;
                doc.extract_text(&[first_page]).map_err(|e| {
                    NlpLensError::PdfExtraction(format!(
                        "Failed to extract page {} of PDF '{}': {}",
                        first_page, source, e
                    ))
                })
            }
        }
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        self.extract_bytes(&path.display().to_string(), &bytes)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_bytes(&self, source: &str, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            NlpLensError::InvalidInput(format!("'{}' is not valid UTF-8: {}", source, e))
        })
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        self.extract_bytes(&path.display().to_string(), &bytes)
    }
}

/// Reads `word/document.xml` out of the DOCX zip container
pub struct DocxExtractor {
    markup: Regex,
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxExtractor {
    pub fn new() -> Self {
        let markup = Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab\s*/>|<w:(?:br|cr)(?:\s[^>]*)?/>|</w:p>")
            .expect("Invalid DOCX markup regex");
        Self { markup }
    }

    fn document_xml(&self, source: &str, bytes: &[u8]) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            NlpLensError::DocxExtraction(format!("'{}' is not a DOCX archive: {}", source, e))
        })?;
        let mut entry = archive.by_name("word/document.xml").map_err(|e| {
            NlpLensError::DocxExtraction(format!("'{}' has no word/document.xml: {}", source, e))
        })?;
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        Ok(xml)
    }

    /// Flatten WordprocessingML runs into text, one line per paragraph
    pub fn xml_to_text(&self, xml: &str) -> String {
        let mut text = String::new();
        for caps in self.markup.captures_iter(xml) {
            if let Some(run) = caps.get(1) {
                text.push_str(&unescape_xml(run.as_str()));
                continue;
            }
            match caps.get(0).map(|m| m.as_str()) {
                Some(tag) if tag.starts_with("<w:tab") => text.push('\t'),
                Some(_) => text.push('\n'),
                None => {}
            }
        }
        text.trim().to_string()
    }
}

impl TextExtractor for DocxExtractor {
    fn extract_bytes(&self, source: &str, bytes: &[u8]) -> Result<String> {
        let xml = self.document_xml(source, bytes)?;
        Ok(self.xml_to_text(&xml))
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        self.extract_bytes(&path.display().to_string(), &bytes)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract_bytes(&self, source: &str, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract_bytes(source, bytes)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        self.extract_bytes(&path.display().to_string(), &bytes)
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("&nbsp;", " ");

        let re = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
        let clean_text = unescape_xml(&re.replace_all(&text, ""));

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_xml_to_text() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> world &amp; co</w:t></w:r></w:p>
            <w:p><w:r><w:t>Second</w:t><w:tab/><w:t>line</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = DocxExtractor::new().xml_to_text(xml);
        assert_eq!(text, "Hello world & co\nSecond\tline");
    }

    #[test]
    fn test_docx_rejects_non_zip() {
        let result = DocxExtractor::new().extract_bytes("notes.docx", b"plain bytes");
        assert!(matches!(result, Err(NlpLensError::DocxExtraction(_))));
    }

    #[test]
    fn test_plain_text_requires_utf8() {
        assert_eq!(PlainTextExtractor.extract_bytes("a.txt", "héllo".as_bytes()).unwrap(), "héllo");
        assert!(PlainTextExtractor.extract_bytes("b.txt", &[0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn test_markdown_is_stripped() {
        let text = MarkdownExtractor
            .extract_bytes("a.md", b"# Title\n\nSome **bold** text & more.")
            .unwrap();
        assert_eq!(text, "Title\nSome bold text & more.");
    }

    #[test]
    fn test_pdf_rejects_garbage() {
        let extractor = PdfExtractor { pages: PdfPages::First };
        assert!(matches!(
            extractor.extract_bytes("x.pdf", b"not a pdf"),
            Err(NlpLensError::PdfExtraction(_))
        ));
    }
}
