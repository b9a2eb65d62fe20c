//! Integration tests for nlp-lens

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use nlp_lens::config::{Config, OutputFormat, PdfPages};
use nlp_lens::input::{InputManager, MediaType};
use nlp_lens::output::{save_report_to_file, ReportGenerator};
use nlp_lens::processing::analyzer::AnalysisEngine;
use nlp_lens::processing::document::Document;
use nlp_lens::processing::pipeline::TokenTable;
use nlp_lens::visualization::{ChartPanel, INSUFFICIENT_DATA};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn engine() -> AnalysisEngine {
    AnalysisEngine::new(&Config::default()).unwrap()
}

/// PDF with one line of Courier text per page
fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 14.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn write_pdf(dir: &Path, pages: &[&str]) -> PathBuf {
    let path = dir.join("sample.pdf");
    std::fs::write(&path, pdf_bytes(pages)).unwrap();
    path
}

/// Minimal DOCX: just the `word/document.xml` part the extractor reads
fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let mut body = String::new();
    for paragraph in paragraphs {
        body.push_str(&format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", paragraph));
    }
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

fn write_docx(dir: &Path, paragraphs: &[&str]) -> PathBuf {
    let path = dir.join("sample.docx");
    std::fs::write(&path, docx_bytes(paragraphs)).unwrap();
    path
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample.txt"), None)
        .await
        .unwrap();
    assert!(text.contains("Tim Cook"));
    assert!(text.contains("London"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample.md"), None)
        .await
        .unwrap();
    assert!(text.contains("Quarterly Notes"));
    assert!(text.contains("research team"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_text_extraction_from_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), &["Alpha opens the quarterly report", "Bravo closes it"]);

    let mut manager = InputManager::new().with_cache(false);
    let all_pages = manager.extract_text(&path, None).await.unwrap();
    assert!(all_pages.contains("Alpha"));
    assert!(all_pages.contains("Bravo"));

    let mut first_only = InputManager::new().with_pdf_pages(PdfPages::First);
    let first_page = first_only.extract_text(&path, None).await.unwrap();
    assert!(first_page.contains("Alpha"));
    assert!(!first_page.contains("Bravo"));
}

#[tokio::test]
async fn test_text_extraction_from_docx() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), &["Maria joined Google in Dublin.", "It was a great move."]);

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path, None).await.unwrap();
    assert_eq!(text, "Maria joined Google in Dublin.\nIt was a great move.");
}

#[tokio::test]
async fn test_extract_bytes_for_each_media_type() {
    let manager = InputManager::new();

    let text = manager
        .extract_bytes("notes.txt", "Plain upload text.".as_bytes(), MediaType::Text)
        .unwrap();
    assert_eq!(text, "Plain upload text.");

    let markdown = manager
        .extract_bytes("notes.md", b"## Heading\n\nSome **bold** words.", MediaType::Markdown)
        .unwrap();
    assert!(markdown.contains("Heading"));
    assert!(markdown.contains("bold words"));
    assert!(!markdown.contains("**"));

    let docx = manager
        .extract_bytes("notes.docx", &docx_bytes(&["First line.", "Second line."]), MediaType::Docx)
        .unwrap();
    assert_eq!(docx, "First line.\nSecond line.");

    let pdf = manager
        .extract_bytes("notes.pdf", &pdf_bytes(&["Uploaded straight from memory"]), MediaType::Pdf)
        .unwrap();
    assert!(pdf.contains("Uploaded"));

    assert!(manager
        .extract_bytes("notes.xyz", b"anything", MediaType::Unknown)
        .is_err());
}

#[tokio::test]
async fn test_first_page_from_memory() {
    let manager = InputManager::new().with_pdf_pages(PdfPages::First);
    let text = manager
        .extract_bytes("two.pdf", &pdf_bytes(&["Alpha page", "Bravo page"]), MediaType::Pdf)
        .unwrap();
    assert!(text.contains("Alpha"));
    assert!(!text.contains("Bravo"));
}

#[tokio::test]
async fn test_declared_media_type_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.bin");
    std::fs::write(&path, "Plain words in a file with an odd name.").unwrap();

    let mut manager = InputManager::new();
    assert!(manager.extract_text(&path, None).await.is_err());
    let text = manager
        .extract_text(&path, Some(MediaType::from_mime("text/plain")))
        .await
        .unwrap();
    assert!(text.starts_with("Plain words"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample.txt");

    let text1 = manager.extract_text(path, None).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path, None).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_keeps_media_types_apart() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample.md");

    let flattened = manager.extract_text(path, None).await.unwrap();
    let raw = manager.extract_text(path, Some(MediaType::Text)).await.unwrap();
    assert!(!flattened.contains("**"));
    assert!(raw.contains("**"));
    assert_eq!(manager.cache_size(), 2);

    let again = manager.extract_text(path, Some(MediaType::Markdown)).await.unwrap();
    assert_eq!(again, flattened);
    assert_eq!(manager.cache_size(), 2);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/unsupported.xyz"), None)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/nonexistent.txt"), None)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_token_table_matches_token_count() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample.txt"), None)
        .await
        .unwrap();
    let engine = engine();
    let report = engine
        .run(&Document::from_file(text.clone(), "sample.txt", MediaType::Text), None)
        .unwrap();

    assert_eq!(report.token_table.len(), engine.pipeline().analyze(&text).tokens.len());
    assert_eq!(report.metadata.source, "sample.txt (text/plain)");
    assert!(report.entities.iter().any(|e| e.text == "Tim Cook" && e.label == "PERSON"));
}

#[tokio::test]
async fn test_keyword_counts_respect_n() {
    let text = std::fs::read_to_string("tests/fixtures/sample.txt").unwrap();
    let engine = engine();
    for requested in [1, 5, 8, 15, 40] {
        let report = engine.run(&Document::from_text(text.clone()), Some(requested)).unwrap();
        assert!(report.word_freq.len() <= report.metadata.top_n);
        assert!((5..=15).contains(&report.metadata.top_n));
        assert!(report.top_keywords.len() <= 5);
    }
    let direct = engine.pipeline().get_most_common_tokens(&text, 3);
    assert!(direct.len() <= 3);
}

#[tokio::test]
async fn test_csv_download_round_trip() {
    let text = std::fs::read_to_string("tests/fixtures/sample.txt").unwrap();
    let report = engine().run(&Document::from_text(text), None).unwrap();

    let csv = report.download.csv().unwrap();
    let restored = TokenTable::from_csv(&csv).unwrap();
    assert_eq!(restored.len(), report.token_table.len());
    assert_eq!(
        csv.lines().next().unwrap().split(',').collect::<Vec<_>>(),
        TokenTable::column_names()
    );
    assert!(report.download.filename.starts_with("nlp_result_"));
    assert!(report.download.filename.ends_with("_.csv"));
}

#[tokio::test]
async fn test_sentiment_is_bounded() {
    let engine = engine();
    let texts = [
        "This is the best, most wonderful, absolutely amazing day ever!",
        "Terrible, awful, horrible and very bad. I hate it.",
        "The report is not good and not useful.",
        "",
        "12 34 56",
    ];
    for text in texts {
        let sentiment = engine.pipeline().get_sentiments(text);
        assert!((-1.0..=1.0).contains(&sentiment.polarity), "{}", text);
        assert!((0.0..=1.0).contains(&sentiment.subjectivity), "{}", text);
    }
}

#[tokio::test]
async fn test_empty_document_yields_unavailable_pos_chart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "").unwrap();

    let mut manager = InputManager::new();
    let uploaded_text = manager.extract_text(&path, None).await.unwrap();
    let engine = engine();

    let uploaded = engine
        .run(&Document::from_file(uploaded_text, "empty.txt", MediaType::Text), None)
        .unwrap();
    let manual = engine.run(&Document::from_text(""), None).unwrap();

    for report in [uploaded, manual] {
        assert_eq!(report.pos_plot, ChartPanel::Unavailable(INSUFFICIENT_DATA.to_string()));
        assert!(report.token_table.is_empty());
    }
}

#[tokio::test]
async fn test_file_with_nul_characters_is_analyzed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binaryish.txt");
    std::fs::write(&path, "Column\0separated values from Paris.").unwrap();

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path, None).await.unwrap();
    let report = engine()
        .run(&Document::from_file(text, "binaryish.txt", MediaType::Text), None)
        .unwrap();
    assert!(!report.token_table.is_empty());
    assert!(report.original_text.contains('\0'));
}

#[tokio::test]
async fn test_html_report_saved() {
    let dir = tempfile::tempdir().unwrap();
    let docx = write_docx(dir.path(), &["The new library in Toronto is beautiful and quiet."]);

    let mut manager = InputManager::new();
    let text = manager.extract_text(&docx, None).await.unwrap();
    let report = engine()
        .run(&Document::from_file(text, "sample.docx", MediaType::Docx), Some(6))
        .unwrap();

    let html = ReportGenerator::with_options(false, false, true, true, true)
        .generate_report(&report, &OutputFormat::Html)
        .unwrap();
    let out = dir.path().join("out").join("report.html");
    save_report_to_file(&html, &out).unwrap();

    let saved = std::fs::read_to_string(&out).unwrap();
    assert!(saved.starts_with("<!DOCTYPE html>"));
    assert!(saved.contains("Plot Word Cloud"));
    assert!(saved.contains("data:file/csv;base64,"));
}
