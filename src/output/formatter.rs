//! Output formatters - console, JSON, Markdown, HTML page and raw CSV

use crate::config::OutputFormat;
use crate::error::{NlpLensError, Result};
use crate::output::download::DOWNLOAD_HEADER;
use crate::output::report::{AnalysisReport, PANEL_TITLES};
use crate::processing::entities::html_escape;
use crate::visualization::ChartPanel;
use askama::Template;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Rows shown in the console token table unless detailed output is on
const CONSOLE_TOKEN_ROWS: usize = 40;
const TEXT_BAR_WIDTH: usize = 30;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and text bar charts
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Single-page HTML results view
pub struct HtmlFormatter {
    include_styles: bool,
}

/// The token table alone, as the download link carries it
pub struct CsvFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
    csv_formatter: CsvFormatter,
}

/// Askama template for HTML output
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>NLP Lens</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 1100px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            margin-bottom: 20px;
            border-bottom: 3px solid #ff4b4b;
            padding-bottom: 10px;
        }
        details {
            border: 1px solid #e9ecef;
            border-radius: 6px;
            margin: 12px 0;
            padding: 8px 14px;
        }
        summary {
            cursor: pointer;
            font-weight: bold;
            color: #31333f;
        }
        .columns {
            display: grid;
            grid-template-columns: 1fr 1fr;
            gap: 20px;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            font-size: 0.9em;
        }
        th, td {
            border-bottom: 1px solid #e9ecef;
            padding: 4px 8px;
            text-align: left;
        }
        .original {
            white-space: pre-wrap;
        }
        .notice {
            background: #fff3cd;
            padding: 10px;
            border-radius: 6px;
        }
        svg {
            max-width: 100%;
            height: auto;
        }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>NLP Lens</h1>
            <p>Source: {{ source }} | Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <details>
            <summary>{{ original_title }}</summary>
            <div class="original">{{ original_text }}</div>
        </details>

        <details>
            <summary>{{ table_title }}</summary>
            {{ token_table_html|safe }}
        </details>

        <details>
            <summary>{{ entities_title }}</summary>
            {{ entities_html|safe }}
        </details>

        <div class="columns">
            <div>
                <details>
                    <summary>{{ stats_title }}</summary>
                    {{ word_stats_html|safe }}
                </details>
                <details>
                    <summary>{{ keywords_title }}</summary>
                    {{ top_keywords_html|safe }}
                </details>
                <details>
                    <summary>{{ sentiment_title }}</summary>
                    <p>{{ sentiment }}</p>
                    <p><strong>{{ sentiment_label }}</strong></p>
                </details>
            </div>
            <div>
                {{ charts_html|safe }}
            </div>
        </div>

        <details>
            <summary>{{ download_title }}</summary>
            <h3>{{ download_header }}</h3>
            {{ download_html|safe }}
        </details>

        <div class="metadata">
            <p><strong>Generated by nlp-lens v{{ version }}</strong></p>
            <p>{{ word_count }} words | {{ character_count }} characters | {{ token_count }} tokens | top {{ top_n }} tokens plotted</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    source: String,
    generated_at: String,
    processing_time: u64,
    original_title: &'static str,
    original_text: String,
    table_title: &'static str,
    token_table_html: String,
    entities_title: &'static str,
    entities_html: String,
    stats_title: &'static str,
    word_stats_html: String,
    keywords_title: &'static str,
    top_keywords_html: String,
    sentiment_title: &'static str,
    sentiment: String,
    sentiment_label: &'static str,
    charts_html: String,
    download_title: &'static str,
    download_header: &'static str,
    download_html: String,
    version: String,
    word_count: usize,
    character_count: usize,
    token_count: usize,
    top_n: usize,
}

fn format_timestamp(report: &AnalysisReport) -> String {
    chrono::DateTime::<chrono::Local>::from(report.metadata.generated_at)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn text_bars(&self, bars: &[(String, usize)]) -> String {
        let max = bars.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
        let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        let mut output = String::new();
        for (label, value) in bars {
            let len = (value * TEXT_BAR_WIDTH).div_ceil(max);
            output.push_str(&format!(
                "  {:<width$} {} {}\n",
                label,
                self.colorize(&"█".repeat(len), Color::Cyan),
                value,
                width = label_width
            ));
        }
        output
    }

    fn format_chart(&self, panel: &ChartPanel, bars: Option<Vec<(String, usize)>>) -> String {
        match (panel, bars) {
            (ChartPanel::Rendered(_), Some(bars)) => self.text_bars(&bars),
            (ChartPanel::Rendered(_), None) => "  Rendered as SVG; use `-o html` to view it\n".to_string(),
            (ChartPanel::Unavailable(reason), _) => {
                format!("  {}\n", self.colorize(reason, Color::Yellow))
            }
        }
    }

    fn entity_color(label: &str) -> Color {
        match label {
            "PERSON" => Color::Magenta,
            "ORG" => Color::Cyan,
            "GPE" | "LOC" => Color::Green,
            "DATE" | "TIME" => Color::Yellow,
            "MONEY" | "PERCENT" | "CARDINAL" | "ORDINAL" | "QUANTITY" => Color::Blue,
            _ => Color::White,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&self.format_header("NLP LENS", 1));
        output.push_str(&format!(
            "Source: {} | Generated: {} | Processing time: {}ms\n",
            report.metadata.source,
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header(PANEL_TITLES[0], 2));
        output.push_str(&report.original_text);
        output.push('\n');

        // Token table
        output.push_str(&self.format_header(PANEL_TITLES[1], 2));
        let shown = if self.detailed {
            report.token_table.len()
        } else {
            CONSOLE_TOKEN_ROWS.min(report.token_table.len())
        };
        output.push_str(&self.colorize(
            &format!(
                "{:<16} {:<8} {:<6} {:<5} {:<16} {:<7} {}\n",
                "Token", "Shape", "PoS", "Tag", "Lemma", "IsAlpha", "Is_Stop_Word"
            ),
            Color::BrightBlack,
        ));
        for row in report.token_table.rows.iter().take(shown) {
            output.push_str(&format!(
                "{:<16} {:<8} {:<6} {:<5} {:<16} {:<7} {}\n",
                row.token.replace('\n', "\\n"),
                row.shape.replace('\n', "\\n"),
                row.pos.as_str(),
                row.tag,
                row.lemma.replace('\n', "\\n"),
                row.is_alpha,
                row.is_stop
            ));
        }
        if shown < report.token_table.len() {
            output.push_str(&self.colorize(
                &format!("... {} more tokens (use --verbose or --csv for all)\n", report.token_table.len() - shown),
                Color::BrightBlack,
            ));
        }

        output.push_str(&self.format_header(PANEL_TITLES[2], 2));
        if report.entities.is_empty() {
            output.push_str("  No entities found\n");
        }
        for entity in &report.entities {
            output.push_str(&format!(
                "  • {} {}\n",
                entity.text,
                self.colorize(&format!("[{}]", entity.label), Self::entity_color(&entity.label))
            ));
        }

        output.push_str(&self.format_header(PANEL_TITLES[3], 3));
        for (key, value) in report.word_stats_rows() {
            output.push_str(&format!("  {}: {}\n", self.colorize(key, Color::Cyan), value));
        }

        output.push_str(&self.format_header(PANEL_TITLES[4], 3));
        for (word, count) in report.top_keywords.iter() {
            output.push_str(&format!("  {}: {}\n", word, count));
        }

        output.push_str(&self.format_header(PANEL_TITLES[5], 3));
        let sentiment_color = match report.sentiment.label() {
            "Positive" => Color::Green,
            "Negative" => Color::Red,
            _ => Color::White,
        };
        output.push_str(&format!(
            "  {} {}\n",
            report.sentiment,
            self.colorize(report.sentiment.label(), sentiment_color)
        ));

        // Charts
        output.push_str(&self.format_header(PANEL_TITLES[6], 3));
        let word_bars: Vec<(String, usize)> = report.word_freq.iter().map(|(w, c)| (w.to_string(), c)).collect();
        output.push_str(&self.format_chart(&report.word_freq_plot, Some(word_bars)));

        output.push_str(&self.format_header(PANEL_TITLES[7], 3));
        let pos_bars: Vec<(String, usize)> = report.pos_counts.iter().map(|(p, c)| (p.to_string(), *c)).collect();
        output.push_str(&self.format_chart(&report.pos_plot, Some(pos_bars)));

        output.push_str(&self.format_header(PANEL_TITLES[8], 3));
        output.push_str(&self.format_chart(&report.word_cloud, None));

        output.push_str(&self.format_header(PANEL_TITLES[9], 2));
        output.push_str(&format!(
            "  {} (use --csv <path> to write it)\n",
            self.colorize(&report.download.filename, Color::Green)
        ));

        // Footer
        output.push_str(&format!(
            "\n{} Generated by nlp-lens v{} | {} words, {} characters\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.version,
            report.metadata.word_count,
            report.metadata.character_count
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn token_table_html(report: &AnalysisReport) -> String {
        let mut html = String::from("<table><thead><tr>");
        for header in crate::processing::pipeline::TOKEN_TABLE_HEADERS {
            html.push_str(&format!("<th>{}</th>", header));
        }
        html.push_str("</tr></thead><tbody>");
        for row in &report.token_table.rows {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&row.token),
                html_escape(&row.shape),
                row.pos,
                html_escape(&row.tag),
                html_escape(&row.lemma),
                row.is_alpha,
                row.is_stop
            ));
        }
        html.push_str("</tbody></table>");
        html
    }

    fn key_value_html<'a>(rows: impl Iterator<Item = (&'a str, String)>) -> String {
        let mut html = String::from("<table>");
        for (key, value) in rows {
            html.push_str(&format!(
                "<tr><th>{}</th><td>{}</td></tr>",
                html_escape(key),
                html_escape(&value)
            ));
        }
        html.push_str("</table>");
        html
    }

    fn charts_html(report: &AnalysisReport) -> String {
        let mut html = String::new();
        for (title, panel) in report.charts() {
            let body = match panel {
                ChartPanel::Rendered(svg) => svg.clone(),
                ChartPanel::Unavailable(reason) => {
                    format!(r#"<p class="notice">{}</p>"#, html_escape(reason))
                }
            };
            html.push_str(&format!(
                "<details><summary>{}</summary>{}</details>",
                title, body
            ));
        }
        html
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        HtmlTemplate {
            include_styles: self.include_styles,
            source: report.metadata.source.clone(),
            generated_at: format_timestamp(report),
            processing_time: report.metadata.processing_time_ms,
            original_title: PANEL_TITLES[0],
            original_text: report.original_text.clone(),
            table_title: PANEL_TITLES[1],
            token_table_html: Self::token_table_html(report),
            entities_title: PANEL_TITLES[2],
            entities_html: report.entities_html.clone(),
            stats_title: PANEL_TITLES[3],
            word_stats_html: Self::key_value_html(report.word_stats_rows().into_iter()),
            keywords_title: PANEL_TITLES[4],
            top_keywords_html: Self::key_value_html(
                report.top_keywords.iter().map(|(w, c)| (w, c.to_string())),
            ),
            sentiment_title: PANEL_TITLES[5],
            sentiment: report.sentiment.to_string(),
            sentiment_label: report.sentiment.label(),
            charts_html: Self::charts_html(report),
            download_title: PANEL_TITLES[9],
            download_header: DOWNLOAD_HEADER,
            download_html: report.download.html.clone(),
            version: report.metadata.version.clone(),
            word_count: report.metadata.word_count,
            character_count: report.metadata.character_count,
            token_count: report.token_table.len(),
            top_n: report.metadata.top_n,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let template_data = self.create_template_data(report);
        template_data
            .render()
            .map_err(|e| NlpLensError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', "\\n")
    }

    fn chart_markdown(title: &str, panel: &ChartPanel) -> String {
        match panel {
            ChartPanel::Rendered(svg) => format!(
                "![{}](data:image/svg+xml;base64,{})\n\n",
                title,
                STANDARD.encode(svg.as_bytes())
            ),
            ChartPanel::Unavailable(reason) => format!("> {}\n\n", reason),
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# NLP Lens\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Source:** {} | **Generated:** {} | **Processing Time:** {}ms\n\n",
                report.metadata.source,
                format_timestamp(report),
                report.metadata.processing_time_ms
            ));
        }

        output.push_str(&format!("## {}\n\n", PANEL_TITLES[0]));
        for line in report.original_text.lines() {
            output.push_str(&format!("> {}\n", line));
        }
        output.push('\n');

        output.push_str(&format!("## {}\n\n", PANEL_TITLES[1]));
        output.push_str("| Token | Shape | PoS | Tag | Lemma | IsAlpha | Is_Stop_Word |\n");
        output.push_str("|-------|-------|-----|-----|-------|---------|--------------|\n");
        for row in &report.token_table.rows {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                Self::cell(&row.token),
                Self::cell(&row.shape),
                row.pos,
                Self::cell(&row.tag),
                Self::cell(&row.lemma),
                row.is_alpha,
                row.is_stop
            ));
        }
        output.push('\n');

        output.push_str(&format!("## {}\n\n", PANEL_TITLES[2]));
        for entity in &report.entities {
            output.push_str(&format!("- **{}** `{}`\n", entity.text, entity.label));
        }
        output.push('\n');

        output.push_str(&format!("### {}\n\n", PANEL_TITLES[3]));
        for (key, value) in report.word_stats_rows() {
            output.push_str(&format!("- **{}:** {}\n", key, value));
        }
        output.push('\n');

        output.push_str(&format!("### {}\n\n", PANEL_TITLES[4]));
        for (word, count) in report.top_keywords.iter() {
            output.push_str(&format!("- `{}`: {}\n", word, count));
        }
        output.push('\n');

        output.push_str(&format!("### {}\n\n", PANEL_TITLES[5]));
        output.push_str(&format!("{} ({})\n\n", report.sentiment, report.sentiment.label()));

        for (title, panel) in report.charts() {
            output.push_str(&format!("### {}\n\n", title));
            output.push_str(&Self::chart_markdown(title, panel));
        }

        output.push_str(&format!("## {}\n\n", PANEL_TITLES[9]));
        output.push_str(&format!("### ** {} **\n\n", DOWNLOAD_HEADER));
        output.push_str(&report.download.html);
        output.push_str("\n\n");

        // Footer
        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by nlp-lens v{} | {} words, {} characters*\n",
                report.metadata.version, report.metadata.word_count, report.metadata.character_count
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        report.token_table.to_csv()
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
            csv_formatter: CsvFormatter,
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
            csv_formatter: CsvFormatter,
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
            OutputFormat::Csv => &self.csv_formatter,
        };
        log::debug!("Formatting report as {:?}", formatter.supports_format());
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "text".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Local::now().format("%Y%m%d-%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
        OutputFormat::Csv => "csv",
    };
    format!("{}_nlp{}.{}", base_name, timestamp_suffix, extension)
}

/// `--save` target: a directory gets a suggested, timestamped file name inside it
pub fn resolve_save_path(path: &Path, format: &OutputFormat, source_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, source_name, true))
    } else {
        path.to_path_buf()
    }
}
