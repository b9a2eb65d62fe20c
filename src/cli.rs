//! CLI interface for nlp-lens

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nlp-lens")]
#[command(about = "Canned NLP visualizations for pasted text or uploaded documents")]
#[command(long_about = "Tokenize, tag, find entities, count keywords, score sentiment and draw word clouds for a piece of text or a PDF/DOCX/TXT file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Options shared by both analysis modes
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Number of most common tokens to plot (clamped to the configured range)
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Output format: console, json, markdown, html, csv
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to this file, or into this directory under a suggested name
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Write the token table as CSV to this path
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Home: analyze text typed on the command line or piped on stdin
    Home {
        /// Text to analyze; read from stdin when omitted
        #[arg(long)]
        text: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// NLP (files): analyze an uploaded PDF, DOCX, TXT or MD file
    Files {
        /// Path to the document
        path: PathBuf,

        /// Declared media type, e.g. application/pdf (overrides extension detection)
        #[arg(long)]
        media_type: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// About this tool
    About,

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        "csv" => Ok(crate::config::OutputFormat::Csv),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html, csv", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("HTML"), Ok(OutputFormat::Html));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("csv"), Ok(OutputFormat::Csv));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["pdf", "docx", "txt"];
        assert!(validate_file_extension(Path::new("a/report.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("notes.odt"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("README"), &allowed).is_err());
    }

    #[test]
    fn test_files_command_parses() {
        let cli = Cli::try_parse_from([
            "nlp-lens", "files", "doc.docx", "--top", "8", "-o", "html",
        ])
        .unwrap();
        match cli.command {
            Commands::Files { path, render, media_type } => {
                assert_eq!(path, PathBuf::from("doc.docx"));
                assert_eq!(render.top, Some(8));
                assert_eq!(render.output.as_deref(), Some("html"));
                assert!(media_type.is_none());
            }
            _ => panic!("expected files command"),
        }
    }
}
