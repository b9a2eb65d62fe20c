//! nlp-lens: paste text or load a document and get a battery of canned NLP visualizations

use clap::Parser;
use log::{error, info, warn};
use nlp_lens::cli::{self, Cli, Commands, ConfigAction, RenderArgs};
use nlp_lens::config::Config;
use nlp_lens::error::{NlpLensError, Result};
use nlp_lens::input::{InputManager, MediaType};
use nlp_lens::output::report::PANEL_TITLES;
use nlp_lens::output::{resolve_save_path, save_report_to_file, ReportGenerator};
use nlp_lens::processing::analyzer::AnalysisEngine;
use nlp_lens::processing::document::{Document, InputSource};
use std::path::PathBuf;
use std::process;
use tokio::io::AsyncReadExt;

const UPLOAD_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.verbose, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(
    command: Commands,
    config: Config,
    verbose: bool,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        Commands::Home { text, render } => {
            let text = match text {
                Some(text) => text,
                None => {
                    info!("Reading text from stdin");
                    let mut buffer = String::new();
                    tokio::io::stdin().read_to_string(&mut buffer).await?;
                    buffer
                }
            };
            if text.trim().is_empty() {
                warn!("No text to analyze; charts will be unavailable");
            }
            analyze_and_render(Document::from_text(text), &render, &config, verbose)
        }

        Commands::Files { path, media_type, render } => {
            let declared = match media_type.as_deref() {
                Some(mime) => match MediaType::from_mime(mime) {
                    MediaType::Unknown => {
                        return Err(NlpLensError::UnsupportedFormat(format!(
                            "Unsupported media type: {}",
                            mime
                        )))
                    }
                    media_type => Some(media_type),
                },
                None => {
                    cli::validate_file_extension(&path, UPLOAD_EXTENSIONS)
                        .map_err(NlpLensError::InvalidInput)?;
                    None
                }
            };

            let mut input_manager = InputManager::from_config(&config.input);
            let media_type = match declared {
                Some(media_type) => media_type,
                None => input_manager.detect_media_type(&path)?,
            };
            let text = input_manager.extract_text(&path, Some(media_type)).await?;

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            println!("📄 {} ({})", name, media_type);

            analyze_and_render(Document::from_file(text, name, media_type), &render, &config, verbose)
        }

        Commands::About => {
            println!("nlp-lens v{}", env!("CARGO_PKG_VERSION"));
            println!("{}\n", env!("CARGO_PKG_DESCRIPTION"));
            println!("Modes:");
            println!("  home   analyze text passed with --text or piped on stdin");
            println!("  files  analyze a PDF, DOCX, TXT or MD document");
            println!("\nPanels:");
            for title in PANEL_TITLES {
                println!("  • {}", title);
            }
            Ok(())
        }

        Commands::Config { action } => {
            let config_path = config_override.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", config_path.display());
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        NlpLensError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("{}", content);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&config_path)?;
                    println!("✅ Configuration reset: {}", config_path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }
            }
            Ok(())
        }
    }
}

fn analyze_and_render(document: Document, render: &RenderArgs, config: &Config, verbose: bool) -> Result<()> {
    let output_format = match &render.output {
        Some(format) => cli::parse_output_format(format).map_err(NlpLensError::InvalidInput)?,
        None => config.output.format,
    };

    let engine = AnalysisEngine::new(config)?;
    let report = engine.run(&document, render.top)?;

    let use_colors = config.output.color_output && !render.no_color && render.save.is_none();
    let generator = ReportGenerator::with_options(
        use_colors,
        verbose,
        true,
        true,
        config.output.include_styles,
    );
    let content = generator.generate_report(&report, &output_format)?;

    match &render.save {
        Some(path) => {
            let source_name = match &document.source {
                InputSource::UploadedFile { name, .. } => name.as_str(),
                InputSource::ManualText => "text",
            };
            let path = resolve_save_path(path, &output_format, source_name);
            save_report_to_file(&content, &path)?;
            info!("Report saved to {}", path.display());
            println!("✅ Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    if let Some(csv_path) = &render.csv {
        save_report_to_file(&report.token_table.to_csv()?, csv_path)?;
        println!("📩 Token table written to {}", csv_path.display());
    }

    Ok(())
}
