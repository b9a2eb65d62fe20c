//! Report assembly and output formatting

pub mod download;
pub mod formatter;
pub mod report;

pub use download::{make_downloadable, DownloadLink};
pub use formatter::{
    resolve_save_path, save_report_to_file, suggest_filename, OutputFormatter, ReportGenerator,
};
pub use report::AnalysisReport;
