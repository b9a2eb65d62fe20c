//! nlp-lens library: canned NLP analyses and visualizations for a single document

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod visualization;

pub use config::Config;
pub use error::{NlpLensError, Result};
