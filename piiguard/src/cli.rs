// piiguard/src/cli.rs
//! This file defines the command-line interface (CLI) for the piiguard application.
//! License: MIT OR Apache-2.0

use clap::Parser;
use std::path::PathBuf;

use crate::commands::redact::RedactOptions;

/// Input file read when no path is given.
pub const DEFAULT_INPUT_FILE: &str = "input.csv";
/// Output file written when `--output` is not given.
pub const DEFAULT_OUTPUT_FILE: &str = "redacted_output.csv";
pub const DEFAULT_ID_COLUMN: &str = "record_id";
pub const DEFAULT_PAYLOAD_COLUMN: &str = "data_json";

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "piiguard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Detect and mask PII in CSV records carrying JSON payloads",
    long_about = "PiiGuard reads a CSV file whose rows hold a record identifier and a JSON payload, decides for each record whether the payload contains Personally Identifiable Information (standalone patterns such as phone numbers, or combinations of fields such as name plus email), and writes a CSV with the masked payload and a PII flag per record."
)]
pub struct Cli {
    /// Path to the input CSV file.
    #[arg(value_name = "INPUT", env = "PIIGUARD_INPUT", default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,

    /// Path of the output CSV file.
    #[arg(long, short = 'o', value_name = "FILE", env = "PIIGUARD_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Name of the column holding the record identifier.
    #[arg(long = "id-column", value_name = "NAME", env = "PIIGUARD_ID_COLUMN", default_value = DEFAULT_ID_COLUMN)]
    pub id_column: String,

    /// Name of the column holding the JSON payload.
    #[arg(long = "payload-column", value_name = "NAME", env = "PIIGUARD_PAYLOAD_COLUMN", default_value = DEFAULT_PAYLOAD_COLUMN)]
    pub payload_column: String,

    /// Path to a custom catalog configuration file (YAML), merged over the built-in catalog.
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom catalog configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Print a summary table of detections to stderr.
    #[arg(long = "summary", help = "Print a summary table of detections to stderr.")]
    pub summary: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.", conflicts_with = "debug")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,
}

impl Cli {
    pub fn redact_options(&self) -> RedactOptions {
        RedactOptions {
            input_path: self.input.clone(),
            output_path: self.output.clone(),
            id_column: self.id_column.clone(),
            payload_column: self.payload_column.clone(),
            config_path: self.config.clone(),
        }
    }
}
