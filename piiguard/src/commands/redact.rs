//! Redact command implementation: CSV in, classified and masked CSV out.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use piiguard_core::{redact_records, BatchSummary, DetectionConfig, RegexEngine};

use crate::ingest::{read_records, write_results, InputSchema};

/// Options for one redaction run.
#[derive(Debug, Clone)]
pub struct RedactOptions {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub id_column: String,
    pub payload_column: String,
    pub config_path: Option<PathBuf>,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RedactReport {
    pub output_path: PathBuf,
    pub summary: BatchSummary,
}

/// Builds the engine from the built-in catalog, merged with a user file when given.
pub fn build_engine(config_path: Option<&PathBuf>) -> Result<RegexEngine> {
    let config = match config_path {
        Some(path) => DetectionConfig::load_with_overrides(path)
            .with_context(|| format!("Failed to load catalog configuration {}", path.display()))?,
        None => DetectionConfig::load_default()?,
    };
    RegexEngine::new(config)
}

/// The main operation runner for the piiguard CLI.
pub fn run_redact(opts: &RedactOptions) -> Result<RedactReport> {
    info!("Starting piiguard run on {}.", opts.input_path.display());

    let engine = build_engine(opts.config_path.as_ref())?;
    let schema = InputSchema {
        id_column: opts.id_column.clone(),
        payload_column: opts.payload_column.clone(),
    };

    let records = read_records(&opts.input_path, &schema)?;
    let (results, summary) = redact_records(&engine, records);
    debug!("Classification finished; writing {} rows.", results.len());

    write_results(&opts.output_path, &results)?;

    info!("piiguard run completed.");
    Ok(RedactReport {
        output_path: opts.output_path.clone(),
        summary,
    })
}
