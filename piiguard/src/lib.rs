// piiguard/src/lib.rs
//! # PiiGuard CLI Application
//!
//! This crate provides the command-line front end for `piiguard-core`: CSV
//! ingestion, the redact command, logging setup, and console output.

pub mod cli;
pub mod commands;
pub mod ingest;
pub mod logger;
pub mod ui;

pub use commands::redact::{run_redact, RedactOptions, RedactReport};
