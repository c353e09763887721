// piiguard-core/src/lib.rs
//! # PiiGuard Core Library
//!
//! `piiguard-core` decides whether a structured record carries Personally
//! Identifiable Information and produces a masked version of it. It consumes an
//! already-serialized JSON payload per record and never performs file or
//! process I/O.
//!
//! ## Modules
//!
//! * `config`: `DetectionConfig`, the YAML-described pattern catalog and field vocabularies.
//! * `catalog`: `PatternKind` and compilation of rules into a `PatternCatalog`.
//! * `masking`: the per-kind mask rules.
//! * `fields`: field-name classification and the combinatorial heuristic.
//! * `engine`: the `DetectionEngine` trait.
//! * `engines`: concrete `DetectionEngine` implementations.
//! * `pattern_match`: match records and PII-safe debug logging.
//! * `payload_format`: serialization of redacted payloads.
//! * `record`: the per-record classifier.
//! * `batch`: ordered batch processing and summaries.
//!
//! ## Usage Example
//!
//! ```rust
//! use piiguard_core::{classify_and_redact, Record, RegexEngine};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let engine = RegexEngine::with_defaults()?;
//!     let record = Record::parse("42", r#"{"phone": "9876543210"}"#);
//!
//!     let out = classify_and_redact(&engine, &record);
//!     assert!(out.is_pii);
//!     assert_eq!(out.payload, r#"{"phone": "98XXXXXX10"}"#);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Loading and compiling the catalog return `anyhow::Error` or [`PiiGuardError`].
//! Classifying a record never fails; per-record problems degrade to an
//! unredacted, non-PII result.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod batch;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod fields;
pub mod masking;
pub mod pattern_match;
pub mod payload_format;
pub mod record;

pub use config::{
    merge_config,
    validate_config,
    DetectionConfig,
    PatternRule,
    UserConfig,
    VocabularyConfig,
    MAX_PATTERN_LENGTH,
};

pub use errors::PiiGuardError;

pub use catalog::{compile_catalog, CompiledPattern, PatternCatalog, PatternKind};

pub use engine::DetectionEngine;
pub use engines::regex_engine::RegexEngine;

pub use fields::{
    check_combinatorial,
    evaluate_combinatorial,
    is_truthy,
    CombinatorialRule,
    FieldCategory,
    FieldVocabulary,
};

pub use pattern_match::{redact_sensitive, PatternMatch};

pub use record::{classify, classify_and_redact, ClassificationResult, Record, RedactedRecord, Trigger};

pub use batch::{redact_records, BatchSummary};
