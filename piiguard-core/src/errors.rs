//! errors.rs - Custom error types for the piiguard-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `piiguard-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PiiGuardError {
    #[error("Failed to compile pattern rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Catalog validation failed:\n{0}")]
    InvalidConfig(String),

    #[error("Failed to serialize redacted payload: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
