//! compiler.rs - Compiles catalog rules into regular expressions.
//!
//! This module converts the `PatternRule`s of a `DetectionConfig` into a
//! `PatternCatalog`, ordered by kind so masking passes always run in the same
//! sequence. The catalog is built once and then only borrowed.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::catalog::PatternKind;
use crate::config::{DetectionConfig, PatternRule, MAX_PATTERN_LENGTH};
use crate::errors::PiiGuardError;

/// Compiled regex size limit.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A single compiled catalog entry.
#[derive(Debug)]
pub struct CompiledPattern {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The unique name of the rule.
    pub name: String,
    /// Selects the mask rule for matches.
    pub kind: PatternKind,
}

impl CompiledPattern {
    /// Replaces every non-overlapping match in `text` with its masked form.
    pub fn mask_all(&self, text: &str) -> String {
        self.regex
            .replace_all(text, |caps: &regex::Captures| self.kind.mask(&caps[0]))
            .into_owned()
    }
}

/// The immutable set of compiled patterns, in catalog order.
#[derive(Debug)]
pub struct PatternCatalog {
    pub patterns: Vec<CompiledPattern>,
}

impl PatternCatalog {
    /// True iff any pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.regex.is_match(text))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile_rule(rule: &PatternRule) -> Result<CompiledPattern, PiiGuardError> {
    if rule.pattern.len() > MAX_PATTERN_LENGTH {
        return Err(PiiGuardError::PatternLengthExceeded(
            rule.name.clone(),
            rule.pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }
    let regex = RegexBuilder::new(&rule.pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| PiiGuardError::RuleCompilationError(rule.name.clone(), e))?;
    debug!(target: "piiguard_core::catalog", "Rule '{}' compiled successfully.", rule.name);
    Ok(CompiledPattern {
        regex,
        name: rule.name.clone(),
        kind: rule.kind,
    })
}

/// Compiles every enabled rule of `config` into a `PatternCatalog`.
///
/// All failures are collected and reported as a single `Fatal` error.
pub fn compile_catalog(config: &DetectionConfig) -> Result<PatternCatalog, PiiGuardError> {
    debug!("Starting compilation of {} patterns.", config.patterns.len());

    let mut compiled = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in &config.patterns {
        if !rule.enabled {
            warn!("Skipping pattern '{}' because it is disabled.", rule.name);
            continue;
        }
        match compile_rule(rule) {
            Ok(pattern) => compiled.push(pattern),
            Err(e) => compilation_errors.push(e),
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(PiiGuardError::Fatal(format!(
            "Failed to compile {} pattern(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    // Stable: rules of one kind keep their configured order.
    compiled.sort_by_key(|p| p.kind);
    debug!("Finished compiling catalog. Total compiled: {}.", compiled.len());
    Ok(PatternCatalog { patterns: compiled })
}
