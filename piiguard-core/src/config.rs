//! Configuration management for `piiguard-core`.
//!
//! This module defines the data structures describing the pattern catalog and the
//! field-name vocabularies used by the combinatorial heuristic. It handles
//! deserialization of YAML documents and provides utilities for loading, merging,
//! and validating them.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::catalog::PatternKind;
use crate::errors::PiiGuardError;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A single named matcher in the pattern catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatternRule {
    /// Unique identifier for the rule (e.g., "phone_number").
    pub name: String,
    /// Selects the mask rule applied to matches of this pattern.
    pub kind: PatternKind,
    /// The regex pattern string.
    pub pattern: String,
    /// Human-readable description of what the rule targets.
    #[serde(default)]
    pub description: Option<String>,
    /// A disabled rule is left out of the compiled catalog.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Field-name vocabularies, one list per semantic category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VocabularyConfig {
    pub identity_name: Vec<String>,
    pub contact_email: Vec<String>,
    pub address_component: Vec<String>,
    pub device_or_network_id: Vec<String>,
    pub user_id: Vec<String>,
}

impl VocabularyConfig {
    /// Iterates the vocabularies as `(category label, entries)` pairs.
    pub fn lists(&self) -> [(&'static str, &[String]); 5] {
        [
            ("identity_name", self.identity_name.as_slice()),
            ("contact_email", self.contact_email.as_slice()),
            ("address_component", self.address_component.as_slice()),
            ("device_or_network_id", self.device_or_network_id.as_slice()),
            ("user_id", self.user_id.as_slice()),
        ]
    }
}

/// A user-supplied vocabulary override. Any list left out keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VocabularyOverride {
    pub identity_name: Option<Vec<String>>,
    pub contact_email: Option<Vec<String>>,
    pub address_component: Option<Vec<String>>,
    pub device_or_network_id: Option<Vec<String>>,
    pub user_id: Option<Vec<String>>,
}

/// Top-level detection configuration: the pattern catalog plus the field vocabularies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DetectionConfig {
    pub patterns: Vec<PatternRule>,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
}

/// A configuration file as written by a user; every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UserConfig {
    pub patterns: Vec<PatternRule>,
    pub vocabulary: VocabularyOverride,
}

impl DetectionConfig {
    /// Loads the built-in catalog from the embedded configuration.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default catalog from embedded string...");
        let default_yaml = include_str!("../config/default_catalog.yaml");
        let config: DetectionConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default catalog")?;

        debug!(
            "Loaded {} default patterns.",
            config.patterns.len()
        );
        Ok(config)
    }

    /// Loads a user configuration file and merges it over the built-in catalog.
    pub fn load_with_overrides<P: AsRef<Path>>(path: P) -> Result<Self> {
        let user = UserConfig::load_from_file(path)?;
        let merged = merge_config(Self::load_default()?, Some(user));
        validate_config(&merged)?;
        Ok(merged)
    }
}

impl UserConfig {
    /// Loads a user configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom catalog from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: UserConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_patterns(&config.patterns)?;
        info!(
            "Loaded {} patterns from file {}.",
            config.patterns.len(),
            path.display()
        );
        Ok(config)
    }
}

/// Merges user-defined patterns and vocabularies with the defaults.
///
/// Patterns are overridden by `name`; new names are appended after the defaults.
/// A vocabulary list present in the user config replaces the default list.
pub fn merge_config(default_config: DetectionConfig, user_config: Option<UserConfig>) -> DetectionConfig {
    let Some(user) = user_config else {
        return default_config;
    };
    debug!(
        "User config provided. Merging {} user patterns into {} defaults.",
        user.patterns.len(),
        default_config.patterns.len()
    );

    let mut patterns = default_config.patterns;
    let index: HashMap<String, usize> = patterns
        .iter()
        .enumerate()
        .map(|(i, rule)| (rule.name.clone(), i))
        .collect();
    for user_rule in user.patterns {
        match index.get(&user_rule.name) {
            Some(&i) => patterns[i] = user_rule,
            None => patterns.push(user_rule),
        }
    }

    let mut vocabulary = default_config.vocabulary;
    let overrides = user.vocabulary;
    if let Some(list) = overrides.identity_name {
        vocabulary.identity_name = list;
    }
    if let Some(list) = overrides.contact_email {
        vocabulary.contact_email = list;
    }
    if let Some(list) = overrides.address_component {
        vocabulary.address_component = list;
    }
    if let Some(list) = overrides.device_or_network_id {
        vocabulary.device_or_network_id = list;
    }
    if let Some(list) = overrides.user_id {
        vocabulary.user_id = list;
    }

    debug!("Final total patterns after merge: {}", patterns.len());
    DetectionConfig { patterns, vocabulary }
}

/// Validates the whole configuration: patterns and vocabularies.
pub fn validate_config(config: &DetectionConfig) -> Result<(), PiiGuardError> {
    let mut errors = pattern_errors(&config.patterns);
    errors.extend(vocabulary_errors(&config.vocabulary));
    into_result(errors)
}

fn validate_patterns(rules: &[PatternRule]) -> Result<(), PiiGuardError> {
    into_result(pattern_errors(rules))
}

fn into_result(errors: Vec<String>) -> Result<(), PiiGuardError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(PiiGuardError::InvalidConfig(errors.join("\n")))
    }
}

fn pattern_errors(rules: &[PatternRule]) -> Vec<String> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A pattern has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate pattern name found: '{}'.", rule.name));
        }

        if rule.pattern.is_empty() {
            errors.push(format!("Pattern '{}' has an empty `pattern` field.", rule.name));
            continue;
        }
        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Pattern '{}' is {} characters long (maximum {}).",
                rule.name,
                rule.pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }
        if let Err(e) = Regex::new(&rule.pattern) {
            errors.push(format!("Pattern '{}' has an invalid regex: {}", rule.name, e));
        }
    }
    errors
}

fn vocabulary_errors(vocabulary: &VocabularyConfig) -> Vec<String> {
    let mut errors = Vec::new();
    let mut owner: HashMap<String, &'static str> = HashMap::new();

    for (category, entries) in vocabulary.lists() {
        for entry in entries {
            let key = entry.trim().to_lowercase();
            if key.is_empty() {
                errors.push(format!("Vocabulary '{}' contains an empty field name.", category));
                continue;
            }
            if let Some(previous) = owner.insert(key.clone(), category) {
                if previous != category {
                    errors.push(format!(
                        "Field name '{}' appears in both '{}' and '{}'.",
                        key, previous, category
                    ));
                }
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let config = DetectionConfig::load_default().unwrap();
        assert_eq!(config.patterns.len(), 4);
        assert!(validate_config(&config).is_ok());
        assert!(config.vocabulary.contact_email.contains(&"email".to_string()));
    }

    #[test]
    fn overlapping_vocabularies_are_rejected() {
        let mut config = DetectionConfig::load_default().unwrap();
        config.vocabulary.user_id.push("Email".to_string());
        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("'email' appears in both 'contact_email' and 'user_id'"), "{err}");
    }

    #[test]
    fn overlong_pattern_is_rejected() {
        let rule = PatternRule {
            name: "long".to_string(),
            kind: PatternKind::Phone,
            pattern: "a".repeat(MAX_PATTERN_LENGTH + 1),
            description: None,
            enabled: true,
        };
        assert!(validate_patterns(&[rule]).is_err());
    }
}
