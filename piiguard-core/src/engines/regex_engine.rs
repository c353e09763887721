// piiguard-core/src/engines/regex_engine.rs
//! A `DetectionEngine` implementation backed by the compiled regex catalog.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;

use crate::catalog::{compile_catalog, PatternCatalog};
use crate::config::{validate_config, DetectionConfig};
use crate::engine::DetectionEngine;
use crate::fields::FieldVocabulary;
use crate::pattern_match::{log_pattern_match_debug, PatternMatch};

#[derive(Debug)]
pub struct RegexEngine {
    catalog: PatternCatalog,
    vocabulary: FieldVocabulary,
    config: DetectionConfig,
}

impl RegexEngine {
    pub fn new(config: DetectionConfig) -> Result<Self> {
        validate_config(&config).context("Invalid detection configuration")?;
        let catalog = compile_catalog(&config)
            .context("Failed to compile pattern catalog for RegexEngine")?;
        let vocabulary = FieldVocabulary::new(&config.vocabulary);
        debug!("RegexEngine ready with {} patterns.", catalog.len());

        Ok(Self {
            catalog,
            vocabulary,
            config,
        })
    }

    /// Builds an engine from the built-in catalog.
    pub fn with_defaults() -> Result<Self> {
        Self::new(DetectionConfig::load_default()?)
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }
}

/// Textual form of a field value before masking.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Compact JSON text; serializing a `Value` cannot fail.
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

impl DetectionEngine for RegexEngine {
    fn check_standalone(&self, text: &str) -> bool {
        self.catalog.is_match(text)
    }

    fn find_matches(&self, text: &str) -> Vec<PatternMatch> {
        let mut out = Vec::new();
        for pattern in &self.catalog.patterns {
            for m in pattern.regex.find_iter(text) {
                let found = PatternMatch {
                    pattern_name: pattern.name.clone(),
                    kind: pattern.kind,
                    original: m.as_str().to_string(),
                    masked: pattern.kind.mask(m.as_str()),
                    start: m.start(),
                    end: m.end(),
                };
                log_pattern_match_debug(module_path!(), &found);
                out.push(found);
            }
        }
        out.sort_by_key(|m| m.start);
        out
    }

    fn mask_text(&self, text: &str) -> String {
        self.catalog
            .patterns
            .iter()
            .fold(text.to_string(), |current, pattern| pattern.mask_all(&current))
    }

    fn mask_value(&self, value: &Value) -> String {
        self.mask_text(&value_to_text(value))
    }

    fn vocabulary(&self) -> &FieldVocabulary {
        &self.vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PatternKind;
    use serde_json::json;

    fn engine() -> RegexEngine {
        RegexEngine::with_defaults().unwrap()
    }

    #[test]
    fn standalone_patterns_fire() {
        let engine = engine();
        assert!(engine.check_standalone(r#"{"phone": "9876543210"}"#));
        assert!(engine.check_standalone("aadhaar 1234 5678 9012"));
        assert!(engine.check_standalone("passport P1234567"));
        assert!(engine.check_standalone("pay me at john.doe@ybl"));
        assert!(!engine.check_standalone(r#"{"order": "A12", "qty": 3}"#));
        assert!(!engine.check_standalone("mail me at john@example.com"));
    }

    #[test]
    fn overlapping_matches_are_reported_independently() {
        // A phone number used as a UPI local part matches both rules.
        let engine = engine();
        let matches = engine.find_matches("9876543210@ybl");
        let kinds: Vec<PatternKind> = matches.iter().map(|m| m.kind).collect();
        assert_eq!(kinds.len(), 2);
        assert!(kinds.contains(&PatternKind::Phone));
        assert!(kinds.contains(&PatternKind::PaymentHandle));
        assert_eq!(engine.mask_text("9876543210@ybl"), "XXX@ybl");
    }

    #[test]
    fn masking_runs_in_catalog_order() {
        let engine = engine();
        assert_eq!(engine.mask_text("9876543210"), "98XXXXXX10");
        assert_eq!(engine.mask_text("1234 5678 9012"), "1234XXXXXXXX9012");
        assert_eq!(engine.mask_text("P1234567"), "PXXXXXX");
        assert_eq!(engine.mask_text("john.doe@ybl"), "XXX@ybl");
        assert_eq!(
            engine.mask_text("call 9876543210 or pay john@paytm"),
            "call 98XXXXXX10 or pay XXX@paytm"
        );
    }

    #[test]
    fn payment_handle_masks_up_to_the_provider_name() {
        let engine = engine();
        assert!(engine.check_standalone("priya@hdfcbank.com"));
        assert_eq!(engine.mask_text("priya@hdfcbank.com"), "XXX@hdfcbank.com");
        assert_eq!(engine.mask_text("x@sbin"), "XXX@sbin");
        assert_eq!(engine.mask_text("a@ybl2"), "XXX@ybl2");
    }

    #[test]
    fn national_id_boundaries() {
        let engine = engine();
        assert_eq!(engine.mask_text("1234 56789012"), "1234XXXXXXXX9012");
        assert!(!engine.check_standalone("ref 1234567890123"));
        assert!(!engine.check_standalone("1234\t5678\t9012"));
    }

    #[test]
    fn non_matching_text_is_untouched() {
        assert_eq!(engine().mask_text("Hello, World"), "Hello, World");
    }

    #[test]
    fn numbers_are_coerced_before_masking() {
        let engine = engine();
        assert_eq!(engine.mask_value(&json!(9876543210u64)), "98XXXXXX10");
        assert_eq!(engine.mask_value(&json!(42)), "42");
        assert_eq!(engine.mask_value(&json!(null)), "null");
        assert_eq!(engine.mask_value(&json!(true)), "true");
        assert_eq!(engine.mask_value(&json!(["9876543210"])), r#"["98XXXXXX10"]"#);
    }

    #[test]
    fn find_matches_is_sorted_by_offset() {
        let matches = engine().find_matches("x@ybl then 9876543210");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].kind, PatternKind::PaymentHandle);
        assert_eq!(matches[1].masked, "98XXXXXX10");
        assert!(matches[0].start < matches[1].start);
    }
}
