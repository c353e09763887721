// piiguard-core/src/engine.rs
//! Defines the core DetectionEngine trait.
//!
//! The `DetectionEngine` trait is the seam between the record classifier and
//! the way standalone PII is found and masked. The record classifier only sees
//! this trait, so an alternative matcher can be dropped in without touching
//! the orchestration.
//!
//! License: MIT OR APACHE 2.0

use serde_json::Value;

use crate::fields::FieldVocabulary;
use crate::pattern_match::PatternMatch;

/// Standalone matching, masking, and field vocabulary for one configured catalog.
///
/// Implementations are immutable after construction and may be shared across
/// threads by reference.
pub trait DetectionEngine: Send + Sync {
    /// True iff any catalog pattern matches anywhere in `text`.
    fn check_standalone(&self, text: &str) -> bool;

    /// Every match of every pattern, each pattern evaluated independently over
    /// `text`, sorted by start offset. Overlaps between patterns are kept.
    fn find_matches(&self, text: &str) -> Vec<PatternMatch>;

    /// Runs one masking pass per pattern, in catalog order, each pass over the
    /// output of the previous one.
    fn mask_text(&self, text: &str) -> String;

    /// Coerces `value` to text, then masks it with [`DetectionEngine::mask_text`].
    fn mask_value(&self, value: &Value) -> String;

    /// The field vocabulary used by the combinatorial evaluator.
    fn vocabulary(&self) -> &FieldVocabulary;
}
