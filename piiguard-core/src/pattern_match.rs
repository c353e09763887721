// piiguard-core/src/pattern_match.rs
//! Match records produced by the standalone matcher, plus logging helpers
//! that keep raw PII out of debug output.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::PatternKind;

lazy_static! {
    /// Initialized once: whether raw PII may appear in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("PIIGUARD_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A single occurrence of a catalog pattern in some text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern_name: String,
    pub kind: PatternKind,
    pub original: String,
    pub masked: String,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_pattern_match_debug(module_path: &str, m: &PatternMatch) {
    debug!(
        "{} Found PatternMatch: Pattern='{}', Kind={}, Original='{}', Masked='{}', Span={}..{}",
        module_path,
        m.pattern_name,
        m.kind,
        get_loggable_content(&m.original),
        m.masked,
        m.start,
        m.end
    );
}

pub fn log_field_mask_debug(module_path: &str, record_id: &str, field: &str, before: &str, after: &str) {
    if before == after {
        return;
    }
    debug!(
        "{} Record '{}' field '{}' masked: Original='{}', Masked='{}'",
        module_path,
        record_id,
        field,
        get_loggable_content(before),
        after
    );
}
