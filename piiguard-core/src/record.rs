// piiguard-core/src/record.rs
//! Record-level classification: parse, decide, and optionally redact one record.
//!
//! A record is PII when the standalone matcher fires anywhere in its raw payload
//! or when a combinatorial rule fires over its parsed fields. PII records are
//! emitted with every field value masked; everything else is emitted verbatim.

use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::engine::DetectionEngine;
use crate::errors::PiiGuardError;
use crate::fields::{evaluate_combinatorial, CombinatorialRule};
use crate::pattern_match::log_field_mask_debug;
use crate::payload_format::to_payload_string;

/// One input row: an identifier and its serialized payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub record_id: String,
    pub raw_payload: String,
    /// `None` when the payload is not a JSON object.
    pub fields: Option<Map<String, Value>>,
}

impl Record {
    /// Builds a record, parsing the payload into a field mapping where possible.
    pub fn parse(record_id: impl Into<String>, raw_payload: impl Into<String>) -> Self {
        let record_id = record_id.into();
        let raw_payload = raw_payload.into();
        let fields = match serde_json::from_str::<Value>(&raw_payload) {
            Ok(Value::Object(map)) => Some(map),
            Ok(other) => {
                debug!(
                    "Record '{}' payload is a JSON {} rather than an object.",
                    record_id,
                    json_type_name(&other)
                );
                None
            }
            Err(e) => {
                debug!("Record '{}' payload failed to parse: {}", record_id, e);
                None
            }
        };
        Self {
            record_id,
            raw_payload,
            fields,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        self.fields.is_none()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Which detector flagged a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Standalone,
    Combinatorial,
    Both,
    Neither,
}

impl Trigger {
    pub fn from_flags(standalone: bool, combinatorial: bool) -> Self {
        match (standalone, combinatorial) {
            (true, true) => Trigger::Both,
            (true, false) => Trigger::Standalone,
            (false, true) => Trigger::Combinatorial,
            (false, false) => Trigger::Neither,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub is_pii: bool,
    pub triggered_by: Trigger,
    /// The combinatorial rules that fired, if any.
    pub rules: Vec<CombinatorialRule>,
}

impl ClassificationResult {
    fn not_pii() -> Self {
        Self {
            is_pii: false,
            triggered_by: Trigger::Neither,
            rules: Vec::new(),
        }
    }
}

/// The engine's output unit: one per input record, same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedactedRecord {
    pub record_id: String,
    pub payload: String,
    pub is_pii: bool,
    pub triggered_by: Trigger,
    pub rules: Vec<CombinatorialRule>,
}

impl RedactedRecord {
    fn passthrough(record: &Record) -> Self {
        Self {
            record_id: record.record_id.clone(),
            payload: record.raw_payload.clone(),
            is_pii: false,
            triggered_by: Trigger::Neither,
            rules: Vec::new(),
        }
    }
}

/// Decides PII status without redacting. Unparsed records are never PII.
pub fn classify(engine: &dyn DetectionEngine, record: &Record) -> ClassificationResult {
    let Some(fields) = record.fields.as_ref() else {
        return ClassificationResult::not_pii();
    };
    let standalone = engine.check_standalone(&record.raw_payload);
    let rules = evaluate_combinatorial(fields, engine.vocabulary());
    let triggered_by = Trigger::from_flags(standalone, !rules.is_empty());
    ClassificationResult {
        is_pii: triggered_by != Trigger::Neither,
        triggered_by,
        rules,
    }
}

/// Masks every field value, keeping field names and order.
pub fn redact_fields(
    engine: &dyn DetectionEngine,
    record_id: &str,
    fields: &Map<String, Value>,
) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| {
            let masked = engine.mask_value(value);
            if let Value::String(before) = value {
                log_field_mask_debug(module_path!(), record_id, key, before, &masked);
            }
            (key.clone(), Value::String(masked))
        })
        .collect()
}

fn try_classify_and_redact(
    engine: &dyn DetectionEngine,
    record: &Record,
) -> Result<RedactedRecord, PiiGuardError> {
    let result = classify(engine, record);
    let fields = match (&record.fields, result.is_pii) {
        (Some(fields), true) => fields,
        _ => return Ok(RedactedRecord::passthrough(record)),
    };

    let redacted = redact_fields(engine, &record.record_id, fields);
    let payload = to_payload_string(&redacted)?;
    debug!(
        "Record '{}' flagged as PII (trigger: {:?}, rules: {:?}).",
        record.record_id, result.triggered_by, result.rules
    );
    Ok(RedactedRecord {
        record_id: record.record_id.clone(),
        payload,
        is_pii: true,
        triggered_by: result.triggered_by,
        rules: result.rules,
    })
}

/// Classifies one record and redacts it when it carries PII.
///
/// Never fails: an internal error degrades to the unredacted, non-PII outcome
/// for this record only.
pub fn classify_and_redact(engine: &dyn DetectionEngine, record: &Record) -> RedactedRecord {
    match try_classify_and_redact(engine, record) {
        Ok(out) => out,
        Err(e) => {
            warn!(
                "Record '{}' could not be redacted, passing it through: {}",
                record.record_id, e
            );
            RedactedRecord::passthrough(record)
        }
    }
}
