// piiguard-core/src/batch.rs
//! Convenience wrappers for running the record classifier over a whole batch.
//!
//! Records are processed strictly in order and independently; the only thing
//! carried across records is the running summary.

use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::engine::DetectionEngine;
use crate::fields::CombinatorialRule;
use crate::record::{classify_and_redact, Record, RedactedRecord, Trigger};

/// Aggregate counts for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub pii: usize,
    pub unparsed: usize,
    pub standalone: usize,
    pub combinatorial: usize,
    pub both: usize,
    /// How many records each combinatorial rule fired on.
    pub per_rule: BTreeMap<CombinatorialRule, usize>,
}

impl BatchSummary {
    pub fn record(&mut self, input: &Record, output: &RedactedRecord) {
        self.total += 1;
        if input.is_unparsed() {
            self.unparsed += 1;
        }
        if output.is_pii {
            self.pii += 1;
        }
        match output.triggered_by {
            Trigger::Standalone => self.standalone += 1,
            Trigger::Combinatorial => self.combinatorial += 1,
            Trigger::Both => self.both += 1,
            Trigger::Neither => {}
        }
        for rule in &output.rules {
            *self.per_rule.entry(*rule).or_default() += 1;
        }
    }
}

/// Classifies and redacts every record, preserving input order.
pub fn redact_records<I>(engine: &dyn DetectionEngine, records: I) -> (Vec<RedactedRecord>, BatchSummary)
where
    I: IntoIterator<Item = Record>,
{
    let mut summary = BatchSummary::default();
    let out: Vec<RedactedRecord> = records
        .into_iter()
        .map(|record| {
            let redacted = classify_and_redact(engine, &record);
            summary.record(&record, &redacted);
            redacted
        })
        .collect();

    debug!("Batch summary: {:?}", summary);
    info!(
        "Classified {} records: {} PII, {} unparsed.",
        summary.total, summary.pii, summary.unparsed
    );
    (out, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::regex_engine::RegexEngine;

    #[test]
    fn order_and_counts_are_preserved() {
        let engine = RegexEngine::with_defaults().unwrap();
        let records = vec![
            Record::parse("1", r#"{"phone": "9876543210"}"#),
            Record::parse("2", "not json"),
            Record::parse("3", r#"{"name": "A", "email": "a@x.com"}"#),
            Record::parse("4", r#"{"product": "x"}"#),
        ];
        let (out, summary) = redact_records(&engine, records);

        let ids: Vec<&str> = out.iter().map(|r| r.record_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.pii, 2);
        assert_eq!(summary.unparsed, 1);
        assert_eq!(summary.standalone, 1);
        assert_eq!(summary.combinatorial, 1);
        assert_eq!(summary.per_rule.get(&CombinatorialRule::NameWithEmail), Some(&1));
    }
}
