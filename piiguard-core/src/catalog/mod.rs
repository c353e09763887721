//! The pattern catalog: named matchers for standalone PII.
//!
//! Rules are described in configuration and compiled once by [`compiler`]. The
//! compiled [`PatternCatalog`] is immutable and shared by reference.

pub mod compiler;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::masking;

/// The four kinds of standalone PII the catalog recognizes.
///
/// The declaration order is the order in which masking passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Phone,
    NationalId,
    Passport,
    PaymentHandle,
}

impl PatternKind {
    pub const CATALOG_ORDER: [PatternKind; 4] = [
        PatternKind::Phone,
        PatternKind::NationalId,
        PatternKind::Passport,
        PatternKind::PaymentHandle,
    ];

    /// Applies this kind's mask rule to one matched substring.
    pub fn mask(self, matched: &str) -> String {
        match self {
            PatternKind::Phone => masking::mask_phone(matched),
            PatternKind::NationalId => masking::mask_national_id(matched),
            PatternKind::Passport => masking::mask_passport(matched),
            PatternKind::PaymentHandle => masking::mask_payment_handle(matched),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Phone => "phone",
            PatternKind::NationalId => "national_id",
            PatternKind::Passport => "passport",
            PatternKind::PaymentHandle => "payment_handle",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub use compiler::{compile_catalog, CompiledPattern, PatternCatalog};
