//! Field-name classification and the combinatorial PII heuristic.
//!
//! A record can be PII without any single value looking sensitive: a name next
//! to an email, two address components, or a device identifier next to a user
//! identifier. This module maps field names to semantic categories and applies
//! those co-occurrence rules.
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::config::VocabularyConfig;

/// The semantic category of a field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    IdentityName,
    ContactEmail,
    AddressComponent,
    DeviceOrNetworkId,
    UserId,
    None,
}

/// A co-occurrence rule that flags a record as PII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinatorialRule {
    /// An identity-name field together with a contact-email field.
    NameWithEmail,
    /// Two or more address-component fields.
    MultipleAddressComponents,
    /// A device or network identifier together with a user identifier.
    DeviceWithUser,
}

impl CombinatorialRule {
    pub const ALL: [CombinatorialRule; 3] = [
        CombinatorialRule::NameWithEmail,
        CombinatorialRule::MultipleAddressComponents,
        CombinatorialRule::DeviceWithUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CombinatorialRule::NameWithEmail => "name_with_email",
            CombinatorialRule::MultipleAddressComponents => "multiple_address_components",
            CombinatorialRule::DeviceWithUser => "device_with_user",
        }
    }
}

impl fmt::Display for CombinatorialRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-cased lookup table from field name to category.
#[derive(Debug, Clone, Default)]
pub struct FieldVocabulary {
    table: HashMap<String, FieldCategory>,
}

impl FieldVocabulary {
    pub fn new(config: &VocabularyConfig) -> Self {
        let categories = [
            (&config.identity_name, FieldCategory::IdentityName),
            (&config.contact_email, FieldCategory::ContactEmail),
            (&config.address_component, FieldCategory::AddressComponent),
            (&config.device_or_network_id, FieldCategory::DeviceOrNetworkId),
            (&config.user_id, FieldCategory::UserId),
        ];
        let mut table = HashMap::new();
        for (names, category) in categories {
            for name in names {
                table.insert(name.trim().to_lowercase(), category);
            }
        }
        Self { table }
    }

    /// Case-insensitive exact-name lookup. Unknown names are `FieldCategory::None`.
    pub fn classify_field(&self, name: &str) -> FieldCategory {
        self.table
            .get(&name.to_lowercase())
            .copied()
            .unwrap_or(FieldCategory::None)
    }
}

/// Whether a field value counts as present.
///
/// `null`, `false`, zero, the empty string, and empty arrays or objects do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Returns every combinatorial rule that fires for `fields`, in declaration order.
pub fn evaluate_combinatorial(
    fields: &Map<String, Value>,
    vocabulary: &FieldVocabulary,
) -> Vec<CombinatorialRule> {
    let mut name = false;
    let mut email = false;
    let mut address_count = 0usize;
    let mut device = false;
    let mut user = false;

    for (key, value) in fields {
        if !is_truthy(value) {
            continue;
        }
        match vocabulary.classify_field(key) {
            FieldCategory::IdentityName => name = true,
            FieldCategory::ContactEmail => email = true,
            FieldCategory::AddressComponent => address_count += 1,
            FieldCategory::DeviceOrNetworkId => device = true,
            FieldCategory::UserId => user = true,
            FieldCategory::None => {}
        }
    }

    let mut fired = Vec::new();
    if name && email {
        fired.push(CombinatorialRule::NameWithEmail);
    }
    if address_count >= 2 {
        fired.push(CombinatorialRule::MultipleAddressComponents);
    }
    if device && user {
        fired.push(CombinatorialRule::DeviceWithUser);
    }
    fired
}

/// True iff at least one combinatorial rule fires.
pub fn check_combinatorial(fields: &Map<String, Value>, vocabulary: &FieldVocabulary) -> bool {
    !evaluate_combinatorial(fields, vocabulary).is_empty()
}
