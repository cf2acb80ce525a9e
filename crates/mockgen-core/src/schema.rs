//! Schema types for the mockgen engine.
//!
//! This module defines the normalized in-memory representation of a
//! configuration document:
//!
//! - [`Pool`] - a field's value pool (scalar, list, or nested object)
//! - [`Section`] - one named scenario block (field name → pool)
//! - [`Document`] - section name → section
//! - [`Record`] / [`RecordValue`] - a flat generated output record
//! - [`Profile`] - the required-field contract and nested-field name
//!
//! `BTreeMap` is used throughout so that section and field iteration
//! order is deterministic regardless of input key order.

use serde::Serialize;
use std::collections::BTreeMap;

/// Reserved master-template key whose fields act as defaults for
/// every user-declared section.
pub const MASTER_PROFILE_KEY: &str = "user_profile";

/// A named scenario block: field name → value pool.
pub type Section = BTreeMap<String, Pool>;

/// A normalized configuration document: section name → section.
pub type Document = BTreeMap<String, Section>;

/// A nested sub-object: nested field name → value pool.
///
/// Only one level of nesting is supported; a `Pool::Nested` inside a
/// nested object is never produced by the loader.
pub type NestedObject = BTreeMap<String, Pool>;

/// A field's value pool.
///
/// Fields in a loaded user configuration are always `List` (the
/// loader coerces scalars into singleton lists) or `Nested`. `Scalar`
/// appears only in raw master templates, where single values are kept
/// verbatim and passed through to generated records unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Pool {
    /// A single verbatim value.
    Scalar(String),
    /// A list of candidate values.
    List(Vec<String>),
    /// A repeated nested sub-object with its own pools per field.
    Nested(Vec<NestedObject>),
}

impl Pool {
    /// Number of candidate values in this pool.
    ///
    /// A scalar counts as one candidate; a nested pool counts its
    /// sub-objects.
    pub fn len(&self) -> usize {
        match self {
            Pool::Scalar(_) => 1,
            Pool::List(values) => values.len(),
            Pool::Nested(objects) => objects.len(),
        }
    }

    /// Whether the pool holds no candidates at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Pool::Scalar(_) => false,
            Pool::List(values) => values.is_empty(),
            Pool::Nested(objects) => objects.is_empty(),
        }
    }
}

/// A single value in a generated record.
///
/// Serializes untagged: either a flat string, or a list of flattened
/// nested records (the `ClaimDetails` shape).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    /// A flat selected value.
    Text(String),
    /// Flattened nested sub-object records.
    Details(Vec<BTreeMap<String, String>>),
}

impl RecordValue {
    /// The flat text value, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RecordValue::Text(s) => Some(s),
            RecordValue::Details(_) => None,
        }
    }

    /// The nested detail records, if this is that shape.
    pub fn as_details(&self) -> Option<&[BTreeMap<String, String>]> {
        match self {
            RecordValue::Text(_) => None,
            RecordValue::Details(d) => Some(d),
        }
    }
}

/// A generated flat output record: field name → selected value.
pub type Record = BTreeMap<String, RecordValue>;

/// The schema contract a configuration document must satisfy.
///
/// Replaces the module-level constants of earlier incarnations of
/// this tool: callers construct a profile once and pass it into the
/// loader and generator entry points.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Fields every section must populate with at least one
    /// non-empty value.
    pub required_fields: Vec<String>,
    /// The one field treated as a nested repeated sub-object.
    pub nested_field: String,
}

impl Profile {
    /// The claims-data schema contract.
    pub fn claims() -> Self {
        Self {
            required_fields: [
                "PRICNG_ZIP_STATE",
                "CLM_TYPE",
                "SRVC_FROM_DT",
                "HCID",
                "PAT_BRTH_DT",
                "PAT_FRST_NME",
                "PAT_LAST_NME",
                "ClaimDetails",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            nested_field: "ClaimDetails".to_string(),
        }
    }

    /// The simpler contact-record contract.
    pub fn contacts() -> Self {
        Self {
            required_fields: ["name", "mail_id", "address", "city"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            nested_field: "ClaimDetails".to_string(),
        }
    }

    /// Whether `field` is the nested repeated sub-object field.
    pub fn is_nested_field(&self, field: &str) -> bool {
        field == self.nested_field
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::claims()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_len() {
        assert_eq!(Pool::Scalar("x".into()).len(), 1);
        assert_eq!(Pool::List(vec!["a".into(), "b".into()]).len(), 2);
        assert_eq!(Pool::List(vec![]).len(), 0);
        assert_eq!(Pool::Nested(vec![BTreeMap::new()]).len(), 1);
    }

    #[test]
    fn test_pool_is_empty() {
        assert!(!Pool::Scalar("x".into()).is_empty());
        assert!(Pool::List(vec![]).is_empty());
        assert!(!Pool::List(vec!["a".into()]).is_empty());
        assert!(Pool::Nested(vec![]).is_empty());
    }

    #[test]
    fn test_record_value_serializes_untagged() {
        let text = serde_json::to_value(RecordValue::Text("TN".into())).unwrap();
        assert_eq!(text, serde_json::json!("TN"));

        let mut nested = BTreeMap::new();
        nested.insert("proc_cd".to_string(), "111".to_string());
        let details = serde_json::to_value(RecordValue::Details(vec![nested])).unwrap();
        assert_eq!(details, serde_json::json!([{ "proc_cd": "111" }]));
    }

    #[test]
    fn test_claims_profile_includes_nested_field() {
        let profile = Profile::claims();
        assert!(profile
            .required_fields
            .contains(&profile.nested_field));
        assert!(profile.is_nested_field("ClaimDetails"));
        assert!(!profile.is_nested_field("HCID"));
    }
}
