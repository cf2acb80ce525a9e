//! Record materialization.
//!
//! Two selection modes produce flat output records from a section:
//!
//! - **Random**: every field takes an independent uniform draw from
//!   its pool. Fresh draws per call, no exhaustion tracking.
//! - **Indexed**: field `f` of record `i` takes `pool[i % len]`,
//!   pairing field values positionally. The batch size for a section
//!   is the maximum pool length across its required fields, so
//!   growing any one pool grows the achievable record count.
//!
//! The nested sub-object field recurses the same per-field selection
//! one level down, producing a one-element list of flattened nested
//! records. Everything here is generic over [`Rng`] so callers can
//! seed a [`rand::rngs::StdRng`] for reproducible output.

use crate::schema::{Document, NestedObject, Pool, Profile, Record, RecordValue, Section};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Generate one record from a section using uniform random draws.
pub fn random_record<R: Rng>(section: &Section, nested_field: &str, rng: &mut R) -> Record {
    section
        .iter()
        .map(|(field, pool)| (field.clone(), random_value(field, pool, nested_field, rng)))
        .collect()
}

/// Generate one record from a section using modulo-indexed selection.
pub fn indexed_record(section: &Section, nested_field: &str, index: usize) -> Record {
    section
        .iter()
        .map(|(field, pool)| (field.clone(), indexed_value(field, pool, nested_field, index)))
        .collect()
}

/// Generate the full indexed batch for a section.
///
/// The batch size is the maximum pool length across the profile's
/// required fields that are present in the section. A section with
/// none of them present yields an empty batch; callers surface that
/// as a warning, not an error.
pub fn indexed_batch(section: &Section, profile: &Profile) -> Vec<Record> {
    let num_records = profile
        .required_fields
        .iter()
        .filter_map(|field| section.get(field))
        .map(Pool::len)
        .max()
        .unwrap_or(0);

    (0..num_records)
        .map(|index| indexed_record(section, &profile.nested_field, index))
        .collect()
}

/// Build a payload of `count` records across multiple sections.
///
/// Each record independently picks one section uniformly at random,
/// then does random field selection within it. Keys are
/// `{section}_output_{i}` with `i` starting at 1.
pub fn random_payload<R: Rng>(
    document: &Document,
    nested_field: &str,
    count: usize,
    rng: &mut R,
) -> BTreeMap<String, Record> {
    let names: Vec<&String> = document.keys().collect();
    let mut payload = BTreeMap::new();
    if names.is_empty() {
        return payload;
    }
    for i in 1..=count.max(1) {
        // Unwrap is fine: names is non-empty.
        let name = names.choose(rng).unwrap();
        let record = random_record(&document[*name], nested_field, rng);
        payload.insert(format!("{name}_output_{i}"), record);
    }
    payload
}

/// Generate one random record per selected model.
///
/// Models absent from the document are skipped rather than rejected,
/// matching the selector contract.
pub fn model_outputs<R: Rng>(
    document: &Document,
    selected: &[String],
    nested_field: &str,
    rng: &mut R,
) -> BTreeMap<String, Record> {
    selected
        .iter()
        .filter_map(|model| {
            document
                .get(model)
                .map(|section| (model.clone(), random_record(section, nested_field, rng)))
        })
        .collect()
}

/// Generate `count` independent random records for one fixed section.
pub fn model_records<R: Rng>(
    section: &Section,
    nested_field: &str,
    count: usize,
    rng: &mut R,
) -> Vec<Record> {
    (0..count.max(1))
        .map(|_| random_record(section, nested_field, rng))
        .collect()
}

fn random_value<R: Rng>(field: &str, pool: &Pool, nested_field: &str, rng: &mut R) -> RecordValue {
    match pool {
        Pool::Scalar(value) => RecordValue::Text(value.clone()),
        Pool::List(values) => match values.choose(rng) {
            Some(value) => RecordValue::Text(value.clone()),
            None => RecordValue::Text(String::new()),
        },
        Pool::Nested(objects) if field == nested_field => RecordValue::Details(
            objects
                .iter()
                .map(|object| random_nested(object, rng))
                .collect(),
        ),
        // Nested pools under any other field name have no defined
        // flat rendering.
        Pool::Nested(_) => RecordValue::Text(String::new()),
    }
}

fn indexed_value(field: &str, pool: &Pool, nested_field: &str, index: usize) -> RecordValue {
    match pool {
        Pool::Scalar(value) => RecordValue::Text(value.clone()),
        Pool::List(values) => {
            if values.is_empty() {
                RecordValue::Text(String::new())
            } else {
                RecordValue::Text(values[index % values.len()].clone())
            }
        }
        Pool::Nested(objects) if field == nested_field => RecordValue::Details(
            objects
                .iter()
                .map(|object| indexed_nested(object, index))
                .collect(),
        ),
        Pool::Nested(_) => RecordValue::Text(String::new()),
    }
}

fn random_nested<R: Rng>(object: &NestedObject, rng: &mut R) -> BTreeMap<String, String> {
    object
        .iter()
        .map(|(field, pool)| {
            let value = match pool {
                Pool::Scalar(value) => value.clone(),
                Pool::List(values) => values.choose(rng).cloned().unwrap_or_default(),
                Pool::Nested(_) => String::new(),
            };
            (field.clone(), value)
        })
        .collect()
}

fn indexed_nested(object: &NestedObject, index: usize) -> BTreeMap<String, String> {
    object
        .iter()
        .map(|(field, pool)| {
            let value = match pool {
                Pool::Scalar(value) => value.clone(),
                Pool::List(values) if values.is_empty() => String::new(),
                Pool::List(values) => values[index % values.len()].clone(),
                Pool::Nested(_) => String::new(),
            };
            (field.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_document;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn claims_document() -> Document {
        let raw = json!({
            "Model_1": {
                "PRICNG_ZIP_STATE": ["TN", "KL"],
                "CLM_TYPE": ["P"],
                "SRVC_FROM_DT": ["04/20/2025"],
                "HCID": ["H1", "H2"],
                "PAT_BRTH_DT": ["01/01/1990"],
                "PAT_FRST_NME": ["Mohan"],
                "PAT_LAST_NME": ["Kumar"],
                "ClaimDetails": [{
                    "SRVC_FROM_DT": ["12/12/2024"],
                    "proc_cd": ["111", "222"],
                    "BILL_TYPE": ["P"]
                }]
            }
        });
        parse_document(&raw, &Profile::claims()).unwrap()
    }

    #[test]
    fn test_indexed_batch_concrete_scenario() {
        let document = claims_document();
        let section = document.get("Model_1").unwrap();
        let records = indexed_batch(section, &Profile::claims());

        // Max pool length across required fields is 2.
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].get("PRICNG_ZIP_STATE").unwrap().as_text(), Some("TN"));
        assert_eq!(records[0].get("HCID").unwrap().as_text(), Some("H1"));
        let details0 = records[0].get("ClaimDetails").unwrap().as_details().unwrap();
        assert_eq!(details0[0].get("proc_cd").map(String::as_str), Some("111"));

        assert_eq!(records[1].get("PRICNG_ZIP_STATE").unwrap().as_text(), Some("KL"));
        assert_eq!(records[1].get("HCID").unwrap().as_text(), Some("H2"));
        let details1 = records[1].get("ClaimDetails").unwrap().as_details().unwrap();
        assert_eq!(details1[0].get("proc_cd").map(String::as_str), Some("222"));

        // Shorter pools wrap around via the modulo rule.
        assert_eq!(records[1].get("CLM_TYPE").unwrap().as_text(), Some("P"));
    }

    #[test]
    fn test_indexed_pairing_cardinality() {
        let raw = json!({
            "Model_1": {
                "name": ["a", "b", "c", "d"],
                "mail_id": ["m1@example.com", "m2@example.com"],
                "address": ["1 Main St"],
                "city": ["Springfield", "Shelbyville"]
            }
        });
        let profile = Profile::contacts();
        let document = parse_document(&raw, &profile).unwrap();
        let section = document.get("Model_1").unwrap();
        let records = indexed_batch(section, &profile);

        assert_eq!(records.len(), 4);
        let mails = ["m1@example.com", "m2@example.com"];
        for (i, record) in records.iter().enumerate() {
            assert_eq!(
                record.get("mail_id").unwrap().as_text(),
                Some(mails[i % mails.len()])
            );
            assert_eq!(record.get("address").unwrap().as_text(), Some("1 Main St"));
        }
    }

    #[test]
    fn test_indexed_batch_empty_section() {
        let section = Section::new();
        assert!(indexed_batch(&section, &Profile::claims()).is_empty());
    }

    #[test]
    fn test_random_draws_come_from_pools() {
        let document = claims_document();
        let section = document.get("Model_1").unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let record = random_record(section, "ClaimDetails", &mut rng);
            let zip = record.get("PRICNG_ZIP_STATE").unwrap().as_text().unwrap();
            assert!(["TN", "KL"].contains(&zip));
            let details = record.get("ClaimDetails").unwrap().as_details().unwrap();
            assert_eq!(details.len(), 1);
            let proc = details[0].get("proc_cd").unwrap().as_str();
            assert!(["111", "222"].contains(&proc));
            assert_eq!(details[0].get("BILL_TYPE").map(String::as_str), Some("P"));
        }
    }

    #[test]
    fn test_random_generation_is_seed_deterministic() {
        let document = claims_document();
        let section = document.get("Model_1").unwrap();

        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                random_record(section, "ClaimDetails", &mut rng1),
                random_record(section, "ClaimDetails", &mut rng2)
            );
        }
    }

    #[test]
    fn test_nested_selection_does_not_disturb_flat_fields() {
        let document = claims_document();
        let section = document.get("Model_1").unwrap();

        // Same flat pools with a different nested pool must produce
        // identical flat selections under the same seed.
        let mut altered = section.clone();
        let mut details = NestedObject::new();
        details.insert(
            "proc_cd".to_string(),
            Pool::List(vec!["999".to_string(), "888".to_string(), "777".to_string()]),
        );
        altered.insert("ClaimDetails".to_string(), Pool::Nested(vec![details]));

        for index in 0..4 {
            let base = indexed_record(section, "ClaimDetails", index);
            let changed = indexed_record(&altered, "ClaimDetails", index);
            for field in ["PRICNG_ZIP_STATE", "HCID", "PAT_FRST_NME", "CLM_TYPE"] {
                assert_eq!(base.get(field), changed.get(field));
            }
        }
    }

    #[test]
    fn test_scalar_pools_pass_through_verbatim() {
        let mut section = Section::new();
        section.insert(
            "email".to_string(),
            Pool::Scalar("default@example.com".to_string()),
        );
        let mut rng = StdRng::seed_from_u64(1);
        let record = random_record(&section, "ClaimDetails", &mut rng);
        assert_eq!(
            record.get("email").unwrap().as_text(),
            Some("default@example.com")
        );
        let record = indexed_record(&section, "ClaimDetails", 3);
        assert_eq!(
            record.get("email").unwrap().as_text(),
            Some("default@example.com")
        );
    }

    #[test]
    fn test_empty_pool_yields_placeholder() {
        let mut section = Section::new();
        section.insert("name".to_string(), Pool::List(vec![]));
        let mut rng = StdRng::seed_from_u64(1);
        let record = random_record(&section, "ClaimDetails", &mut rng);
        assert_eq!(record.get("name").unwrap().as_text(), Some(""));
    }

    #[test]
    fn test_random_payload_picks_sections_per_record() {
        let raw = json!({
            "Edit_1": {
                "name": ["Alice"],
                "mail_id": ["a@example.com"],
                "address": ["1 Main St"],
                "city": ["Springfield"]
            },
            "Edit_2": {
                "name": ["Bob"],
                "mail_id": ["b@example.com"],
                "address": ["2 Oak Ave"],
                "city": ["Shelbyville"]
            }
        });
        let document = parse_document(&raw, &Profile::contacts()).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let payload = random_payload(&document, "ClaimDetails", 5, &mut rng);

        assert_eq!(payload.len(), 5);
        for (key, record) in &payload {
            let edit = if key.starts_with("Edit_1") { "Alice" } else { "Bob" };
            assert!(key.contains("_output_"));
            assert_eq!(record.get("name").unwrap().as_text(), Some(edit));
        }
    }

    #[test]
    fn test_random_payload_count_zero_still_produces_one() {
        let document = claims_document();
        let mut rng = StdRng::seed_from_u64(3);
        let payload = random_payload(&document, "ClaimDetails", 0, &mut rng);
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn test_model_outputs_skips_absent_models() {
        let document = claims_document();
        let mut rng = StdRng::seed_from_u64(5);
        let selected = vec!["Model_1".to_string(), "Model_9".to_string()];
        let outputs = model_outputs(&document, &selected, "ClaimDetails", &mut rng);
        assert_eq!(outputs.keys().collect::<Vec<_>>(), vec!["Model_1"]);
    }

    #[test]
    fn test_model_records_count() {
        let document = claims_document();
        let section = document.get("Model_1").unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let records = model_records(section, "ClaimDetails", 3, &mut rng);
        assert_eq!(records.len(), 3);
    }
}
