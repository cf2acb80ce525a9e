//! Configuration loading and normalization.
//!
//! A raw JSON document arrives in one of three recognized shapes,
//! detected once at load time and never re-inspected afterwards:
//!
//! - **Prefixed**: top-level keys beginning with `Model_` or `Edit_`
//!   are the sections; other keys are ignored.
//! - **Sectioned**: every top-level value is an object, so every
//!   top-level key is a section name.
//! - **Flat**: the whole document is one implicit section, given the
//!   synthetic name `Section_1`.
//!
//! All field values are coerced into [`Pool`]s: lists are stringified
//! element-wise, comma-separated strings are split, bare scalars
//! become singleton lists, and empty strings are dropped after
//! trimming. The field named by [`Profile::nested_field`] is decoded
//! as a nested sub-object when its value is a list of objects, with
//! the same coercion applied per nested field.

use crate::schema::{Document, NestedObject, Pool, Profile, Section};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Section-name prefixes that mark the prefixed document shape.
const SECTION_PREFIXES: [&str; 2] = ["Model_", "Edit_"];

/// Synthetic section name assigned to flat single-section documents.
const FLAT_SECTION_NAME: &str = "Section_1";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be opened or read.
    #[error("failed to read configuration from '{path}': {source}. Ensure the file exists and is readable")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("failed to parse '{path}' as JSON: {source}. Edit the file and rerun")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document root is not a JSON object.
    #[error("configuration root must be a JSON object")]
    NotAnObject,

    /// A section is missing required fields, or has only empty
    /// values for them.
    #[error("section '{section}' is missing required non-empty fields: {}", .fields.join(", "))]
    MissingFields { section: String, fields: Vec<String> },

    /// No usable sections were found in the document.
    #[error("no valid sections found in the configuration")]
    NoSections,
}

/// The recognized top-level shapes of a configuration document.
///
/// Resolved exactly once per load; downstream code only sees the
/// normalized [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// Keys beginning with `Model_`/`Edit_` are the sections.
    Prefixed,
    /// Every top-level value is an object; every key is a section.
    Sectioned,
    /// The whole document is a single implicit section.
    Flat,
}

impl DocumentShape {
    /// Detect the shape of a raw top-level object.
    pub fn detect(root: &serde_json::Map<String, Value>) -> Self {
        if root
            .keys()
            .any(|k| SECTION_PREFIXES.iter().any(|p| k.starts_with(p)))
        {
            DocumentShape::Prefixed
        } else if root.values().all(Value::is_object) {
            DocumentShape::Sectioned
        } else {
            DocumentShape::Flat
        }
    }
}

/// Load and normalize a user configuration file.
pub fn load_document(path: &Path, profile: &Profile) -> Result<Document, ConfigError> {
    let raw = read_json(path)?;
    parse_document(&raw, profile)
}

/// Load a master template file.
///
/// Master templates are decoded without required-field validation
/// and without comma-splitting: single string values stay verbatim
/// [`Pool::Scalar`]s so they pass through to generated records
/// unchanged.
pub fn load_master(path: &Path) -> Result<Document, ConfigError> {
    let raw = read_json(path)?;
    let root = raw.as_object().ok_or(ConfigError::NotAnObject)?;

    let mut document = Document::new();
    for (name, value) in root {
        // Non-object top-level entries carry no fields to merge.
        let Some(fields) = value.as_object() else {
            continue;
        };
        let section: Section = fields
            .iter()
            .map(|(field, value)| (field.clone(), decode_raw_pool(value)))
            .collect();
        document.insert(name.clone(), section);
    }
    Ok(document)
}

/// Normalize an already-parsed JSON value into a [`Document`].
pub fn parse_document(raw: &Value, profile: &Profile) -> Result<Document, ConfigError> {
    let root = raw.as_object().ok_or(ConfigError::NotAnObject)?;

    let mut document = Document::new();
    match DocumentShape::detect(root) {
        DocumentShape::Prefixed => {
            for (name, value) in root {
                if !SECTION_PREFIXES.iter().any(|p| name.starts_with(p)) {
                    continue;
                }
                let Some(fields) = value.as_object() else {
                    continue;
                };
                document.insert(name.clone(), decode_section(fields, profile));
            }
        }
        DocumentShape::Sectioned => {
            for (name, value) in root {
                // Shape detection guarantees every value is an object.
                let Some(fields) = value.as_object() else {
                    continue;
                };
                document.insert(name.clone(), decode_section(fields, profile));
            }
        }
        DocumentShape::Flat => {
            document.insert(FLAT_SECTION_NAME.to_string(), decode_section(root, profile));
        }
    }

    if document.is_empty() {
        return Err(ConfigError::NoSections);
    }
    for (name, section) in &document {
        validate_section(name, section, profile)?;
    }
    Ok(document)
}

/// Coerce one raw value into a list of candidate strings.
///
/// - list → stringified element-wise, trimmed
/// - string → split on commas, trimmed
/// - any other scalar → singleton
///
/// Empty strings are discarded after trimming in every case.
pub fn to_choice_list(value: &Value) -> Vec<String> {
    let items: Vec<String> = match value {
        Value::Array(values) => values.iter().map(stringify).collect(),
        Value::String(s) => s.split(',').map(|part| part.to_string()).collect(),
        other => vec![stringify(other)],
    };
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode one field's raw value into a [`Pool`], applying coercion.
fn decode_pool(field: &str, value: &Value, profile: &Profile) -> Pool {
    if profile.is_nested_field(field) {
        if let Value::Array(values) = value {
            if values.first().is_some_and(Value::is_object) {
                return Pool::Nested(decode_nested_objects(values));
            }
        }
    }
    Pool::List(to_choice_list(value))
}

/// Decode a field's raw value without coercion, for master templates.
fn decode_raw_pool(value: &Value) -> Pool {
    match value {
        Value::Array(values) if values.first().is_some_and(Value::is_object) => {
            Pool::Nested(decode_nested_objects(values))
        }
        Value::Array(values) => Pool::List(values.iter().map(stringify).collect()),
        Value::String(s) => Pool::Scalar(s.clone()),
        other => Pool::Scalar(stringify(other)),
    }
}

fn decode_nested_objects(values: &[Value]) -> Vec<NestedObject> {
    values
        .iter()
        .filter_map(Value::as_object)
        .map(|object| {
            object
                .iter()
                .map(|(field, value)| (field.clone(), Pool::List(to_choice_list(value))))
                .collect::<BTreeMap<String, Pool>>()
        })
        .collect()
}

fn decode_section(fields: &serde_json::Map<String, Value>, profile: &Profile) -> Section {
    fields
        .iter()
        .map(|(field, value)| (field.clone(), decode_pool(field, value, profile)))
        .collect()
}

/// Check the required-field contract for one section.
///
/// Collects every absent-or-empty required field before failing so
/// the diagnostic names them all at once.
fn validate_section(name: &str, section: &Section, profile: &Profile) -> Result<(), ConfigError> {
    let missing: Vec<String> = profile
        .required_fields
        .iter()
        .filter(|field| section.get(*field).is_none_or(Pool::is_empty))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingFields {
            section: name.to_string(),
            fields: missing,
        })
    }
}

fn read_json(path: &Path) -> Result<Value, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}
