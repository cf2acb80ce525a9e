//! Configuration merge and record materialization engine for mockgen.
//!
//! This crate turns a nested value-pool configuration into flat
//! synthetic claims-data records. The pipeline:
//!
//! ```text
//! raw JSON
//!    │
//!    ▼
//! config::load_document ── shape detection + coercion + validation
//!    │
//!    ▼
//! Document (section → field → Pool)
//!    │
//!    ├── merge::merge_with_master   (optional master defaults)
//!    ├── select::selected_models    (which sections to expand)
//!    │
//!    ▼
//! generate::{random_record, indexed_batch, random_payload, ...}
//!    │
//!    ▼
//! Record (field → selected value) ── external writer
//! ```
//!
//! # Example
//!
//! ```rust
//! use mockgen_core::{generate, Profile};
//! use mockgen_core::config::parse_document;
//!
//! let raw = serde_json::json!({
//!     "Model_1": {
//!         "name": ["Alice", "Bob"],
//!         "mail_id": ["a@example.com"],
//!         "address": ["1 Main St"],
//!         "city": ["Springfield", "Shelbyville"]
//!     }
//! });
//! let profile = Profile::contacts();
//! let document = parse_document(&raw, &profile).unwrap();
//! let records = generate::indexed_batch(&document["Model_1"], &profile);
//! assert_eq!(records.len(), 2);
//! ```

pub mod config;
pub mod generate;
pub mod merge;
pub mod schema;
pub mod select;

// Re-exports for convenience
pub use config::{load_document, load_master, parse_document, ConfigError, DocumentShape};
pub use merge::merge_with_master;
pub use schema::{Document, Pool, Profile, Record, RecordValue, Section, MASTER_PROFILE_KEY};
pub use select::{
    base_model_names, require_model, scenario_section, selected_models, Scenario, SelectError,
};
