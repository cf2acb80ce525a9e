//! Timestamped JSON output writers for mockgen.
//!
//! Every generation call writes one file named
//! `{prefix}_{UTC timestamp}{tag}.json` into the output directory.
//! Timestamps carry sub-second resolution to reduce collision
//! probability, but no create-exclusive or atomic-rename guarantee is
//! made: two runs within the same timestamp granularity can overwrite
//! each other.
//!
//! Files are UTF-8, 2-space indented, with a trailing newline, so
//! they diff cleanly against hand-edited fixtures.

mod template;
mod writer;

pub use template::write_starter_template;
pub use writer::OutputDir;
