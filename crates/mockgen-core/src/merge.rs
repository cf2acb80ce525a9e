//! Master-template merging.
//!
//! A master template carries a reserved `user_profile` section whose
//! fields act as defaults for every user-declared section. Merging is
//! shallow: user fields always win, and nested pools are replaced
//! wholesale rather than deep-merged.

use crate::schema::{Document, MASTER_PROFILE_KEY, Section};

/// Overlay user-declared sections onto the master template.
///
/// For every section in `user`, the merged section starts from the
/// fields of `master["user_profile"]` (when present) and is then
/// overwritten by every field literally present in the user section.
/// Sections present only in the master pass through unchanged,
/// including `user_profile` itself.
pub fn merge_with_master(master: &Document, user: &Document) -> Document {
    let defaults = master.get(MASTER_PROFILE_KEY);

    let mut merged = master.clone();
    for (name, user_section) in user {
        let mut section: Section = defaults.cloned().unwrap_or_default();
        for (field, pool) in user_section {
            section.insert(field.clone(), pool.clone());
        }
        merged.insert(name.clone(), section);
    }
    merged
}
