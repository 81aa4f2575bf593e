//! Identifier and sequence-number allocation.
//!
//! Group identifiers are URL/DOM-safe slugs derived from human names. Both
//! helpers here are pure functions so that every call site (legacy import,
//! grouping passes, edit sessions) allocates the same way.

use std::collections::HashSet;

/// Derive a slug identifier from a human name, unique within `existing`.
///
/// If `assigned` already holds a non-empty identifier it is returned
/// unchanged (trimmed) - identifiers are never silently reassigned once set.
/// Otherwise the name is lowercased, runs of non-alphanumeric characters
/// collapse to single hyphens, and leading/trailing hyphens are stripped. A
/// name that normalizes to nothing falls back to `section-<n+1>` where `n`
/// is the number of existing siblings. The first candidate among `base`,
/// `base-2`, `base-3`, ... not present in `existing` is returned.
///
/// Callers re-deriving an identifier for an edit must exclude the entity's
/// own current id from `existing`.
pub fn derive_id(name: &str, existing: &HashSet<String>, assigned: Option<&str>) -> String {
    if let Some(id) = assigned {
        let id = id.trim();
        if !id.is_empty() {
            return id.to_string();
        }
    }

    let base = slugify(name);
    let base = if base.is_empty() {
        format!("section-{}", existing.len() + 1)
    } else {
        base
    };

    if !existing.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !existing.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Normalize a name to a URL/DOM-safe slug. May return an empty string.
fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    out
}

/// Assign a sequence number for an entity being committed to a collection.
///
/// An explicit number always wins. An edited entity that dropped its number
/// (e.g. through a text round trip that omitted the field) keeps its prior
/// one. A new entity gets one past the current collection length.
pub fn assign_number(explicit: Option<u32>, prior: Option<u32>, len: usize) -> u32 {
    explicit.or(prior).unwrap_or(len as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_derive_id_basic() {
        assert_eq!(derive_id("New Section!!", &HashSet::new(), None), "new-section");
    }

    #[test]
    fn test_derive_id_probes_suffixes() {
        assert_eq!(
            derive_id("New Section!!", &set(&["new-section"]), None),
            "new-section-2"
        );
        assert_eq!(
            derive_id("New Section!!", &set(&["new-section", "new-section-2"]), None),
            "new-section-3"
        );
    }

    #[test]
    fn test_derive_id_preserves_assigned() {
        assert_eq!(
            derive_id("Renamed Completely", &set(&["ops"]), Some(" ops ")),
            "ops"
        );
    }

    #[test]
    fn test_derive_id_blank_assigned_is_ignored() {
        assert_eq!(derive_id("Ops", &HashSet::new(), Some("   ")), "ops");
    }

    #[test]
    fn test_derive_id_empty_name_positional_fallback() {
        assert_eq!(derive_id("", &HashSet::new(), None), "section-1");
        assert_eq!(derive_id("!!!", &set(&["a", "b"]), None), "section-3");
    }

    #[test]
    fn test_derive_id_collapses_runs_and_trims_hyphens() {
        assert_eq!(derive_id("  --Hello,   World!--  ", &HashSet::new(), None), "hello-world");
        assert_eq!(derive_id("a__b..c", &HashSet::new(), None), "a-b-c");
    }

    #[test]
    fn test_derive_id_sequence_stays_distinct() {
        let names = ["Ops", "Ops", "ops!", "", "", "Ops 2"];
        let mut existing = HashSet::new();
        for name in names {
            let id = derive_id(name, &existing, None);
            assert!(existing.insert(id), "derive_id returned a duplicate");
        }
        assert_eq!(existing.len(), names.len());
    }

    #[test]
    fn test_assign_number_explicit_wins() {
        assert_eq!(assign_number(Some(7), Some(3), 10), 7);
    }

    #[test]
    fn test_assign_number_prior_preserved() {
        assert_eq!(assign_number(None, Some(3), 10), 3);
    }

    #[test]
    fn test_assign_number_new_entity_appends() {
        assert_eq!(assign_number(None, None, 4), 5);
        assert_eq!(assign_number(None, None, 0), 1);
    }
}
