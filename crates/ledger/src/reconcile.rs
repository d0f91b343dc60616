//! Attachment set reconciliation.
//!
//! A record's attachments are a set of opaque path strings. On update the
//! caller sends the full desired set; this module computes the minimal
//! insert/delete operations that converge the stored set onto it. Pure set
//! algebra, no I/O.

use std::collections::BTreeSet;

/// The operations needed to turn one attachment set into another.
///
/// Applying the delta to the existing set yields exactly the desired set:
/// `(existing - to_delete) ∪ to_insert == desired`, and the two halves are
/// always disjoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttachmentDelta {
    pub to_delete: BTreeSet<String>,
    pub to_insert: BTreeSet<String>,
}

impl AttachmentDelta {
    /// Returns `true` when the sets already converge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_insert.is_empty()
    }
}

/// Diffs the stored attachment set against the desired one.
///
/// Paths present in both sets are left untouched, so re-submitting the
/// current set is a no-op. An empty `desired` detaches everything.
#[must_use]
pub fn diff(existing: &BTreeSet<String>, desired: &BTreeSet<String>) -> AttachmentDelta {
    AttachmentDelta {
        to_delete: existing.difference(desired).cloned().collect(),
        to_insert: desired.difference(existing).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(paths: &[&str]) -> BTreeSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn apply(existing: &BTreeSet<String>, delta: &AttachmentDelta) -> BTreeSet<String> {
        existing
            .difference(&delta.to_delete)
            .cloned()
            .chain(delta.to_insert.iter().cloned())
            .collect()
    }

    #[test]
    fn converges_on_desired() {
        let existing = set(&["a.pdf", "b.pdf"]);
        let desired = set(&["b.pdf", "c.pdf"]);

        let delta = diff(&existing, &desired);
        assert_eq!(delta.to_delete, set(&["a.pdf"]));
        assert_eq!(delta.to_insert, set(&["c.pdf"]));
        assert_eq!(apply(&existing, &delta), desired);
    }

    #[test]
    fn equal_sets_are_a_noop() {
        let s = set(&["x.jpg", "y.jpg"]);
        assert!(diff(&s, &s).is_empty());
        assert!(diff(&BTreeSet::new(), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn empty_desired_detaches_everything() {
        let existing = set(&["a.pdf", "b.pdf", "c.pdf"]);
        let delta = diff(&existing, &BTreeSet::new());
        assert_eq!(delta.to_delete, existing);
        assert!(delta.to_insert.is_empty());
        assert!(apply(&existing, &delta).is_empty());
    }

    #[test]
    fn empty_existing_inserts_everything() {
        let desired = set(&["a.pdf", "b.pdf"]);
        let delta = diff(&BTreeSet::new(), &desired);
        assert!(delta.to_delete.is_empty());
        assert_eq!(delta.to_insert, desired);
    }

    #[test]
    fn halves_stay_disjoint() {
        let existing = set(&["a", "b", "c", "d"]);
        let desired = set(&["c", "d", "e", "f"]);
        let delta = diff(&existing, &desired);
        assert!(delta.to_delete.is_disjoint(&delta.to_insert));
        assert_eq!(apply(&existing, &delta), desired);
    }
}
