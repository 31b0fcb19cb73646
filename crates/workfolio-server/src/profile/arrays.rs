//! Add/remove reconciliation for the tag-like profile collections (skills,
//! certifications). Inputs are cleaned and deduplicated, adds use set
//! semantics, removes delete every matching occurrence.

use crate::normalize::{clamp_str, MAX_TAG};

/// Idempotent mutation computed from a client's add/remove lists.
#[derive(Debug, Default)]
pub struct ArrayOps {
    pub add_to_set: Vec<String>,
    pub pull: Vec<String>,
}

impl ArrayOps {
    pub fn is_empty(&self) -> bool {
        self.add_to_set.is_empty() && self.pull.is_empty()
    }
}

/// Trims and clamps each entry, drops empties, dedupes preserving
/// first-seen order.
pub fn clean(entries: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for entry in entries {
        let value = clamp_str(entry, MAX_TAG);
        if value.is_empty() || out.contains(&value) {
            continue;
        }
        out.push(value);
    }
    out
}

/// Computes the operations for one collection. A value appearing in both
/// lists is dropped from the add set: remove wins, matching the
/// add-then-pull application order.
pub fn reconcile(adds: &[String], removes: &[String]) -> ArrayOps {
    let pull = clean(removes);
    let add_to_set = clean(adds)
        .into_iter()
        .filter(|value| !pull.contains(value))
        .collect();

    ArrayOps { add_to_set, pull }
}

/// Applies the operations to the stored collection: pulls remove every
/// occurrence, adds append only values not already present. Survivors keep
/// their relative order.
pub fn apply(original: &[String], ops: &ArrayOps) -> Vec<String> {
    let mut out: Vec<String> = original
        .iter()
        .filter(|value| !ops.pull.contains(value))
        .cloned()
        .collect();

    for value in &ops.add_to_set {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }

    out
}
