//! Structural deep equality between values.

use std::collections::HashSet;

use drift_value::{classify, normalize, Value};

/// Structural equality: arrays compare pairwise, objects by key set and
/// per-key values, extended kinds by canonical form, everything else by
/// strict value equality (`NaN != NaN`). Values of different kinds are
/// never equal.
///
/// Total on cyclic inputs: a pair of composites already being compared
/// higher up the recursion is taken as equal, so two values compare equal
/// exactly when no finite probe distinguishes them. A self-referential
/// list and an isomorphic two-step cycle are therefore equal.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    let mut in_progress = HashSet::new();
    equal_guarded(a, b, &mut in_progress)
}

/// `in_progress` holds the `(ptr_id, ptr_id)` pairs currently being
/// compared between here and the root call. Entries are removed on unwind
/// so sibling occurrences of a shared handle are compared on their own.
fn equal_guarded(a: &Value, b: &Value, in_progress: &mut HashSet<(usize, usize)>) -> bool {
    // Same handle or equal scalar.
    if a == b {
        return true;
    }
    if classify(a) != classify(b) {
        return false;
    }
    match (a, b) {
        (Value::Array(left), Value::Array(right)) => {
            if left.len() != right.len() {
                return false;
            }
            let pair = (left.ptr_id(), right.ptr_id());
            if !in_progress.insert(pair) {
                // Back-edge: the question "is this pair equal" is already
                // open; answering yes lets the outer frames decide.
                return true;
            }
            let equal = {
                let left_items = left.borrow();
                let right_items = right.borrow();
                left_items
                    .iter()
                    .zip(right_items.iter())
                    .all(|(x, y)| equal_guarded(x, y, in_progress))
            };
            in_progress.remove(&pair);
            equal
        }
        (Value::Object(left), Value::Object(right)) => {
            if left.len() != right.len() {
                return false;
            }
            let pair = (left.ptr_id(), right.ptr_id());
            if !in_progress.insert(pair) {
                return true;
            }
            let equal = {
                let left_entries = left.borrow();
                let right_entries = right.borrow();
                left_entries.iter().all(|(key, x)| match right_entries.get(key) {
                    Some(y) => equal_guarded(x, y, in_progress),
                    None => false,
                })
            };
            in_progress.remove(&pair);
            equal
        }
        // Extended kinds compare by canonical form. Anything else of a
        // shared kind already failed strict equality.
        _ => match (normalize(a), normalize(b)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        },
    }
}
