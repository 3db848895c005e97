//! Edit operations produced by sequence alignment.

use drift_value::Value;
use serde::{Deserialize, Serialize};

/// One step of an edit script that rewrites a left sequence into a right
/// sequence.
///
/// Index semantics differ by variant: `Keep`, `Add`, and `Replace` carry
/// the element's index in the new sequence; `Delete` carries the index in
/// the old sequence, since a deleted element has no new-side position.
/// LCS alignment emits only `Keep`/`Add`/`Delete`; positional alignment
/// also emits `Replace`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum EditOp {
    /// Element present on both sides; carries the new-side element.
    Keep { value: Value, index: usize },
    /// Element present only on the right.
    Add { value: Value, index: usize },
    /// Element present only on the left.
    Delete { value: Value, index: usize },
    /// Positional pairing of two unequal elements.
    Replace { old: Value, new: Value, index: usize },
}

impl EditOp {
    /// The sequence index this op addresses (new side except `Delete`).
    pub fn index(&self) -> usize {
        match self {
            EditOp::Keep { index, .. }
            | EditOp::Add { index, .. }
            | EditOp::Delete { index, .. }
            | EditOp::Replace { index, .. } => *index,
        }
    }

    /// Returns `true` for a `Keep` op.
    pub fn is_keep(&self) -> bool {
        matches!(self, EditOp::Keep { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn index_covers_every_variant() {
        assert_eq!(EditOp::Keep { value: Value::from(1), index: 3 }.index(), 3);
        assert_eq!(EditOp::Add { value: Value::from(1), index: 4 }.index(), 4);
        assert_eq!(EditOp::Delete { value: Value::from(1), index: 5 }.index(), 5);
        let replace = EditOp::Replace {
            old: Value::from(1),
            new: Value::from(2),
            index: 6,
        };
        assert_eq!(replace.index(), 6);
    }

    #[test]
    fn serializes_with_lowercase_op_tag() {
        let op = EditOp::Keep {
            value: Value::from(1.5),
            index: 0,
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"op": "keep", "value": 1.5, "index": 0})
        );

        let op = EditOp::Replace {
            old: Value::from("a"),
            new: Value::from("b"),
            index: 2,
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"op": "replace", "old": "a", "new": "b", "index": 2})
        );
    }

    #[test]
    fn round_trips_through_json() {
        let op = EditOp::Delete {
            value: Value::from("gone"),
            index: 7,
        };
        let text = serde_json::to_string(&op).unwrap();
        let decoded: EditOp = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, op);
    }
}
