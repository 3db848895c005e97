//! Comparison results: the root node plus the classification tally.

use serde::{Deserialize, Serialize};

use crate::node::{Classification, DiffNode};

/// Per-classification node counts for a diff tree. Each field counts the
/// nodes (root included) carrying that classification, so the four fields
/// sum to the total node count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl DiffStats {
    /// Count one node.
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Added => self.added += 1,
            Classification::Deleted => self.deleted += 1,
            Classification::Modified => self.modified += 1,
            Classification::Unchanged => self.unchanged += 1,
        }
    }

    /// Total nodes counted.
    pub fn total(&self) -> usize {
        self.added + self.deleted + self.modified + self.unchanged
    }
}

/// The outcome of one comparison: the diff tree and its stats.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiffResult {
    pub root: DiffNode,
    pub stats: DiffStats,
}

impl DiffResult {
    /// Returns `true` if anything was added, deleted, or modified.
    pub fn has_changes(&self) -> bool {
        self.stats.added > 0 || self.stats.deleted > 0 || self.stats.modified > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DiffPath;
    use drift_value::{Value, ValueKind};

    #[test]
    fn record_tallies_each_classification() {
        let mut stats = DiffStats::default();
        stats.record(Classification::Added);
        stats.record(Classification::Added);
        stats.record(Classification::Deleted);
        stats.record(Classification::Modified);
        stats.record(Classification::Unchanged);

        assert_eq!(stats.added, 2);
        assert_eq!(stats.deleted, 1);
        assert_eq!(stats.modified, 1);
        assert_eq!(stats.unchanged, 1);
        assert_eq!(stats.total(), 5);
    }

    #[test]
    fn has_changes_ignores_unchanged_nodes() {
        let node = DiffNode::unchanged(
            DiffPath::root(),
            ValueKind::Primitive,
            Value::from(1),
            Value::from(1),
        );
        let unchanged_only = DiffResult {
            root: node.clone(),
            stats: DiffStats { unchanged: 1, ..Default::default() },
        };
        assert!(!unchanged_only.has_changes());

        let with_change = DiffResult {
            root: node,
            stats: DiffStats { unchanged: 1, modified: 1, ..Default::default() },
        };
        assert!(with_change.has_changes());
    }

    #[test]
    fn stats_round_trip_through_json() {
        let stats = DiffStats { added: 1, deleted: 2, modified: 3, unchanged: 4 };
        let text = serde_json::to_string(&stats).unwrap();
        let decoded: DiffStats = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, stats);
    }
}
