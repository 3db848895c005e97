//! The comparison pass.
//!
//! [`compare`] walks two values in lockstep and builds one [`DiffNode`]
//! per compared position. All per-call state (the identities on the
//! current descent path, the running stats) lives in a [`DiffPass`], so
//! independent calls never interfere.
//!
//! # Invariants
//!
//! - Every created node is recorded in the stats exactly once.
//! - A child's path extends its parent's path by exactly one segment.
//! - The output tree is acyclic and owned even when inputs are cyclic.

use std::collections::HashSet;

use tracing::{debug, trace};

use drift_align::{align, EditOp};
use drift_tree::{Classification, DiffNode, DiffPath, DiffResult, DiffStats};
use drift_value::{classify, normalize, ArrayRef, ObjectRef, Value, ValueKind, CIRCULAR_SENTINEL};

use crate::error::EngineResult;
use crate::options::{ArrayDiffMode, DiffOptions};

/// Display sentinel substituted for both sides of a node cut off by the
/// depth limit.
pub const DEPTH_SENTINEL: &str = "[max depth reached]";

/// Compare two values and produce a diff tree.
///
/// Validates `options` first; nothing is compared when they are rejected.
/// With valid options the comparison cannot fail, and with cycle
/// detection on (the default) it terminates for cyclic inputs too.
/// Recursion depth follows input depth, so unbounded comparison of
/// pathologically deep values can exhaust the stack; set
/// [`DiffOptions::max_depth`] when inputs are untrusted.
pub fn compare(old: &Value, new: &Value, options: &DiffOptions) -> EngineResult<DiffResult> {
    options.validate()?;
    debug!(
        old_kind = %classify(old),
        new_kind = %classify(new),
        mode = ?options.array_diff,
        "comparing values"
    );

    let mut pass = DiffPass::new(options);
    let root = pass.diff_at(old, new, DiffPath::root());
    Ok(DiffResult {
        root,
        stats: pass.stats,
    })
}

/// State for one `compare` call.
struct DiffPass<'a> {
    options: &'a DiffOptions,
    /// `ptr_id`s of the composites between the root and the position
    /// currently being compared. Entries are removed on unwind, so a
    /// shared handle reached along two sibling paths is not a cycle.
    visiting: HashSet<usize>,
    stats: DiffStats,
}

impl<'a> DiffPass<'a> {
    fn new(options: &'a DiffOptions) -> Self {
        Self {
            options,
            visiting: HashSet::new(),
            stats: DiffStats::default(),
        }
    }

    /// Compare one position. Checks for back-edges and the depth limit,
    /// then dispatches on kind; every return path routes the finished
    /// node through [`DiffPass::emit`] exactly once.
    fn diff_at(&mut self, old: &Value, new: &Value, path: DiffPath) -> DiffNode {
        if self.options.detect_cycles && self.on_path(old, new) {
            let node = DiffNode::modified(
                path,
                classify(old),
                Value::from(CIRCULAR_SENTINEL),
                Value::from(CIRCULAR_SENTINEL),
            );
            return self.emit(node);
        }

        if let Some(limit) = self.options.max_depth {
            if path.len() >= limit {
                return self.emit(depth_limited(old, new, path));
            }
        }

        let old_marked = self.mark(old);
        let new_marked = self.mark(new);
        let node = self.dispatch(old, new, path);
        if new_marked {
            self.unmark(new);
        }
        if old_marked {
            self.unmark(old);
        }
        self.emit(node)
    }

    /// Kind mismatch is a leaf; matching kinds compare by shape.
    fn dispatch(&mut self, old: &Value, new: &Value, path: DiffPath) -> DiffNode {
        let old_kind = classify(old);
        let new_kind = classify(new);
        if old_kind != new_kind {
            return DiffNode::modified(path, old_kind, old.clone(), new.clone());
        }

        match old_kind {
            ValueKind::Primitive | ValueKind::Null | ValueKind::Undefined => {
                if old == new {
                    DiffNode::unchanged(path, old_kind, old.clone(), new.clone())
                } else {
                    DiffNode::modified(path, old_kind, old.clone(), new.clone())
                }
            }
            ValueKind::Object => match (old, new) {
                (Value::Object(left), Value::Object(right)) => {
                    self.diff_objects(left, right, old, new, path)
                }
                _ => unreachable!("kind check guarantees two objects"),
            },
            ValueKind::Array => match (old, new) {
                (Value::Array(left), Value::Array(right)) => match self.options.array_diff {
                    ArrayDiffMode::Lcs => self.diff_arrays_lcs(left, right, old, new, path),
                    ArrayDiffMode::Positional => {
                        self.diff_arrays_positional(left, right, old, new, path)
                    }
                },
                _ => unreachable!("kind check guarantees two arrays"),
            },
            ValueKind::Function | ValueKind::Date | ValueKind::Regexp | ValueKind::Symbol => {
                if normalize(old) == normalize(new) {
                    DiffNode::unchanged(path, old_kind, old.clone(), new.clone())
                } else {
                    DiffNode::modified(path, old_kind, old.clone(), new.clone())
                }
            }
        }
    }

    /// Sorted union of both key sets, minus the ignored keys. Keys on one
    /// side only become whole-value Added/Deleted leaves.
    fn diff_objects(
        &mut self,
        left: &ObjectRef,
        right: &ObjectRef,
        old: &Value,
        new: &Value,
        path: DiffPath,
    ) -> DiffNode {
        let left_entries = left.borrow();
        let right_entries = right.borrow();

        let mut keys: Vec<&String> = left_entries.keys().chain(right_entries.keys()).collect();
        keys.sort();
        keys.dedup();

        let mut children = Vec::with_capacity(keys.len());
        for key in keys {
            if self.options.ignore_keys.contains(key.as_str()) {
                continue;
            }
            let child_path = path.child(key.as_str());
            match (left_entries.get(key), right_entries.get(key)) {
                (Some(old_child), Some(new_child)) => {
                    children.push(self.diff_at(old_child, new_child, child_path));
                }
                (Some(old_child), None) => {
                    let node =
                        DiffNode::deleted(child_path, classify(old_child), old_child.clone());
                    children.push(self.emit(node));
                }
                (None, Some(new_child)) => {
                    let node = DiffNode::added(child_path, classify(new_child), new_child.clone());
                    children.push(self.emit(node));
                }
                (None, None) => unreachable!("key came from one of the two maps"),
            }
        }

        composite_node(ValueKind::Object, path, old, new, children)
    }

    /// Translate an LCS edit script into child nodes: kept pairs recurse,
    /// everything else becomes a leaf.
    fn diff_arrays_lcs(
        &mut self,
        left: &ArrayRef,
        right: &ArrayRef,
        old: &Value,
        new: &Value,
        path: DiffPath,
    ) -> DiffNode {
        let left_items = left.borrow();
        let right_items = right.borrow();
        let ops = align(&left_items, &right_items);
        trace!(ops = ops.len(), "aligned array elements");

        let mut children = Vec::with_capacity(ops.len());
        // Keep ops carry only the new-side element; the cursor recovers
        // the matching old-side element so recursion sees both.
        let mut old_cursor = 0usize;
        for op in &ops {
            match op {
                EditOp::Keep { value, index } => {
                    let old_child = &left_items[old_cursor];
                    old_cursor += 1;
                    children.push(self.diff_at(old_child, value, path.child(index.to_string())));
                }
                EditOp::Add { value, index } => {
                    let node = DiffNode::added(
                        path.child(index.to_string()),
                        classify(value),
                        value.clone(),
                    );
                    children.push(self.emit(node));
                }
                EditOp::Delete { value, index } => {
                    old_cursor += 1;
                    let node = DiffNode::deleted(
                        path.child(index.to_string()),
                        classify(value),
                        value.clone(),
                    );
                    children.push(self.emit(node));
                }
                EditOp::Replace { old: old_child, new: new_child, index } => {
                    // LCS scripts never contain Replace; kept for
                    // exhaustiveness over the op type.
                    old_cursor += 1;
                    let node = DiffNode::modified(
                        path.child(index.to_string()),
                        classify(old_child),
                        old_child.clone(),
                        new_child.clone(),
                    );
                    children.push(self.emit(node));
                }
            }
        }

        composite_node(ValueKind::Array, path, old, new, children)
    }

    /// Pair indices `0..max(m, n)` directly, object-style: both present
    /// recurses, an overhang becomes whole-value leaves.
    fn diff_arrays_positional(
        &mut self,
        left: &ArrayRef,
        right: &ArrayRef,
        old: &Value,
        new: &Value,
        path: DiffPath,
    ) -> DiffNode {
        let left_items = left.borrow();
        let right_items = right.borrow();
        let longest = left_items.len().max(right_items.len());
        trace!(longest, "pairing array elements by index");

        let mut children = Vec::with_capacity(longest);
        for index in 0..longest {
            let child_path = path.child(index.to_string());
            match (left_items.get(index), right_items.get(index)) {
                (Some(old_child), Some(new_child)) => {
                    children.push(self.diff_at(old_child, new_child, child_path));
                }
                (Some(old_child), None) => {
                    let node =
                        DiffNode::deleted(child_path, classify(old_child), old_child.clone());
                    children.push(self.emit(node));
                }
                (None, Some(new_child)) => {
                    let node = DiffNode::added(child_path, classify(new_child), new_child.clone());
                    children.push(self.emit(node));
                }
                (None, None) => unreachable!("index bounded by the longer array"),
            }
        }

        composite_node(ValueKind::Array, path, old, new, children)
    }

    /// Record a finished node in the stats. Must run exactly once per
    /// node; construction sites call it at the point the node is final.
    fn emit(&mut self, node: DiffNode) -> DiffNode {
        self.stats.record(node.classification);
        node
    }

    /// Returns `true` if either side is a composite we are already inside.
    fn on_path(&self, old: &Value, new: &Value) -> bool {
        let hit = |value: &Value| {
            composite_id(value).is_some_and(|id| self.visiting.contains(&id))
        };
        hit(old) || hit(new)
    }

    /// Returns `true` if this call newly inserted the identity; the
    /// matching unmark is skipped otherwise (both sides can be the same
    /// handle).
    fn mark(&mut self, value: &Value) -> bool {
        match composite_id(value) {
            Some(id) => self.visiting.insert(id),
            None => false,
        }
    }

    fn unmark(&mut self, value: &Value) {
        if let Some(id) = composite_id(value) {
            self.visiting.remove(&id);
        }
    }
}

/// Parent node for a composite comparison: Modified if any child changed,
/// Unchanged otherwise. Carries both full composite values either way.
fn composite_node(
    kind: ValueKind,
    path: DiffPath,
    old: &Value,
    new: &Value,
    children: Vec<DiffNode>,
) -> DiffNode {
    let changed = children
        .iter()
        .any(|child| child.classification != Classification::Unchanged);
    let node = if changed {
        DiffNode::modified(path, kind, old.clone(), new.clone())
    } else {
        DiffNode::unchanged(path, kind, old.clone(), new.clone())
    };
    node.with_children(children)
}

/// Leaf for a position at the depth limit. Unchanged only when the two
/// sides are identical without descending (same handle for composites,
/// equal value otherwise); the limit makes deeper inspection off-limits.
fn depth_limited(old: &Value, new: &Value, path: DiffPath) -> DiffNode {
    let kind = classify(old);
    if old == new {
        DiffNode::unchanged(path, kind, Value::from(DEPTH_SENTINEL), Value::from(DEPTH_SENTINEL))
    } else {
        DiffNode::modified(path, kind, Value::from(DEPTH_SENTINEL), Value::from(DEPTH_SENTINEL))
    }
}

fn composite_id(value: &Value) -> Option<usize> {
    match value {
        Value::Array(array) => Some(array.ptr_id()),
        Value::Object(object) => Some(object.ptr_id()),
        _ => None,
    }
}
