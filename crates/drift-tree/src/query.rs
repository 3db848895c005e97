//! Read-only queries over finished diff trees.

use crate::node::DiffNode;
use crate::result::DiffStats;

/// Tally classifications across the whole tree.
///
/// The engine accumulates stats while it builds; this recomputes them from
/// the finished tree and must agree with the accumulated counts.
pub fn compute_stats(root: &DiffNode) -> DiffStats {
    let mut stats = DiffStats::default();
    visit(root, &mut |node| stats.record(node.classification));
    stats
}

/// Number of nodes in the tree, root included.
pub fn count_nodes(root: &DiffNode) -> usize {
    let mut count = 0;
    visit(root, &mut |_| count += 1);
    count
}

/// Deepest path length anywhere in the tree.
pub fn max_depth(root: &DiffNode) -> usize {
    let mut deepest = 0;
    visit(root, &mut |node| deepest = deepest.max(node.path.len()));
    deepest
}

/// First node (pre-order) whose path segments match `segments` exactly.
///
/// Array nodes can contain a deleted child and an added child addressed by
/// the same index; pre-order order makes the winner deterministic.
pub fn find_by_path<'a>(root: &'a DiffNode, segments: &[&str]) -> Option<&'a DiffNode> {
    if root.path.segments().iter().map(String::as_str).eq(segments.iter().copied()) {
        return Some(root);
    }
    root.children.iter().find_map(|child| find_by_path(child, segments))
}

/// All nodes (pre-order) satisfying `predicate`.
pub fn filter<'a, F>(root: &'a DiffNode, predicate: F) -> Vec<&'a DiffNode>
where
    F: Fn(&DiffNode) -> bool,
{
    let mut matches = Vec::new();
    collect(root, &predicate, &mut matches);
    matches
}

fn collect<'a, F>(node: &'a DiffNode, predicate: &F, matches: &mut Vec<&'a DiffNode>)
where
    F: Fn(&DiffNode) -> bool,
{
    if predicate(node) {
        matches.push(node);
    }
    for child in &node.children {
        collect(child, predicate, matches);
    }
}

fn visit<F>(node: &DiffNode, f: &mut F)
where
    F: FnMut(&DiffNode),
{
    f(node);
    for child in &node.children {
        visit(child, f);
    }
}
