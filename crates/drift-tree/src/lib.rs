//! Diff result tree for the Drift structural diff engine.
//!
//! The engine reports its findings as a tree of [`DiffNode`]s mirroring the
//! compared structure: one node per compared position, each carrying a
//! [`Classification`], a [`DiffPath`] from the root, the value kind, and
//! the value(s) involved. [`DiffResult`] pairs the root node with the
//! [`DiffStats`] tally. Query helpers walk finished trees; the
//! [`Renderer`] trait is the seam output formats plug into.
//!
//! Result trees are plain owned data: acyclic and immutable once built,
//! even when the compared values were cyclic.

pub mod node;
pub mod query;
pub mod render;
pub mod result;

pub use node::{Classification, DiffNode, DiffPath};
pub use query::{compute_stats, count_nodes, filter, find_by_path, max_depth};
pub use render::Renderer;
pub use result::{DiffResult, DiffStats};
