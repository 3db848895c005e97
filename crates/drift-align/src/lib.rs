//! Sequence alignment for the Drift structural diff engine.
//!
//! Two strategies over value slices: [`align`] computes a minimal edit
//! script with longest-common-subsequence dynamic programming, and
//! [`align_positional`] pairs elements index by index. Both use
//! [`deep_equal`] for element equality, so reordered composites match
//! structurally and cyclic elements cannot hang the aligner.

pub mod align;
pub mod equal;
pub mod op;

pub use align::{align, align_positional};
pub use equal::deep_equal;
pub use op::EditOp;
