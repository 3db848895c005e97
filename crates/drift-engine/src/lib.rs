//! Comparison engine for the Drift structural diff.
//!
//! [`compare`] takes two values and a [`DiffOptions`] and produces a
//! [`DiffResult`]: a tree with one node per compared position plus summary
//! stats. The walk recurses where both sides are composites of the same
//! kind, aligns array elements (LCS or positional), guards against
//! reference cycles with a path-scoped identity set, and can be
//! depth-bounded.
//!
//! # Quick Start
//!
//! ```rust
//! use drift_engine::{compare, DiffOptions};
//! use drift_value::Value;
//!
//! let old = Value::object([("n", Value::from(1))]);
//! let new = Value::object([("n", Value::from(2))]);
//! let result = compare(&old, &new, &DiffOptions::default()).unwrap();
//! assert!(result.has_changes());
//! ```

pub mod engine;
pub mod error;
pub mod options;

pub use engine::{compare, DEPTH_SENTINEL};
pub use error::{EngineError, EngineResult};
pub use options::{ArrayDiffMode, DiffOptions};

// Re-exports for convenience.
pub use drift_tree::{Classification, DiffNode, DiffPath, DiffResult, DiffStats};
pub use drift_value::{Value, ValueKind};
