//! Value model for the Drift structural diff engine.
//!
//! This crate defines the tree-shaped values Drift compares: the JSON
//! scalar and composite kinds plus the extended kinds (functions, dates,
//! regexes, symbols, undefined). Every other Drift crate depends on
//! `drift-value`.
//!
//! # Key Types
//!
//! - [`Value`] — the closed input value enum
//! - [`ObjectRef`] / [`ArrayRef`] — shared composite handles with identity
//! - [`ValueKind`] — the nine-way structural classification
//! - [`classify`] — total mapping from value to kind
//! - [`normalize`] — canonical equality forms for extended kinds
//! - [`serialize`] — display rendering (never used for equality)
//!
//! Composite values are shared handles, so callers can alias them and even
//! build reference cycles; the diff engine tolerates both.

pub mod display;
mod json;
pub mod kind;
pub mod normalize;
pub mod value;

pub use display::serialize;
pub use kind::{classify, ValueKind};
pub use normalize::{normalize, REGEX_CANONICAL_SEPARATOR};
pub use value::{ArrayRef, DateValue, FunctionValue, ObjectRef, RegexValue, SymbolValue, Value};

/// Display sentinel substituted wherever a reference cycle would otherwise
/// make rendering or encoding recurse forever.
pub const CIRCULAR_SENTINEL: &str = "[circular reference]";
