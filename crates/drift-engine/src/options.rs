//! Comparison options.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Strategy for comparing two arrays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayDiffMode {
    /// Longest-common-subsequence alignment. Detects shifted elements,
    /// O(m·n) per array pair.
    #[default]
    Lcs,
    /// Index-by-index pairing. No shift detection, O(max(m, n)).
    Positional,
}

/// Tuning knobs for a comparison.
///
/// `Default` (and any field omitted when deserializing) gives unbounded
/// depth, no ignored keys, LCS arrays, and cycle detection on.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Stop descending once a path has this many segments; positions at
    /// the limit become depth-limit leaves. `None` puts no bound on
    /// descent.
    pub max_depth: Option<usize>,
    /// Object keys skipped entirely, on both sides: no nodes, no stats.
    pub ignore_keys: BTreeSet<String>,
    /// Array comparison strategy.
    pub array_diff: ArrayDiffMode,
    /// Track composite identities along the descent path and report
    /// back-edges instead of following them. Disabling this makes
    /// comparison of cyclic inputs recurse forever.
    pub detect_cycles: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            ignore_keys: BTreeSet::new(),
            array_diff: ArrayDiffMode::default(),
            detect_cycles: true,
        }
    }
}

impl DiffOptions {
    /// Check the configuration before any comparison work runs.
    ///
    /// `max_depth == Some(0)` is rejected: a bound that low would forbid
    /// comparing even the root.
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_depth == Some(0) {
            return Err(EngineError::InvalidOptions(
                "max_depth must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}
