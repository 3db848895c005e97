//! Edit-script computation between two value sequences.

use drift_value::Value;

use crate::equal::deep_equal;
use crate::op::EditOp;

/// Align two sequences with a longest-common-subsequence dynamic program.
///
/// Emits `Keep`/`Add`/`Delete` ops in left-to-right order; `Keep` carries
/// the new-side element. Element equality is [`deep_equal`]. Backtracking
/// prefers `Keep` wherever elements match, and resolves add/delete ties
/// toward `Delete`, so output is deterministic for a given input pair.
///
/// O(m·n) time and space. Callers with very large sequences should prefer
/// [`align_positional`].
pub fn align(left: &[Value], right: &[Value]) -> Vec<EditOp> {
    let m = left.len();
    let n = right.len();

    // dp[i][j] = LCS length of left[..i] and right[..j].
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if deep_equal(&left[i - 1], &right[j - 1]) {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    // Backtrack from the far corner; ops come out right-to-left.
    let mut ops = Vec::with_capacity(m.max(n));
    let mut i = m;
    let mut j = n;
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && deep_equal(&left[i - 1], &right[j - 1]) {
            ops.push(EditOp::Keep {
                value: right[j - 1].clone(),
                index: j - 1,
            });
            i -= 1;
            j -= 1;
        } else if j == 0 || (i > 0 && dp[i - 1][j] >= dp[i][j - 1]) {
            ops.push(EditOp::Delete {
                value: left[i - 1].clone(),
                index: i - 1,
            });
            i -= 1;
        } else {
            ops.push(EditOp::Add {
                value: right[j - 1].clone(),
                index: j - 1,
            });
            j -= 1;
        }
    }
    ops.reverse();
    ops
}

/// Pair elements index by index, with no reordering analysis.
///
/// Equal pair → `Keep`, unequal pair → `Replace`, left overhang →
/// `Delete`, right overhang → `Add`. O(max(m, n)) time.
pub fn align_positional(left: &[Value], right: &[Value]) -> Vec<EditOp> {
    let mut ops = Vec::with_capacity(left.len().max(right.len()));
    let shared = left.len().min(right.len());

    for index in 0..shared {
        if deep_equal(&left[index], &right[index]) {
            ops.push(EditOp::Keep {
                value: right[index].clone(),
                index,
            });
        } else {
            ops.push(EditOp::Replace {
                old: left[index].clone(),
                new: right[index].clone(),
                index,
            });
        }
    }
    // At most one of the overhang loops has anything to do.
    for (index, value) in left.iter().enumerate().skip(shared) {
        ops.push(EditOp::Delete {
            value: value.clone(),
            index,
        });
    }
    for (index, value) in right.iter().enumerate().skip(shared) {
        ops.push(EditOp::Add {
            value: value.clone(),
            index,
        });
    }
    ops
}
