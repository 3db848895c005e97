//! Diff tree nodes and the paths that address them.

use std::fmt;

use drift_value::{Value, ValueKind};
use serde::{Deserialize, Serialize};

/// How a compared position changed between the old and new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Present only on the new side.
    Added,
    /// Present only on the old side.
    Deleted,
    /// Present on both sides with a difference somewhere at or below it.
    Modified,
    /// Present on both sides and structurally equal.
    Unchanged,
}

/// Path from the diff root to a node: object keys and array indices as
/// string segments. The root path is empty; each child extends its parent
/// by exactly one trailing segment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiffPath(Vec<String>);

impl DiffPath {
    /// The empty path addressing the comparison root.
    pub fn root() -> Self {
        Self::default()
    }

    /// The path one segment below this one.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Number of segments; the node's depth below the root.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// JSONPath-like rendering for display: `$` for the root, `[N]` for
    /// numeric segments, `.name` for identifier-shaped segments, and
    /// `["..."]` with JSON escaping for everything else.
    pub fn expression(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.0 {
            if is_index(segment) {
                out.push('[');
                out.push_str(segment);
                out.push(']');
            } else if is_identifier(segment) {
                out.push('.');
                out.push_str(segment);
            } else {
                out.push('[');
                out.push_str(&serde_json::Value::String(segment.clone()).to_string());
                out.push(']');
            }
        }
        out
    }
}

impl fmt::Display for DiffPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression())
    }
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// One compared position in the diff tree.
///
/// Value presence follows the classification: `Added` carries only
/// `new_value`, `Deleted` only `old_value`, `Modified` and `Unchanged`
/// carry both. The four constructors enforce this; build nodes through
/// them. Composite nodes get their children attached with
/// [`DiffNode::with_children`]; leaves keep the vec empty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiffNode {
    pub classification: Classification,
    pub path: DiffPath,
    pub value_kind: ValueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DiffNode>,
}

impl DiffNode {
    /// A position present only on the new side.
    pub fn added(path: DiffPath, value_kind: ValueKind, new_value: Value) -> Self {
        Self {
            classification: Classification::Added,
            path,
            value_kind,
            old_value: None,
            new_value: Some(new_value),
            children: Vec::new(),
        }
    }

    /// A position present only on the old side.
    pub fn deleted(path: DiffPath, value_kind: ValueKind, old_value: Value) -> Self {
        Self {
            classification: Classification::Deleted,
            path,
            value_kind,
            old_value: Some(old_value),
            new_value: None,
            children: Vec::new(),
        }
    }

    /// A position present on both sides with a difference.
    pub fn modified(path: DiffPath, value_kind: ValueKind, old_value: Value, new_value: Value) -> Self {
        Self {
            classification: Classification::Modified,
            path,
            value_kind,
            old_value: Some(old_value),
            new_value: Some(new_value),
            children: Vec::new(),
        }
    }

    /// A position present on both sides with no difference.
    pub fn unchanged(path: DiffPath, value_kind: ValueKind, old_value: Value, new_value: Value) -> Self {
        Self {
            classification: Classification::Unchanged,
            path,
            value_kind,
            old_value: Some(old_value),
            new_value: Some(new_value),
            children: Vec::new(),
        }
    }

    /// Attach child nodes; used for composite positions.
    pub fn with_children(mut self, children: Vec<DiffNode>) -> Self {
        self.children = children;
        self
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
