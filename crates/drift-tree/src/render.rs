//! Output formatting seam.

use crate::node::DiffNode;
use crate::result::DiffResult;

/// Turns diff results into some output form.
///
/// Implementations live with the consumers (the CLI renders colored text);
/// the core never formats, it only produces trees.
pub trait Renderer {
    type Output;

    /// Render a whole result, stats included.
    fn render(&self, result: &DiffResult) -> Self::Output;

    /// Render a single node and its subtree.
    fn render_node(&self, node: &DiffNode) -> Self::Output;
}
