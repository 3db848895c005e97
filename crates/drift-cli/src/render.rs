//! Colored text rendering of diff results.

use colored::Colorize;

use drift_tree::{Classification, DiffNode, DiffResult, DiffStats, Renderer};
use drift_value::serialize;

/// One line per node: indented by depth, marked `+`/`-`/`~`/` ` and
/// colored green/red/yellow by classification. Composite nodes show their
/// kind; leaves show their serialized value(s).
pub struct TextRenderer;

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, result: &DiffResult) -> String {
        let mut out = self.render_node(&result.root);
        out.push('\n');
        out.push_str(&summary(&result.stats));
        out.push('\n');
        out
    }

    fn render_node(&self, node: &DiffNode) -> String {
        let mut out = String::new();
        write_node(node, &mut out);
        out
    }
}

/// Summary line in the style of the tree markers.
pub fn summary(stats: &DiffStats) -> String {
    format!(
        "{} added, {} deleted, {} modified, {} unchanged",
        stats.added.to_string().green(),
        stats.deleted.to_string().red(),
        stats.modified.to_string().yellow(),
        stats.unchanged,
    )
}

fn write_node(node: &DiffNode, out: &mut String) {
    let marker = match node.classification {
        Classification::Added => "+".green(),
        Classification::Deleted => "-".red(),
        Classification::Modified => "~".yellow(),
        Classification::Unchanged => " ".normal(),
    };
    let indent = "  ".repeat(node.path.len());
    out.push_str(&format!("{indent}{marker} {}\n", describe(node)));
    for child in &node.children {
        write_node(child, out);
    }
}

fn describe(node: &DiffNode) -> String {
    let path = node.path.expression();
    if !node.is_leaf() {
        return format!("{path} ({})", node.value_kind);
    }
    match node.classification {
        Classification::Added => format!("{path}: {}", leaf_value(&node.new_value).green()),
        Classification::Deleted => format!("{path}: {}", leaf_value(&node.old_value).red()),
        Classification::Modified => format!(
            "{path}: {} → {}",
            leaf_value(&node.old_value).red(),
            leaf_value(&node.new_value).green(),
        ),
        Classification::Unchanged => format!("{path}: {}", leaf_value(&node.old_value)),
    }
}

fn leaf_value(value: &Option<drift_value::Value>) -> String {
    value.as_ref().map(serialize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_engine::{compare, DiffOptions};
    use drift_value::Value;

    fn plain(old: &Value, new: &Value) -> String {
        colored::control::set_override(false);
        let result = compare(old, new, &DiffOptions::default()).unwrap();
        TextRenderer.render(&result)
    }

    #[test]
    fn renders_one_marked_line_per_node() {
        let old = Value::object([("name", Value::from("a")), ("age", Value::from(30))]);
        let new = Value::object([
            ("name", Value::from("a")),
            ("age", Value::from(31)),
            ("tag", Value::from("x")),
        ]);

        let text = plain(&old, &new);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "~ $ (object)");
        assert!(lines.contains(&"  ~ $.age: 30 → 31"));
        assert!(lines.contains(&"  + $.tag: \"x\""));
        assert!(lines.contains(&"    $.name: \"a\""));
    }

    #[test]
    fn renders_summary_counts() {
        let old = Value::object([("age", Value::from(30))]);
        let new = Value::object([("age", Value::from(31))]);

        let text = plain(&old, &new);
        assert!(text.ends_with("0 added, 0 deleted, 2 modified, 0 unchanged\n"));
    }

    #[test]
    fn array_nodes_show_kind_and_indexed_children() {
        let old = Value::array([Value::from(1), Value::from(2)]);
        let new = Value::array([Value::from(2)]);

        let text = plain(&old, &new);
        assert!(text.contains("~ $ (array)"));
        assert!(text.contains("- $[0]: 1"));
        assert!(text.contains("$[0]: 2"));
    }

    #[test]
    fn unchanged_tree_renders_without_markers() {
        let doc = Value::object([("a", Value::from(1))]);
        let text = plain(&doc, &doc);
        assert!(text.contains("  $ (object)"));
        assert!(text.contains("$.a: 1"));
    }

    #[test]
    fn summary_is_plain_counts() {
        colored::control::set_override(false);
        let stats = DiffStats { added: 1, deleted: 2, modified: 3, unchanged: 4 };
        assert_eq!(summary(&stats), "1 added, 2 deleted, 3 modified, 4 unchanged");
    }
}
