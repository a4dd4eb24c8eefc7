//! Depth-first serialization of a [`Node`] tree into the line-oriented text
//! format read back by [`crate::parser::Parser`].

use std::fmt;

use tracing::debug;

use crate::escape::encode;
use crate::node::Node;

/// Mandatory first line of every document.
pub const PROLOG: &str = r#"<?xml version="1.0"?>"#;

/// Default indentation unit: one tab per nesting level
pub const DEFAULT_INDENT: &str = "\t";

/// Configuration options for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// String repeated once per nesting level
    pub indent: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl FormatConfig {
    /// Indents with `count` spaces per level instead of a tab.
    pub fn with_spaces(count: usize) -> Self {
        Self {
            indent: " ".repeat(count),
        }
    }
}

impl fmt::Display for FormatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormatConfig {{ indent: {:?} }}", self.indent)
    }
}

/// Writes a tree in pre-order.
///
/// Every element is written in one of three shapes:
/// - neither text nor children: `<name a="v" />`
/// - text only: `<name a="v">text</name>` on one line
/// - children: opening tag, then the text (if any) on its own line, then each
///   child, then the closing tag. The text line and the children are indented
///   one level deeper than the tags.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    config: FormatConfig,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Serializes `root` as a complete document, starting with [`PROLOG`].
    pub fn serialize(&self, root: &Node) -> String {
        let mut out = String::with_capacity(64 * root.element_count());
        out.push_str(PROLOG);
        out.push('\n');
        self.write_node(root, 0, &mut out);
        debug!(bytes = out.len(), root = root.name(), "serialized document");
        out
    }

    fn write_node(&self, node: &Node, depth: usize, out: &mut String) {
        self.write_indent(depth, out);

        if !node.has_children() {
            match node.text() {
                None => Self::write_start_tag(node, true, out),
                Some(text) => {
                    Self::write_start_tag(node, false, out);
                    out.push_str(&encode(text));
                    Self::write_end_tag(node, out);
                }
            }
            return;
        }

        Self::write_start_tag(node, false, out);
        out.push('\n');

        if let Some(text) = node.text() {
            self.write_indent(depth + 1, out);
            out.push_str(&encode(text));
            out.push('\n');
        }

        for child in node.children() {
            self.write_node(child, depth + 1, out);
            out.push('\n');
        }

        self.write_indent(depth, out);
        Self::write_end_tag(node, out);
    }

    fn write_start_tag(node: &Node, self_closing: bool, out: &mut String) {
        out.push('<');
        out.push_str(node.name());
        for (name, value) in node.attributes() {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&encode(value));
            out.push('"');
        }
        if self_closing {
            out.push_str(" />");
        } else {
            out.push('>');
        }
    }

    fn write_end_tag(node: &Node, out: &mut String) {
        out.push_str("</");
        out.push_str(node.name());
        out.push('>');
    }

    fn write_indent(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str(&self.config.indent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn test_self_closing_without_attributes() -> Result<()> {
        let node = Node::new("empty")?;
        assert_eq!(
            Serializer::new().serialize(&node),
            format!("{PROLOG}\n<empty />")
        );
        Ok(())
    }

    #[test]
    fn test_leaf_with_text_and_escaped_attribute() -> Result<()> {
        let mut node = Node::new("q")?;
        node.add_attribute("who", "Tom & \"Jerry\"")?;
        node.set_text("1 < 2");
        assert_eq!(
            Serializer::new().serialize(&node),
            format!("{PROLOG}\n<q who=\"Tom &amp; &quot;Jerry&quot;\">1 &lt; 2</q>")
        );
        Ok(())
    }

    #[test]
    fn test_branch_text_indented_like_children() -> Result<()> {
        let mut root = Node::new("r")?;
        root.set_text("intro");
        root.add_element("c")?;
        let expected = format!("{PROLOG}\n<r>\n\tintro\n\t<c />\n</r>");
        assert_eq!(Serializer::new().serialize(&root), expected);
        Ok(())
    }

    #[test]
    fn test_custom_indent() -> Result<()> {
        let mut root = Node::new("r")?;
        root.add_element("a")?.add_element("b")?;
        let serializer = Serializer::with_config(FormatConfig::with_spaces(2));
        let expected = format!("{PROLOG}\n<r>\n  <a>\n    <b />\n  </a>\n</r>");
        assert_eq!(serializer.serialize(&root), expected);
        Ok(())
    }
}
