//! HTML serialization of the display tree.

use crate::node::{NodeData, NodeId};
use crate::tree::Dom;

/// Escape text content for inclusion between tags.
fn escape_text(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Escape a double-quoted attribute value.
fn escape_attr(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

impl Dom {
    /// Serialize `node` and its subtree. A document node serializes as a
    /// doctype followed by its children.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Document => {
                out.push_str("<!DOCTYPE html>");
                for child in self.children(id) {
                    self.write_html(child, out);
                }
            }
            NodeData::Text { data } => escape_text(data, out),
            NodeData::Element(elem) => {
                out.push('<');
                out.push_str(&elem.tag_name);
                if !elem.classes.is_empty() {
                    out.push_str(" class=\"");
                    escape_attr(&elem.classes.join(" "), out);
                    out.push('"');
                }
                if !elem.style.is_empty() {
                    out.push_str(" style=\"");
                    escape_attr(&elem.style.to_css_text(), out);
                    out.push('"');
                }
                out.push('>');
                for child in self.children(id) {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(&elem.tag_name);
                out.push('>');
            }
        }
    }
}
