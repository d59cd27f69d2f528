//! Plain-text serialization of a view tree for the terminal.
//!
//! Layout rules:
//! - `section`, `article` and `.card` elements indent their content
//! - `.inline` elements collapse their children onto one line
//! - links print as `text <href>`, images as `[image] src`, buttons as `[label]`

use crate::display::view::ViewNode;

const INDENT: &str = "  ";

pub fn to_text(node: &ViewNode) -> String {
    let mut lines = Vec::new();
    write_node(node, 0, &mut lines);
    lines.join("\n")
}

fn write_node(node: &ViewNode, depth: usize, lines: &mut Vec<String>) {
    let ViewNode::Element { tag, children, .. } = node else {
        push_line(lines, depth, &inline_text(node));
        return;
    };

    let is_leaf = children.iter().all(|c| matches!(c, ViewNode::Text(_)));
    if node.has_class("inline") || is_leaf || matches!(*tag, "a" | "img" | "button") {
        let text = if node.has_class("inline") {
            children
                .iter()
                .map(inline_text)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("  ")
        } else {
            inline_text(node)
        };
        push_line(lines, depth, &text);
        return;
    }

    let indents = matches!(*tag, "section" | "article") || node.has_class("card");
    if node.has_class("card") && !lines.is_empty() {
        lines.push(String::new());
    }
    let child_depth = if indents { depth + 1 } else { depth };
    for child in children {
        write_node(child, child_depth, lines);
    }
}

fn inline_text(node: &ViewNode) -> String {
    match node.tag() {
        None => node.text_content().trim().to_string(),
        Some("img") => format!("[image] {}", node.attr_value("src").unwrap_or("")),
        Some("a") => format!(
            "{} <{}>",
            node.text_content().trim(),
            node.attr_value("href").unwrap_or("")
        ),
        Some("button") => {
            let label = format!("[{}]", node.text_content().trim());
            if node.attr_value("disabled").is_some() {
                format!("{} (disabled)", label)
            } else {
                label
            }
        }
        Some(_) => node.text_content().trim().to_string(),
    }
}

fn push_line(lines: &mut Vec<String>, depth: usize, text: &str) {
    if !text.is_empty() {
        lines.push(format!("{}{}", INDENT.repeat(depth), text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::render::{render_not_found, render_pagination};

    #[test]
    fn test_indented_sections() {
        let view = ViewNode::el("section")
            .child(ViewNode::el("h1").with_text("Title"))
            .child(
                ViewNode::el("div")
                    .class("card")
                    .child(ViewNode::el("p").with_text("Body")),
            );
        assert_eq!(to_text(&view), "  Title\n\n    Body");
    }

    #[test]
    fn test_inline_pagination() {
        assert_eq!(
            to_text(&render_pagination(1, 4)),
            "[Previous] (disabled)  Page 1 of 4  [Next]"
        );
    }

    #[test]
    fn test_links_show_target() {
        assert_eq!(
            to_text(&render_not_found()),
            "Property not found or error loading details.\nBack to Search </>"
        );
    }
}
