//! HTML serialization of a view tree using maud.

use maud::{DOCTYPE, Markup, Render, html};

use crate::display::view::ViewNode;

const VOID_TAGS: [&str; 4] = ["img", "input", "br", "meta"];

impl Render for ViewNode {
    fn render_to(&self, buffer: &mut String) {
        match self {
            ViewNode::Text(text) => text.as_str().render_to(buffer),
            ViewNode::Element {
                tag,
                attrs,
                children,
            } => {
                buffer.push('<');
                buffer.push_str(tag);
                for (name, value) in attrs {
                    buffer.push(' ');
                    buffer.push_str(name);
                    buffer.push_str("=\"");
                    value.as_str().render_to(buffer);
                    buffer.push('"');
                }
                buffer.push('>');
                if VOID_TAGS.contains(tag) {
                    return;
                }
                for child in children {
                    child.render_to(buffer);
                }
                buffer.push_str("</");
                buffer.push_str(tag);
                buffer.push('>');
            }
        }
    }
}

/// Escaped HTML fragment.
pub fn to_html(node: &ViewNode) -> String {
    node.render().into_string()
}

/// Standalone page wrapping `body`.
pub fn page(title: &str, body: &ViewNode) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                (body)
            }
        }
    }
}
