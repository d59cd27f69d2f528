//! Backend-neutral view tree.
//!
//! Renderers in [`crate::display::render`] build a [`ViewNode`] tree from
//! plain data; [`crate::display::text`] and [`crate::display::html`] turn
//! the same tree into terminal text or an HTML fragment.

#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, String)>,
        children: Vec<ViewNode>,
    },
    Text(String),
}

impl ViewNode {
    pub fn el(tag: &'static str) -> Self {
        ViewNode::Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        ViewNode::Text(text.into())
    }

    /// Add an attribute. No effect on text nodes.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let ViewNode::Element { attrs, .. } = &mut self {
            attrs.push((name, value.into()));
        }
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Add a boolean attribute when `on` holds.
    pub fn flag(self, name: &'static str, on: bool) -> Self {
        if on { self.attr(name, name) } else { self }
    }

    pub fn child(mut self, node: ViewNode) -> Self {
        if let ViewNode::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = ViewNode>) -> Self {
        if let ViewNode::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    /// Shorthand for an element holding a single text node.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.child(ViewNode::text(text))
    }

    pub fn tag(&self) -> Option<&'static str> {
        match self {
            ViewNode::Element { tag, .. } => Some(tag),
            ViewNode::Text(_) => None,
        }
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        match self {
            ViewNode::Element { attrs, .. } => attrs
                .iter()
                .rev()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str()),
            ViewNode::Text(_) => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr_value("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn child_nodes(&self) -> &[ViewNode] {
        match self {
            ViewNode::Element { children, .. } => children,
            ViewNode::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ViewNode::Text(text) => out.push_str(text),
            ViewNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for the first element carrying `class`.
    pub fn find_class(&self, class: &str) -> Option<&ViewNode> {
        if self.has_class(class) {
            return Some(self);
        }
        self.child_nodes().iter().find_map(|c| c.find_class(class))
    }

    /// Every element carrying `class`, in document order.
    pub fn find_all_class<'a>(&'a self, class: &str) -> Vec<&'a ViewNode> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.has_class(class) {
                found.push(node);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ViewNode)) {
        visit(self);
        for child in self.child_nodes() {
            child.walk(visit);
        }
    }
}
