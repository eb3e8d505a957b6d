//! Arena-backed stand-in for the host's rendered-output tree.
//!
//! Post-processors receive a subtree of already-rendered output and
//! mutate it in place. Real hosts hand over a live DOM; this module
//! models just enough of one (elements with attributes, text nodes,
//! parent links, child order) to express those mutations and test them
//! headlessly.
//!
//! Nodes live in an arena owned by [`Dom`] and are addressed by
//! [`NodeId`]. Detached nodes stay in the arena but are unreachable
//! from the root; the arena is dropped as a whole with the tree.

/// Handle to a node inside a [`Dom`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum Payload {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    payload: Payload,
}

/// A mutable tree of elements and text nodes.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Dom {
    /// Create a tree whose root is an element with the given tag.
    #[must_use]
    pub fn new(root_tag: &str) -> Self {
        let root_data = NodeData {
            parent: None,
            children: Vec::new(),
            payload: Payload::Element {
                tag: root_tag.to_string(),
                attrs: Vec::new(),
            },
        };
        Self {
            nodes: vec![root_data],
            root: NodeId(0),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Payload::Element {
            tag: tag.to_string(),
            attrs: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Payload::Text(text.to_string()))
    }

    fn push(&mut self, payload: Payload) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: None,
            children: Vec::new(),
            payload,
        });
        id
    }

    /// Append `child` as the last child of `parent`, detaching it from
    /// any previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Remove `node` from its parent's child list. No-op for detached nodes.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    /// Replace `node` with a sequence of nodes, preserving its position
    /// among its siblings. The replaced node ends up detached.
    pub fn replace_with(&mut self, node: NodeId, replacements: Vec<NodeId>) {
        let Some(parent) = self.nodes[node.0].parent else {
            return;
        };
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == node)
            .unwrap_or(self.nodes[parent.0].children.len());

        self.detach(node);
        for (offset, replacement) in replacements.into_iter().enumerate() {
            self.detach(replacement);
            self.nodes[replacement.0].parent = Some(parent);
            self.nodes[parent.0]
                .children
                .insert(position + offset, replacement);
        }
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Element tag, or `None` for text nodes.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].payload {
            Payload::Element { tag, .. } => Some(tag),
            Payload::Text(_) => None,
        }
    }

    /// Text content, or `None` for elements.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].payload {
            Payload::Text(text) => Some(text),
            Payload::Element { .. } => None,
        }
    }

    #[must_use]
    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].payload, Payload::Text(_))
    }

    #[must_use]
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].payload {
            Payload::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            Payload::Text(_) => None,
        }
    }

    /// Set an attribute on an element. No-op for text nodes.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Payload::Element { attrs, .. } = &mut self.nodes[node.0].payload {
            if let Some(entry) = attrs.iter_mut().find(|(n, _)| n == name) {
                entry.1 = value.to_string();
            } else {
                attrs.push((name.to_string(), value.to_string()));
            }
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Payload::Element { attrs, .. } = &mut self.nodes[node.0].payload {
            attrs.retain(|(n, _)| n != name);
        }
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    /// Add a class to an element's class list. Idempotent.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let updated = match self.attr(node, "class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr(node, "class", &updated);
    }

    /// Remove a class from an element's class list. Idempotent.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        let Some(existing) = self.attr(node, "class") else {
            return;
        };
        let updated: Vec<&str> = existing
            .split_whitespace()
            .filter(|c| *c != class)
            .collect();
        let joined = updated.join(" ");
        self.set_attr(node, "class", &joined);
    }

    /// All nodes of the subtree rooted at `start`, preorder, `start`
    /// included.
    #[must_use]
    pub fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            out.push(node);
            for &child in self.nodes[node.0].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Collect the text nodes of the subtree rooted at `root`, in
    /// document order, descending into an element only when `accept`
    /// approves the whole subtree. Text nodes themselves are always
    /// collected once reached.
    #[must_use]
    pub fn collect_text_nodes<F>(&self, root: NodeId, accept: F) -> Vec<NodeId>
    where
        F: Fn(&Dom, NodeId) -> bool,
    {
        let mut out = Vec::new();
        self.collect_text_inner(root, &accept, &mut out);
        out
    }

    fn collect_text_inner<F>(&self, node: NodeId, accept: &F, out: &mut Vec<NodeId>)
    where
        F: Fn(&Dom, NodeId) -> bool,
    {
        for &child in &self.nodes[node.0].children {
            if self.is_text(child) {
                out.push(child);
            } else if accept(self, child) {
                self.collect_text_inner(child, accept, out);
            }
        }
    }

    /// Concatenated text content of a subtree, document order.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for id in self.descendants(node) {
            if let Some(text) = self.text(id) {
                out.push_str(text);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> (Dom, NodeId, NodeId) {
        // <div><p>hello <b>world</b></p></div>
        let mut dom = Dom::new("div");
        let p = dom.create_element("p");
        let hello = dom.create_text("hello ");
        let b = dom.create_element("b");
        let world = dom.create_text("world");
        dom.append_child(dom.root(), p);
        dom.append_child(p, hello);
        dom.append_child(p, b);
        dom.append_child(b, world);
        (dom, p, b)
    }

    #[test]
    fn tree_structure_and_text_content() {
        let (dom, p, b) = sample();
        assert_eq!(dom.tag(p), Some("p"));
        assert_eq!(dom.parent(b), Some(p));
        assert_eq!(dom.text_content(dom.root()), "hello world");
    }

    #[test]
    fn replace_with_preserves_position() {
        let (mut dom, p, _) = sample();
        let first = dom.children(p)[0];
        let a = dom.create_text("good");
        let b = dom.create_text("bye ");
        dom.replace_with(first, vec![a, b]);

        assert_eq!(dom.text_content(p), "goodbye world");
        assert_eq!(dom.parent(first), None);
    }

    #[test]
    fn class_list_operations() {
        let mut dom = Dom::new("div");
        let span = dom.create_element("span");
        dom.add_class(span, "pill");
        dom.add_class(span, "pill");
        dom.add_class(span, "active");
        assert_eq!(dom.attr(span, "class"), Some("pill active"));

        dom.remove_class(span, "pill");
        assert!(!dom.has_class(span, "pill"));
        assert!(dom.has_class(span, "active"));
    }

    #[test]
    fn collect_text_nodes_respects_predicate() {
        // <div>top <ul><li>nested</li></ul> tail</div>
        let mut dom = Dom::new("div");
        let top = dom.create_text("top ");
        let ul = dom.create_element("ul");
        let li = dom.create_element("li");
        let nested = dom.create_text("nested");
        let tail = dom.create_text(" tail");
        dom.append_child(dom.root(), top);
        dom.append_child(dom.root(), ul);
        dom.append_child(ul, li);
        dom.append_child(li, nested);
        dom.append_child(dom.root(), tail);

        let all = dom.collect_text_nodes(dom.root(), |_, _| true);
        assert_eq!(all, vec![top, nested, tail]);

        let shallow = dom.collect_text_nodes(dom.root(), |dom, n| dom.tag(n) != Some("ul"));
        assert_eq!(shallow, vec![top, tail]);
    }

    #[test]
    fn descendants_preorder() {
        let (dom, p, b) = sample();
        let order = dom.descendants(dom.root());
        assert_eq!(order[0], dom.root());
        assert_eq!(order[1], p);
        assert!(order.contains(&b));
        assert_eq!(order.len(), 5);
    }
}
