//! Headless element tree.
//!
//! Overlays and focus traps operate on a host document: they query elements
//! by selector, read and mutate attributes and classes, and move keyboard
//! focus. [`Dom`] is that contract made concrete as an arena so the widget
//! layer can be driven (and tested) without a browser or terminal attached.
//!
//! The tree is session-scoped and append-oriented: nodes are created with
//! [`Dom::append`] and removed with [`Dom::detach`], which models a host
//! templating engine replacing a subtree. Detached nodes keep their slot but
//! disappear from every query and traversal.

use std::collections::{BTreeMap, BTreeSet};

use crate::selector::Selector;

/// Copyable handle to a node in a [`Dom`] arena.
///
/// Handles are only meaningful for the `Dom` that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// A buildable element descriptor, consumed by [`Dom::append`].
///
/// # Example
///
/// ```rust,ignore
/// use scrim_core::dom::{Dom, Element};
///
/// let mut dom = Dom::new();
/// let button = dom.append(
///     dom.body(),
///     Element::new("button").id("OpenCart").attr("data-open-cart", ""),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
}

impl Element {
    /// Create an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: BTreeSet::new(),
            attrs: BTreeMap::new(),
        }
    }

    /// Set the element id (stored as the `id` attribute).
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Add a class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    /// Set an attribute. An empty value models a bare boolean attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    detached: bool,
}

/// An arena-backed element tree with a focus registry.
///
/// Every `Dom` owns an implicit `body` root ([`Dom::body`]); overlay body
/// classes land on it. At most one element is focused at any time; detaching
/// the focused element (or an ancestor of it) clears focus.
#[derive(Debug)]
pub struct Dom {
    nodes: Vec<Node>,
    active: Option<NodeId>,
}

impl Dom {
    /// Create an empty document containing only the `body` root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                tag: "body".to_string(),
                classes: BTreeSet::new(),
                attrs: BTreeMap::new(),
                parent: None,
                children: Vec::new(),
                detached: false,
            }],
            active: None,
        }
    }

    /// The `body` root node.
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: element.tag,
            classes: element.classes,
            attrs: element.attrs,
            parent: Some(parent),
            children: Vec::new(),
            detached: false,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Whether `node` is still part of the tree.
    pub fn is_attached(&self, node: NodeId) -> bool {
        !self.nodes[node.0].detached
    }

    /// Remove `node` and its entire subtree from the tree.
    ///
    /// If the focused element is inside the removed subtree, focus is
    /// cleared. The `body` root cannot be detached.
    pub fn detach(&mut self, node: NodeId) {
        if node == self.body() {
            return;
        }
        if let Some(parent) = self.nodes[node.0].parent {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
        self.detach_subtree(node);
    }

    /// Detach every child of `node`, leaving `node` itself in place.
    ///
    /// Models a host templating engine swapping out an element's light DOM.
    pub fn detach_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.detach_subtree(child);
        }
    }

    fn detach_subtree(&mut self, node: NodeId) {
        self.nodes[node.0].detached = true;
        if self.active == Some(node) {
            self.active = None;
        }
        let children = self.nodes[node.0].children.clone();
        for child in children {
            self.detach_subtree(child);
        }
    }

    /// The element's tag name.
    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    /// The element's `id` attribute, if set.
    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id")
    }

    /// First attached element with the given `id` attribute, document order.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query(&Selector::id(id)).into_iter().next()
    }

    /// Read an attribute value.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attrs.get(name).map(String::as_str)
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, node: NodeId, name: impl Into<String>, value: impl Into<String>) {
        self.nodes[node.0].attrs.insert(name.into(), value.into());
    }

    /// Remove an attribute. No-op if absent.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        self.nodes[node.0].attrs.remove(name);
    }

    /// Whether the element carries the given class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.contains(class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, node: NodeId, class: impl Into<String>) {
        self.nodes[node.0].classes.insert(class.into());
    }

    /// Remove a class. No-op if absent.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.remove(class);
    }

    /// The element's class set.
    pub fn classes(&self, node: NodeId) -> &BTreeSet<String> {
        &self.nodes[node.0].classes
    }

    /// The element's parent, if any.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// The element's attached children, in insertion order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// All attached descendants of `container` in document (preorder) order.
    ///
    /// The container itself is excluded, matching how a scoped query walks a
    /// subtree.
    pub fn descendants(&self, container: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(container, &mut out);
        out
    }

    fn collect_descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[node.0].children {
            if self.nodes[child.0].detached {
                continue;
            }
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// All attached elements matching `selector`, in document order.
    ///
    /// The `body` root participates, so a selector can match it.
    pub fn query(&self, selector: &Selector) -> Vec<NodeId> {
        let mut out = Vec::new();
        if selector.matches(self, self.body()) {
            out.push(self.body());
        }
        for node in self.descendants(self.body()) {
            if selector.matches(self, node) {
                out.push(node);
            }
        }
        out
    }

    /// Matching descendants of `container`, in document order.
    pub fn query_within(&self, container: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(container)
            .into_iter()
            .filter(|&n| selector.matches(self, n))
            .collect()
    }

    /// Move keyboard focus to `node`.
    ///
    /// Returns `false` (leaving focus unchanged) if the node is detached.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if self.nodes[node.0].detached {
            return false;
        }
        self.active = Some(node);
        true
    }

    /// Clear keyboard focus.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// The currently focused element, if any.
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
