//! Owned document model.
//!
//! The runtime does not parse HTML and does not compute layout. A [`Document`]
//! is a flat arena of [`Element`] nodes addressed by copyable [`NodeId`]s,
//! with parent/child links for tree traversal. Geometry (`offset_top`,
//! `height`) is an *input*: whoever builds the document decides where each
//! element sits, and the components read those numbers the way browser code
//! reads `getBoundingClientRect()`.
//!
//! ## Selectors
//!
//! Components locate their targets with a deliberately tiny selector subset —
//! `#id`, `.class`, or a bare tag name — because that is all the original
//! page ever uses. Every lookup returns an `Option`; a missing element is a
//! silent no-op for every component, never an error.
//!
//! ## Inline style
//!
//! Only the style properties the components actually write are modeled:
//! opacity, a vertical translation, the transition shorthand, and a per-node
//! transition delay. Unset properties mean "whatever the stylesheet says",
//! which is how the real page behaves before any script touches a node.

use serde::Serialize;
use std::collections::BTreeMap;

/// Handle to an element inside a [`Document`]. Cheap to copy, stable for the
/// lifetime of the document (nodes are never removed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(usize);

/// Inline style state written by the interactivity components.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    /// 0.0–1.0; `None` means the stylesheet value applies.
    pub opacity: Option<f32>,
    /// Vertical translation in px (`transform: translateY(..)`).
    pub translate_y: Option<f32>,
    /// Transition shorthand, e.g. `"opacity 0.6s ease, transform 0.6s ease"`.
    pub transition: Option<String>,
    /// Per-node transition delay, e.g. `"0.2s"`.
    pub transition_delay: Option<String>,
}

/// A single document node.
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    /// Text content (labels, typed hero text).
    pub text: String,
    /// Distance from the document top in px. Layout input, never recomputed.
    pub offset_top: f32,
    /// Border-box height in px. Layout input, never recomputed.
    pub height: f32,
    pub style: Style,
    #[serde(skip)]
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            offset_top: 0.0,
            height: 0.0,
            style: Style::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Set `offset_top` and `height` in one go.
    pub fn with_box(mut self, offset_top: f32, height: f32) -> Self {
        self.offset_top = offset_top;
        self.height = height;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.remove(name);
    }
}

/// The element arena. The root is a `body` element created by [`Document::new`].
#[derive(Debug, Serialize)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let body = Element::new("body");
        Document {
            nodes: vec![body],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        element.parent = Some(parent);
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// First element with the given `id` attribute, in document order.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(NodeId)
    }

    /// First match for a `#id`, `.class`, or tag selector, in document order.
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        self.iter_matching(selector).next()
    }

    /// All matches for a `#id`, `.class`, or tag selector, in document order.
    pub fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.iter_matching(selector).collect()
    }

    /// All matches for any of the given selectors, deduplicated, in document
    /// order (mirrors `querySelectorAll("a, b, c")`).
    pub fn query_any(&self, selectors: &[&str]) -> Vec<NodeId> {
        let mut out = Vec::new();
        for (idx, node) in self.nodes.iter().enumerate() {
            if selectors.iter().any(|s| Self::matches(node, s)) {
                out.push(NodeId(idx));
            }
        }
        out
    }

    /// Direct children of `parent` matching a selector, in order.
    pub fn children_matching(&self, parent: NodeId, selector: &str) -> Vec<NodeId> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .filter(|c| Self::matches(&self.nodes[c.0], selector))
            .collect()
    }

    fn iter_matching<'a>(&'a self, selector: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| Self::matches(node, selector))
            .map(|(idx, _)| NodeId(idx))
    }

    fn matches(node: &Element, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            node.id.as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            node.has_class(class)
        } else {
            node.tag == selector
        }
    }
}
