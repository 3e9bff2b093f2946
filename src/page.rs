//! In-memory rendered-document tree.
//!
//! Stands in for the host page: element nodes with identifiers,
//! classes, text and vertical geometry, plus the viewport state the
//! controller reads and the presentation state it mutates. An
//! embedding renderer can build one directly; the CLI builds a
//! simulated one from scanner output.

use crate::config::Config;
use crate::types::ScannedHeading;

/// Handle to a node within a `Page`. Valid only for the page that
/// created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    /// Distance from the document top, in pixels.
    top: u32,
    hidden: bool,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            top: 0,
            hidden: false,
            children: Vec::new(),
        }
    }
}

/// Element arena plus viewport state.
///
/// Scroll-into-view requests are counted so a host (or test) can
/// observe exactly how many were issued; fragment updates deliberately
/// do not touch the viewport — they are history updates only.
#[derive(Debug, Default)]
pub struct Page {
    nodes: Vec<Node>,
    scroll_y: u32,
    fragment: Option<String>,
    scroll_requests: u32,
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag));
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    /// Drop all children of a node. The nodes stay in the arena but
    /// are no longer reachable from the tree.
    pub fn clear_children(&mut self, node: NodeId) {
        self.nodes[node.0].children.clear();
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    #[must_use]
    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = text.to_string();
    }

    #[must_use]
    pub fn top(&self, node: NodeId) -> u32 {
        self.nodes[node.0].top
    }

    pub fn set_top(&mut self, node: NodeId, top: u32) {
        self.nodes[node.0].top = top;
    }

    #[must_use]
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].id.as_deref()
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.0].id = Some(id.to_string());
    }

    /// First node carrying the given identifier, in creation order.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(NodeId)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    pub fn hide(&mut self, node: NodeId) {
        self.nodes[node.0].hidden = true;
    }

    #[must_use]
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.nodes[node.0].hidden
    }

    // -----------------------------------------------------------------
    // Viewport
    // -----------------------------------------------------------------

    #[must_use]
    pub fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    /// Host-driven scroll (the user moving the viewport).
    pub fn scroll_to(&mut self, y: u32) {
        self.scroll_y = y;
    }

    /// Smooth-scroll a node into view. Counts as one scroll request.
    pub fn scroll_into_view(&mut self, node: NodeId) {
        self.scroll_y = self.nodes[node.0].top;
        self.scroll_requests += 1;
    }

    #[must_use]
    pub fn scroll_request_count(&self) -> u32 {
        self.scroll_requests
    }

    /// Update the location fragment. History update only — the
    /// viewport is not moved.
    pub fn set_fragment(&mut self, id: &str) {
        self.fragment = Some(id.to_string());
    }

    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

/// Mount points of a simulated article page.
#[derive(Debug, Clone, Copy)]
pub struct PageRefs {
    pub content: NodeId,
    pub list: NodeId,
    pub panel: NodeId,
}

/// Assemble the simulated page for a scanned article: a content
/// container holding one element per heading (top offset derived from
/// the source line), an empty navigation list, and the panel wrapping
/// it. Uses the configured element identifiers.
#[must_use]
pub fn from_headings(headings: &[ScannedHeading], cfg: &Config) -> (Page, PageRefs) {
    let mut page = Page::new();

    let content = page.create_element("main");
    page.set_id(content, &cfg.content_id);
    for h in headings {
        let node = page.create_element(h.level.tag());
        page.set_text(node, &h.text);
        page.set_top(node, h.line * cfg.line_height);
        if let Some(ref id) = h.id {
            page.set_id(node, id);
        }
        page.append_child(content, node);
    }

    let panel = page.create_element("aside");
    page.set_id(panel, &cfg.panel_id);
    let list = page.create_element("ul");
    page.set_id(list, &cfg.list_id);
    page.append_child(panel, list);

    (page, PageRefs { content, list, panel })
}
