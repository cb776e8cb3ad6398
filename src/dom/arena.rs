//! In-memory document tree backed by an `indextree` arena.

use super::{DocumentAdapter, Selector};
use indexmap::IndexMap;
use indextree::{Arena, NodeEdge, NodeId};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text children are emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Payload of a document node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Doctype(String),
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Tag name plus attributes, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub tag: String,
    pub attrs: IndexMap<String, String>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: IndexMap::new(),
        }
    }
}

/// A mutable document tree.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Detached nodes
/// stay in the arena until they are explicitly removed.
#[derive(Debug, Clone)]
pub struct ArenaDocument {
    arena: Arena<NodeData>,
    root: NodeId,
}

impl Default for ArenaDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaDocument {
    /// Create an empty `html`/`head`/`body` document.
    pub fn new() -> Self {
        let mut doc = Self::empty();
        let html = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.append_child(doc.root, html);
        doc.append_child(html, head);
        doc.append_child(html, body);
        doc
    }

    /// A document node with no children at all.
    pub(crate) fn empty() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::Document);
        Self { arena, root }
    }

    pub(crate) fn create_node(&mut self, data: NodeData) -> NodeId {
        self.arena.new_node(data)
    }

    /// Borrow the payload of a node.
    pub fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.arena.get(node).map(|n| n.get())
    }

    /// The first `body` element in document order.
    pub fn body(&self) -> Option<NodeId> {
        self.find_element(|element| element.tag == "body")
    }

    /// The first element whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_element(|element| element.attrs.get("id").is_some_and(|value| value == id))
    }

    fn find_element(&self, predicate: impl Fn(&ElementData) -> bool) -> Option<NodeId> {
        self.root
            .descendants(&self.arena)
            .find(|node| match self.arena[*node].get() {
                NodeData::Element(element) => predicate(element),
                _ => false,
            })
    }

    fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.data(node)? {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.root.children(&self.arena) {
            self.write_node(&mut out, child);
        }
        out
    }

    /// Serialize a node including its own tag.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, node);
        out
    }

    /// Iterative walk over start/end edges.
    fn write_node(&self, out: &mut String, node: NodeId) {
        // children of a void element are not serialized
        let mut skip_until: Option<NodeId> = None;

        for edge in node.traverse(&self.arena) {
            match edge {
                NodeEdge::Start(id) => {
                    if skip_until.is_none() {
                        self.write_open(out, id, &mut skip_until);
                    }
                }
                NodeEdge::End(id) => {
                    if skip_until == Some(id) {
                        skip_until = None;
                    } else if skip_until.is_none() {
                        if let NodeData::Element(element) = self.arena[id].get() {
                            out.push_str("</");
                            out.push_str(&element.tag);
                            out.push('>');
                        }
                    }
                }
            }
        }
    }

    fn write_open(&self, out: &mut String, node: NodeId, skip_until: &mut Option<NodeId>) {
        match self.arena[node].get() {
            NodeData::Document => {}
            NodeData::Doctype(name) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(name);
                out.push('>');
            }
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::Text(text) => {
                let raw = self.arena[node]
                    .parent()
                    .and_then(|parent| self.element(parent))
                    .is_some_and(|parent| RAW_TEXT_ELEMENTS.contains(&parent.tag.as_str()));
                if raw {
                    out.push_str(text);
                } else {
                    out.push_str(&html_escape::encode_text(text));
                }
            }
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    *skip_until = Some(node);
                }
            }
        }
    }
}

impl DocumentAdapter for ArenaDocument {
    type Node = NodeId;

    fn document(&self) -> NodeId {
        self.root
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_node(NodeData::Element(ElementData::new(tag)))
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.create_node(NodeData::Text(text.to_string()))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        child.detach(&mut self.arena);
        parent.append(child, &mut self.arena);
    }

    fn insert_at_body_start(&mut self, node: NodeId) {
        let parent = self.body().unwrap_or(self.root);
        node.detach(&mut self.arena);
        parent.prepend(node, &mut self.arena);
    }

    fn remove_children(&mut self, node: NodeId) {
        let children: Vec<NodeId> = node.children(&self.arena).collect();
        for child in children {
            child.remove_subtree(&mut self.arena);
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(NodeData::Element(element)) = self.arena.get_mut(node).map(|n| n.get_mut()) {
            element
                .attrs
                .insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attrs.get(name).map(String::as_str)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|element| element.tag.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node)?.parent()
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        node.children(&self.arena).collect()
    }

    fn text_content(&self, node: NodeId) -> String {
        node.descendants(&self.arena)
            .filter_map(|descendant| match self.arena[descendant].get() {
                NodeData::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn is_connected(&self, node: NodeId) -> bool {
        match self.arena.get(node) {
            Some(n) if !n.is_removed() => node.ancestors(&self.arena).any(|a| a == self.root),
            _ => false,
        }
    }

    fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        scope
            .descendants(&self.arena)
            .skip(1)
            .filter(|node| selector.matches(self, *node))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_body() {
        let doc = ArenaDocument::new();
        assert!(doc.body().is_some());
        assert_eq!(doc.to_html(), "<html><head></head><body></body></html>");
    }

    #[test]
    fn test_detached_element_is_not_connected() {
        let mut doc = ArenaDocument::new();
        let div = doc.create_element("div");
        assert!(!doc.is_connected(div));

        doc.insert_at_body_start(div);
        assert!(doc.is_connected(div));
        assert_eq!(doc.parent(div), doc.body());
    }

    #[test]
    fn test_insert_at_body_start_goes_first() {
        let mut doc = ArenaDocument::new();
        let body = doc.body().unwrap();
        let p = doc.create_element("p");
        doc.append_child(body, p);

        let nav = doc.create_element("nav");
        doc.insert_at_body_start(nav);

        assert_eq!(doc.children(body), vec![nav, p]);
    }

    #[test]
    fn test_insert_without_body_uses_document() {
        let mut doc = ArenaDocument::empty();
        let div = doc.create_element("div");
        doc.insert_at_body_start(div);
        assert_eq!(doc.parent(div), Some(doc.document()));
    }

    #[test]
    fn test_remove_children_disconnects_subtree() {
        let mut doc = ArenaDocument::new();
        let body = doc.body().unwrap();
        let ul = doc.create_element("ul");
        let li = doc.create_element("li");
        doc.append_child(body, ul);
        doc.append_child(ul, li);
        assert!(doc.is_connected(li));

        doc.remove_children(body);
        assert!(doc.children(body).is_empty());
        assert!(!doc.is_connected(li));
    }

    #[test]
    fn test_attributes_and_text() {
        let mut doc = ArenaDocument::new();
        let li = doc.create_element("LI");
        doc.set_attribute(li, "class", "toc-li");
        doc.set_text_content(li, "Fish & <Chips>");

        assert_eq!(doc.tag_name(li), Some("li"));
        assert_eq!(doc.attribute(li, "class"), Some("toc-li"));
        assert_eq!(doc.text_content(li), "Fish & <Chips>");
        assert_eq!(
            doc.outer_html(li),
            r#"<li class="toc-li">Fish &amp; &lt;Chips&gt;</li>"#
        );
    }

    #[test]
    fn test_last_element_child_skips_text() {
        let mut doc = ArenaDocument::new();
        let ul = doc.create_element("ul");
        let li = doc.create_element("li");
        let text = doc.create_text("trailing");
        doc.append_child(ul, li);
        doc.append_child(ul, text);

        assert_eq!(doc.last_element_child(ul), Some(li));
    }

    #[test]
    fn test_element_by_id() {
        let mut doc = ArenaDocument::new();
        let body = doc.body().unwrap();
        let div = doc.create_element("div");
        doc.set_attribute(div, "id", "sidebar");
        doc.append_child(body, div);

        assert_eq!(doc.element_by_id("sidebar"), Some(div));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn test_void_elements_not_closed() {
        let mut doc = ArenaDocument::new();
        let img = doc.create_element("img");
        doc.set_attribute(img, "alt", "a \"quoted\" alt");
        assert_eq!(doc.outer_html(img), r#"<img alt="a &quot;quoted&quot; alt">"#);
    }

    #[test]
    fn test_void_element_children_are_dropped() {
        let mut doc = ArenaDocument::new();
        let br = doc.create_element("br");
        let text = doc.create_text("ignored");
        doc.append_child(br, text);
        assert_eq!(doc.outer_html(br), "<br>");
    }

    #[test]
    fn test_deeply_nested_document_serializes() {
        let depth = 10_000;
        let mut doc = ArenaDocument::new();
        let mut parent = doc.body().unwrap();
        for _ in 0..depth {
            let div = doc.create_element("div");
            doc.append_child(parent, div);
            parent = div;
        }
        doc.set_text_content(parent, "leaf");

        let html = doc.to_html();
        assert_eq!(html.matches("<div>").count(), depth);
        assert_eq!(html.matches("</div>").count(), depth);
        assert!(html.contains("<div>leaf</div>"));
        assert!(html.ends_with("</body></html>"));
    }
}
