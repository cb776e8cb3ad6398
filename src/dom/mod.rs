//! Document access for table-of-contents generation.
//!
//! The builder never touches a concrete tree directly. It goes through the
//! [`DocumentAdapter`] capability set (create, query, insert, set attribute),
//! which keeps the nesting algorithm independent of whatever hosts the
//! document.
//!
//! [`ArenaDocument`] is the in-memory implementation shipped with the crate,
//! and [`parse_html`] loads one from HTML source.

mod arena;
mod html;
pub mod selector;

pub use arena::{ArenaDocument, ElementData, NodeData};
pub use html::parse_html;
pub use indextree::NodeId;
pub use selector::Selector;

use std::fmt::Debug;
use std::hash::Hash;

/// The minimal set of document operations the builder relies on.
///
/// Node handles are cheap copyable identifiers; the adapter owns the nodes.
pub trait DocumentAdapter {
    /// Handle to a node of this document.
    type Node: Copy + Eq + Hash + Debug;

    /// The document node itself (the root of the tree).
    fn document(&self) -> Self::Node;

    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// Create a detached text node.
    fn create_text(&mut self, text: &str) -> Self::Node;

    /// Append `child` as the last child of `parent`, detaching it first.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Insert `node` as the first child of the body, or of the document when
    /// there is no body.
    fn insert_at_body_start(&mut self, node: Self::Node);

    /// Remove every child of `node` (and their subtrees).
    fn remove_children(&mut self, node: Self::Node);

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Lowercase tag name, or `None` for non-element nodes.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Concatenated text of every descendant text node.
    fn text_content(&self, node: Self::Node) -> String;

    /// Whether `node` is reachable from the document node.
    fn is_connected(&self, node: Self::Node) -> bool;

    /// All elements below `scope` (excluding `scope`) matching `selector`, in
    /// document order.
    fn query_selector_all(&self, scope: Self::Node, selector: &Selector) -> Vec<Self::Node>;

    /// Last child of `node` that is an element.
    fn last_element_child(&self, node: Self::Node) -> Option<Self::Node> {
        self.children(node)
            .into_iter()
            .rev()
            .find(|child| self.tag_name(*child).is_some())
    }

    /// Replace the children of `node` with a single text node.
    fn set_text_content(&mut self, node: Self::Node, text: &str) {
        self.remove_children(node);
        let text_node = self.create_text(text);
        self.append_child(node, text_node);
    }
}
