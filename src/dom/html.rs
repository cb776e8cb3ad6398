//! Loading HTML source into an [`ArenaDocument`].
//!
//! Parsing is delegated to html5ever, which applies browser error recovery
//! and always produces `html`, `head` and `body` elements.

use super::arena::{ArenaDocument, ElementData, NodeData};
use super::DocumentAdapter;
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use indextree::NodeId;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Parse an HTML document.
///
/// Malformed markup is recovered the way browsers do; this never fails.
pub fn parse_html(html: &str) -> ArenaDocument {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    let mut doc = ArenaDocument::empty();
    let root = doc.document();

    let mut stack: Vec<(Handle, NodeId)> = dom
        .document
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (child.clone(), root))
        .collect();

    while let Some((handle, parent)) = stack.pop() {
        let Some(data) = convert(&handle) else {
            continue;
        };

        let node = doc.create_node(data);
        doc.append_child(parent, node);

        for child in handle.children.borrow().iter().rev() {
            stack.push((child.clone(), node));
        }
    }

    doc
}

fn convert(handle: &Handle) -> Option<NodeData> {
    match &handle.data {
        RcNodeData::Doctype { name, .. } => Some(NodeData::Doctype(name.to_string())),
        RcNodeData::Text { contents } => Some(NodeData::Text(contents.borrow().to_string())),
        RcNodeData::Comment { contents } => Some(NodeData::Comment(contents.to_string())),
        RcNodeData::Element { name, attrs, .. } => {
            let mut element = ElementData::new(&name.local);
            for attr in attrs.borrow().iter() {
                element
                    .attrs
                    .insert(attr.name.local.to_string(), attr.value.to_string());
            }
            Some(NodeData::Element(element))
        }
        RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => None,
    }
}
