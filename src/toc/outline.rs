//! Reading a generated table of contents back into a tree.
//!
//! Walks the `ul`/`li` structure inside a container and returns it as
//! [`OutlineEntry`] values, which serialize to JSON and render as a
//! box-drawing tree.

use crate::dom::DocumentAdapter;
use serde::Serialize;

/// One entry of a generated table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// Item text, or `None` for a list opened for a skipped heading level.
    pub text: Option<String>,
    pub children: Vec<OutlineEntry>,
}

impl OutlineEntry {
    /// Render this entry and its children using box-drawing characters.
    pub fn render_box_tree(&self, prefix: &str, is_last: bool) -> String {
        let connector = if is_last { "└─ " } else { "├─ " };
        let label = self.text.as_deref().unwrap_or("…");

        let mut out = format!("{}{}{}\n", prefix, connector, label);

        let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
        for (i, child) in self.children.iter().enumerate() {
            out.push_str(&child.render_box_tree(&child_prefix, i == self.children.len() - 1));
        }

        out
    }
}

/// Collect the entries of every list directly inside `container`.
pub fn read_outline<D: DocumentAdapter>(doc: &D, container: D::Node) -> Vec<OutlineEntry> {
    doc.children(container)
        .into_iter()
        .filter(|child| doc.tag_name(*child) == Some("ul"))
        .flat_map(|list| read_list(doc, list))
        .collect()
}

fn read_list<D: DocumentAdapter>(doc: &D, list: D::Node) -> Vec<OutlineEntry> {
    doc.children(list)
        .into_iter()
        .filter_map(|child| match doc.tag_name(child)? {
            "li" => Some(read_item(doc, child)),
            "ul" => Some(OutlineEntry {
                text: None,
                children: read_list(doc, child),
            }),
            _ => None,
        })
        .collect()
}

fn read_item<D: DocumentAdapter>(doc: &D, item: D::Node) -> OutlineEntry {
    let mut text = String::new();
    let mut children = Vec::new();

    for child in doc.children(item) {
        match doc.tag_name(child) {
            None => text.push_str(&doc.text_content(child)),
            Some("ul") => children.extend(read_list(doc, child)),
            Some(_) => text.push_str(&doc.text_content(child)),
        }
    }

    OutlineEntry {
        text: Some(text),
        children,
    }
}
