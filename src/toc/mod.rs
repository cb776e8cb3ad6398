//! Table-of-contents generation.
//!
//! A [`TocBuilder`] scans a document for heading elements and renders them as
//! nested `ul`/`li` lists inside a container element. Builders are obtained
//! through a [`TocRegistry`], which hands back the existing builder when the
//! same configuration is requested twice.
//!
//! ```
//! use htmltoc::{TocOptions, TocRegistry, parse_html};
//!
//! let mut doc = parse_html("<h1>Intro</h1><h2>Setup</h2><h2>Usage</h2>");
//! let mut registry = TocRegistry::new();
//!
//! let toc = registry.get_or_create(&mut doc, TocOptions::default()).unwrap();
//! toc.borrow_mut().generate(&mut doc);
//!
//! assert!(doc.to_html().contains(r#"<div id="toc"><ul class="toc-ul">"#));
//! ```

pub mod outline;
mod registry;

pub use outline::{OutlineEntry, read_outline};
pub use registry::{ConfigKey, SharedBuilder, TocRegistry};

use crate::dom::{DocumentAdapter, Selector};
use log::debug;
use serde::Serialize;
use std::fmt;

/// Selector used when no heading selector is given.
pub const DEFAULT_HEADINGS: &str = "h1, h2, h3, h4, h5, h6";

/// Prefix used when neither a prefix nor a container id is available.
pub const DEFAULT_PREFIX: &str = "toc";

/// Options for creating a [`TocBuilder`].
///
/// Every field is optional except the heading selector, which defaults to
/// all heading levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocOptions<N> {
    /// Selector used to collect headings.
    pub headings: String,
    /// Element that receives the generated lists. A detached `div` is
    /// created when absent.
    pub container: Option<N>,
    /// Prefix for the container id and the generated class names.
    pub prefix: Option<String>,
    /// Element to search for headings. The whole document when absent.
    pub root: Option<N>,
}

impl<N> Default for TocOptions<N> {
    fn default() -> Self {
        Self {
            headings: DEFAULT_HEADINGS.to_string(),
            container: None,
            prefix: None,
            root: None,
        }
    }
}

impl<N> TocOptions<N> {
    pub fn with_headings(mut self, headings: impl Into<String>) -> Self {
        self.headings = headings.into();
        self
    }

    pub fn with_container(mut self, container: N) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_root(mut self, root: N) -> Self {
        self.root = Some(root);
        self
    }
}

/// A heading captured during [`TocBuilder::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading<N> {
    #[serde(skip)]
    pub node: N,
    /// Heading level (1-6)
    pub level: u8,
    /// Text content of the heading element
    pub text: String,
}

/// Parse the heading level out of a tag name (`h1` through `h6`).
///
/// # Examples
///
/// ```
/// # use htmltoc::toc::heading_level;
/// assert_eq!(heading_level("h2"), Some(2));
/// assert_eq!(heading_level("H6"), Some(6));
/// assert_eq!(heading_level("h7"), None);
/// assert_eq!(heading_level("header"), None);
/// ```
pub fn heading_level(tag: &str) -> Option<u8> {
    let mut chars = tag.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('h' | 'H'), Some(digit @ '1'..='6'), None) => digit.to_digit(10).map(|d| d as u8),
        _ => None,
    }
}

/// The CSS selectors that address a generated table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocSelectors {
    pub container: String,
    pub list: String,
    pub item: String,
}

impl TocSelectors {
    fn for_prefix(prefix: &str) -> Self {
        Self {
            container: format!("#{prefix}"),
            list: format!(".{prefix}-ul"),
            item: format!(".{prefix}-li"),
        }
    }
}

impl fmt::Display for TocSelectors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .container
            .len()
            .max(self.list.len())
            .max(self.item.len());
        writeln!(f, "{:<width$} - Table of Contents Container", self.container)?;
        writeln!(f, "{:<width$} - Table of Contents Unordered List", self.list)?;
        write!(f, "{:<width$} - Table of Contents List Item", self.item)
    }
}

/// Renders the headings of a document into a container element.
///
/// Created through [`TocRegistry::get_or_create`].
#[derive(Debug)]
pub struct TocBuilder<N> {
    selector: Selector,
    container: N,
    prefix: String,
    root: Option<N>,
    headings: Vec<Heading<N>>,
}

/// The list currently receiving items, its level, and the lists above it.
struct Cursor<N> {
    list: N,
    level: u8,
    ancestors: Vec<N>,
}

impl<N: Copy> Cursor<N> {
    fn descend(&mut self, list: N) {
        self.ancestors.push(self.list);
        self.list = list;
        self.level += 1;
    }

    fn ascend(&mut self) {
        if let Some(parent) = self.ancestors.pop() {
            self.list = parent;
        }
        self.level -= 1;
    }
}

impl<N: Copy + Eq + std::hash::Hash + fmt::Debug> TocBuilder<N> {
    pub(crate) fn new(selector: Selector, container: N, prefix: String, root: Option<N>) -> Self {
        Self {
            selector,
            container,
            prefix,
            root,
            headings: Vec::new(),
        }
    }

    /// Prefix used for the container id and generated class names.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn container(&self) -> N {
        self.container
    }

    pub fn root(&self) -> Option<N> {
        self.root
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Headings captured by the last [`generate`](Self::generate) call.
    pub fn headings(&self) -> &[Heading<N>] {
        &self.headings
    }

    /// Selectors an embedding page can use to style or query the output.
    pub fn describe_selectors(&self) -> TocSelectors {
        TocSelectors::for_prefix(&self.prefix)
    }

    /// Rebuild the table of contents from the current document.
    ///
    /// Attaches the container to the start of the body if it is detached,
    /// clears it, collects the headings again, and renders them as nested
    /// lists. Each level jump opens or closes one list per level.
    pub fn generate<D>(&mut self, doc: &mut D)
    where
        D: DocumentAdapter<Node = N>,
    {
        if !doc.is_connected(self.container) {
            doc.insert_at_body_start(self.container);
            doc.set_attribute(self.container, "id", &self.prefix);
            debug!("attached toc container #{}", self.prefix);
        }

        doc.remove_children(self.container);
        self.headings = self.collect_headings(doc);
        debug!(
            "collected {} headings for #{}",
            self.headings.len(),
            self.prefix
        );

        let min_level = self.highest_level();
        if min_level == 0 {
            return;
        }

        let top = self.create_list(doc);
        doc.append_child(self.container, top);

        let mut cursor = Cursor {
            list: top,
            level: min_level,
            ancestors: Vec::new(),
        };

        for heading in &self.headings {
            while heading.level > cursor.level {
                let parent = doc.last_element_child(cursor.list).unwrap_or(cursor.list);
                let nested = self.create_list(doc);
                doc.append_child(parent, nested);
                cursor.descend(nested);
            }

            while heading.level < cursor.level {
                cursor.ascend();
            }

            let item = self.create_item(doc, &heading.text);
            doc.append_child(cursor.list, item);
        }
    }

    fn collect_headings<D>(&self, doc: &D) -> Vec<Heading<N>>
    where
        D: DocumentAdapter<Node = N>,
    {
        let scope = self.root.unwrap_or_else(|| doc.document());

        doc.query_selector_all(scope, &self.selector)
            .into_iter()
            .filter_map(|node| {
                let tag = doc.tag_name(node)?;
                match heading_level(tag) {
                    Some(level) => Some(Heading {
                        node,
                        level,
                        text: doc.text_content(node),
                    }),
                    None => {
                        debug!("skipping <{}> matched by `{}`", tag, self.selector);
                        None
                    }
                }
            })
            .collect()
    }

    /// Smallest level in the snapshot, or 0 when there are no headings.
    fn highest_level(&self) -> u8 {
        self.headings
            .iter()
            .map(|heading| heading.level)
            .min()
            .unwrap_or(0)
    }

    fn create_list<D>(&self, doc: &mut D) -> N
    where
        D: DocumentAdapter<Node = N>,
    {
        let ul = doc.create_element("ul");
        doc.set_attribute(ul, "class", &format!("{}-ul", self.prefix));
        ul
    }

    fn create_item<D>(&self, doc: &mut D, text: &str) -> N
    where
        D: DocumentAdapter<Node = N>,
    {
        let li = doc.create_element("li");
        doc.set_attribute(li, "class", &format!("{}-li", self.prefix));
        doc.set_text_content(li, text);
        li
    }
}
