//! # htmltoc
//!
//! Generate a table of contents from the headings of an HTML document.
//!
//! Headings matching a selector are rendered as nested `ul`/`li` lists inside
//! a container element, one list per heading level. The container is placed
//! at the start of the body when it is not already part of the document.
//!
//! ## Example
//!
//! ```rust
//! use htmltoc::{TocOptions, TocRegistry, parse_html};
//!
//! let mut doc = parse_html(r#"
//! <h1>Introduction</h1>
//! <h2>Background</h2>
//! <h2>Methodology</h2>
//! "#);
//!
//! let mut registry = TocRegistry::new();
//! let toc = registry.get_or_create(&mut doc, TocOptions::default().with_prefix("nav"))?;
//! toc.borrow_mut().generate(&mut doc);
//!
//! println!("{}", toc.borrow().describe_selectors());
//! println!("{}", doc.to_html());
//! # Ok::<(), htmltoc::TocError>(())
//! ```

/// Configuration module for persisted defaults.
pub mod config;

/// Document access: the adapter trait, the in-memory tree and HTML loading.
pub mod dom;

pub mod error;

/// Input handling module for stdin and file sources.
pub mod input;

/// Table-of-contents builder, registry and outline read-back.
pub mod toc;

pub use config::Config;
pub use dom::{ArenaDocument, DocumentAdapter, Selector, parse_html};
pub use error::TocError;
pub use toc::{
    Heading, OutlineEntry, TocBuilder, TocOptions, TocRegistry, TocSelectors, read_outline,
};
