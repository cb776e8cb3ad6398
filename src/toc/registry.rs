//! Lookup-or-create registry for table-of-contents builders.

use super::{DEFAULT_PREFIX, TocBuilder, TocOptions};
use crate::dom::{DocumentAdapter, Selector};
use crate::error::TocError;
use indexmap::IndexMap;
use log::warn;
use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// Placeholder for any unset part of a configuration key.
const UNSET: &str = "default";

/// Builder handle shared between the registry and its callers.
pub type SharedBuilder<N> = Rc<RefCell<TocBuilder<N>>>;

/// Identifies one builder configuration: heading selector, container id,
/// prefix and root id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigKey(String);

impl ConfigKey {
    pub fn new<D: DocumentAdapter>(doc: &D, options: &TocOptions<D::Node>) -> Self {
        let id_of = |node: Option<D::Node>| {
            node.and_then(|n| doc.attribute(n, "id"))
                .filter(|id| !id.is_empty())
                .unwrap_or(UNSET)
                .to_string()
        };

        let prefix = options
            .prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(UNSET);

        Self(format!(
            "{}-{}-{}-{}",
            options.headings,
            id_of(options.container),
            prefix,
            id_of(options.root)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-owned set of builders, one per distinct configuration.
#[derive(Debug)]
pub struct TocRegistry<N> {
    builders: IndexMap<ConfigKey, SharedBuilder<N>>,
}

impl<N> Default for TocRegistry<N> {
    fn default() -> Self {
        Self {
            builders: IndexMap::new(),
        }
    }
}

impl<N: Copy + Eq + Hash + fmt::Debug> TocRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the builder registered for `options`, creating it if needed.
    ///
    /// A repeated configuration logs a warning and returns the existing
    /// builder untouched; no container is created in that case.
    ///
    /// # Errors
    ///
    /// Returns [`TocError::Selector`] if the heading selector cannot be
    /// parsed. Nothing is registered then.
    pub fn get_or_create<D>(
        &mut self,
        doc: &mut D,
        options: TocOptions<N>,
    ) -> Result<SharedBuilder<N>, TocError>
    where
        D: DocumentAdapter<Node = N>,
    {
        let key = ConfigKey::new(&*doc, &options);

        if let Some(existing) = self.builders.get(&key) {
            warn!("Table Of Content instance already exists with the same identifiers! ({key})");
            return Ok(Rc::clone(existing));
        }

        let selector = Selector::parse(&options.headings)?;

        let container = options
            .container
            .unwrap_or_else(|| doc.create_element("div"));

        let prefix = options
            .prefix
            .filter(|prefix| !prefix.is_empty())
            .or_else(|| {
                doc.attribute(container, "id")
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        let builder = Rc::new(RefCell::new(TocBuilder::new(
            selector,
            container,
            prefix,
            options.root,
        )));
        self.builders.insert(key, Rc::clone(&builder));

        Ok(builder)
    }

    pub fn get(&self, key: &ConfigKey) -> Option<SharedBuilder<N>> {
        self.builders.get(key).cloned()
    }

    /// Registered configuration keys, in creation order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.builders.keys()
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}
