//! Heading selector grammar.
//!
//! Supports the subset of CSS selectors that heading queries need:
//!
//! - selector lists separated by `,`
//! - descendant combinators (whitespace)
//! - compound selectors made of an optional tag name or `*`, followed by any
//!   number of `#id` and `.class` parts
//!
//! Tag names match ASCII case-insensitively; ids and classes match exactly.

use super::DocumentAdapter;
use crate::error::TocError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<ComplexSelector>,
}

/// A chain of compounds joined by descendant combinators.
/// The last compound is the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    compounds: Vec<Compound>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    /// `None` matches any element.
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
}

fn compound_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\*|[A-Za-z][A-Za-z0-9-]*)?((?:[#.][A-Za-z0-9_-]+)*)$").unwrap()
    })
}

fn part_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([#.])([A-Za-z0-9_-]+)").unwrap())
}

impl Selector {
    /// Parse a selector list such as `"h1, h2, article h3.title"`.
    ///
    /// # Errors
    ///
    /// Returns [`TocError::Selector`] for empty selectors, empty list entries,
    /// and syntax outside the supported grammar (attribute selectors,
    /// pseudo-classes, child/sibling combinators).
    pub fn parse(source: &str) -> Result<Self, TocError> {
        let invalid = |reason: &str| TocError::Selector {
            selector: source.to_string(),
            reason: reason.to_string(),
        };

        if source.trim().is_empty() {
            return Err(invalid("selector is empty"));
        }

        let mut alternatives = Vec::new();
        for entry in source.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                return Err(invalid("empty entry in selector list"));
            }

            let compounds = entry
                .split_whitespace()
                .map(|token| parse_compound(token).ok_or_else(|| invalid(&unsupported(token))))
                .collect::<Result<Vec<_>, _>>()?;

            alternatives.push(ComplexSelector { compounds });
        }

        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// The selector text as it was written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `node` matches any selector in the list.
    pub fn matches<D: DocumentAdapter>(&self, doc: &D, node: D::Node) -> bool {
        self.alternatives
            .iter()
            .any(|complex| complex.matches(doc, node))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn unsupported(token: &str) -> String {
    format!("unsupported selector syntax `{}`", token)
}

fn parse_compound(token: &str) -> Option<Compound> {
    let caps = compound_pattern().captures(token)?;

    let tag = caps
        .get(1)
        .map(|m| m.as_str())
        .filter(|tag| *tag != "*")
        .map(|tag| tag.to_ascii_lowercase());

    let mut compound = Compound {
        tag,
        ..Compound::default()
    };

    let parts = caps.get(2).map_or("", |m| m.as_str());
    for part in part_pattern().captures_iter(parts) {
        let name = part[2].to_string();
        match &part[1] {
            "#" => compound.ids.push(name),
            _ => compound.classes.push(name),
        }
    }

    Some(compound)
}

impl ComplexSelector {
    fn matches<D: DocumentAdapter>(&self, doc: &D, node: D::Node) -> bool {
        let Some((subject, ancestors)) = self.compounds.split_last() else {
            return false;
        };

        if !subject.matches(doc, node) {
            return false;
        }

        // Descendant-only chains can be matched greedily from the nearest
        // ancestor outwards.
        let mut current = doc.parent(node);
        for compound in ancestors.iter().rev() {
            loop {
                match current {
                    Some(candidate) => {
                        current = doc.parent(candidate);
                        if compound.matches(doc, candidate) {
                            break;
                        }
                    }
                    None => return false,
                }
            }
        }

        true
    }
}

impl Compound {
    fn matches<D: DocumentAdapter>(&self, doc: &D, node: D::Node) -> bool {
        let Some(tag) = doc.tag_name(node) else {
            return false;
        };

        if let Some(expected) = &self.tag {
            if !tag.eq_ignore_ascii_case(expected) {
                return false;
            }
        }

        if !self.ids.is_empty() {
            let id = doc.attribute(node, "id").unwrap_or_default();
            if self.ids.iter().any(|expected| expected != id) {
                return false;
            }
        }

        if !self.classes.is_empty() {
            let class_attr = doc.attribute(node, "class").unwrap_or_default();
            if !self
                .classes
                .iter()
                .all(|expected| class_attr.split_whitespace().any(|class| class == expected))
            {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn select(html: &str, selector: &str) -> Vec<String> {
        let doc = parse_html(html);
        let selector = Selector::parse(selector).unwrap();
        doc.query_selector_all(doc.document(), &selector)
            .into_iter()
            .map(|node| doc.text_content(node))
            .collect()
    }

    #[test]
    fn test_parse_default_heading_list() {
        let selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
        assert_eq!(selector.alternatives.len(), 6);
        assert_eq!(selector.alternatives[2].compounds[0].tag.as_deref(), Some("h3"));
        assert_eq!(selector.as_str(), "h1, h2, h3, h4, h5, h6");
    }

    #[test]
    fn test_parse_compound_parts() {
        let selector = Selector::parse("H2#intro.title.big").unwrap();
        let compound = &selector.alternatives[0].compounds[0];
        assert_eq!(compound.tag.as_deref(), Some("h2"));
        assert_eq!(compound.ids, vec!["intro".to_string()]);
        assert_eq!(compound.classes, vec!["title".to_string(), "big".to_string()]);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("h1,,h2").is_err());
        assert!(Selector::parse("h1 > h2").is_err());
        assert!(Selector::parse("a[href]").is_err());
        assert!(Selector::parse("h2:first-child").is_err());

        let err = Selector::parse("h1, ").unwrap_err();
        assert!(err.to_string().contains("h1, "));
    }

    #[test]
    fn test_matches_in_document_order() {
        let html = "<h2>B</h2><p>x</p><h1>A</h1><h3>C</h3>";
        assert_eq!(select(html, "h1, h2, h3"), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_matches_class_and_id() {
        let html = r#"<h2 class="keep me">One</h2><h2 class="skip">Two</h2><h2 id="x">Three</h2>"#;
        assert_eq!(select(html, "h2.keep"), vec!["One"]);
        assert_eq!(select(html, ".keep.me"), vec!["One"]);
        assert_eq!(select(html, "#x"), vec!["Three"]);
        assert!(select(html, ".keep.missing").is_empty());
    }

    #[test]
    fn test_matches_descendant_chain() {
        let html = r#"
            <article><section><h2>Inside</h2></section></article>
            <h2>Outside</h2>
            <div class="doc"><h3>Doc</h3></div>
        "#;
        assert_eq!(select(html, "article h2"), vec!["Inside"]);
        assert_eq!(select(html, "article section h2"), vec!["Inside"]);
        assert_eq!(select(html, "body .doc h3"), vec!["Doc"]);
        assert!(select(html, "section article h2").is_empty());
    }

    #[test]
    fn test_universal_selector() {
        let html = "<h1>A</h1>";
        let all = select(html, "body *");
        assert_eq!(all, vec!["A"]);
    }
}
