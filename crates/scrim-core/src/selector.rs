//! Typed element selectors.
//!
//! Trigger and background lookup is configured with [`Selector`] values
//! rather than selector strings read out of the document at runtime, so a
//! malformed selector is rejected when the configuration is built instead of
//! producing an empty match set later. The supported forms cover everything
//! the overlay layer needs: tag, id, class, and attribute presence/equality.

use std::fmt;
use std::str::FromStr;

use crate::dom::{Dom, NodeId};

/// A simple element selector, matched against one node at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Matches elements by tag name (`button`).
    Tag(String),
    /// Matches the element with the given `id` attribute (`#CartDrawer`).
    Id(String),
    /// Matches elements carrying the class (`.drawer-background`).
    Class(String),
    /// Matches elements by attribute presence (`[data-open-cart]`) or
    /// attribute equality (`[name=add]`).
    Attr {
        name: String,
        value: Option<String>,
    },
}

impl Selector {
    /// Tag-name selector.
    pub fn tag(tag: impl Into<String>) -> Self {
        Selector::Tag(tag.into())
    }

    /// Id selector.
    pub fn id(id: impl Into<String>) -> Self {
        Selector::Id(id.into())
    }

    /// Class selector.
    pub fn class(class: impl Into<String>) -> Self {
        Selector::Class(class.into())
    }

    /// Attribute-presence selector.
    pub fn attr(name: impl Into<String>) -> Self {
        Selector::Attr {
            name: name.into(),
            value: None,
        }
    }

    /// Attribute-equality selector.
    pub fn attr_eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Selector::Attr {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Whether this selector matches the given node.
    pub fn matches(&self, dom: &Dom, node: NodeId) -> bool {
        match self {
            Selector::Tag(tag) => dom.tag(node) == tag,
            Selector::Id(id) => dom.element_id(node) == Some(id.as_str()),
            Selector::Class(class) => dom.has_class(node, class),
            Selector::Attr { name, value: None } => dom.attr(node, name).is_some(),
            Selector::Attr {
                name,
                value: Some(value),
            } => dom.attr(node, name) == Some(value.as_str()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag(tag) => write!(f, "{tag}"),
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Attr { name, value: None } => write!(f, "[{name}]"),
            Selector::Attr {
                name,
                value: Some(value),
            } => write!(f, "[{name}={value}]"),
        }
    }
}

/// Error parsing a selector from its CSS shorthand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid selector `{0}`")]
pub struct SelectorParseError(pub String);

/// Parses the CSS shorthands `tag`, `#id`, `.class`, `[attr]`, `[attr=value]`.
impl FromStr for Selector {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || SelectorParseError(s.to_string());

        if let Some(id) = s.strip_prefix('#') {
            if id.is_empty() {
                return Err(invalid());
            }
            return Ok(Selector::id(id));
        }
        if let Some(class) = s.strip_prefix('.') {
            if class.is_empty() {
                return Err(invalid());
            }
            return Ok(Selector::class(class));
        }
        if let Some(body) = s.strip_prefix('[') {
            let body = body.strip_suffix(']').ok_or_else(invalid)?;
            let (name, value) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value.trim_matches('"'))),
                None => (body, None),
            };
            if name.is_empty() {
                return Err(invalid());
            }
            return match value {
                Some(value) => Ok(Selector::attr_eq(name, value)),
                None => Ok(Selector::attr(name)),
            };
        }
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(invalid());
        }
        Ok(Selector::tag(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    #[test]
    fn matches_each_form() {
        let mut dom = Dom::new();
        let el = dom.append(
            dom.body(),
            Element::new("button")
                .id("Add")
                .class("btn")
                .attr("name", "add"),
        );

        assert!(Selector::tag("button").matches(&dom, el));
        assert!(Selector::id("Add").matches(&dom, el));
        assert!(Selector::class("btn").matches(&dom, el));
        assert!(Selector::attr("name").matches(&dom, el));
        assert!(Selector::attr_eq("name", "add").matches(&dom, el));
        assert!(!Selector::attr_eq("name", "remove").matches(&dom, el));
        assert!(!Selector::tag("a").matches(&dom, el));
    }

    #[test]
    fn parses_shorthands() {
        assert_eq!("button".parse(), Ok(Selector::tag("button")));
        assert_eq!("#CartDrawer".parse(), Ok(Selector::id("CartDrawer")));
        assert_eq!(".drawer-background".parse(), Ok(Selector::class("drawer-background")));
        assert_eq!("[data-open-cart]".parse(), Ok(Selector::attr("data-open-cart")));
        assert_eq!("[name=add]".parse(), Ok(Selector::attr_eq("name", "add")));
        assert_eq!("[name=\"add\"]".parse(), Ok(Selector::attr_eq("name", "add")));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("".parse::<Selector>().is_err());
        assert!("#".parse::<Selector>().is_err());
        assert!(".".parse::<Selector>().is_err());
        assert!("[unterminated".parse::<Selector>().is_err());
        assert!("[=x]".parse::<Selector>().is_err());
        assert!("div > p".parse::<Selector>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for s in ["button", "#x", ".y", "[a]", "[a=b]"] {
            let sel: Selector = s.parse().unwrap();
            assert_eq!(sel.to_string(), s);
        }
    }
}
