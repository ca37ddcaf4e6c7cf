//! Platform-neutral view tree
//!
//! Cards render into [`ViewNode`]s; whatever hosts them (a DOM binding, an
//! HTML file, a test) consumes the tree. [`ViewNode::to_html`] is the built-in
//! serializer.

use std::fmt::Write as _;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &["img", "source", "br", "hr", "meta", "link", "input"];

/// Elements whose text content is emitted without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

/// Node of a view tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    /// Element with attributes and children
    Element(Element),
    /// Text content
    Text(String),
}

/// Element node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    /// Attributes in insertion order
    pub attrs: Vec<(String, String)>,
    pub children: Vec<ViewNode>,
}

impl Element {
    /// Create an element without attributes or children
    #[inline]
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// With attribute; setting an existing name replaces its value
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// With `class` attribute
    #[inline]
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// With child node
    #[inline]
    #[must_use]
    pub fn child(mut self, child: impl Into<ViewNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// With child nodes
    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ViewNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// With a single text child
    #[inline]
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(ViewNode::Text(text.into()))
    }

    /// Set or replace an attribute
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Attribute value by name
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check if the `class` attribute lists `class`
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<String> for ViewNode {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ViewNode {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl ViewNode {
    /// Element view of this node, if it is one
    #[inline]
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(t) => out.push_str(t),
            Self::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// All descendant elements (including self) with the given tag, in document order
    #[must_use]
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |e| {
            if e.tag == tag {
                found.push(e);
            }
        });
        found
    }

    /// First descendant element (including self) carrying `class`
    #[must_use]
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        let mut found = None;
        self.walk(&mut |e| {
            if found.is_none() && e.has_class(class) {
                found = Some(e);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        if let Self::Element(e) = self {
            visit(e);
            for child in &e.children {
                child.walk(visit);
            }
        }
    }

    /// Serialize to HTML
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, false);
        out
    }

    fn write_html(&self, out: &mut String, raw_text: bool) {
        match self {
            Self::Text(t) if raw_text => out.push_str(t),
            Self::Text(t) => escape_into(out, t, false),
            Self::Element(e) => {
                out.push('<');
                out.push_str(&e.tag);
                for (name, value) in &e.attrs {
                    let _ = write!(out, " {name}=\"");
                    escape_into(out, value, true);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&e.tag.as_str()) {
                    return;
                }
                let raw = RAW_TEXT_ELEMENTS.contains(&e.tag.as_str());
                for child in &e.children {
                    child.write_html(out, raw);
                }
                let _ = write!(out, "</{}>", e.tag);
            }
        }
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
