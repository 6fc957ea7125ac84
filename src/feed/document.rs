//! Feed document tree
//!
//! Feeds are assembled as a typed element tree and serialized once. Escaping happens in the
//! serializer, so no caller can place an unescaped reserved character into the output.

use std::{borrow::Cow, fmt, io};

use smallvec::SmallVec;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";

/// Node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),

    /// Character data, stored unescaped
    Text(String),
}

/// Element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: Cow<'static, str>,
    attributes: SmallVec<[(Cow<'static, str>, String); 2]>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            attributes: SmallVec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element holding a single text node.
    #[must_use]
    pub fn with_text(name: impl Into<Cow<'static, str>>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.children.push(Node::Text(text.into()));
        element
    }

    /// Add an attribute.
    #[must_use]
    pub fn attribute(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Append a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Append a child element holding a single text node.
    pub fn push_text(&mut self, name: impl Into<Cow<'static, str>>, text: impl Into<String>) {
        self.push(Self::with_text(name, text));
    }

    /// Element name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the named attribute.
    #[must_use]
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child nodes
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements with the given name, in document order.
    pub fn elements<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s Element> {
        self.children.iter().filter_map(move |node| match node {
            Node::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// First child element with the given name.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements(name).next()
    }

    /// Unescaped text of the first child element with the given name.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.element(name).map(Element::text)
    }

    /// Concatenated, unescaped text of the direct text children.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str(INDENT)?;
        }

        write!(f, "<{}", self.name)?;

        for (key, value) in &self.attributes {
            write!(f, " {key}=\"{}\"", escape(value))?;
        }

        if self.children.is_empty() {
            return f.write_str("/>\n");
        }

        let text_only = self
            .children
            .iter()
            .all(|node| matches!(node, Node::Text(_)));

        if text_only {
            return writeln!(f, ">{}</{}>", escape(&self.text()), self.name);
        }

        f.write_str(">\n")?;

        for node in &self.children {
            match node {
                Node::Element(element) => element.write_indented(f, depth + 1)?,
                Node::Text(text) => {
                    for _ in 0..=depth {
                        f.write_str(INDENT)?;
                    }

                    writeln!(f, "{}", escape(text))?;
                }
            }
        }

        for _ in 0..depth {
            f.write_str(INDENT)?;
        }

        writeln!(f, "</{}>", self.name)
    }
}

/// A complete document: the declaration followed by a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    root: Element,
}

impl FeedDocument {
    /// Wrap a root element.
    #[must_use]
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// The minimal document served when a feed cannot be produced.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Element::with_text("error", message))
    }

    /// Root element
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serialize to a string.
    #[must_use]
    pub fn to_xml(&self) -> String {
        self.to_string()
    }

    /// Serialize into a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for FeedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{DECLARATION}")?;
        self.root.write_indented(f, 0)
    }
}

/// Replace the five reserved markup characters with their entities.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }

    Cow::Owned(escaped)
}
