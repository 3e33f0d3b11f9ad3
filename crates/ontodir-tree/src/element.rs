use crate::error::TransformError;

/// One element of a parsed document: tag name, direct text, ordered children.
///
/// Attributes are not kept; the envelopes this crate reads carry every field
/// as a child element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text directly inside this element, unescaped and untrimmed.
    ///
    /// Whitespace that only separates child elements is dropped at parse time.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child with the given tag.
    pub fn named_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All direct children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Follows `a.b.c` one [`named_child`](Self::named_child) at a time.
    ///
    /// Stops at the first missing segment. The empty path is `self`.
    pub fn path(&self, path: &str) -> Option<&Element> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.')
            .try_fold(self, |node, segment| node.named_child(segment))
    }

    /// Repeated elements at the end of a path: `list.classBean` yields every
    /// `classBean` under the first `list`.
    pub fn path_children<'a>(&'a self, path: &'a str) -> Vec<&'a Element> {
        let (parent, last) = match path.rsplit_once('.') {
            Some((parent, last)) => (self.path(parent), last),
            None => (Some(self), path),
        };
        parent
            .map(|node| node.children_named(last).collect())
            .unwrap_or_default()
    }

    /// Direct text of the first child named `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.named_child(name).map(Element::text)
    }

    /// Like [`child_text`](Self::child_text), for fields the caller cannot do without.
    pub fn required_child_text(&self, name: &str) -> Result<&str, TransformError> {
        self.child_text(name)
            .ok_or_else(|| TransformError::missing_field(&self.name, name))
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Drops formatting whitespace once all children are known.
    pub(crate) fn finish(&mut self) {
        if !self.children.is_empty() && self.text.trim().is_empty() {
            self.text.clear();
        }
    }
}

/// Keeps the nodes whose `child` element has exactly `expected` as its text.
///
/// Comparison is case-sensitive with no trimming. Nodes without the child
/// are dropped.
pub fn select_by_child_text<'a, I>(nodes: I, child: &str, expected: &str) -> Vec<&'a Element>
where
    I: IntoIterator<Item = &'a Element>,
{
    nodes
        .into_iter()
        .filter(|node| node.child_text(child) == Some(expected))
        .collect()
}
