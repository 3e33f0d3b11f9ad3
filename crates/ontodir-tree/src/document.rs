use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::element::Element;
use crate::error::TransformError;

const DOCUMENT_NODE: &str = "#document";

/// A parsed document with exactly one root element.
///
/// Paths are resolved from the document node, so `success.data.classBean`
/// starts by matching the root element `success`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    node: Element,
}

impl Document {
    /// Parses XML text into a tree.
    ///
    /// Fails on anything a conforming parser would reject as not well formed:
    /// mismatched or unclosed tags, bad escapes, stray text, zero or several
    /// root elements. Declarations, comments, processing instructions and
    /// doctypes are skipped.
    pub fn parse(text: &str) -> Result<Self, TransformError> {
        let mut reader = Reader::from_str(text);
        let mut stack: Vec<Element> = Vec::new();
        let mut roots: Vec<Element> = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    stack.push(Element::new(element_name(&start, position)?));
                }
                Ok(Event::Empty(start)) => {
                    let element = Element::new(element_name(&start, position)?);
                    attach(&mut stack, &mut roots, element);
                }
                Ok(Event::End(_)) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| TransformError::malformed(position, "unexpected closing tag"))?;
                    element.finish();
                    attach(&mut stack, &mut roots, element);
                }
                Ok(Event::Text(text)) => {
                    let text = text
                        .unescape()
                        .map_err(|err| TransformError::malformed(position, err.to_string()))?;
                    push_text(&mut stack, &text, position)?;
                }
                Ok(Event::CData(data)) => {
                    let bytes = data.into_inner();
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|err| TransformError::malformed(position, err.to_string()))?;
                    push_text(&mut stack, text, position)?;
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    return Err(TransformError::malformed(
                        reader.buffer_position() as u64,
                        err.to_string(),
                    ))
                }
            }
        }

        let end = text.len() as u64;
        if let Some(open) = stack.last() {
            return Err(TransformError::malformed(
                end,
                format!("unclosed element <{}>", open.name()),
            ));
        }
        match roots.len() {
            0 => Err(TransformError::malformed(end, "no root element")),
            1 => {
                let root = roots.remove(0);
                tracing::trace!(root = root.name(), bytes = text.len(), "parsed document");
                Ok(Self {
                    node: Element::new(DOCUMENT_NODE).with_child(root),
                })
            }
            n => Err(TransformError::malformed(end, format!("{n} root elements"))),
        }
    }

    /// The document element.
    pub fn root(&self) -> &Element {
        &self.node.children()[0]
    }

    pub fn path(&self, path: &str) -> Option<&Element> {
        self.node.path(path)
    }

    /// Resolves an envelope path the caller cannot proceed without.
    pub fn require_path(&self, path: &str) -> Result<&Element, TransformError> {
        self.path(path).ok_or_else(|| TransformError::MissingPath {
            path: path.to_string(),
        })
    }
}

impl std::str::FromStr for Document {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn element_name(start: &BytesStart<'_>, position: u64) -> Result<String, TransformError> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(|err| TransformError::malformed(position, err.to_string()))
}

fn attach(stack: &mut [Element], roots: &mut Vec<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        None => roots.push(element),
    }
}

fn push_text(stack: &mut [Element], text: &str, position: u64) -> Result<(), TransformError> {
    match stack.last_mut() {
        Some(open) => {
            open.push_text(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(TransformError::malformed(position, "text outside the root element")),
    }
}
