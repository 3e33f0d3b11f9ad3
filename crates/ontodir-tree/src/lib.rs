//! Typed XML trees for ontodir extractors.
//!
//! External ontology services answer with loosely structured XML envelopes
//! (`success.data.classBean`, `relations/entry/list/classBean`, ...). This
//! crate parses that text into a small owned tree and offers navigation that
//! represents absence as `None`/empty instead of failing:
//!
//! - [`Element::named_child`] / [`Element::path`] for dotted-path descent
//! - [`Element::children_named`] for repeated elements, in document order
//! - [`select_by_child_text`] for `entry[string/text()='SubClass']`-style selection
//!
//! Only unparseable text (and required envelope paths, via
//! [`Document::require_path`]) produce a [`TransformError`].

mod document;
mod element;
mod error;

pub use document::Document;
pub use element::{select_by_child_text, Element};
pub use error::TransformError;
