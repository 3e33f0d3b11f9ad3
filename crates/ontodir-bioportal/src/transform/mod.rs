//! Whole-document transforms: envelope navigation plus record building.
//!
//! Every transform parses the document first, so malformed text fails with
//! [`TransformError::Malformed`](ontodir_tree::TransformError::Malformed)
//! before anything is built.

pub mod association;
pub mod value_set_definition;

pub use association::AssociationTransform;
pub use value_set_definition::ValueSetDefinitionTransform;

/// `classBean` of a single-entity response.
pub const ENTITY_SUBJECT: &str = "success.data.classBean";

/// Subject list of a paged code system version response.
pub const PAGED_SUBJECTS: &str = "success.data.page.contents.classBeanResultList";
pub const SUBJECT: &str = "classBean";

/// Listing of views or versions.
pub const ONTOLOGY_LIST: &str = "success.data.list";
pub const ONTOLOGY_BEAN: &str = "ontologyBean";
