//! Query services: fetch a document, transform it, run the directory pipeline.
//!
//! A service owns its collaborators and its frozen [`KnownReferences`] for the
//! whole of its lifetime. Calls share nothing mutable, so one service value
//! can serve concurrent callers.

pub mod association;
pub mod value_set_definition;

pub use association::AssociationQueryService;
pub use value_set_definition::{ValueSetDefinitionQueryService, ValueSetDefinitionRestrictions};

use ontodir_directory::{
    DirectoryBuilder, FilterComponent, KnownReferences, Query, QueryRestriction,
};

use crate::error::ServiceError;

/// Tags a collaborator failure with the resource being fetched.
pub(crate) fn fetched(
    resource: impl FnOnce() -> String,
    response: anyhow::Result<String>,
) -> Result<String, ServiceError> {
    response.map_err(|source| ServiceError::Fetch {
        resource: resource(),
        source,
    })
}

/// Candidates narrowed by query, then by filter.
pub(crate) fn restricted<'r, T>(
    candidates: Vec<T>,
    references: &'r KnownReferences<T>,
    query: Option<&Query>,
    filter: Option<&FilterComponent>,
) -> Result<DirectoryBuilder<'r, T>, ServiceError> {
    let query = query.map(|q| q as &dyn QueryRestriction<T>);
    Ok(DirectoryBuilder::new(candidates, references)
        .restrict_query(query)?
        .restrict(filter)?)
}
