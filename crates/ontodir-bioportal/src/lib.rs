//! BioPortal documents as queryable directories.
//!
//! ```text
//! BioportalClient ─▶ XML ─▶ transform (extract) ─▶ records ─▶ DirectoryBuilder ─▶ DirectoryResult
//!                                  │
//!                           UrlConstructor (href fields)
//! ```
//!
//! Transport and identifier translation stay behind the traits in
//! [`collaborator`]; everything from document text onwards runs here,
//! synchronously and without shared mutable state.

pub mod collaborator;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod references;
pub mod service;
pub mod transform;

pub use collaborator::{BaseUrlConstructor, BioportalClient, IdentityConverter, UrlConstructor};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use model::{
    AssociationDirectoryEntry, CodeSystemVersionReference, EntityDescriptionId,
    EntityDirectoryEntry, EntitySynopsis, GraphNode, PredicateReference, Scope, ScopedEntityName,
    UriAndEntityName, ValueSetDefinitionDirectoryEntry,
};
pub use service::{
    AssociationQueryService, ValueSetDefinitionQueryService, ValueSetDefinitionRestrictions,
};
pub use transform::{AssociationTransform, ValueSetDefinitionTransform};
