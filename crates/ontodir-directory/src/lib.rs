//! Directory query engine.
//!
//! A directory is an ordered candidate sequence narrowed in two stages and
//! then windowed:
//!
//! ```text
//! candidates ─▶ restrict_query(Query) ─▶ restrict(FilterComponent) ─▶ page ─▶ DirectoryResult
//!                                                                  └──────▶ count
//! ```
//!
//! Which attributes can be filtered, and how values are compared, is decided
//! per record type by a frozen [`KnownReferences`] value built once when a
//! service is assembled. Restrictions naming a key outside that set fail with
//! [`RestrictionError`] before any candidate is examined.

pub mod builder;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod page;
pub mod query;
pub mod reference;
pub mod registry;

pub use builder::DirectoryBuilder;
pub use error::RestrictionError;
pub use filter::{CandidatePredicate, FilterComponent};
pub use page::{DirectoryResult, Page};
pub use query::{Query, QueryRestriction};
pub use reference::{
    AttributeReference, MatchAlgorithmReference, ResolvableAttributeReference,
    ResolvableMatchAlgorithmReference,
};
pub use registry::{AttributeRegistry, KnownReferences, MatchAlgorithmRegistry};
