//! Structured query restriction.
//!
//! The query grammar belongs to the caller; this module only fixes the
//! contract. A query compiles against the record type's [`KnownReferences`]
//! into a pure predicate, and the directory applies it in order without
//! touching anything but its own candidate list.

use serde::{Deserialize, Serialize};

use crate::error::RestrictionError;
use crate::filter::{CandidatePredicate, FilterComponent};
use crate::registry::KnownReferences;

pub trait QueryRestriction<T> {
    fn compile<'a>(
        &'a self,
        references: &'a KnownReferences<T>,
    ) -> Result<CandidatePredicate<'a, T>, RestrictionError>;
}

impl<T> QueryRestriction<T> for FilterComponent {
    fn compile<'a>(
        &'a self,
        references: &'a KnownReferences<T>,
    ) -> Result<CandidatePredicate<'a, T>, RestrictionError> {
        FilterComponent::compile(self, references)
    }
}

/// Conjunction of filter components. The empty query keeps every candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    pub filter_components: Vec<FilterComponent>,
}

impl Query {
    pub fn new(filter_components: impl IntoIterator<Item = FilterComponent>) -> Self {
        Self {
            filter_components: filter_components.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filter_components.is_empty()
    }
}

impl<T> QueryRestriction<T> for Query {
    fn compile<'a>(
        &'a self,
        references: &'a KnownReferences<T>,
    ) -> Result<CandidatePredicate<'a, T>, RestrictionError> {
        let predicates = self
            .filter_components
            .iter()
            .map(|component| component.compile(references))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Box::new(move |candidate: &T| {
            predicates.iter().all(|predicate| predicate(candidate))
        }))
    }
}
