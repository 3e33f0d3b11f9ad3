//! Single attribute + algorithm + value restriction.

use serde::{Deserialize, Serialize};

use crate::error::RestrictionError;
use crate::reference::{AttributeReference, MatchAlgorithmReference};
use crate::registry::KnownReferences;

/// A compiled restriction: keeps the candidates it returns `true` for.
pub type CandidatePredicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterComponent {
    pub attribute: AttributeReference,
    pub algorithm: MatchAlgorithmReference,
    pub match_value: String,
}

impl FilterComponent {
    pub fn new(
        attribute: AttributeReference,
        algorithm: MatchAlgorithmReference,
        match_value: impl Into<String>,
    ) -> Self {
        Self {
            attribute,
            algorithm,
            match_value: match_value.into(),
        }
    }

    /// Resolves both keys against `references`.
    ///
    /// A candidate passes when any of its attribute values matches
    /// `match_value`; a candidate with no values never passes.
    pub fn compile<'a, T>(
        &'a self,
        references: &'a KnownReferences<T>,
    ) -> Result<CandidatePredicate<'a, T>, RestrictionError> {
        let attribute = references.attributes().lookup(&self.attribute)?;
        let algorithm = references.algorithms().lookup(&self.algorithm)?;
        let match_value = self.match_value.as_str();
        Ok(Box::new(move |candidate: &T| {
            attribute
                .resolve(candidate)
                .iter()
                .any(|value| algorithm.matches(value, match_value))
        }))
    }
}

/// Narrows `candidates` by `filter`, preserving order. `None` keeps everything.
pub fn restrict<T>(
    mut candidates: Vec<T>,
    filter: Option<&FilterComponent>,
    references: &KnownReferences<T>,
) -> Result<Vec<T>, RestrictionError> {
    if let Some(filter) = filter {
        let predicate = filter.compile(references)?;
        candidates.retain(|candidate| predicate(candidate));
    }
    Ok(candidates)
}
