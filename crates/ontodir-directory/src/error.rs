use crate::reference::{AttributeReference, MatchAlgorithmReference};

/// A restriction names a key the record type in play does not support.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestrictionError {
    #[error("unsupported model attribute `{0}`")]
    UnknownAttribute(AttributeReference),
    #[error("unsupported match algorithm `{0}`")]
    UnknownMatchAlgorithm(MatchAlgorithmReference),
}
