//! Standard match algorithms.

use crate::reference::{MatchAlgorithmReference, ResolvableMatchAlgorithmReference};

/// Case-sensitive equality.
pub fn exact_match(candidate: &str, match_value: &str) -> bool {
    candidate == match_value
}

/// Case-insensitive substring.
pub fn contains(candidate: &str, match_value: &str) -> bool {
    candidate
        .to_lowercase()
        .contains(&match_value.to_lowercase())
}

/// Case-insensitive prefix.
pub fn starts_with(candidate: &str, match_value: &str) -> bool {
    candidate
        .to_lowercase()
        .starts_with(&match_value.to_lowercase())
}

/// `exactMatch`, `contains` and `startsWith`, in that order.
pub fn standard_match_algorithms() -> Vec<ResolvableMatchAlgorithmReference> {
    vec![
        ResolvableMatchAlgorithmReference::new(MatchAlgorithmReference::EXACT_MATCH, exact_match),
        ResolvableMatchAlgorithmReference::new(MatchAlgorithmReference::CONTAINS, contains),
        ResolvableMatchAlgorithmReference::new(MatchAlgorithmReference::STARTS_WITH, starts_with),
    ]
}
