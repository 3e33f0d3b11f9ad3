//! Canonical attribute / match-algorithm keys and their resolvable bindings.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Canonical keys
// ============================================================================

/// Names a filterable field independently of any record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeReference(Cow<'static, str>);

impl AttributeReference {
    pub const RESOURCE_NAME: Self = Self(Cow::Borrowed("resourceName"));
    pub const ABOUT: Self = Self(Cow::Borrowed("about"));
    pub const RESOURCE_SYNOPSIS: Self = Self(Cow::Borrowed("resourceSynopsis"));
    pub const DESIGNATION: Self = Self(Cow::Borrowed("designation"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Names a string comparison strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchAlgorithmReference(Cow<'static, str>);

impl MatchAlgorithmReference {
    pub const EXACT_MATCH: Self = Self(Cow::Borrowed("exactMatch"));
    pub const CONTAINS: Self = Self(Cow::Borrowed("contains"));
    pub const STARTS_WITH: Self = Self(Cow::Borrowed("startsWith"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchAlgorithmReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Resolvable bindings
// ============================================================================

type Resolver<T> = Arc<dyn Fn(&T) -> Vec<String> + Send + Sync>;
type Matcher = Arc<dyn Fn(&str, &str) -> bool + Send + Sync>;

/// An [`AttributeReference`] bound to the function extracting its values from `T`.
pub struct ResolvableAttributeReference<T> {
    reference: AttributeReference,
    resolver: Resolver<T>,
}

impl<T> ResolvableAttributeReference<T> {
    pub fn new<F>(reference: AttributeReference, resolver: F) -> Self
    where
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
    {
        Self {
            reference,
            resolver: Arc::new(resolver),
        }
    }

    pub fn reference(&self) -> &AttributeReference {
        &self.reference
    }

    /// Zero or more values of this attribute on `record`.
    pub fn resolve(&self, record: &T) -> Vec<String> {
        (self.resolver)(record)
    }
}

impl<T> Clone for ResolvableAttributeReference<T> {
    fn clone(&self) -> Self {
        Self {
            reference: self.reference.clone(),
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<T> fmt::Debug for ResolvableAttributeReference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResolvableAttributeReference")
            .field(&self.reference)
            .finish()
    }
}

/// A [`MatchAlgorithmReference`] bound to its `(candidate, match_value) -> bool` predicate.
#[derive(Clone)]
pub struct ResolvableMatchAlgorithmReference {
    reference: MatchAlgorithmReference,
    matcher: Matcher,
}

impl ResolvableMatchAlgorithmReference {
    pub fn new<F>(reference: MatchAlgorithmReference, matcher: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        Self {
            reference,
            matcher: Arc::new(matcher),
        }
    }

    pub fn reference(&self) -> &MatchAlgorithmReference {
        &self.reference
    }

    pub fn matches(&self, candidate: &str, match_value: &str) -> bool {
        (self.matcher)(candidate, match_value)
    }
}

impl fmt::Debug for ResolvableMatchAlgorithmReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResolvableMatchAlgorithmReference")
            .field(&self.reference)
            .finish()
    }
}
