//! Frozen lookup tables from canonical keys to resolvable bindings.
//!
//! Registries are built from an enumerated list and expose no mutation, so a
//! service can share one `Arc<KnownReferences<T>>` across concurrent calls.

use ahash::AHashMap;
use std::fmt;

use crate::error::RestrictionError;
use crate::matcher::standard_match_algorithms;
use crate::reference::{
    AttributeReference, MatchAlgorithmReference, ResolvableAttributeReference,
    ResolvableMatchAlgorithmReference,
};

/// Attribute resolvers for one record type, in registration order.
pub struct AttributeRegistry<T> {
    entries: Vec<ResolvableAttributeReference<T>>,
    index: AHashMap<AttributeReference, usize>,
}

impl<T> AttributeRegistry<T> {
    /// The first binding registered for a key wins.
    pub fn new(bindings: impl IntoIterator<Item = ResolvableAttributeReference<T>>) -> Self {
        let mut entries = Vec::new();
        let mut index = AHashMap::new();
        for binding in bindings {
            if index.contains_key(binding.reference()) {
                tracing::warn!(
                    attribute = %binding.reference(),
                    "duplicate attribute binding ignored"
                );
                continue;
            }
            index.insert(binding.reference().clone(), entries.len());
            entries.push(binding);
        }
        Self { entries, index }
    }

    pub fn lookup(
        &self,
        reference: &AttributeReference,
    ) -> Result<&ResolvableAttributeReference<T>, RestrictionError> {
        self.index
            .get(reference)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| RestrictionError::UnknownAttribute(reference.clone()))
    }

    pub fn references(&self) -> impl Iterator<Item = &AttributeReference> {
        self.entries.iter().map(ResolvableAttributeReference::reference)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Matchers, in registration order.
#[derive(Debug, Clone)]
pub struct MatchAlgorithmRegistry {
    entries: Vec<ResolvableMatchAlgorithmReference>,
    index: AHashMap<MatchAlgorithmReference, usize>,
}

impl MatchAlgorithmRegistry {
    /// The first binding registered for a key wins.
    pub fn new(bindings: impl IntoIterator<Item = ResolvableMatchAlgorithmReference>) -> Self {
        let mut entries = Vec::new();
        let mut index = AHashMap::new();
        for binding in bindings {
            if index.contains_key(binding.reference()) {
                tracing::warn!(
                    algorithm = %binding.reference(),
                    "duplicate match algorithm binding ignored"
                );
                continue;
            }
            index.insert(binding.reference().clone(), entries.len());
            entries.push(binding);
        }
        Self { entries, index }
    }

    /// `exactMatch`, `contains`, `startsWith`.
    pub fn standard() -> Self {
        Self::new(standard_match_algorithms())
    }

    pub fn lookup(
        &self,
        reference: &MatchAlgorithmReference,
    ) -> Result<&ResolvableMatchAlgorithmReference, RestrictionError> {
        self.index
            .get(reference)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| RestrictionError::UnknownMatchAlgorithm(reference.clone()))
    }

    pub fn references(&self) -> impl Iterator<Item = &MatchAlgorithmReference> {
        self.entries
            .iter()
            .map(ResolvableMatchAlgorithmReference::reference)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a restriction may name for record type `T`.
///
/// Built once at service assembly and passed explicitly into every directory
/// build.
pub struct KnownReferences<T> {
    attributes: AttributeRegistry<T>,
    algorithms: MatchAlgorithmRegistry,
}

impl<T> KnownReferences<T> {
    pub fn new(attributes: AttributeRegistry<T>, algorithms: MatchAlgorithmRegistry) -> Self {
        Self {
            attributes,
            algorithms,
        }
    }

    /// Attribute bindings plus the standard match algorithms.
    pub fn with_standard_algorithms(
        attributes: impl IntoIterator<Item = ResolvableAttributeReference<T>>,
    ) -> Self {
        Self::new(AttributeRegistry::new(attributes), MatchAlgorithmRegistry::standard())
    }

    pub fn attributes(&self) -> &AttributeRegistry<T> {
        &self.attributes
    }

    pub fn algorithms(&self) -> &MatchAlgorithmRegistry {
        &self.algorithms
    }
}

impl<T> Clone for AttributeRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T> fmt::Debug for AttributeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.references()).finish()
    }
}

impl<T> Clone for KnownReferences<T> {
    fn clone(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            algorithms: self.algorithms.clone(),
        }
    }
}

impl<T> fmt::Debug for KnownReferences<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnownReferences")
            .field("attributes", &self.attributes)
            .field("algorithms", &self.algorithms)
            .finish()
    }
}
