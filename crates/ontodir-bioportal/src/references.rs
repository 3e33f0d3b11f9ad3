//! Filterable attributes of each record type.
//!
//! Each service builds these once and shares them for its lifetime.

use ontodir_directory::{AttributeReference, KnownReferences, ResolvableAttributeReference};

use crate::model::{AssociationDirectoryEntry, EntityDirectoryEntry, ValueSetDefinitionDirectoryEntry};

pub fn entity_references() -> KnownReferences<EntityDirectoryEntry> {
    KnownReferences::with_standard_algorithms([
        ResolvableAttributeReference::new(AttributeReference::RESOURCE_NAME, |e: &EntityDirectoryEntry| {
            vec![e.name.name.clone()]
        }),
        ResolvableAttributeReference::new(AttributeReference::ABOUT, |e: &EntityDirectoryEntry| {
            vec![e.about.clone()]
        }),
        ResolvableAttributeReference::new(AttributeReference::DESIGNATION, |e: &EntityDirectoryEntry| {
            e.designation.iter().cloned().collect()
        }),
    ])
}

/// Associations are filtered by their target.
pub fn association_references() -> KnownReferences<AssociationDirectoryEntry> {
    KnownReferences::with_standard_algorithms([
        ResolvableAttributeReference::new(
            AttributeReference::RESOURCE_NAME,
            |a: &AssociationDirectoryEntry| vec![a.target.name.clone()],
        ),
        ResolvableAttributeReference::new(AttributeReference::ABOUT, |a: &AssociationDirectoryEntry| {
            vec![a.target.uri.clone()]
        }),
    ])
}

pub fn value_set_definition_references() -> KnownReferences<ValueSetDefinitionDirectoryEntry> {
    KnownReferences::with_standard_algorithms([
        ResolvableAttributeReference::new(
            AttributeReference::RESOURCE_NAME,
            |d: &ValueSetDefinitionDirectoryEntry| vec![d.resource_name.clone()],
        ),
        ResolvableAttributeReference::new(
            AttributeReference::ABOUT,
            |d: &ValueSetDefinitionDirectoryEntry| vec![d.about.clone()],
        ),
        ResolvableAttributeReference::new(
            AttributeReference::RESOURCE_SYNOPSIS,
            |d: &ValueSetDefinitionDirectoryEntry| d.synopsis.iter().cloned().collect(),
        ),
    ])
}
