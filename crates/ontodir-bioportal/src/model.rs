//! Normalized records produced from BioPortal documents.
//!
//! Records are plain owned values: built once by an extractor, handed to the
//! directory pipeline, serialized by the caller.

use serde::Serialize;

/// Code system and version a request is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub code_system_name: String,
    pub code_system_version_name: String,
}

impl Scope {
    pub fn new(code_system_name: impl Into<String>, code_system_version_name: impl Into<String>) -> Self {
        Self {
            code_system_name: code_system_name.into(),
            code_system_version_name: code_system_version_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedEntityName {
    pub namespace: String,
    pub name: String,
}

/// A relationship target, without the subject or predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDirectoryEntry {
    pub about: String,
    pub name: ScopedEntityName,
    pub designation: Option<String>,
    pub href: String,
}

impl EntityDirectoryEntry {
    pub fn resource_name(&self) -> &str {
        &self.name.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UriAndEntityName {
    pub uri: String,
    pub namespace: String,
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PredicateReference {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSystemVersionReference {
    pub code_system: String,
    pub version: String,
    pub href: String,
}

/// `subject --predicate--> target`, asserted by a code system version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationDirectoryEntry {
    pub subject: UriAndEntityName,
    pub predicate: PredicateReference,
    pub target: UriAndEntityName,
    pub asserted_by: CodeSystemVersionReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySynopsis {
    pub uri: String,
    pub namespace: String,
    pub name: String,
    pub href: String,
    pub designation: Option<String>,
}

/// An association that also carries the target's synopsis, for graph walks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    #[serde(flatten)]
    pub association: AssociationDirectoryEntry,
    pub node_entity: EntitySynopsis,
}

/// Summary of one ontology version exposed as a value set definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSetDefinitionDirectoryEntry {
    pub about: String,
    pub resource_name: String,
    pub value_set_name: String,
    pub synopsis: Option<String>,
    pub href: String,
}

/// Identifies one entity inside one code system version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityDescriptionId {
    pub code_system_version: String,
    pub name: String,
}

impl EntityDescriptionId {
    pub fn new(code_system_version: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code_system_version: code_system_version.into(),
            name: name.into(),
        }
    }
}
