use ontodir_directory::DirectoryResult;
use ontodir_tree::{Document, TransformError};

use super::{ENTITY_SUBJECT, PAGED_SUBJECTS, SUBJECT};
use crate::collaborator::UrlConstructor;
use crate::extract::{self, Relation};
use crate::model::{AssociationDirectoryEntry, EntityDirectoryEntry, GraphNode, Scope};

/// Relationship records from BioPortal entity documents.
#[derive(Clone, Copy)]
pub struct AssociationTransform<'u> {
    urls: &'u dyn UrlConstructor,
}

impl<'u> AssociationTransform<'u> {
    pub fn new(urls: &'u dyn UrlConstructor) -> Self {
        Self { urls }
    }

    /// Targets of the subject's `predicate` relations, or of all relations
    /// when `predicate` is `None` or blank.
    pub fn entities_for_relationship(
        &self,
        xml: &str,
        scope: &Scope,
        predicate: Option<&str>,
    ) -> Result<Vec<EntityDirectoryEntry>, TransformError> {
        let doc = Document::parse(xml)?;
        let subject = doc.require_path(ENTITY_SUBJECT)?;
        extract::extract(subject, predicate, |r| extract::entity_entry(r, scope, self.urls))
    }

    /// Every association of every subject on one page of a code system version.
    /// A response without the subject list is an error, not an empty page.
    pub fn associations_for_code_system_version(
        &self,
        xml: &str,
        scope: &Scope,
    ) -> Result<Vec<AssociationDirectoryEntry>, TransformError> {
        let doc = Document::parse(xml)?;
        let list = doc.require_path(PAGED_SUBJECTS)?;
        let mut associations = Vec::new();
        for subject in list.children_named(SUBJECT) {
            associations.extend(extract::extract(subject, None, |r| {
                extract::association_entry(r, scope, self.urls)
            })?);
        }
        tracing::debug!(
            code_system_version = %scope.code_system_version_name,
            associations = associations.len(),
            "code system version associations extracted"
        );
        Ok(associations)
    }

    pub fn associations_for_subject(
        &self,
        xml: &str,
        scope: &Scope,
    ) -> Result<Vec<AssociationDirectoryEntry>, TransformError> {
        self.for_subject(xml, |r| extract::association_entry(r, scope, self.urls))
    }

    pub fn graph_for_subject(&self, xml: &str, scope: &Scope) -> Result<Vec<GraphNode>, TransformError> {
        self.for_subject(xml, |r| extract::graph_node(r, scope, self.urls))
    }

    /// All associations the entity is the subject of, as a single complete page.
    pub fn subject_of_associations_for_entity(
        &self,
        xml: &str,
        scope: &Scope,
    ) -> Result<DirectoryResult<AssociationDirectoryEntry>, TransformError> {
        self.associations_for_subject(xml, scope)
            .map(DirectoryResult::from_complete)
    }

    fn for_subject<R>(
        &self,
        xml: &str,
        build: impl FnMut(&Relation<'_>) -> Result<R, TransformError>,
    ) -> Result<Vec<R>, TransformError> {
        let doc = Document::parse(xml)?;
        let subject = doc.require_path(ENTITY_SUBJECT)?;
        extract::extract(subject, None, build)
    }
}
