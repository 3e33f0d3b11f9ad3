use std::sync::Arc;

use ontodir_directory::{
    AttributeReference, DirectoryResult, FilterComponent, KnownReferences, MatchAlgorithmReference,
    Page, Query,
};

use super::{fetched, restricted};
use crate::collaborator::{BioportalClient, IdentityConverter, UrlConstructor};
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::model::{
    AssociationDirectoryEntry, EntityDescriptionId, EntityDirectoryEntry, GraphNode, Scope,
};
use crate::references::{association_references, entity_references};
use crate::transform::AssociationTransform;

/// Children, parents and outgoing associations of a single entity.
pub struct AssociationQueryService {
    client: Arc<dyn BioportalClient>,
    identity: Arc<dyn IdentityConverter>,
    urls: Arc<dyn UrlConstructor>,
    entity_references: Arc<KnownReferences<EntityDirectoryEntry>>,
    association_references: Arc<KnownReferences<AssociationDirectoryEntry>>,
    children_predicate: String,
    parents_predicate: String,
    default_page: Page,
}

impl AssociationQueryService {
    pub fn new(
        client: Arc<dyn BioportalClient>,
        identity: Arc<dyn IdentityConverter>,
        urls: Arc<dyn UrlConstructor>,
        config: &ServiceConfig,
    ) -> Self {
        Self {
            client,
            identity,
            urls,
            entity_references: Arc::new(entity_references()),
            association_references: Arc::new(association_references()),
            children_predicate: config.children_predicate.clone(),
            parents_predicate: config.parents_predicate.clone(),
            default_page: config.default_page,
        }
    }

    // ========================================================================
    // Children / parents
    // ========================================================================

    pub fn children_of_entity(
        &self,
        query: Option<&Query>,
        filter: Option<&FilterComponent>,
        page: Option<Page>,
        id: &EntityDescriptionId,
    ) -> Result<DirectoryResult<EntityDirectoryEntry>, ServiceError> {
        self.related_entities(&self.children_predicate, query, filter, page, id)
    }

    pub fn parents_of_entity(
        &self,
        query: Option<&Query>,
        filter: Option<&FilterComponent>,
        page: Option<Page>,
        id: &EntityDescriptionId,
    ) -> Result<DirectoryResult<EntityDirectoryEntry>, ServiceError> {
        self.related_entities(&self.parents_predicate, query, filter, page, id)
    }

    pub fn count_children_of_entity(
        &self,
        query: Option<&Query>,
        filter: Option<&FilterComponent>,
        id: &EntityDescriptionId,
    ) -> Result<usize, ServiceError> {
        self.count_related_entities(&self.children_predicate, query, filter, id)
    }

    pub fn count_parents_of_entity(
        &self,
        query: Option<&Query>,
        filter: Option<&FilterComponent>,
        id: &EntityDescriptionId,
    ) -> Result<usize, ServiceError> {
        self.count_related_entities(&self.parents_predicate, query, filter, id)
    }

    fn related_entities(
        &self,
        predicate: &str,
        query: Option<&Query>,
        filter: Option<&FilterComponent>,
        page: Option<Page>,
        id: &EntityDescriptionId,
    ) -> Result<DirectoryResult<EntityDirectoryEntry>, ServiceError> {
        let page = page.unwrap_or(self.default_page);
        tracing::debug!(
            code_system_version = %id.code_system_version,
            entity = %id.name,
            predicate,
            start = page.start,
            max_to_return = page.max_to_return,
            "resolving related entities"
        );
        let candidates = self.entities(predicate, id)?;
        Ok(restricted(candidates, &self.entity_references, query, filter)?
            .page(page)
            .resolve())
    }

    fn count_related_entities(
        &self,
        predicate: &str,
        query: Option<&Query>,
        filter: Option<&FilterComponent>,
        id: &EntityDescriptionId,
    ) -> Result<usize, ServiceError> {
        tracing::debug!(
            code_system_version = %id.code_system_version,
            entity = %id.name,
            predicate,
            "counting related entities"
        );
        let candidates = self.entities(predicate, id)?;
        Ok(restricted(candidates, &self.entity_references, query, filter)?.count())
    }

    fn entities(
        &self,
        predicate: &str,
        id: &EntityDescriptionId,
    ) -> Result<Vec<EntityDirectoryEntry>, ServiceError> {
        let (scope, xml) = self.entity_document(id)?;
        Ok(self.transform().entities_for_relationship(&xml, &scope, Some(predicate))?)
    }

    // ========================================================================
    // Associations
    // ========================================================================

    /// Associations whose subject is `id`, restricted and paged by target.
    pub fn source_of_associations_of_entity(
        &self,
        query: Option<&Query>,
        filter: Option<&FilterComponent>,
        page: Option<Page>,
        id: &EntityDescriptionId,
    ) -> Result<DirectoryResult<AssociationDirectoryEntry>, ServiceError> {
        tracing::debug!(
            code_system_version = %id.code_system_version,
            entity = %id.name,
            "resolving associations of entity"
        );
        let (scope, xml) = self.entity_document(id)?;
        let transform = self.transform();
        if query.is_none() && filter.is_none() && page.is_none() {
            return Ok(transform.subject_of_associations_for_entity(&xml, &scope)?);
        }
        let candidates = transform.associations_for_subject(&xml, &scope)?;
        Ok(restricted(candidates, &self.association_references, query, filter)?
            .page(page.unwrap_or(self.default_page))
            .resolve())
    }

    /// Every association of `id` with the target's synopsis, as one page.
    pub fn graph_of_entity(
        &self,
        id: &EntityDescriptionId,
    ) -> Result<DirectoryResult<GraphNode>, ServiceError> {
        tracing::debug!(
            code_system_version = %id.code_system_version,
            entity = %id.name,
            "resolving graph of entity"
        );
        let (scope, xml) = self.entity_document(id)?;
        let nodes = self.transform().graph_for_subject(&xml, &scope)?;
        Ok(DirectoryResult::from_complete(nodes))
    }

    // ========================================================================
    // Capabilities
    // ========================================================================

    /// Attributes a filter on children or parents may name.
    pub fn supported_model_attributes(&self) -> Vec<AttributeReference> {
        self.entity_references.attributes().references().cloned().collect()
    }

    pub fn supported_match_algorithms(&self) -> Vec<MatchAlgorithmReference> {
        self.entity_references.algorithms().references().cloned().collect()
    }

    fn transform(&self) -> AssociationTransform<'_> {
        AssociationTransform::new(self.urls.as_ref())
    }

    fn entity_document(&self, id: &EntityDescriptionId) -> Result<(Scope, String), ServiceError> {
        let version = &id.code_system_version;
        let unknown = || ServiceError::UnknownIdentifier {
            kind: "code system version",
            name: version.clone(),
        };
        let ontology_version_id = self.identity.ontology_version_id(version).ok_or_else(unknown)?;
        let code_system = self.identity.code_system_name(version).ok_or_else(unknown)?;

        let xml = fetched(
            || format!("entity `{}` of ontology version {ontology_version_id}", id.name),
            self.client.entity(&ontology_version_id, &id.name),
        )?;
        Ok((Scope::new(code_system, version.clone()), xml))
    }
}
