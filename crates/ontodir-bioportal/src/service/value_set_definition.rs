use std::sync::Arc;

use ontodir_directory::{
    AttributeReference, DirectoryResult, FilterComponent, KnownReferences, MatchAlgorithmReference,
    Page, Query,
};
use serde::{Deserialize, Serialize};

use super::{fetched, restricted};
use crate::collaborator::{BioportalClient, IdentityConverter, UrlConstructor};
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::model::ValueSetDefinitionDirectoryEntry;
use crate::references::value_set_definition_references;
use crate::transform::ValueSetDefinitionTransform;

/// Narrows value set definitions to those of one value set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueSetDefinitionRestrictions {
    pub value_set: Option<String>,
}

impl ValueSetDefinitionRestrictions {
    pub fn of_value_set(name: impl Into<String>) -> Self {
        Self {
            value_set: Some(name.into()),
        }
    }

    /// The named value set, if any. Blank names select every value set.
    pub fn value_set(&self) -> Option<&str> {
        self.value_set
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}

pub struct ValueSetDefinitionQueryService {
    client: Arc<dyn BioportalClient>,
    identity: Arc<dyn IdentityConverter>,
    urls: Arc<dyn UrlConstructor>,
    references: Arc<KnownReferences<ValueSetDefinitionDirectoryEntry>>,
    default_page: Page,
}

impl ValueSetDefinitionQueryService {
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
            references: Arc::new(value_set_definition_references()),
            default_page: config.default_page,
        }
    }

    pub fn resource_summaries(
        &self,
        query: Option<&Query>,
        filter: Option<&FilterComponent>,
        restrictions: &ValueSetDefinitionRestrictions,
        page: Option<Page>,
    ) -> Result<DirectoryResult<ValueSetDefinitionDirectoryEntry>, ServiceError> {
        let page = page.unwrap_or(self.default_page);
        tracing::debug!(
            value_set = restrictions.value_set().unwrap_or("*"),
            start = page.start,
            max_to_return = page.max_to_return,
            "resolving value set definitions"
        );
        let candidates = self.definitions(restrictions)?;
        Ok(restricted(candidates, &self.references, query, filter)?
            .page(page)
            .resolve())
    }

    /// Reads the same listing as [`resource_summaries`](Self::resource_summaries).
    pub fn count(
        &self,
        query: Option<&Query>,
        filter: Option<&FilterComponent>,
        restrictions: &ValueSetDefinitionRestrictions,
    ) -> Result<usize, ServiceError> {
        tracing::debug!(
            value_set = restrictions.value_set().unwrap_or("*"),
            "counting value set definitions"
        );
        let candidates = self.definitions(restrictions)?;
        Ok(restricted(candidates, &self.references, query, filter)?.count())
    }

    pub fn supported_model_attributes(&self) -> Vec<AttributeReference> {
        self.references.attributes().references().cloned().collect()
    }

    pub fn supported_match_algorithms(&self) -> Vec<MatchAlgorithmReference> {
        self.references.algorithms().references().cloned().collect()
    }

    fn definitions(
        &self,
        restrictions: &ValueSetDefinitionRestrictions,
    ) -> Result<Vec<ValueSetDefinitionDirectoryEntry>, ServiceError> {
        let xml = match restrictions.value_set() {
            Some(value_set) => {
                let ontology_id = self.identity.value_set_ontology_id(value_set).ok_or_else(|| {
                    ServiceError::UnknownIdentifier {
                        kind: "value set",
                        name: value_set.to_string(),
                    }
                })?;
                fetched(
                    || format!("versions of ontology {ontology_id}"),
                    self.client.ontology_versions(&ontology_id),
                )?
            }
            None => fetched(|| "latest views".to_string(), self.client.latest_views())?,
        };
        Ok(ValueSetDefinitionTransform::new(self.urls.as_ref()).value_set_definitions(&xml)?)
    }
}
