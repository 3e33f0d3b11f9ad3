//! Interfaces to the systems around the directory core.
//!
//! Transport, identifier translation and link construction live elsewhere;
//! services only see these traits. All calls are synchronous.

use url::Url;

use crate::error::ServiceError;

/// Fetches raw BioPortal REST documents.
pub trait BioportalClient: Send + Sync {
    /// `success.data.classBean` document for one entity.
    fn entity(&self, ontology_version_id: &str, entity_id: &str) -> anyhow::Result<String>;

    /// `success.data.list` of the latest version of every view.
    fn latest_views(&self) -> anyhow::Result<String>;

    /// `success.data.list` of every version of one ontology.
    fn ontology_versions(&self, ontology_id: &str) -> anyhow::Result<String>;
}

/// Translates between service-side names and BioPortal identifiers.
///
/// `None` means the name is not known to BioPortal.
pub trait IdentityConverter: Send + Sync {
    fn ontology_version_id(&self, code_system_version_name: &str) -> Option<String>;

    fn code_system_name(&self, code_system_version_name: &str) -> Option<String>;

    fn value_set_ontology_id(&self, value_set_name: &str) -> Option<String>;
}

/// Builds canonical links to resources served alongside the directory.
pub trait UrlConstructor: Send + Sync {
    fn entity_url(&self, code_system: &str, version: &str, entity_name: &str) -> String;

    fn code_system_version_url(&self, code_system: &str, version: &str) -> String;

    fn value_set_definition_url(&self, value_set: &str, definition: &str) -> String;
}

/// [`UrlConstructor`] rooted at a fixed server URL.
///
/// Every name becomes one percent-encoded path segment:
/// `{root}/codesystem/{cs}/version/{v}/entity/{cs}:{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrlConstructor {
    root: Url,
}

impl BaseUrlConstructor {
    pub fn new(server_root: &str) -> Result<Self, ServiceError> {
        let invalid = |reason: String| ServiceError::InvalidServerRoot {
            root: server_root.to_string(),
            reason,
        };
        let root = Url::parse(server_root).map_err(|err| invalid(err.to_string()))?;
        if root.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".to_string()));
        }
        Ok(Self { root })
    }

    fn build(&self, segments: &[&str]) -> String {
        let mut url = self.root.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }
}

impl UrlConstructor for BaseUrlConstructor {
    fn entity_url(&self, code_system: &str, version: &str, entity_name: &str) -> String {
        let scoped = format!("{code_system}:{entity_name}");
        self.build(&["codesystem", code_system, "version", version, "entity", &scoped])
    }

    fn code_system_version_url(&self, code_system: &str, version: &str) -> String {
        self.build(&["codesystem", code_system, "version", version])
    }

    fn value_set_definition_url(&self, value_set: &str, definition: &str) -> String {
        self.build(&["valueset", value_set, "definition", definition])
    }
}
