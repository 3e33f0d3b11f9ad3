use std::path::Path;

use ontodir_directory::Page;
use serde::{Deserialize, Serialize};

use crate::collaborator::BaseUrlConstructor;
use crate::error::ServiceError;

// ============================================================================
// Service Configuration
// ============================================================================

/// Settings shared by the query services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    /// Root of the links placed in `href` fields
    pub server_root: String,
    /// Page used when a caller does not ask for one
    pub default_page: Page,
    /// Relation label that points at an entity's children
    pub children_predicate: String,
    /// Relation label that points at an entity's parents
    pub parents_predicate: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server_root: "http://localhost:8080/ontodir".to_string(),
            default_page: Page::default(),
            children_predicate: "SubClass".to_string(),
            parents_predicate: "SuperClass".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ServiceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.as_ref().display(), "service configuration loaded");
        Ok(config)
    }

    pub fn url_constructor(&self) -> Result<BaseUrlConstructor, ServiceError> {
        BaseUrlConstructor::new(&self.server_root)
    }
}
