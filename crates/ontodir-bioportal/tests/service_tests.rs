//! Query services over in-memory collaborators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use ontodir_bioportal::{
    AssociationQueryService, BaseUrlConstructor, BioportalClient, EntityDescriptionId,
    IdentityConverter, ServiceConfig, ServiceError, ValueSetDefinitionQueryService,
    ValueSetDefinitionRestrictions,
};
use ontodir_directory::{
    AttributeReference, FilterComponent, MatchAlgorithmReference, Page, Query, RestrictionError,
};
use ontodir_tree::TransformError;

// ============================================================================
// Fakes
// ============================================================================

#[derive(Default)]
struct FakeClient {
    entities: HashMap<(String, String), String>,
    latest_views: Option<String>,
    versions: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeClient {
    fn with_entity(mut self, ontology_version_id: &str, entity_id: &str, xml: &str) -> Self {
        self.entities.insert(
            (ontology_version_id.to_string(), entity_id.to_string()),
            xml.to_string(),
        );
        self
    }

    fn with_latest_views(mut self, xml: &str) -> Self {
        self.latest_views = Some(xml.to_string());
        self
    }

    fn with_versions(mut self, ontology_id: &str, xml: &str) -> Self {
        self.versions.insert(ontology_id.to_string(), xml.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl BioportalClient for FakeClient {
    fn entity(&self, ontology_version_id: &str, entity_id: &str) -> anyhow::Result<String> {
        self.record(format!("entity {ontology_version_id} {entity_id}"));
        self.entities
            .get(&(ontology_version_id.to_string(), entity_id.to_string()))
            .cloned()
            .ok_or_else(|| anyhow!("404 Not Found"))
    }

    fn latest_views(&self) -> anyhow::Result<String> {
        self.record("latest views".to_string());
        self.latest_views.clone().ok_or_else(|| anyhow!("503 Service Unavailable"))
    }

    fn ontology_versions(&self, ontology_id: &str) -> anyhow::Result<String> {
        self.record(format!("versions {ontology_id}"));
        self.versions
            .get(ontology_id)
            .cloned()
            .ok_or_else(|| anyhow!("404 Not Found"))
    }
}

struct FakeIdentity;

impl IdentityConverter for FakeIdentity {
    fn ontology_version_id(&self, code_system_version_name: &str) -> Option<String> {
        (code_system_version_name == "CL-1.2").then(|| "44103".to_string())
    }

    fn code_system_name(&self, code_system_version_name: &str) -> Option<String> {
        (code_system_version_name == "CL-1.2").then(|| "CL".to_string())
    }

    fn value_set_ontology_id(&self, value_set_name: &str) -> Option<String> {
        (value_set_name == "CL").then(|| "1134".to_string())
    }
}

// ============================================================================
// Documents
// ============================================================================

const CELL: &str = r#"<success><data><classBean>
  <id>Cell</id>
  <fullId>http://purl.obolibrary.org/obo/CL_0000000</fullId>
  <label>cell</label>
  <relations>
    <entry>
      <string>SubClass</string>
      <list>
        <classBean><id>BloodCell</id><fullId>http://x/BloodCell</fullId><label>Blood Cell</label></classBean>
        <classBean><id>StemCell</id><fullId>http://x/StemCell</fullId><label>Stem cell</label></classBean>
        <classBean><id>Plasma</id><fullId>http://x/Plasma</fullId><label>Plasma</label></classBean>
      </list>
    </entry>
    <entry>
      <string>SuperClass</string>
      <list>
        <classBean><id>NativeCell</id><fullId>http://x/NativeCell</fullId></classBean>
      </list>
    </entry>
  </relations>
</classBean></data></success>"#;

fn listing(beans: &[(&str, &str, &str)]) -> String {
    let beans: String = beans
        .iter()
        .map(|(id, abbreviation, version)| {
            format!(
                "<ontologyBean><id>{id}</id><abbreviation>{abbreviation}</abbreviation>\
                 <displayLabel>{abbreviation} ontology</displayLabel>\
                 <versionNumber>{version}</versionNumber></ontologyBean>"
            )
        })
        .collect();
    format!("<success><data><list>{beans}</list></data></success>")
}

fn cell() -> EntityDescriptionId {
    EntityDescriptionId::new("CL-1.2", "Cell")
}

fn association_service(client: Arc<FakeClient>) -> AssociationQueryService {
    let config = ServiceConfig::default();
    let urls = config.url_constructor().expect("default root");
    AssociationQueryService::new(client, Arc::new(FakeIdentity), Arc::new(urls), &config)
}

fn value_set_service(client: Arc<FakeClient>) -> ValueSetDefinitionQueryService {
    let config = ServiceConfig {
        default_page: Page::new(0, 2),
        ..ServiceConfig::default()
    };
    let urls = BaseUrlConstructor::new(&config.server_root).expect("default root");
    ValueSetDefinitionQueryService::new(client, Arc::new(FakeIdentity), Arc::new(urls), &config)
}

fn resource_name(value: &str, algorithm: MatchAlgorithmReference) -> FilterComponent {
    FilterComponent::new(AttributeReference::RESOURCE_NAME, algorithm, value)
}

// ============================================================================
// Associations
// ============================================================================

#[test]
fn test_children_of_entity_uses_the_children_predicate() {
    let client = Arc::new(FakeClient::default().with_entity("44103", "Cell", CELL));
    let service = association_service(client.clone());

    let children = service
        .children_of_entity(None, None, None, &cell())
        .expect("children");
    let names: Vec<&str> = children.entries().iter().map(|e| e.resource_name()).collect();
    assert_eq!(names, vec!["BloodCell", "StemCell", "Plasma"]);
    assert!(children.is_complete());
    assert_eq!(
        children.entries()[0].href,
        "http://localhost:8080/ontodir/codesystem/CL/version/CL-1.2/entity/CL:BloodCell"
    );
    assert_eq!(client.calls(), vec!["entity 44103 Cell".to_string()]);
}

#[test]
fn test_parents_of_entity_uses_the_parents_predicate() {
    let client = Arc::new(FakeClient::default().with_entity("44103", "Cell", CELL));
    let service = association_service(client);

    let parents = service
        .parents_of_entity(None, None, None, &cell())
        .expect("parents");
    assert_eq!(parents.len(), 1);
    assert_eq!(parents.entries()[0].about, "http://x/NativeCell");
    assert_eq!(parents.entries()[0].designation, None);
}

#[test]
fn test_children_filter_then_page() {
    let client = Arc::new(FakeClient::default().with_entity("44103", "Cell", CELL));
    let service = association_service(client);
    let filter = FilterComponent::new(
        AttributeReference::DESIGNATION,
        MatchAlgorithmReference::CONTAINS,
        "cell",
    );

    let first = service
        .children_of_entity(None, Some(&filter), Some(Page::new(0, 1)), &cell())
        .expect("first page");
    assert_eq!(first.entries()[0].resource_name(), "BloodCell");
    assert!(first.has_more());
    assert_eq!(first.total(), 2);

    let count = service
        .count_children_of_entity(None, Some(&filter), &cell())
        .expect("count");
    assert_eq!(count, first.total());
}

#[test]
fn test_query_and_filter_compose() {
    let client = Arc::new(FakeClient::default().with_entity("44103", "Cell", CELL));
    let service = association_service(client);
    let query = Query::new([resource_name("cell", MatchAlgorithmReference::CONTAINS)]);
    let filter = resource_name("stem", MatchAlgorithmReference::STARTS_WITH);

    let result = service
        .children_of_entity(Some(&query), Some(&filter), None, &cell())
        .expect("children");
    assert_eq!(result.len(), 1);
    assert_eq!(result.entries()[0].resource_name(), "StemCell");
    assert_eq!(
        service
            .count_parents_of_entity(Some(&query), None, &cell())
            .expect("count"),
        1
    );
}

#[test]
fn test_unknown_filter_attribute_is_rejected() {
    let client = Arc::new(FakeClient::default().with_entity("44103", "Cell", CELL));
    let service = association_service(client);
    let filter = FilterComponent::new(
        AttributeReference::RESOURCE_SYNOPSIS,
        MatchAlgorithmReference::EXACT_MATCH,
        "x",
    );

    let err = service
        .children_of_entity(None, Some(&filter), None, &cell())
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Restriction(RestrictionError::UnknownAttribute(_))
    ));
}

#[test]
fn test_unknown_code_system_version_is_reported() {
    let client = Arc::new(FakeClient::default());
    let service = association_service(client.clone());

    let err = service
        .children_of_entity(None, None, None, &EntityDescriptionId::new("GO-9", "Cell"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::UnknownIdentifier { kind: "code system version", .. }
    ));
    assert!(client.calls().is_empty());
}

#[test]
fn test_fetch_failure_keeps_the_resource_and_cause() {
    let client = Arc::new(FakeClient::default());
    let service = association_service(client);

    let err = service
        .count_children_of_entity(None, None, &cell())
        .unwrap_err();
    match err {
        ServiceError::Fetch { resource, source } => {
            assert!(resource.contains("Cell"));
            assert_eq!(source.to_string(), "404 Not Found");
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[test]
fn test_malformed_entity_document_is_a_transform_error() {
    let client = Arc::new(FakeClient::default().with_entity("44103", "Cell", "<success><data>"));
    let service = association_service(client);

    let err = service
        .children_of_entity(None, None, None, &cell())
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Transform(TransformError::Malformed { .. })
    ));
}

#[test]
fn test_source_of_associations_without_restrictions_is_complete() {
    let client = Arc::new(FakeClient::default().with_entity("44103", "Cell", CELL));
    let service = association_service(client);

    let result = service
        .source_of_associations_of_entity(None, None, None, &cell())
        .expect("associations");
    assert_eq!(result.len(), 4);
    assert!(result.is_complete());
    assert!(result
        .entries()
        .iter()
        .all(|a| a.subject.name == "Cell" && a.asserted_by.version == "CL-1.2"));
}

#[test]
fn test_source_of_associations_filters_by_target() {
    let client = Arc::new(FakeClient::default().with_entity("44103", "Cell", CELL));
    let service = association_service(client);
    let filter = resource_name("Plasma", MatchAlgorithmReference::EXACT_MATCH);

    let result = service
        .source_of_associations_of_entity(None, Some(&filter), None, &cell())
        .expect("associations");
    assert_eq!(result.len(), 1);
    assert_eq!(result.entries()[0].target.uri, "http://x/Plasma");
    assert_eq!(result.entries()[0].predicate.name, "SubClass");
}

#[test]
fn test_graph_of_entity_has_one_node_per_association() {
    let client = Arc::new(FakeClient::default().with_entity("44103", "Cell", CELL));
    let service = association_service(client);

    let graph = service.graph_of_entity(&cell()).expect("graph");
    assert_eq!(graph.len(), 4);
    assert_eq!(
        graph.entries()[1].node_entity.designation.as_deref(),
        Some("Stem cell")
    );
    assert_eq!(graph.entries()[3].node_entity.designation, None);
}

#[test]
fn test_association_service_advertises_its_references() {
    let service = association_service(Arc::new(FakeClient::default()));
    assert_eq!(
        service.supported_model_attributes(),
        vec![
            AttributeReference::RESOURCE_NAME,
            AttributeReference::ABOUT,
            AttributeReference::DESIGNATION,
        ]
    );
    assert_eq!(
        service.supported_match_algorithms(),
        vec![
            MatchAlgorithmReference::EXACT_MATCH,
            MatchAlgorithmReference::CONTAINS,
            MatchAlgorithmReference::STARTS_WITH,
        ]
    );
}

// ============================================================================
// Value set definitions
// ============================================================================

#[test]
fn test_summaries_and_count_read_the_same_listing() {
    let views = listing(&[("1", "CL", "1.2"), ("2", "PO", "3"), ("3", "GO", "7")]);
    let client = Arc::new(FakeClient::default().with_latest_views(&views));
    let service = value_set_service(client.clone());
    let none = ValueSetDefinitionRestrictions::default();

    let summaries = service
        .resource_summaries(None, None, &none, None)
        .expect("summaries");
    let count = service.count(None, None, &none).expect("count");

    assert_eq!(summaries.len(), 2);
    assert!(summaries.has_more());
    assert_eq!(summaries.total(), 3);
    assert_eq!(count, 3);
    assert_eq!(
        client.calls(),
        vec!["latest views".to_string(), "latest views".to_string()]
    );
}

#[test]
fn test_named_value_set_reads_its_versions() {
    let versions = listing(&[("10", "CL", "1.1"), ("11", "CL", "1.2")]);
    let client = Arc::new(FakeClient::default().with_versions("1134", &versions));
    let service = value_set_service(client.clone());
    let restrictions = ValueSetDefinitionRestrictions::of_value_set("CL");
    let filter = resource_name("CL-1.2", MatchAlgorithmReference::EXACT_MATCH);

    let summaries = service
        .resource_summaries(None, Some(&filter), &restrictions, Some(Page::default()))
        .expect("summaries");
    assert_eq!(summaries.len(), 1);
    assert_eq!(
        summaries.entries()[0].about,
        "http://bioportal.bioontology.org/ontologies/11"
    );
    assert_eq!(service.count(None, Some(&filter), &restrictions).expect("count"), 1);
    assert_eq!(client.calls(), vec!["versions 1134".to_string(), "versions 1134".to_string()]);
}

#[test]
fn test_blank_value_set_means_every_value_set() {
    let views = listing(&[("1", "CL", "1.2")]);
    let client = Arc::new(FakeClient::default().with_latest_views(&views));
    let service = value_set_service(client.clone());

    let count = service
        .count(None, None, &ValueSetDefinitionRestrictions::of_value_set("  "))
        .expect("count");
    assert_eq!(count, 1);
    assert_eq!(client.calls(), vec!["latest views".to_string()]);
}

#[test]
fn test_error_reply_is_not_zero_value_sets() {
    let reply = "<success><errorStatus>boom</errorStatus></success>";
    let client = Arc::new(FakeClient::default().with_latest_views(reply));
    let service = value_set_service(client);
    let none = ValueSetDefinitionRestrictions::default();

    let err = service.count(None, None, &none).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Transform(TransformError::MissingPath { .. })
    ));
    let err = service.resource_summaries(None, None, &none, None).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Transform(TransformError::MissingPath { .. })
    ));
}

#[test]
fn test_unknown_value_set_is_reported() {
    let service = value_set_service(Arc::new(FakeClient::default()));
    let err = service
        .count(None, None, &ValueSetDefinitionRestrictions::of_value_set("XYZ"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::UnknownIdentifier { kind: "value set", .. }
    ));
}

#[test]
fn test_synopsis_filter_matches_display_label() {
    let views = listing(&[("1", "CL", "1.2"), ("2", "PO", "3")]);
    let client = Arc::new(FakeClient::default().with_latest_views(&views));
    let service = value_set_service(client);
    let filter = FilterComponent::new(
        AttributeReference::RESOURCE_SYNOPSIS,
        MatchAlgorithmReference::CONTAINS,
        "po ONTOLOGY",
    );

    let summaries = service
        .resource_summaries(None, Some(&filter), &ValueSetDefinitionRestrictions::default(), None)
        .expect("summaries");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries.entries()[0].value_set_name, "PO");
    assert!(service
        .supported_model_attributes()
        .contains(&AttributeReference::RESOURCE_SYNOPSIS));
}
