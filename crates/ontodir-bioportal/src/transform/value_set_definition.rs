use ontodir_tree::{Document, Element, TransformError};

use super::{ONTOLOGY_BEAN, ONTOLOGY_LIST};
use crate::collaborator::UrlConstructor;
use crate::model::ValueSetDefinitionDirectoryEntry;

const ID: &str = "id";
const ABBREVIATION: &str = "abbreviation";
const VERSION_NUMBER: &str = "versionNumber";
const DISPLAY_LABEL: &str = "displayLabel";
const DESCRIPTION: &str = "description";

/// Base of the `about` URI given to each ontology version.
pub const ONTOLOGY_URI_BASE: &str = "http://bioportal.bioontology.org/ontologies/";

/// Value set definition summaries from `ontologyBean` listings.
///
/// Latest views and the versions of one ontology share this listing shape,
/// so one transform serves both.
#[derive(Clone, Copy)]
pub struct ValueSetDefinitionTransform<'u> {
    urls: &'u dyn UrlConstructor,
}

impl<'u> ValueSetDefinitionTransform<'u> {
    pub fn new(urls: &'u dyn UrlConstructor) -> Self {
        Self { urls }
    }

    /// One entry per `ontologyBean`, in document order. An empty listing is
    /// an empty result; a response without the listing is an error.
    pub fn value_set_definitions(
        &self,
        xml: &str,
    ) -> Result<Vec<ValueSetDefinitionDirectoryEntry>, TransformError> {
        let doc = Document::parse(xml)?;
        doc.require_path(ONTOLOGY_LIST)?
            .children_named(ONTOLOGY_BEAN)
            .map(|bean| self.entry(bean))
            .collect()
    }

    fn entry(&self, bean: &Element) -> Result<ValueSetDefinitionDirectoryEntry, TransformError> {
        let id = bean.required_child_text(ID)?;
        let abbreviation = bean.required_child_text(ABBREVIATION)?;
        let version = bean.required_child_text(VERSION_NUMBER)?;
        let resource_name = format!("{abbreviation}-{version}");

        let synopsis = bean
            .child_text(DESCRIPTION)
            .filter(|text| !text.trim().is_empty())
            .or_else(|| bean.child_text(DISPLAY_LABEL))
            .map(str::to_string);

        Ok(ValueSetDefinitionDirectoryEntry {
            about: format!("{ONTOLOGY_URI_BASE}{id}"),
            href: self.urls.value_set_definition_url(abbreviation, &resource_name),
            resource_name,
            value_set_name: abbreviation.to_string(),
            synopsis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::BaseUrlConstructor;

    const VIEWS: &str = r#"<success><data><list>
  <ontologyBean>
    <id>44103</id>
    <ontologyId>1134</ontologyId>
    <abbreviation>CL</abbreviation>
    <displayLabel>Cell type</displayLabel>
    <versionNumber>1.2</versionNumber>
    <description>The cell type ontology</description>
  </ontologyBean>
  <ontologyBean>
    <id>44104</id>
    <ontologyId>1135</ontologyId>
    <abbreviation>PO</abbreviation>
    <displayLabel>Plant ontology</displayLabel>
    <versionNumber>3</versionNumber>
  </ontologyBean>
</list></data></success>"#;

    fn urls() -> BaseUrlConstructor {
        BaseUrlConstructor::new("http://localhost/ontodir").expect("root")
    }

    #[test]
    fn builds_one_entry_per_ontology_bean() {
        let urls = urls();
        let entries = ValueSetDefinitionTransform::new(&urls)
            .value_set_definitions(VIEWS)
            .expect("definitions");
        assert_eq!(entries.len(), 2);

        let cl = &entries[0];
        assert_eq!(cl.about, "http://bioportal.bioontology.org/ontologies/44103");
        assert_eq!(cl.resource_name, "CL-1.2");
        assert_eq!(cl.value_set_name, "CL");
        assert_eq!(cl.synopsis.as_deref(), Some("The cell type ontology"));
        assert_eq!(cl.href, "http://localhost/ontodir/valueset/CL/definition/CL-1.2");
    }

    #[test]
    fn synopsis_falls_back_to_display_label() {
        let urls = urls();
        let entries = ValueSetDefinitionTransform::new(&urls)
            .value_set_definitions(VIEWS)
            .expect("definitions");
        assert_eq!(entries[1].synopsis.as_deref(), Some("Plant ontology"));
    }

    #[test]
    fn empty_listing_is_empty() {
        let urls = urls();
        let entries = ValueSetDefinitionTransform::new(&urls)
            .value_set_definitions("<success><data><list/></data></success>")
            .expect("definitions");
        assert!(entries.is_empty());
    }

    #[test]
    fn error_reply_without_listing_is_rejected() {
        let urls = urls();
        let err = ValueSetDefinitionTransform::new(&urls)
            .value_set_definitions("<success><errorStatus>boom</errorStatus></success>")
            .unwrap_err();
        assert_eq!(
            err,
            TransformError::MissingPath {
                path: ONTOLOGY_LIST.to_string()
            }
        );

        let err = ValueSetDefinitionTransform::new(&urls)
            .value_set_definitions("<errorStatus><shortMessage>boom</shortMessage></errorStatus>")
            .unwrap_err();
        assert!(matches!(err, TransformError::MissingPath { .. }));
    }

    #[test]
    fn bean_without_version_number_is_rejected() {
        let urls = urls();
        let err = ValueSetDefinitionTransform::new(&urls)
            .value_set_definitions(
                "<success><data><list><ontologyBean><id>1</id><abbreviation>X</abbreviation>\
                 </ontologyBean></list></data></success>",
            )
            .unwrap_err();
        assert_eq!(err, TransformError::missing_field("ontologyBean", VERSION_NUMBER));
    }
}
