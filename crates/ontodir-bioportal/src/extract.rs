//! Relationship extraction from a `classBean` subject.
//!
//! ```text
//! <classBean>                      subject
//!   <id/> <fullId/> <label/>
//!   <relations>
//!     <entry>                      one relation
//!       <string>SubClass</string>  predicate label
//!       <list>
//!         <classBean>…</classBean> target, repeated
//!       </list>
//!     </entry>
//!   </relations>
//! </classBean>
//! ```
//!
//! A missing `relations` or `list` element contributes nothing. Relations are
//! yielded in document order of (entry, target) and turned into records by a
//! caller-chosen builder, see [`extract`].

use ontodir_tree::{select_by_child_text, Element, TransformError};

use crate::collaborator::UrlConstructor;
use crate::model::{
    AssociationDirectoryEntry, CodeSystemVersionReference, EntityDirectoryEntry, EntitySynopsis,
    GraphNode, PredicateReference, Scope, ScopedEntityName, UriAndEntityName,
};

pub const RELATIONS: &str = "relations";
pub const ENTRY: &str = "entry";
pub const PREDICATE_LABEL: &str = "string";
pub const TARGETS: &str = "list.classBean";
pub const ID: &str = "id";
pub const FULL_ID: &str = "fullId";
pub const LABEL: &str = "label";

/// One (subject, relation entry, target) triple found in a document.
#[derive(Debug, Clone, Copy)]
pub struct Relation<'d> {
    pub subject: &'d Element,
    pub entry: &'d Element,
    pub target: &'d Element,
}

impl<'d> Relation<'d> {
    pub fn predicate(&self) -> Option<&'d str> {
        self.entry.child_text(PREDICATE_LABEL)
    }
}

/// Identity and display fields of a `classBean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeanFields<'d> {
    pub about: &'d str,
    pub name: &'d str,
    pub label: Option<&'d str>,
}

impl<'d> BeanFields<'d> {
    /// `fullId` and `id` are required; `label` is not.
    pub fn read(bean: &'d Element) -> Result<Self, TransformError> {
        Ok(Self {
            about: bean.required_child_text(FULL_ID)?,
            name: bean.required_child_text(ID)?,
            label: bean.child_text(LABEL),
        })
    }
}

/// Every relation of `subject`, optionally only those labelled `predicate`.
///
/// A blank `predicate` selects every relation.
pub fn relations<'d>(subject: &'d Element, predicate: Option<&str>) -> Vec<Relation<'d>> {
    let Some(list) = subject.named_child(RELATIONS) else {
        return Vec::new();
    };

    let entries: Vec<&Element> = match predicate.filter(|p| !p.trim().is_empty()) {
        Some(predicate) => select_by_child_text(list.children_named(ENTRY), PREDICATE_LABEL, predicate),
        None => list.children_named(ENTRY).collect(),
    };

    let mut out = Vec::new();
    for entry in entries {
        let targets = entry.path_children(TARGETS);
        if targets.is_empty() {
            tracing::debug!(
                predicate = entry.child_text(PREDICATE_LABEL).unwrap_or_default(),
                "relation entry has no targets"
            );
        }
        out.extend(targets.into_iter().map(|target| Relation {
            subject,
            entry,
            target,
        }));
    }
    out
}

/// Builds one record per relation of `subject` with `build`.
///
/// The first builder failure aborts the extraction; no partial list is returned.
pub fn extract<'d, R, F>(
    subject: &'d Element,
    predicate: Option<&str>,
    build: F,
) -> Result<Vec<R>, TransformError>
where
    F: FnMut(&Relation<'d>) -> Result<R, TransformError>,
{
    relations(subject, predicate)
        .iter()
        .map(build)
        .collect()
}

// ============================================================================
// Record builders
// ============================================================================

/// Target-only record.
pub fn entity_entry(
    relation: &Relation<'_>,
    scope: &Scope,
    urls: &dyn UrlConstructor,
) -> Result<EntityDirectoryEntry, TransformError> {
    let target = BeanFields::read(relation.target)?;
    Ok(EntityDirectoryEntry {
        about: target.about.to_string(),
        name: ScopedEntityName {
            namespace: scope.code_system_name.clone(),
            name: target.name.to_string(),
        },
        designation: target.label.map(str::to_string),
        href: urls.entity_url(
            &scope.code_system_name,
            &scope.code_system_version_name,
            target.name,
        ),
    })
}

/// Full `subject --predicate--> target` record.
pub fn association_entry(
    relation: &Relation<'_>,
    scope: &Scope,
    urls: &dyn UrlConstructor,
) -> Result<AssociationDirectoryEntry, TransformError> {
    let subject = BeanFields::read(relation.subject)?;
    let target = BeanFields::read(relation.target)?;
    let predicate = relation
        .predicate()
        .ok_or_else(|| TransformError::missing_field(ENTRY, PREDICATE_LABEL))?;

    Ok(AssociationDirectoryEntry {
        subject: uri_and_name(&subject, scope, urls),
        predicate: PredicateReference {
            name: predicate.to_string(),
        },
        target: uri_and_name(&target, scope, urls),
        asserted_by: CodeSystemVersionReference {
            code_system: scope.code_system_name.clone(),
            version: scope.code_system_version_name.clone(),
            href: urls.code_system_version_url(
                &scope.code_system_name,
                &scope.code_system_version_name,
            ),
        },
    })
}

/// [`association_entry`] plus the target's synopsis.
pub fn graph_node(
    relation: &Relation<'_>,
    scope: &Scope,
    urls: &dyn UrlConstructor,
) -> Result<GraphNode, TransformError> {
    let association = association_entry(relation, scope, urls)?;
    let target = BeanFields::read(relation.target)?;
    let node_entity = EntitySynopsis {
        uri: association.target.uri.clone(),
        namespace: association.target.namespace.clone(),
        name: association.target.name.clone(),
        href: association.target.href.clone(),
        designation: target.label.map(str::to_string),
    };
    Ok(GraphNode {
        association,
        node_entity,
    })
}

fn uri_and_name(bean: &BeanFields<'_>, scope: &Scope, urls: &dyn UrlConstructor) -> UriAndEntityName {
    UriAndEntityName {
        uri: bean.about.to_string(),
        namespace: scope.code_system_name.clone(),
        name: bean.name.to_string(),
        href: urls.entity_url(
            &scope.code_system_name,
            &scope.code_system_version_name,
            bean.name,
        ),
    }
}
