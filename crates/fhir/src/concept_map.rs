//! ConceptMap document: the NAMASTE to ICD-11 mapping table as FHIR groups.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use terminology_core::{Equivalence, TerminologyRegistry};

/// Wire model of the generated ConceptMap document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConceptMapDocument {
    pub resource_type: String,
    pub id: String,
    pub url: String,
    pub version: String,
    pub name: String,
    pub title: String,
    pub status: String,
    pub experimental: bool,
    /// Generation timestamp (RFC 3339). Advisory only.
    pub date: String,
    pub publisher: String,
    pub description: String,
    pub source_uri: String,
    pub target_uri: String,
    pub group: Vec<ConceptMapGroup>,
}

/// Mappings bucketed by their `(source, target)` system pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ConceptMapGroup {
    /// Source system wire name.
    pub source: String,
    /// Target system wire name.
    pub target: String,
    pub element: Vec<ConceptMapElement>,
}

/// One element per mapping-table entry; never merged across entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ConceptMapElement {
    pub code: String,
    pub target: Vec<ConceptMapTarget>,
}

/// Singleton target of an element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ConceptMapTarget {
    pub code: String,
    pub equivalence: Equivalence,
}

/// ConceptMap generation.
///
/// Zero-sized type used for namespacing; all methods are associated
/// functions.
pub struct ConceptMap;

impl ConceptMap {
    /// Render the registry's mapping table as a ConceptMap.
    ///
    /// Groups appear in first-occurrence order of their `(source, target)`
    /// system pair while scanning the table; elements keep mapping-table
    /// order within their group. Two mappings sharing a source code stay two
    /// elements — they are never merged into a multi-target element.
    pub fn generate(registry: &TerminologyRegistry) -> ConceptMapDocument {
        let mut groups: Vec<ConceptMapGroup> = Vec::new();

        for mapping in registry.mappings() {
            let source = mapping.source_system.as_wire();
            let target = mapping.target_system.as_wire();

            let index = match groups
                .iter()
                .position(|g| g.source == source && g.target == target)
            {
                Some(existing) => existing,
                None => {
                    groups.push(ConceptMapGroup {
                        source: source.into(),
                        target: target.into(),
                        element: Vec::new(),
                    });
                    groups.len() - 1
                }
            };

            groups[index].element.push(ConceptMapElement {
                code: mapping.source_code.clone(),
                target: vec![ConceptMapTarget {
                    code: mapping.target_code.clone(),
                    equivalence: mapping.equivalence,
                }],
            });
        }

        ConceptMapDocument {
            resource_type: "ConceptMap".into(),
            id: "namaste-to-icd11".into(),
            url: "http://example.org/fhir/ConceptMap/namaste-to-icd11".into(),
            version: crate::DOCUMENT_VERSION.into(),
            name: "NAMASTEToICD11Map".into(),
            title: "NAMASTE to ICD-11 Concept Map".into(),
            status: "active".into(),
            experimental: false,
            date: Utc::now().to_rfc3339(),
            publisher: crate::PUBLISHER.into(),
            description: "Mapping between NAMASTE codes and ICD-11 TM2/Biomedicine codes".into(),
            source_uri: crate::NAMASTE_CODE_SYSTEM_URL.into(),
            target_uri: crate::ICD11_MMS_URI.into(),
            group: groups,
        }
    }
}
