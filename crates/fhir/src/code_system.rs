//! CodeSystem document: a self-describing snapshot of the NAMASTE catalog.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use terminology_core::TerminologyRegistry;

/// Wire model of the generated CodeSystem document.
///
/// Field names and casing follow the FHIR JSON shape; the struct is strict so
/// a generated document can be parsed back for verification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CodeSystemDocument {
    pub resource_type: String,
    pub id: String,
    pub url: String,
    pub version: String,
    pub name: String,
    pub title: String,
    pub status: String,
    pub experimental: bool,
    /// Generation timestamp (RFC 3339). Advisory only; the rest of the
    /// document is deterministic for a given catalog.
    pub date: String,
    pub publisher: String,
    pub description: String,
    pub case_sensitive: bool,
    pub content: String,
    /// Total number of concepts; equals `concept.len()`.
    pub count: usize,
    pub concept: Vec<CodeSystemConcept>,
}

/// One concept entry per NAMASTE term.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CodeSystemConcept {
    pub code: String,
    pub display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    pub property: Vec<ConceptProperty>,
}

/// Concept property carrying the term's tradition as a string value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConceptProperty {
    pub code: String,
    pub value_string: String,
}

/// CodeSystem generation.
///
/// Zero-sized type used for namespacing; all methods are associated
/// functions.
pub struct CodeSystem;

impl CodeSystem {
    /// Render the registry's NAMASTE catalog as a complete CodeSystem.
    pub fn generate(registry: &TerminologyRegistry) -> CodeSystemDocument {
        let concepts: Vec<CodeSystemConcept> = registry
            .terms()
            .iter()
            .map(|term| CodeSystemConcept {
                code: term.code.clone(),
                display: term.display.clone(),
                definition: term.description.clone(),
                property: vec![ConceptProperty {
                    code: "system".into(),
                    value_string: term.tradition.as_str().into(),
                }],
            })
            .collect();

        CodeSystemDocument {
            resource_type: "CodeSystem".into(),
            id: "namaste-terminology".into(),
            url: crate::NAMASTE_CODE_SYSTEM_URL.into(),
            version: crate::DOCUMENT_VERSION.into(),
            name: "NAMASTETerminology".into(),
            title: "NAMASTE - National AYUSH Morbidity & Standardized Terminologies Electronic"
                .into(),
            status: "active".into(),
            experimental: false,
            date: Utc::now().to_rfc3339(),
            publisher: crate::PUBLISHER.into(),
            description: "Standardized terminologies for Ayurveda, Siddha, and Unani disorders"
                .into(),
            case_sensitive: true,
            content: "complete".into(),
            count: concepts.len(),
            concept: concepts,
        }
    }
}
