//! FHIR wire/boundary support for the terminology registry.
//!
//! This crate provides **wire models** and **generators** for the two
//! terminology-exchange documents the service publishes:
//! - a CodeSystem snapshot of the NAMASTE catalog
//! - a ConceptMap of the NAMASTE to ICD-11 mapping table
//!
//! This crate focuses on:
//! - FHIR semantic alignment (without FHIR JSON/REST transport)
//! - serialisation into the published JSON shapes
//! - translation from registry data into wire structs
//!
//! Generation is deterministic for a given catalog apart from the `date`
//! metadata field, which records generation time and is advisory only — it
//! must not be folded into any content hash.

pub mod code_system;
pub mod concept_map;

// Re-export facades
pub use code_system::CodeSystem;
pub use concept_map::ConceptMap;

// Re-export wire documents
pub use code_system::{CodeSystemConcept, CodeSystemDocument, ConceptProperty};
pub use concept_map::{ConceptMapDocument, ConceptMapElement, ConceptMapGroup, ConceptMapTarget};

/// Canonical URL of the published NAMASTE CodeSystem.
pub const NAMASTE_CODE_SYSTEM_URL: &str = "http://example.org/fhir/CodeSystem/namaste";

/// URI of the WHO ICD-11 MMS release targeted by the concept map.
pub const ICD11_MMS_URI: &str = "http://id.who.int/icd/release/11/mms";

/// Publisher recorded on both documents.
pub const PUBLISHER: &str = "Ministry of AYUSH, Government of India";

/// Version stamped on both documents.
pub const DOCUMENT_VERSION: &str = "1.0.0";
