//! # Terminology Core
//!
//! Read-only terminology registry for AYUSH clinical coding.
//!
//! This crate holds the reference catalogs and answers the three questions the
//! rest of the system asks of them:
//! - "what matches this text" — [`TerminologyRegistry::search`]
//! - "what exactly is this code" — [`TerminologyRegistry::get_by_code`]
//! - "what does this code correspond to elsewhere" —
//!   [`TerminologyRegistry::translate`] and [`TerminologyRegistry::mappings_for`]
//!
//! The registry is immutable reference data: it is constructed once at process
//! startup (from the bundled catalog or a JSON file) and shared by reference.
//! There is no mutation API, so any number of readers may call any operation
//! concurrently without coordination.
//!
//! **No API concerns**: HTTP serving, OpenAPI documentation and FHIR document
//! rendering belong in `api-rest` and `fhir`.

pub mod config;
pub mod data;
pub mod model;
pub mod registry;
pub mod system;

pub use config::RegistryConfig;
pub use model::{
    ClassificationCode, CodedTerm, ConceptMapping, CrossReferences, Equivalence, ResolvedMappings,
    SearchHit, Translation,
};
pub use registry::{IntegrityIssue, TerminologyRegistry};
pub use system::{CodingSystem, Icd11Module, SystemFamily, SystemFilter, Tradition};

/// Errors returned by the terminology core.
///
/// The registry's lookup operations never fail — "not found" is an empty or
/// absent result, not an error. These variants cover precondition violations
/// (unrecognised coding-system names) and catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum TerminologyError {
    #[error("unknown coding system: {0:?}")]
    UnknownSystem(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read catalog file: {0}")]
    CatalogRead(std::io::Error),
    #[error("failed to parse catalog file: {0}")]
    CatalogParse(serde_json::Error),
}

pub type TerminologyResult<T> = std::result::Result<T, TerminologyError>;
