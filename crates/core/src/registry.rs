//! The terminology registry: catalog storage and the four read operations.

use crate::model::{
    ClassificationCode, CodedTerm, ConceptMapping, CrossReferences, ResolvedMappings, SearchHit,
    Translation,
};
use crate::system::{CodingSystem, SystemFamily};
use crate::{TerminologyError, TerminologyResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Immutable registry over the NAMASTE and ICD-11 catalogs.
///
/// Constructed once at startup and shared by reference (typically behind an
/// `Arc`). All operations take `&self`, do synchronous in-memory scans and
/// never block, so concurrent readers need no coordination.
#[derive(Clone, Debug)]
pub struct TerminologyRegistry {
    terms: Vec<CodedTerm>,
    classifications: Vec<ClassificationCode>,
    mappings: Vec<ConceptMapping>,
}

/// On-disk catalog shape accepted by [`TerminologyRegistry::from_json_file`].
///
/// This is the whole-data-set replacement format: the registry is never
/// patched incrementally, only rebuilt from a complete file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CatalogFile {
    namaste_terms: Vec<CodedTerm>,
    icd11_codes: Vec<ClassificationCode>,
    concept_mappings: Vec<ConceptMapping>,
}

/// A data-integrity defect found in loaded catalogs.
///
/// These are reported at startup and logged; they do not stop the service,
/// because every lookup path degrades to "not found" for the affected entry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrityIssue {
    #[error("duplicate NAMASTE code: {0}")]
    DuplicateTermCode(String),
    #[error("duplicate ICD-11 code: {0}")]
    DuplicateClassificationCode(String),
    #[error("mapping source {code} does not resolve in {system}")]
    DanglingMappingSource { code: String, system: CodingSystem },
    #[error("mapping target {code} does not resolve in {system}")]
    DanglingMappingTarget { code: String, system: CodingSystem },
}

impl TerminologyRegistry {
    /// Create a registry from already-loaded catalogs.
    pub fn new(
        terms: Vec<CodedTerm>,
        classifications: Vec<ClassificationCode>,
        mappings: Vec<ConceptMapping>,
    ) -> Self {
        Self {
            terms,
            classifications,
            mappings,
        }
    }

    /// The compiled-in reference catalog.
    pub fn bundled() -> Self {
        Self::new(
            crate::data::namaste_terms(),
            crate::data::icd11_codes(),
            crate::data::concept_mappings(),
        )
    }

    /// Load a complete catalog replacement from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`TerminologyError::CatalogRead`] if the file cannot be read and
    /// [`TerminologyError::CatalogParse`] if it does not match the catalog
    /// schema.
    pub fn from_json_file(path: &Path) -> TerminologyResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(TerminologyError::CatalogRead)?;
        let file: CatalogFile =
            serde_json::from_str(&contents).map_err(TerminologyError::CatalogParse)?;
        Ok(Self::new(
            file.namaste_terms,
            file.icd11_codes,
            file.concept_mappings,
        ))
    }

    pub fn terms(&self) -> &[CodedTerm] {
        &self.terms
    }

    pub fn classifications(&self) -> &[ClassificationCode] {
        &self.classifications
    }

    pub fn mappings(&self) -> &[ConceptMapping] {
        &self.mappings
    }

    /// Case-insensitive substring search over both catalogs.
    ///
    /// Matches against `display`, `code` and `description`. Result order is
    /// catalog-scan order: every NAMASTE hit first, then every ICD-11 hit, and
    /// the concatenation is truncated to `limit` — a large number of NAMASTE
    /// hits can therefore starve ICD-11 hits from a small window. Results are
    /// not relevance-ranked.
    ///
    /// A blank query returns an empty list, never the full catalog.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();

        for term in &self.terms {
            if contains_insensitive(&term.display, &needle)
                || contains_insensitive(&term.code, &needle)
                || term
                    .description
                    .as_deref()
                    .is_some_and(|d| contains_insensitive(d, &needle))
            {
                results.push(hit_from_term(term));
            }
        }

        for entry in &self.classifications {
            if contains_insensitive(&entry.display, &needle)
                || contains_insensitive(&entry.code, &needle)
                || entry
                    .description
                    .as_deref()
                    .is_some_and(|d| contains_insensitive(d, &needle))
            {
                results.push(hit_from_classification(entry));
            }
        }

        results.truncate(limit);
        results
    }

    /// Exact lookup of a code within the catalog selected by `system`.
    ///
    /// The system is a catalog selector, not a sub-system constraint: any
    /// NAMASTE-family system searches the whole NAMASTE catalog, and the hit
    /// reports the entry's own sub-system. There is no fallback across
    /// catalogs — a NAMASTE code queried under an ICD-11 system is not found.
    pub fn get_by_code(&self, code: &str, system: CodingSystem) -> Option<SearchHit> {
        match system.family() {
            SystemFamily::Namaste => self
                .terms
                .iter()
                .find(|term| term.code == code)
                .map(hit_from_term),
            SystemFamily::Icd11 => self
                .classifications
                .iter()
                .find(|entry| entry.code == code)
                .map(hit_from_classification),
            SystemFamily::SnomedCt => None,
        }
    }

    /// Translate a code into another coding system via the mapping table.
    ///
    /// Records come back in mapping-table order. A mapping whose target code
    /// does not resolve in the target catalog is skipped rather than emitted
    /// without a display; an empty result means "no mapping", not an error.
    pub fn translate(
        &self,
        source_code: &str,
        source_system: CodingSystem,
        target_system: CodingSystem,
    ) -> Vec<Translation> {
        let mut results = Vec::new();

        for mapping in &self.mappings {
            if mapping.source_code != source_code
                || mapping.source_system != source_system
                || mapping.target_system != target_system
            {
                continue;
            }

            match self.get_by_code(&mapping.target_code, mapping.target_system) {
                Some(target) => results.push(Translation {
                    source_code: mapping.source_code.clone(),
                    source_system: mapping.source_system,
                    target_code: mapping.target_code.clone(),
                    target_system: mapping.target_system,
                    target_display: target.display,
                    equivalence: mapping.equivalence,
                }),
                None => {
                    tracing::debug!(
                        code = %mapping.target_code,
                        system = %mapping.target_system,
                        "skipping mapping with unresolvable target"
                    );
                }
            }
        }

        results
    }

    /// Resolve a NAMASTE term's ICD-11 cross-references into full entries.
    ///
    /// Empty for non-NAMASTE systems, unknown codes and absent or
    /// unresolvable cross-references — never an error.
    pub fn mappings_for(&self, code: &str, system: CodingSystem) -> ResolvedMappings {
        if system.family() != SystemFamily::Namaste {
            return ResolvedMappings::default();
        }

        let Some(term) = self.terms.iter().find(|term| term.code == code) else {
            return ResolvedMappings::default();
        };

        ResolvedMappings {
            icd11_tm2: term
                .icd11_tm2
                .as_deref()
                .and_then(|target| self.get_by_code(target, CodingSystem::Icd11Tm2)),
            icd11_biomedicine: term
                .icd11_biomed
                .as_deref()
                .and_then(|target| self.get_by_code(target, CodingSystem::Icd11Biomedicine)),
        }
    }

    /// Check the loaded catalogs for data defects.
    ///
    /// Duplicated codes and mapping endpoints that do not resolve are data
    /// defects in the published set, not runtime conditions; callers log them
    /// at startup and continue (lookups degrade to "not found").
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for term in &self.terms {
            if !seen.insert(term.code.as_str()) {
                issues.push(IntegrityIssue::DuplicateTermCode(term.code.clone()));
            }
        }

        let mut seen = HashSet::new();
        for entry in &self.classifications {
            if !seen.insert(entry.code.as_str()) {
                issues.push(IntegrityIssue::DuplicateClassificationCode(
                    entry.code.clone(),
                ));
            }
        }

        for mapping in &self.mappings {
            if self
                .get_by_code(&mapping.source_code, mapping.source_system)
                .is_none()
            {
                issues.push(IntegrityIssue::DanglingMappingSource {
                    code: mapping.source_code.clone(),
                    system: mapping.source_system,
                });
            }
            if self
                .get_by_code(&mapping.target_code, mapping.target_system)
                .is_none()
            {
                issues.push(IntegrityIssue::DanglingMappingTarget {
                    code: mapping.target_code.clone(),
                    system: mapping.target_system,
                });
            }
        }

        issues
    }
}

fn contains_insensitive(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

fn hit_from_term(term: &CodedTerm) -> SearchHit {
    SearchHit {
        code: term.code.clone(),
        display: term.display.clone(),
        system: term.tradition.coding_system(),
        description: term.description.clone(),
        mappings: Some(CrossReferences {
            icd11_tm2: term.icd11_tm2.clone(),
            icd11_biomed: term.icd11_biomed.clone(),
            snomed_ct: term.snomed_ct.clone(),
        }),
    }
}

fn hit_from_classification(entry: &ClassificationCode) -> SearchHit {
    SearchHit {
        code: entry.code.clone(),
        display: entry.display.clone(),
        system: entry.module.coding_system(),
        description: entry.description.clone(),
        mappings: None,
    }
}
