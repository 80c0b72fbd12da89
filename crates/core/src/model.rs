//! Reference-data types and operation result shapes.
//!
//! Two kinds of type live here:
//! - catalog entries ([`CodedTerm`], [`ClassificationCode`], [`ConceptMapping`])
//!   as loaded at startup and never mutated afterwards, and
//! - result carriers ([`SearchHit`], [`Translation`], [`ResolvedMappings`])
//!   returned by registry operations and serialised verbatim by the API layer.
//!
//! Serde attributes pin the JSON field names to the published wire shapes
//! (`icd11TM2`, `sourceCode`, `ICD-11-Biomedicine`, ...), so the same structs
//! serve both the catalog file loader and the HTTP responses.

use crate::system::{CodingSystem, Icd11Module, Tradition};
use serde::{Deserialize, Serialize};

/// A term in the NAMASTE traditional-medicine catalog.
///
/// The three cross-reference fields are denormalised copies of mapping
/// targets; the [`ConceptMapping`] table stays authoritative for translation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CodedTerm {
    /// Code, unique within the NAMASTE catalog.
    pub code: String,
    /// Human-readable name.
    pub display: String,
    /// Tradition the term belongs to (the NAMASTE sub-system).
    #[serde(rename = "system")]
    pub tradition: Tradition,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cross-reference into ICD-11 TM2.
    #[serde(rename = "icd11TM2", default, skip_serializing_if = "Option::is_none")]
    pub icd11_tm2: Option<String>,
    /// Cross-reference into ICD-11 Biomedicine.
    #[serde(rename = "icd11Biomed", default, skip_serializing_if = "Option::is_none")]
    pub icd11_biomed: Option<String>,
    /// Cross-reference into SNOMED CT (not a hosted catalog).
    #[serde(rename = "snomedCT", default, skip_serializing_if = "Option::is_none")]
    pub snomed_ct: Option<String>,
}

/// A term in the ICD-11 classification catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ClassificationCode {
    /// Code, unique within the ICD-11 catalog.
    pub code: String,
    /// Human-readable name.
    pub display: String,
    /// Chapter grouping (TM2 or Biomedicine).
    pub module: Icd11Module,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// How precisely a source code corresponds to a target code.
///
/// Closed enumeration over the concept-map equivalence values the source
/// catalog actually uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Equivalence {
    Equivalent,
    Wider,
    Narrower,
    Inexact,
}

impl Equivalence {
    pub fn as_str(self) -> &'static str {
        match self {
            Equivalence::Equivalent => "equivalent",
            Equivalence::Wider => "wider",
            Equivalence::Narrower => "narrower",
            Equivalence::Inexact => "inexact",
        }
    }
}

/// A directed equivalence assertion between two catalog entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMapping {
    pub source_code: String,
    #[schema(value_type = String)]
    pub source_system: CodingSystem,
    pub target_code: String,
    #[schema(value_type = String)]
    pub target_system: CodingSystem,
    pub equivalence: Equivalence,
}

/// Cross-reference codes attached to a NAMASTE search hit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CrossReferences {
    #[serde(rename = "icd11TM2", default, skip_serializing_if = "Option::is_none")]
    pub icd11_tm2: Option<String>,
    #[serde(rename = "icd11Biomed", default, skip_serializing_if = "Option::is_none")]
    pub icd11_biomed: Option<String>,
    #[serde(rename = "snomedCT", default, skip_serializing_if = "Option::is_none")]
    pub snomed_ct: Option<String>,
}

/// A catalog entry reshaped for search and lookup responses.
///
/// `mappings` is present exactly when the hit comes from the NAMASTE catalog;
/// ICD-11 hits carry none.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchHit {
    pub code: String,
    pub display: String,
    /// Wire system name, e.g. `"NAMASTE-Ayurveda"` or `"ICD-11-TM2"`.
    #[schema(value_type = String)]
    pub system: CodingSystem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings: Option<CrossReferences>,
}

/// One translation record produced by scanning the mapping table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub source_code: String,
    #[schema(value_type = String)]
    pub source_system: CodingSystem,
    pub target_code: String,
    #[schema(value_type = String)]
    pub target_system: CodingSystem,
    pub target_display: String,
    pub equivalence: Equivalence,
}

/// A NAMASTE term's cross-references resolved into full catalog entries.
///
/// Keys are the fixed target-system labels; a missing key means the term has
/// no such cross-reference (or it does not resolve). Never an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ResolvedMappings {
    #[serde(rename = "ICD-11-TM2", default, skip_serializing_if = "Option::is_none")]
    pub icd11_tm2: Option<SearchHit>,
    #[serde(
        rename = "ICD-11-Biomedicine",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub icd11_biomedicine: Option<SearchHit>,
}

impl ResolvedMappings {
    /// True when no cross-reference resolved.
    pub fn is_empty(&self) -> bool {
        self.icd11_tm2.is_none() && self.icd11_biomedicine.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coded_term_uses_published_field_names() {
        let term = CodedTerm {
            code: "AYU001".into(),
            display: "Amavata".into(),
            tradition: Tradition::Ayurveda,
            description: Some("Rheumatic disorder".into()),
            icd11_tm2: Some("TM2-123".into()),
            icd11_biomed: Some("M06.9".into()),
            snomed_ct: None,
        };

        let json = serde_json::to_value(&term).expect("serialise");
        assert_eq!(json["system"], "Ayurveda");
        assert_eq!(json["icd11TM2"], "TM2-123");
        assert_eq!(json["icd11Biomed"], "M06.9");
        assert!(json.get("snomedCT").is_none());
    }

    #[test]
    fn translation_serialises_camel_case() {
        let record = Translation {
            source_code: "AYU001".into(),
            source_system: CodingSystem::NamasteAyurveda,
            target_code: "TM2-123".into(),
            target_system: CodingSystem::Icd11Tm2,
            target_display: "Amavata (Traditional Medicine)".into(),
            equivalence: Equivalence::Equivalent,
        };

        let json = serde_json::to_value(&record).expect("serialise");
        assert_eq!(json["sourceSystem"], "NAMASTE-Ayurveda");
        assert_eq!(json["targetCode"], "TM2-123");
        assert_eq!(json["equivalence"], "equivalent");
    }

    #[test]
    fn resolved_mappings_keyed_by_target_system_label() {
        let mappings = ResolvedMappings {
            icd11_tm2: Some(SearchHit {
                code: "TM2-123".into(),
                display: "Amavata (Traditional Medicine)".into(),
                system: CodingSystem::Icd11Tm2,
                description: None,
                mappings: None,
            }),
            icd11_biomedicine: None,
        };

        let json = serde_json::to_value(&mappings).expect("serialise");
        assert_eq!(json["ICD-11-TM2"]["code"], "TM2-123");
        assert!(json.get("ICD-11-Biomedicine").is_none());
        assert!(!mappings.is_empty());
        assert!(ResolvedMappings::default().is_empty());
    }

    #[test]
    fn catalog_entries_round_trip_through_json() {
        let entry = ClassificationCode {
            code: "TM2-123".into(),
            display: "Amavata (Traditional Medicine)".into(),
            module: Icd11Module::Tm2,
            description: None,
        };
        let json = serde_json::to_string(&entry).expect("serialise");
        assert!(json.contains("\"module\":\"TM2\""));
        let back: ClassificationCode = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, entry);
    }
}
