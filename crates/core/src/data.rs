//! Compiled-in reference catalog.
//!
//! This is the bundled snapshot of the published NAMASTE and ICD-11 extracts
//! plus the concept-mapping table between them. The data is immutable at
//! runtime; refreshing it means replacing the whole set, either by updating
//! this module or by pointing the service at a JSON catalog file
//! (see [`crate::registry::TerminologyRegistry::from_json_file`]).

use crate::model::{ClassificationCode, CodedTerm, ConceptMapping, Equivalence};
use crate::system::{CodingSystem, Icd11Module, Tradition};

fn term(
    code: &str,
    display: &str,
    tradition: Tradition,
    description: &str,
    icd11_tm2: Option<&str>,
    icd11_biomed: Option<&str>,
    snomed_ct: Option<&str>,
) -> CodedTerm {
    CodedTerm {
        code: code.into(),
        display: display.into(),
        tradition,
        description: Some(description.into()),
        icd11_tm2: icd11_tm2.map(Into::into),
        icd11_biomed: icd11_biomed.map(Into::into),
        snomed_ct: snomed_ct.map(Into::into),
    }
}

fn icd11(code: &str, display: &str, module: Icd11Module, description: Option<&str>) -> ClassificationCode {
    ClassificationCode {
        code: code.into(),
        display: display.into(),
        module,
        description: description.map(Into::into),
    }
}

fn mapping(
    source_code: &str,
    source_system: CodingSystem,
    target_code: &str,
    target_system: CodingSystem,
    equivalence: Equivalence,
) -> ConceptMapping {
    ConceptMapping {
        source_code: source_code.into(),
        source_system,
        target_code: target_code.into(),
        target_system,
        equivalence,
    }
}

/// The NAMASTE traditional-medicine catalog.
pub fn namaste_terms() -> Vec<CodedTerm> {
    use Tradition::{Ayurveda, Siddha, Unani};

    vec![
        term(
            "AYU001",
            "Amavata",
            Ayurveda,
            "Rheumatic disorder with joint pain and stiffness caused by vitiated Vata and Ama",
            Some("TM2-123"),
            Some("M06.9"),
            Some("69896004"),
        ),
        term(
            "AYU002",
            "Sandhigata Vata",
            Ayurveda,
            "Degenerative disorder of the weight-bearing joints due to aggravated Vata",
            Some("TM2-124"),
            Some("M19.90"),
            Some("396275006"),
        ),
        term(
            "AYU003",
            "Prameha",
            Ayurveda,
            "Urinary and metabolic disorder marked by excessive urination",
            Some("TM2-125"),
            Some("E14.9"),
            Some("73211009"),
        ),
        term(
            "AYU004",
            "Tamaka Shwasa",
            Ayurveda,
            "Paroxysmal breathlessness with wheezing and chest tightness",
            Some("TM2-126"),
            Some("J45.9"),
            Some("195967001"),
        ),
        term(
            "AYU005",
            "Vicharchika",
            Ayurveda,
            "Eczematous skin disorder with itching, discharge and discolouration",
            Some("TM2-127"),
            Some("L30.9"),
            None,
        ),
        term(
            "AYU006",
            "Grahani",
            Ayurveda,
            "Disorder of the digestive seat with irregular bowel function",
            Some("TM2-128"),
            None,
            None,
        ),
        term(
            "SID001",
            "Azhal Keel Vayu",
            Siddha,
            "Degenerative arthritis of the limbs described in Siddha practice",
            Some("TM2-129"),
            Some("M19.90"),
            Some("396275006"),
        ),
        term(
            "SID002",
            "Madhumegam",
            Siddha,
            "Sweet urine disorder with wasting described in Siddha practice",
            Some("TM2-130"),
            Some("E11.9"),
            None,
        ),
        term(
            "UNA001",
            "Waja-ul-Mafasil",
            Unani,
            "Painful affliction of the joints described in Unani practice",
            Some("TM2-131"),
            Some("M13.9"),
            None,
        ),
        term(
            "UNA002",
            "Ziabetus",
            Unani,
            "Chronic disorder of excessive micturition described in Unani practice",
            Some("TM2-132"),
            Some("E14.9"),
            None,
        ),
    ]
}

/// The ICD-11 classification extract (TM2 chapter plus biomedicine codes).
pub fn icd11_codes() -> Vec<ClassificationCode> {
    use Icd11Module::{Biomedicine, Tm2};

    vec![
        icd11(
            "TM2-123",
            "Amavata (Traditional Medicine)",
            Tm2,
            Some("Traditional medicine disorder pattern of the joints"),
        ),
        icd11(
            "TM2-124",
            "Sandhigata Vata (Traditional Medicine)",
            Tm2,
            Some("Traditional medicine degenerative joint pattern"),
        ),
        icd11(
            "TM2-125",
            "Prameha (Traditional Medicine)",
            Tm2,
            Some("Traditional medicine urinary disorder pattern"),
        ),
        icd11("TM2-126", "Tamaka Shwasa (Traditional Medicine)", Tm2, None),
        icd11("TM2-127", "Vicharchika (Traditional Medicine)", Tm2, None),
        icd11("TM2-128", "Grahani (Traditional Medicine)", Tm2, None),
        icd11("TM2-129", "Azhal Keel Vayu (Traditional Medicine)", Tm2, None),
        icd11("TM2-130", "Madhumegam (Traditional Medicine)", Tm2, None),
        icd11("TM2-131", "Waja-ul-Mafasil (Traditional Medicine)", Tm2, None),
        icd11("TM2-132", "Ziabetus (Traditional Medicine)", Tm2, None),
        icd11(
            "M06.9",
            "Rheumatoid arthritis, unspecified",
            Biomedicine,
            None,
        ),
        icd11(
            "M19.90",
            "Osteoarthritis, unspecified site",
            Biomedicine,
            None,
        ),
        icd11(
            "E14.9",
            "Unspecified diabetes mellitus without complications",
            Biomedicine,
            None,
        ),
        icd11("J45.9", "Asthma, unspecified", Biomedicine, None),
        icd11("L30.9", "Dermatitis, unspecified", Biomedicine, None),
        icd11(
            "E11.9",
            "Type 2 diabetes mellitus without complications",
            Biomedicine,
            None,
        ),
        icd11("M13.9", "Arthritis, unspecified", Biomedicine, None),
    ]
}

/// The concept-mapping table between NAMASTE and ICD-11.
pub fn concept_mappings() -> Vec<ConceptMapping> {
    use CodingSystem::{Icd11Biomedicine, Icd11Tm2, NamasteAyurveda, NamasteSiddha, NamasteUnani};
    use Equivalence::{Equivalent, Inexact, Narrower, Wider};

    vec![
        mapping("AYU001", NamasteAyurveda, "TM2-123", Icd11Tm2, Equivalent),
        mapping("AYU002", NamasteAyurveda, "TM2-124", Icd11Tm2, Equivalent),
        mapping("AYU003", NamasteAyurveda, "TM2-125", Icd11Tm2, Equivalent),
        mapping("AYU004", NamasteAyurveda, "TM2-126", Icd11Tm2, Equivalent),
        mapping("AYU005", NamasteAyurveda, "TM2-127", Icd11Tm2, Equivalent),
        mapping("AYU006", NamasteAyurveda, "TM2-128", Icd11Tm2, Equivalent),
        mapping("SID001", NamasteSiddha, "TM2-129", Icd11Tm2, Equivalent),
        mapping("SID002", NamasteSiddha, "TM2-130", Icd11Tm2, Equivalent),
        mapping("UNA001", NamasteUnani, "TM2-131", Icd11Tm2, Equivalent),
        mapping("UNA002", NamasteUnani, "TM2-132", Icd11Tm2, Equivalent),
        mapping("AYU001", NamasteAyurveda, "M06.9", Icd11Biomedicine, Equivalent),
        mapping("AYU002", NamasteAyurveda, "M19.90", Icd11Biomedicine, Equivalent),
        mapping("AYU003", NamasteAyurveda, "E14.9", Icd11Biomedicine, Wider),
        mapping("AYU004", NamasteAyurveda, "J45.9", Icd11Biomedicine, Equivalent),
        mapping("AYU005", NamasteAyurveda, "L30.9", Icd11Biomedicine, Inexact),
        mapping("SID001", NamasteSiddha, "M19.90", Icd11Biomedicine, Wider),
        mapping("SID002", NamasteSiddha, "E11.9", Icd11Biomedicine, Narrower),
        mapping("UNA001", NamasteUnani, "M13.9", Icd11Biomedicine, Wider),
        mapping("UNA002", NamasteUnani, "E14.9", Icd11Biomedicine, Wider),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cross_reference_resolves_in_the_icd11_extract() {
        let codes = icd11_codes();
        for term in namaste_terms() {
            for xref in [term.icd11_tm2.as_deref(), term.icd11_biomed.as_deref()]
                .into_iter()
                .flatten()
            {
                assert!(
                    codes.iter().any(|entry| entry.code == xref),
                    "{} references missing ICD-11 code {xref}",
                    term.code
                );
            }
        }
    }

    #[test]
    fn cross_references_agree_with_the_mapping_table() {
        let mappings = concept_mappings();
        for term in namaste_terms() {
            let system = term.tradition.coding_system();
            if let Some(tm2) = term.icd11_tm2.as_deref() {
                assert!(
                    mappings.iter().any(|m| m.source_code == term.code
                        && m.source_system == system
                        && m.target_code == tm2
                        && m.target_system == CodingSystem::Icd11Tm2),
                    "{} TM2 cross-reference has no mapping entry",
                    term.code
                );
            }
            if let Some(biomed) = term.icd11_biomed.as_deref() {
                assert!(
                    mappings.iter().any(|m| m.source_code == term.code
                        && m.source_system == system
                        && m.target_code == biomed
                        && m.target_system == CodingSystem::Icd11Biomedicine),
                    "{} biomedicine cross-reference has no mapping entry",
                    term.code
                );
            }
        }
    }
}
