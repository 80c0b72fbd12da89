//! Coding-system enumeration and wire-name parsing.
//!
//! External callers identify coding systems by wire names such as
//! `"NAMASTE-Ayurveda"` or `"ICD-11-TM2"`. Internally a system is a closed
//! enum, so catalog dispatch is a `match` rather than substring probing, and an
//! unrecognised name is rejected at the boundary instead of silently matching
//! nothing.

use crate::{TerminologyError, TerminologyResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// NAMASTE sub-system: the traditional-medicine tradition a term belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Tradition {
    Ayurveda,
    Siddha,
    Unani,
}

impl Tradition {
    /// The tradition's name as it appears inside wire system names.
    pub fn as_str(self) -> &'static str {
        match self {
            Tradition::Ayurveda => "Ayurveda",
            Tradition::Siddha => "Siddha",
            Tradition::Unani => "Unani",
        }
    }

    /// The full coding system for terms of this tradition.
    pub fn coding_system(self) -> CodingSystem {
        match self {
            Tradition::Ayurveda => CodingSystem::NamasteAyurveda,
            Tradition::Siddha => CodingSystem::NamasteSiddha,
            Tradition::Unani => CodingSystem::NamasteUnani,
        }
    }
}

/// ICD-11 chapter grouping hosted by the classification catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Icd11Module {
    #[serde(rename = "TM2")]
    Tm2,
    Biomedicine,
}

impl Icd11Module {
    pub fn coding_system(self) -> CodingSystem {
        match self {
            Icd11Module::Tm2 => CodingSystem::Icd11Tm2,
            Icd11Module::Biomedicine => CodingSystem::Icd11Biomedicine,
        }
    }
}

/// A coding system recognised by the registry.
///
/// SNOMED CT appears as a cross-reference target on NAMASTE terms but is not a
/// hosted catalog; lookups against it always return not-found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodingSystem {
    NamasteAyurveda,
    NamasteSiddha,
    NamasteUnani,
    Icd11Tm2,
    Icd11Biomedicine,
    SnomedCt,
}

/// Which catalog a [`CodingSystem`] selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemFamily {
    /// The NAMASTE traditional-medicine catalog.
    Namaste,
    /// The ICD-11 classification catalog.
    Icd11,
    /// No hosted catalog.
    SnomedCt,
}

impl CodingSystem {
    /// All systems, in the order they are documented externally.
    pub const ALL: [CodingSystem; 6] = [
        CodingSystem::NamasteAyurveda,
        CodingSystem::NamasteSiddha,
        CodingSystem::NamasteUnani,
        CodingSystem::Icd11Tm2,
        CodingSystem::Icd11Biomedicine,
        CodingSystem::SnomedCt,
    ];

    /// Convert to the wire format name.
    pub fn as_wire(self) -> &'static str {
        match self {
            CodingSystem::NamasteAyurveda => "NAMASTE-Ayurveda",
            CodingSystem::NamasteSiddha => "NAMASTE-Siddha",
            CodingSystem::NamasteUnani => "NAMASTE-Unani",
            CodingSystem::Icd11Tm2 => "ICD-11-TM2",
            CodingSystem::Icd11Biomedicine => "ICD-11-Biomedicine",
            CodingSystem::SnomedCt => "SNOMED-CT",
        }
    }

    /// Parse from the wire format name. Matching is exact.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "NAMASTE-Ayurveda" => Some(CodingSystem::NamasteAyurveda),
            "NAMASTE-Siddha" => Some(CodingSystem::NamasteSiddha),
            "NAMASTE-Unani" => Some(CodingSystem::NamasteUnani),
            "ICD-11-TM2" => Some(CodingSystem::Icd11Tm2),
            "ICD-11-Biomedicine" => Some(CodingSystem::Icd11Biomedicine),
            "SNOMED-CT" => Some(CodingSystem::SnomedCt),
            _ => None,
        }
    }

    /// Parse a wire name, treating anything unrecognised as a caller error.
    pub fn parse(s: &str) -> TerminologyResult<Self> {
        Self::from_wire(s.trim()).ok_or_else(|| TerminologyError::UnknownSystem(s.to_owned()))
    }

    /// The catalog this system selects for lookups.
    pub fn family(self) -> SystemFamily {
        match self {
            CodingSystem::NamasteAyurveda
            | CodingSystem::NamasteSiddha
            | CodingSystem::NamasteUnani => SystemFamily::Namaste,
            CodingSystem::Icd11Tm2 | CodingSystem::Icd11Biomedicine => SystemFamily::Icd11,
            CodingSystem::SnomedCt => SystemFamily::SnomedCt,
        }
    }
}

impl std::fmt::Display for CodingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl std::str::FromStr for CodingSystem {
    type Err = TerminologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CodingSystem::parse(s)
    }
}

impl Serialize for CodingSystem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for CodingSystem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CodingSystem::from_wire(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown coding system: {s:?}")))
    }
}

/// Scope narrowing for search: everything, one catalog family, or one system.
///
/// Wire values accepted: `"all"` (case-insensitive), a family name (`"NAMASTE"`
/// or `"ICD-11"`), or a full system wire name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemFilter {
    All,
    Family(SystemFamily),
    System(CodingSystem),
}

impl SystemFilter {
    pub fn parse(s: &str) -> TerminologyResult<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(SystemFilter::All);
        }
        match trimmed {
            "NAMASTE" => return Ok(SystemFilter::Family(SystemFamily::Namaste)),
            "ICD-11" => return Ok(SystemFilter::Family(SystemFamily::Icd11)),
            _ => {}
        }
        CodingSystem::from_wire(trimmed)
            .map(SystemFilter::System)
            .ok_or_else(|| TerminologyError::UnknownSystem(s.to_owned()))
    }

    /// Whether entries tagged with `system` fall inside this filter.
    pub fn matches(self, system: CodingSystem) -> bool {
        match self {
            SystemFilter::All => true,
            SystemFilter::Family(family) => system.family() == family,
            SystemFilter::System(wanted) => system == wanted,
        }
    }
}
