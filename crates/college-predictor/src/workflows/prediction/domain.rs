use std::fmt;

use serde::{Deserialize, Serialize};

/// Seat category an applicant competes under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatCategory {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "OBC-NCL")]
    ObcNcl,
    #[serde(rename = "SC")]
    Sc,
    #[serde(rename = "ST")]
    St,
    #[serde(rename = "EWS")]
    Ews,
}

impl SeatCategory {
    pub const ALL: [SeatCategory; 5] = [
        SeatCategory::Open,
        SeatCategory::ObcNcl,
        SeatCategory::Sc,
        SeatCategory::St,
        SeatCategory::Ews,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SeatCategory::Open => "OPEN",
            SeatCategory::ObcNcl => "OBC-NCL",
            SeatCategory::Sc => "SC",
            SeatCategory::St => "ST",
            SeatCategory::Ews => "EWS",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for SeatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gender pool of a seat. The female-only pool also admits gender-neutral seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderPool {
    #[serde(rename = "Gender-Neutral")]
    GenderNeutral,
    #[serde(rename = "Female-only (including Supernumerary)")]
    FemaleOnly,
}

impl GenderPool {
    pub const NEUTRAL_LABEL: &'static str = "Gender-Neutral";
    pub const FEMALE_ONLY_LABEL: &'static str = "Female-only (including Supernumerary)";

    pub fn label(&self) -> &'static str {
        match self {
            GenderPool::GenderNeutral => Self::NEUTRAL_LABEL,
            GenderPool::FemaleOnly => Self::FEMALE_ONLY_LABEL,
        }
    }

    /// Accepts the full labels as well as the short forms a form might submit.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "gender-neutral" | "gender neutral" | "neutral" => Some(Self::GenderNeutral),
            "female-only" | "female only" | "female" => Some(Self::FemaleOnly),
            _ if normalized == Self::FEMALE_ONLY_LABEL.to_ascii_lowercase() => {
                Some(Self::FemaleOnly)
            }
            _ => None,
        }
    }
}

impl fmt::Display for GenderPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstitutionType {
    #[serde(rename = "IIT", alias = "iit")]
    Iit,
    #[serde(rename = "NIT", alias = "nit")]
    Nit,
    #[serde(rename = "IIIT", alias = "iiit")]
    Iiit,
    #[serde(rename = "Other", alias = "other", alias = "OTHER")]
    Other,
}

impl InstitutionType {
    pub const ALL: [InstitutionType; 4] = [
        InstitutionType::Iit,
        InstitutionType::Nit,
        InstitutionType::Iiit,
        InstitutionType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InstitutionType::Iit => "IIT",
            InstitutionType::Nit => "NIT",
            InstitutionType::Iiit => "IIIT",
            InstitutionType::Other => "Other",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for InstitutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Institution type filter chosen by the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InstitutionPreference {
    #[default]
    Any,
    Only(InstitutionType),
}

impl InstitutionPreference {
    pub fn label(&self) -> &'static str {
        match self {
            InstitutionPreference::Any => "Any",
            InstitutionPreference::Only(kind) => kind.label(),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case("any") {
            return Some(Self::Any);
        }
        InstitutionType::parse(raw).map(Self::Only)
    }

    pub fn admits(&self, kind: InstitutionType) -> bool {
        match self {
            InstitutionPreference::Any => true,
            InstitutionPreference::Only(wanted) => *wanted == kind,
        }
    }
}

/// Validated applicant input driving one prediction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub rank: u32,
    pub category: SeatCategory,
    pub gender: GenderPool,
    pub institution_type: InstitutionPreference,
    pub year: u16,
    pub round: u8,
    pub state: Option<String>,
    pub region: Option<String>,
}

/// One program at one institute with its published cutoff for a year and round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeOffering {
    pub id: String,
    pub institute: String,
    pub program: String,
    pub institution_type: InstitutionType,
    pub state: String,
    pub region: String,
    pub seat_type: String,
    pub gender: String,
    pub opening_rank: u32,
    pub closing_rank: u32,
    pub year: u16,
    pub round: u8,
}

impl CollegeOffering {
    /// Offerings without a positive closing rank are never considered.
    pub fn is_rankable(&self) -> bool {
        self.closing_rank > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityStatus {
    Eligible,
    #[serde(rename = "Not Eligible")]
    NotEligible,
}

impl EligibilityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "Eligible",
            EligibilityStatus::NotEligible => "Not Eligible",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "eligible" => Some(Self::Eligible),
            "not eligible" | "noteligible" | "ineligible" => Some(Self::NotEligible),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionChance {
    High,
    Medium,
    Low,
    Unknown,
}

impl AdmissionChance {
    pub fn label(&self) -> &'static str {
        match self {
            AdmissionChance::High => "High",
            AdmissionChance::Medium => "Medium",
            AdmissionChance::Low => "Low",
            AdmissionChance::Unknown => "Unknown",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Scored recommendation shown to the applicant. Built fresh for every
/// submission and replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: String,
    pub institute_name: String,
    pub branch: String,
    pub institution_type: String,
    pub state: String,
    pub region: String,
    pub match_percentage: u8,
    pub applied_cutoff: Option<u32>,
    pub eligibility_status: EligibilityStatus,
    pub admission_chance: AdmissionChance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u8>,
}

/// Where a prediction run obtained its candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    Remote,
    LocalFallback,
}

/// Result of one successful prediction run. `notice` carries the soft warning
/// raised when the remote service could not be used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub records: Vec<PredictionRecord>,
    pub source: PredictionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}
