use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::prediction::{
    AdmissionChance, CollegeOffering, EligibilityStatus, PredictionRecord,
};

/// Snapshot of a college taken when the applicant saved it. Later prediction
/// runs never touch a saved entry. Only `id` is required when reading one back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub id: String,
    #[serde(default)]
    pub institute_name: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub institution_type: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub match_percentage: Option<u8>,
    #[serde(default)]
    pub admission_chance: Option<AdmissionChance>,
    #[serde(default)]
    pub eligibility_status: Option<EligibilityStatus>,
    #[serde(default)]
    pub opening_rank: Option<u32>,
    #[serde(default)]
    pub closing_rank: Option<u32>,
    #[serde(default)]
    pub applied_cutoff: Option<u32>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub round: Option<u8>,
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

impl SelectionEntry {
    pub fn from_record(record: &PredictionRecord, saved_at: DateTime<Utc>) -> Self {
        Self {
            id: record.id.clone(),
            institute_name: record.institute_name.clone(),
            branch: record.branch.clone(),
            institution_type: record.institution_type.clone(),
            state: record.state.clone(),
            region: record.region.clone(),
            match_percentage: Some(record.match_percentage),
            admission_chance: Some(record.admission_chance),
            eligibility_status: Some(record.eligibility_status),
            opening_rank: record.opening_rank,
            closing_rank: record.closing_rank,
            applied_cutoff: record.applied_cutoff,
            year: record.year,
            round: record.round,
            saved_at,
        }
    }

    /// Catalogue offerings carry no score, so match and chance stay empty.
    pub fn from_offering(offering: &CollegeOffering, saved_at: DateTime<Utc>) -> Self {
        Self {
            id: offering.id.clone(),
            institute_name: offering.institute.clone(),
            branch: offering.program.clone(),
            institution_type: offering.institution_type.label().to_string(),
            state: offering.state.clone(),
            region: offering.region.clone(),
            match_percentage: None,
            admission_chance: None,
            eligibility_status: None,
            opening_rank: Some(offering.opening_rank),
            closing_rank: Some(offering.closing_rank),
            applied_cutoff: Some(offering.closing_rank),
            year: Some(offering.year),
            round: Some(offering.round),
            saved_at,
        }
    }
}

impl From<&PredictionRecord> for SelectionEntry {
    fn from(record: &PredictionRecord) -> Self {
        Self::from_record(record, Utc::now())
    }
}

impl From<&CollegeOffering> for SelectionEntry {
    fn from(offering: &CollegeOffering) -> Self {
        Self::from_offering(offering, Utc::now())
    }
}
