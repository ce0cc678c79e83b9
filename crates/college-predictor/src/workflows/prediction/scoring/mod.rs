mod bands;
mod placement;

pub use bands::{admission_chance_for_ratio, band_for_ratio, ScoreBand};
pub use placement::{BandPlacement, Midpoint, SeededJitter};

use super::domain::{ApplicantProfile, CollegeOffering, EligibilityStatus, PredictionRecord};
use crate::config::{ScoringConfig, ScoringMode};

/// Reasons an offering cannot be scored for a profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("applicant rank must be a positive number")]
    InvalidRank,
    #[error("offering {0} has no positive closing rank")]
    MissingCutoff(String),
}

/// Stateless scorer turning a profile and an offering into a prediction.
#[derive(Debug)]
pub struct ScoringEngine {
    placement: Box<dyn BandPlacement>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::deterministic()
    }
}

impl ScoringEngine {
    pub fn new(placement: Box<dyn BandPlacement>) -> Self {
        Self { placement }
    }

    /// Band midpoints only; identical inputs always give identical scores.
    pub fn deterministic() -> Self {
        Self::new(Box::new(Midpoint))
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        match (config.mode, config.seed) {
            (ScoringMode::Deterministic, _) => Self::deterministic(),
            (ScoringMode::Jitter, Some(seed)) => Self::new(Box::new(SeededJitter::new(seed))),
            (ScoringMode::Jitter, None) => Self::new(Box::new(SeededJitter::from_entropy())),
        }
    }

    pub fn score(
        &self,
        profile: &ApplicantProfile,
        offering: &CollegeOffering,
    ) -> Result<PredictionRecord, ScoringError> {
        if profile.rank == 0 {
            return Err(ScoringError::InvalidRank);
        }
        if !offering.is_rankable() {
            return Err(ScoringError::MissingCutoff(offering.id.clone()));
        }

        let ratio = f64::from(profile.rank) / f64::from(offering.closing_rank);
        let band = band_for_ratio(ratio);
        let raw = self.placement.place(band) + bands::preference_boost(profile, offering);

        let eligibility_status = if profile.rank <= offering.closing_rank {
            EligibilityStatus::Eligible
        } else {
            EligibilityStatus::NotEligible
        };

        Ok(PredictionRecord {
            id: offering.id.clone(),
            institute_name: offering.institute.clone(),
            branch: offering.program.clone(),
            institution_type: offering.institution_type.label().to_string(),
            state: offering.state.clone(),
            region: offering.region.clone(),
            match_percentage: bands::clamp_score(raw),
            applied_cutoff: Some(offering.closing_rank),
            eligibility_status,
            admission_chance: admission_chance_for_ratio(ratio),
            opening_rank: Some(offering.opening_rank),
            closing_rank: Some(offering.closing_rank),
            year: Some(offering.year),
            round: Some(offering.round),
        })
    }
}
