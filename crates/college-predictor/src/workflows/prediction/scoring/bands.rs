use super::super::domain::{AdmissionChance, ApplicantProfile, CollegeOffering, InstitutionPreference};

/// Inclusive score range a rank ratio falls into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBand {
    pub floor: f64,
    pub ceiling: f64,
}

impl ScoreBand {
    const fn new(floor: f64, ceiling: f64) -> Self {
        Self { floor, ceiling }
    }

    pub fn midpoint(&self) -> f64 {
        (self.floor + self.ceiling) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.floor && value <= self.ceiling
    }
}

pub(crate) const HIGH_CHANCE_RATIO: f64 = 0.8;
pub(crate) const MEDIUM_CHANCE_RATIO: f64 = 1.0;

/// Upper ratio bound (inclusive) for each band, ordered by ratio.
const BANDS: [(f64, ScoreBand); 4] = [
    (HIGH_CHANCE_RATIO, ScoreBand::new(92.0, 99.0)),
    (MEDIUM_CHANCE_RATIO, ScoreBand::new(75.0, 87.0)),
    (1.2, ScoreBand::new(55.0, 67.0)),
    (1.5, ScoreBand::new(35.0, 50.0)),
];
const TAIL_BAND: ScoreBand = ScoreBand::new(10.0, 35.0);

pub(crate) const REGION_BOOST: f64 = 4.0;
pub(crate) const STATE_BOOST: f64 = 3.0;
pub(crate) const INSTITUTION_TYPE_BOOST: f64 = 3.0;

pub fn band_for_ratio(ratio: f64) -> ScoreBand {
    BANDS
        .iter()
        .find(|(upper, _)| ratio <= *upper)
        .map(|(_, band)| *band)
        .unwrap_or(TAIL_BAND)
}

pub fn admission_chance_for_ratio(ratio: f64) -> AdmissionChance {
    if ratio <= HIGH_CHANCE_RATIO {
        AdmissionChance::High
    } else if ratio <= MEDIUM_CHANCE_RATIO {
        AdmissionChance::Medium
    } else {
        AdmissionChance::Low
    }
}

fn same_text(wanted: Option<&str>, actual: &str) -> bool {
    wanted
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.to_lowercase() == actual.trim().to_lowercase())
        .unwrap_or(false)
}

/// Sum of the preference boosts the offering earns; each applies at most once.
pub(crate) fn preference_boost(profile: &ApplicantProfile, offering: &CollegeOffering) -> f64 {
    let mut boost = 0.0;
    if same_text(profile.region.as_deref(), &offering.region) {
        boost += REGION_BOOST;
    }
    if same_text(profile.state.as_deref(), &offering.state) {
        boost += STATE_BOOST;
    }
    if let InstitutionPreference::Only(kind) = profile.institution_type {
        if kind == offering.institution_type {
            boost += INSTITUTION_TYPE_BOOST;
        }
    }
    boost
}

pub(crate) fn clamp_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}
