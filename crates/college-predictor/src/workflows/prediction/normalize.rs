//! The single place that decides what a missing or malformed remote field means.

use super::domain::{AdmissionChance, EligibilityStatus, PredictionRecord};
use super::remote::RemotePrediction;

const ELIGIBLE_MATCH_THRESHOLD: u8 = 50;
const HIGH_MATCH_THRESHOLD: u8 = 75;
const MEDIUM_MATCH_THRESHOLD: u8 = 45;

fn first_present(candidates: &[&Option<String>]) -> String {
    candidates
        .iter()
        .filter_map(|candidate| candidate.as_deref())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Lower-cases `institute-branch` and collapses every run of characters
/// outside `[a-z0-9]` into a single `-`.
pub fn synthesize_id(institute: &str, branch: &str) -> String {
    let joined = format!("{institute}-{branch}").to_lowercase();
    let mut id = String::with_capacity(joined.len());
    let mut in_separator = false;
    for ch in joined.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            id.push(ch);
            in_separator = false;
        } else if !in_separator {
            id.push('-');
            in_separator = true;
        }
    }
    id
}

fn match_percentage(raw: Option<f64>) -> u8 {
    raw.map(|value| value.clamp(0.0, 100.0).round() as u8)
        .unwrap_or(0)
}

fn positive_rank(raw: Option<f64>) -> Option<u32> {
    raw.filter(|value| *value >= 1.0 && *value <= f64::from(u32::MAX))
        .map(|value| value.round() as u32)
}

fn default_eligibility(match_percentage: u8) -> EligibilityStatus {
    if match_percentage >= ELIGIBLE_MATCH_THRESHOLD {
        EligibilityStatus::Eligible
    } else {
        EligibilityStatus::NotEligible
    }
}

fn default_chance(match_percentage: u8) -> AdmissionChance {
    if match_percentage > HIGH_MATCH_THRESHOLD {
        AdmissionChance::High
    } else if match_percentage > MEDIUM_MATCH_THRESHOLD {
        AdmissionChance::Medium
    } else {
        AdmissionChance::Low
    }
}

pub fn normalize_remote(item: RemotePrediction) -> PredictionRecord {
    let institute_name = first_present(&[&item.institute_name, &item.name, &item.institute]);
    let branch = item.branch.clone().unwrap_or_default();
    let institution_type = first_present(&[&item.institution_type, &item.kind]);

    let id = item
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| synthesize_id(&institute_name, &branch));

    let match_percentage = match_percentage(item.match_percentage);

    let eligibility_status = item
        .eligibility_status
        .as_deref()
        .and_then(EligibilityStatus::parse)
        .unwrap_or_else(|| default_eligibility(match_percentage));

    let admission_chance = match item.admission_chance.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => {
            AdmissionChance::parse(label).unwrap_or(AdmissionChance::Unknown)
        }
        _ => default_chance(match_percentage),
    };

    let closing_rank = positive_rank(item.closing_rank);

    PredictionRecord {
        id,
        institute_name,
        branch,
        institution_type,
        state: item.state.unwrap_or_default(),
        region: item.region.unwrap_or_default(),
        match_percentage,
        applied_cutoff: positive_rank(item.applied_cutoff).or(closing_rank),
        eligibility_status,
        admission_chance,
        opening_rank: positive_rank(item.opening_rank),
        closing_rank,
        year: item
            .year
            .filter(|year| *year >= 1.0 && *year <= f64::from(u16::MAX))
            .map(|year| year as u16),
        round: item
            .round
            .filter(|round| *round >= 1.0 && *round <= f64::from(u8::MAX))
            .map(|round| round as u8),
    }
}

pub fn normalize_all(items: Vec<RemotePrediction>) -> Vec<PredictionRecord> {
    items.into_iter().map(normalize_remote).collect()
}
