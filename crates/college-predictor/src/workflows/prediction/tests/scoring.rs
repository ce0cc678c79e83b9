use super::common::*;
use crate::config::{ScoringConfig, ScoringMode};
use crate::workflows::prediction::domain::{
    AdmissionChance, EligibilityStatus, InstitutionPreference, InstitutionType,
};
use crate::workflows::prediction::scoring::{
    admission_chance_for_ratio, band_for_ratio, SeededJitter,
};
use crate::workflows::prediction::{ScoringEngine, ScoringError};

#[test]
fn rank_just_inside_cutoff_lands_in_medium_band() {
    let engine = ScoringEngine::deterministic();
    let offering = offering("nit-kurukshetra-computer", 1118);

    let record = engine.score(&profile(1000), &offering).expect("scores");

    let band = band_for_ratio(1000.0 / 1118.0);
    assert_eq!((band.floor, band.ceiling), (75.0, 87.0));
    assert_eq!(record.match_percentage, 81);
    assert_eq!(record.eligibility_status, EligibilityStatus::Eligible);
    assert_eq!(record.admission_chance, AdmissionChance::Medium);
    assert_eq!(record.applied_cutoff, Some(1118));
    assert_eq!(record.closing_rank, Some(1118));
    assert_eq!(record.opening_rank, Some(559));
    assert_eq!(record.institution_type, "NIT");
}

#[test]
fn eligibility_holds_exactly_when_rank_is_within_cutoff() {
    let engine = ScoringEngine::deterministic();
    let offering = offering("cutoff", 2000);

    for rank in [1, 1999, 2000, 2001, 4000, 10_000] {
        let record = engine.score(&profile(rank), &offering).expect("scores");
        let expected = if rank <= 2000 {
            EligibilityStatus::Eligible
        } else {
            EligibilityStatus::NotEligible
        };
        assert_eq!(record.eligibility_status, expected, "rank {rank}");
    }
}

#[test]
fn unboosted_scores_stay_inside_their_band() {
    let engine = ScoringEngine::deterministic();
    let offering = offering("band", 1000);

    for rank in [1, 500, 800, 801, 950, 1000, 1100, 1200, 1350, 1500, 2500, 4999] {
        let record = engine.score(&profile(rank), &offering).expect("scores");
        let band = band_for_ratio(f64::from(rank) / 1000.0);
        assert!(
            band.contains(f64::from(record.match_percentage)),
            "rank {rank} scored {} outside {band:?}",
            record.match_percentage
        );
    }
}

#[test]
fn admission_chance_boundaries_are_inclusive() {
    assert_eq!(admission_chance_for_ratio(0.8), AdmissionChance::High);
    assert_eq!(admission_chance_for_ratio(0.8001), AdmissionChance::Medium);
    assert_eq!(admission_chance_for_ratio(1.0), AdmissionChance::Medium);
    assert_eq!(admission_chance_for_ratio(1.0001), AdmissionChance::Low);

    let engine = ScoringEngine::deterministic();
    let offering = offering("edge", 1000);
    let at_high = engine.score(&profile(800), &offering).expect("scores");
    let at_cutoff = engine.score(&profile(1000), &offering).expect("scores");
    let past_cutoff = engine.score(&profile(1001), &offering).expect("scores");

    assert_eq!(at_high.admission_chance, AdmissionChance::High);
    assert_eq!(at_high.match_percentage, 96);
    assert_eq!(at_cutoff.admission_chance, AdmissionChance::Medium);
    assert_eq!(past_cutoff.admission_chance, AdmissionChance::Low);
    assert_eq!(past_cutoff.match_percentage, 61);
}

#[test]
fn tail_band_covers_far_out_ranks() {
    let band = band_for_ratio(3.0);
    assert_eq!((band.floor, band.ceiling), (10.0, 35.0));
    assert_eq!(band_for_ratio(1.5).floor, 35.0);
}

#[test]
fn preferences_add_boosts_once_each() {
    let engine = ScoringEngine::deterministic();
    let offering = offering("boosted", 1118);

    let mut preferred = profile(1000);
    preferred.region = Some("north".to_string());
    assert_eq!(engine.score(&preferred, &offering).expect("scores").match_percentage, 85);

    preferred.state = Some(" Haryana ".to_string());
    assert_eq!(engine.score(&preferred, &offering).expect("scores").match_percentage, 88);

    preferred.institution_type = InstitutionPreference::Only(InstitutionType::Nit);
    assert_eq!(engine.score(&preferred, &offering).expect("scores").match_percentage, 91);

    preferred.institution_type = InstitutionPreference::Only(InstitutionType::Iit);
    assert_eq!(engine.score(&preferred, &offering).expect("scores").match_percentage, 88);
}

#[test]
fn boosted_scores_are_clamped_to_one_hundred() {
    let engine = ScoringEngine::deterministic();
    let offering = offering("clamped", 10_000);
    let mut preferred = profile(10);
    preferred.region = Some("North".to_string());
    preferred.state = Some("Haryana".to_string());
    preferred.institution_type = InstitutionPreference::Only(InstitutionType::Nit);

    let record = engine.score(&preferred, &offering).expect("scores");
    assert_eq!(record.match_percentage, 100);
}

#[test]
fn rejects_unscoreable_inputs() {
    let engine = ScoringEngine::deterministic();
    assert_eq!(
        engine.score(&profile(0), &offering("zero-rank", 1000)),
        Err(ScoringError::InvalidRank)
    );
    assert_eq!(
        engine.score(&profile(10), &offering("no-cutoff", 0)),
        Err(ScoringError::MissingCutoff("no-cutoff".to_string()))
    );
}

#[test]
fn seeded_jitter_is_repeatable_and_stays_in_band() {
    let first = ScoringEngine::new(Box::new(SeededJitter::new(42)));
    let second = ScoringEngine::new(Box::new(SeededJitter::new(42)));
    let offering = offering("jitter", 1000);

    for rank in [100, 900, 1100, 1400, 3000] {
        let a = first.score(&profile(rank), &offering).expect("scores");
        let b = second.score(&profile(rank), &offering).expect("scores");
        assert_eq!(a.match_percentage, b.match_percentage);
        let band = band_for_ratio(f64::from(rank) / 1000.0);
        assert!(band.contains(f64::from(a.match_percentage)));
    }
}

#[test]
fn engine_follows_scoring_config() {
    let offering = offering("configured", 1118);
    let deterministic = ScoringEngine::from_config(&ScoringConfig {
        mode: ScoringMode::Deterministic,
        seed: Some(9),
    });
    assert_eq!(
        deterministic
            .score(&profile(1000), &offering)
            .expect("scores")
            .match_percentage,
        81
    );

    let jitter = ScoringEngine::from_config(&ScoringConfig {
        mode: ScoringMode::Jitter,
        seed: Some(9),
    });
    let record = jitter.score(&profile(1000), &offering).expect("scores");
    assert!((75..=87).contains(&record.match_percentage));
}
