use super::common::*;
use crate::workflows::prediction::domain::{
    GenderPool, InstitutionPreference, InstitutionType, SeatCategory,
};
use crate::workflows::prediction::{validate_submission, ProfileField, ProfileSubmission};

#[test]
fn accepts_a_complete_submission() {
    let mut raw = submission("1000");
    raw.state = Some("Haryana".to_string());
    raw.region = Some("  ".to_string());

    let profile = validate_submission(&raw).expect("valid profile");

    assert_eq!(profile.rank, 1000);
    assert_eq!(profile.category, SeatCategory::Open);
    assert_eq!(profile.gender, GenderPool::GenderNeutral);
    assert_eq!(profile.institution_type, InstitutionPreference::Any);
    assert_eq!((profile.year, profile.round), (2022, 1));
    assert_eq!(profile.state.as_deref(), Some("Haryana"));
    assert_eq!(profile.region, None);
}

#[test]
fn reports_every_missing_field() {
    let err = validate_submission(&ProfileSubmission::default()).expect_err("empty is invalid");

    assert_eq!(err.fields.len(), 6);
    assert_eq!(err.message_for(ProfileField::JeeRank), Some("JEE Rank is required"));
    assert_eq!(
        err.message_for(ProfileField::Category),
        Some("Please select a category")
    );
    assert_eq!(err.message_for(ProfileField::Gender), Some("Please select gender"));
    assert_eq!(
        err.message_for(ProfileField::InstitutionType),
        Some("Please select institution type")
    );
    assert_eq!(err.message_for(ProfileField::Year), Some("Please select year"));
    assert_eq!(err.message_for(ProfileField::Round), Some("Please select round"));
}

#[test]
fn rank_must_be_a_whole_number_in_range() {
    for raw in ["0", "-5", "1000001", "12.5", "abc"] {
        let err = validate_submission(&submission(raw)).expect_err("rank is invalid");
        assert_eq!(
            err.message_for(ProfileField::JeeRank),
            Some("Please enter a valid rank between 1 and 1000000"),
            "rank {raw:?}"
        );
        assert_eq!(err.fields.len(), 1);
    }

    for raw in ["1", " 1000000 "] {
        assert!(validate_submission(&submission(raw)).is_ok(), "rank {raw:?}");
    }
}

#[test]
fn rejects_unknown_choices() {
    let mut raw = submission("1000");
    raw.category = Some("VIP".to_string());
    raw.gender = Some("other".to_string());
    raw.institution_type = Some("University".to_string());
    raw.round = Some("0".to_string());

    let err = validate_submission(&raw).expect_err("choices are invalid");

    assert_eq!(
        err.message_for(ProfileField::Category),
        Some("Unknown category 'VIP'")
    );
    assert!(err.message_for(ProfileField::Gender).is_some());
    assert!(err.message_for(ProfileField::InstitutionType).is_some());
    assert!(err.message_for(ProfileField::Round).is_some());
    assert!(err.message_for(ProfileField::Year).is_none());
    assert!(err.to_string().starts_with("invalid profile: "));
}

#[test]
fn parses_short_and_case_insensitive_labels() {
    let mut raw = submission("2500");
    raw.category = Some("obc-ncl".to_string());
    raw.gender = Some("female".to_string());
    raw.institution_type = Some("nit".to_string());
    raw.region = Some("Any".to_string());

    let profile = validate_submission(&raw).expect("valid profile");

    assert_eq!(profile.category, SeatCategory::ObcNcl);
    assert_eq!(profile.gender, GenderPool::FemaleOnly);
    assert_eq!(
        profile.institution_type,
        InstitutionPreference::Only(InstitutionType::Nit)
    );
    assert_eq!(profile.region, None);
}

#[test]
fn json_numbers_and_strings_both_deserialize() {
    let raw: ProfileSubmission = serde_json::from_value(serde_json::json!({
        "jeeRank": 1000,
        "category": "OPEN",
        "gender": "Gender-Neutral",
        "institutionType": "IIT",
        "year": "2022",
        "round": 1
    }))
    .expect("deserializes");

    let profile = validate_submission(&raw).expect("valid profile");
    assert_eq!(profile.rank, 1000);
    assert_eq!(profile.round, 1);
    assert_eq!(
        profile.institution_type,
        InstitutionPreference::Only(InstitutionType::Iit)
    );
}
