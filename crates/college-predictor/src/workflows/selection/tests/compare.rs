use super::common::*;
use crate::workflows::prediction::{Catalogue, ScoringEngine};
use crate::workflows::prediction::domain::{
    ApplicantProfile, GenderPool, InstitutionPreference, SeatCategory,
};
use crate::workflows::selection::{comparison_table, SelectionEntry};

#[test]
fn table_lists_every_field_in_order() {
    let table = comparison_table(&[entry("a"), entry("b")]);

    let labels: Vec<&str> = table.rows.iter().map(|row| row.label).collect();
    assert_eq!(
        labels,
        vec![
            "Institute Name",
            "Branch",
            "Type",
            "State",
            "Region",
            "Match Score",
            "Admission Chance",
            "Opening Rank",
            "Closing Rank",
            "Applied Cutoff",
            "Year",
            "Round",
            "Eligibility",
        ]
    );
    assert_eq!(table.ids, vec!["a".to_string(), "b".to_string()]);
    assert!(table.rows.iter().all(|row| row.values.len() == 2));
}

#[test]
fn formats_numbers_percentages_and_labels() {
    let mut far = entry("far");
    far.closing_rank = Some(1_234_567);
    let table = comparison_table(&[entry("a"), far]);

    let value = |label: &str, column: usize| {
        table.row(label).expect("row present").values[column].clone()
    };
    assert_eq!(value("Match Score", 0), "81%");
    assert_eq!(value("Closing Rank", 0), "1,118");
    assert_eq!(value("Closing Rank", 1), "1,234,567");
    assert_eq!(value("Opening Rank", 0), "717");
    assert_eq!(value("Year", 0), "2022");
    assert_eq!(value("Admission Chance", 0), "Medium");
    assert_eq!(value("Eligibility", 0), "Eligible");
}

#[test]
fn missing_values_render_as_not_available() {
    let mut sparse = entry("sparse");
    sparse.state = String::new();
    sparse.match_percentage = None;
    sparse.admission_chance = None;
    sparse.opening_rank = None;
    sparse.year = None;

    let table = comparison_table(&[sparse]);

    for label in ["State", "Match Score", "Admission Chance", "Opening Rank", "Year"] {
        assert_eq!(table.row(label).expect("row").values, vec!["N/A".to_string()]);
    }
}

#[test]
fn empty_list_yields_empty_table() {
    let table = comparison_table(&[]);
    assert!(table.is_empty());
    assert!(table.rows.iter().all(|row| row.values.is_empty()));
}

#[test]
fn entries_snapshot_records_and_offerings() {
    let catalogue = Catalogue::builtin();
    let offering = catalogue.find("nit-kurukshetra-computer").expect("offering");
    let profile = ApplicantProfile {
        rank: 1000,
        category: SeatCategory::Open,
        gender: GenderPool::GenderNeutral,
        institution_type: InstitutionPreference::Any,
        year: 2022,
        round: 1,
        state: None,
        region: None,
    };
    let record = ScoringEngine::deterministic()
        .score(&profile, offering)
        .expect("scores");

    let from_record = SelectionEntry::from_record(&record, saved_at());
    let from_offering = SelectionEntry::from_offering(offering, saved_at());

    assert_eq!(from_record.match_percentage, Some(81));
    assert_eq!(from_record.closing_rank, Some(1118));
    assert_eq!(from_offering.match_percentage, None);
    assert_eq!(from_offering.applied_cutoff, Some(1118));
    assert_eq!(from_record.institute_name, from_offering.institute_name);

    let table = comparison_table(&[from_record, from_offering]);
    assert_eq!(
        table.row("Match Score").expect("row").values,
        vec!["81%".to_string(), "N/A".to_string()]
    );
}
