use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::prediction::{AdmissionChance, EligibilityStatus};
use crate::workflows::selection::SelectionEntry;

pub(super) fn saved_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn entry(id: &str) -> SelectionEntry {
    SelectionEntry {
        id: id.to_string(),
        institute_name: format!("Institute {id}"),
        branch: "Computer Science and Engineering".to_string(),
        institution_type: "NIT".to_string(),
        state: "Haryana".to_string(),
        region: "North".to_string(),
        match_percentage: Some(81),
        admission_chance: Some(AdmissionChance::Medium),
        eligibility_status: Some(EligibilityStatus::Eligible),
        opening_rank: Some(717),
        closing_rank: Some(1118),
        applied_cutoff: Some(1118),
        year: Some(2022),
        round: Some(1),
        saved_at: saved_at(),
    }
}

pub(super) fn ids(entries: &[SelectionEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.id.as_str()).collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
