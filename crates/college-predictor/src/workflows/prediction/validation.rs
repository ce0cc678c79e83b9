use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{ApplicantProfile, GenderPool, InstitutionPreference, SeatCategory};

pub const MIN_RANK: u32 = 1;
pub const MAX_RANK: u32 = 1_000_000;

/// Raw profile exactly as a form submits it. Numeric fields may arrive as JSON
/// numbers or strings; nothing is trusted until [`validate_submission`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    #[serde(default, alias = "jeeRank", deserialize_with = "text_or_number")]
    pub jee_rank: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub gender: Option<String>,
    #[serde(default, alias = "institutionType", deserialize_with = "text_or_number")]
    pub institution_type: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub round: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub region: Option<String>,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Int(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
    }))
}

/// Profile fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    JeeRank,
    Category,
    Gender,
    InstitutionType,
    Year,
    Round,
}

impl ProfileField {
    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::JeeRank => "JEE Rank",
            ProfileField::Category => "Category",
            ProfileField::Gender => "Gender",
            ProfileField::InstitutionType => "Institution Type",
            ProfileField::Year => "Year",
            ProfileField::Round => "Round",
        }
    }
}

/// Every failing field with the message to show next to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationError {
    pub fields: BTreeMap<ProfileField, String>,
}

impl ValidationError {
    pub fn message_for(&self, field: ProfileField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn reject(&mut self, field: ProfileField, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.fields.values().map(String::as_str).collect();
        write!(f, "invalid profile: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Location filters treat blanks and "Any" as no filter at all.
fn location(value: &Option<String>) -> Option<String> {
    present(value)
        .filter(|value| !value.eq_ignore_ascii_case("any"))
        .map(str::to_string)
}

fn parse_whole<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.parse::<T>().ok()
}

/// Checks every required field and builds the typed profile. Location is
/// optional: an absent state and region means "any location".
pub fn validate_submission(
    submission: &ProfileSubmission,
) -> Result<ApplicantProfile, ValidationError> {
    let mut errors = ValidationError::default();

    let rank = match present(&submission.jee_rank) {
        None => {
            errors.reject(ProfileField::JeeRank, "JEE Rank is required");
            None
        }
        Some(raw) => match parse_whole::<u32>(raw) {
            Some(rank) if (MIN_RANK..=MAX_RANK).contains(&rank) => Some(rank),
            _ => {
                errors.reject(
                    ProfileField::JeeRank,
                    format!("Please enter a valid rank between {MIN_RANK} and {MAX_RANK}"),
                );
                None
            }
        },
    };

    let category = match present(&submission.category) {
        None => {
            errors.reject(ProfileField::Category, "Please select a category");
            None
        }
        Some(raw) => SeatCategory::parse(raw).or_else(|| {
            errors.reject(ProfileField::Category, format!("Unknown category '{raw}'"));
            None
        }),
    };

    let gender = match present(&submission.gender) {
        None => {
            errors.reject(ProfileField::Gender, "Please select gender");
            None
        }
        Some(raw) => GenderPool::parse(raw).or_else(|| {
            errors.reject(ProfileField::Gender, format!("Unknown gender pool '{raw}'"));
            None
        }),
    };

    let institution_type = match present(&submission.institution_type) {
        None => {
            errors.reject(
                ProfileField::InstitutionType,
                "Please select institution type",
            );
            None
        }
        Some(raw) => InstitutionPreference::parse(raw).or_else(|| {
            errors.reject(
                ProfileField::InstitutionType,
                format!("Unknown institution type '{raw}'"),
            );
            None
        }),
    };

    let year = match present(&submission.year) {
        None => {
            errors.reject(ProfileField::Year, "Please select year");
            None
        }
        Some(raw) => parse_whole::<u16>(raw).filter(|year| *year > 0).or_else(|| {
            errors.reject(ProfileField::Year, format!("Invalid year '{raw}'"));
            None
        }),
    };

    let round = match present(&submission.round) {
        None => {
            errors.reject(ProfileField::Round, "Please select round");
            None
        }
        Some(raw) => parse_whole::<u8>(raw).filter(|round| *round > 0).or_else(|| {
            errors.reject(ProfileField::Round, format!("Invalid round '{raw}'"));
            None
        }),
    };

    match (rank, category, gender, institution_type, year, round) {
        (
            Some(rank),
            Some(category),
            Some(gender),
            Some(institution_type),
            Some(year),
            Some(round),
        ) if errors.is_empty() => Ok(ApplicantProfile {
            rank,
            category,
            gender,
            institution_type,
            year,
            round,
            state: location(&submission.state),
            region: location(&submission.region),
        }),
        _ => Err(errors),
    }
}
