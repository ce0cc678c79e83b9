use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use super::domain::ApplicantProfile;

/// Body posted to the remote prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePredictionRequest {
    pub jee_rank: u32,
    pub category: String,
    pub gender: String,
    pub institution_type_filter: String,
    pub year_filter: Option<u16>,
    pub round_filter: Option<u8>,
    pub state_filter: String,
    pub region_filter: String,
}

impl From<&ApplicantProfile> for RemotePredictionRequest {
    fn from(profile: &ApplicantProfile) -> Self {
        Self {
            jee_rank: profile.rank,
            category: profile.category.label().to_string(),
            gender: profile.gender.label().to_string(),
            institution_type_filter: profile.institution_type.label().to_string(),
            year_filter: Some(profile.year),
            round_filter: Some(profile.round),
            state_filter: profile.state.clone().unwrap_or_default(),
            region_filter: profile.region.clone().unwrap_or_default(),
        }
    }
}

/// Loosely shaped item returned by the remote service. Every field is
/// optional; [`super::normalize`] decides what a missing value means.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePrediction {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub institute_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub institute: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub branch: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub institution_type: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub match_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub applied_cutoff: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub closing_rank: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub opening_rank: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub eligibility_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub admission_chance: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub year: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub round: Option<f64>,
}

/// Strings stay strings, numbers and booleans become their text form, anything
/// else (null, arrays, objects) reads as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        Some(serde_json::Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

/// Numbers and numeric strings become `f64`; anything unparseable is absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => number.as_f64(),
        Some(serde_json::Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite()))
}

/// Failure talking to the remote prediction service. Always recovered by the
/// local fallback.
#[derive(Debug, thiserror::Error)]
pub enum RemoteServiceError {
    #[error("remote prediction service is not configured")]
    Disabled,
    #[error("remote prediction request failed: {0}")]
    Transport(String),
    #[error("remote prediction service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("remote prediction payload could not be decoded: {0}")]
    Decode(String),
    #[error("remote prediction service returned no predictions")]
    Empty,
}

/// Contract for the service that proposes candidate colleges.
#[async_trait]
pub trait PredictionBackend: Debug + Send + Sync {
    async fn predict(
        &self,
        request: &RemotePredictionRequest,
    ) -> Result<Vec<RemotePrediction>, RemoteServiceError>;

    /// Diagnostic reachability check; never gates predictions.
    async fn health(&self) -> bool;
}

/// HTTP client for the remote prediction service.
#[derive(Debug, Clone)]
pub struct HttpPredictionBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPredictionBackend {
    pub const PREDICT_PATH: &'static str = "/api/predict";
    pub const HEALTH_PATH: &'static str = "/actuator/health";

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RemoteServiceError::Transport(err.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PredictionBackend for HttpPredictionBackend {
    async fn predict(
        &self,
        request: &RemotePredictionRequest,
    ) -> Result<Vec<RemotePrediction>, RemoteServiceError> {
        let url = format!("{}{}", self.base_url, Self::PREDICT_PATH);
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|err| RemoteServiceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<RemotePrediction>>()
            .await
            .map_err(|err| RemoteServiceError::Decode(err.to_string()))
    }

    async fn health(&self) -> bool {
        let url = format!("{}{}", self.base_url, Self::HEALTH_PATH);
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Backend used when no remote service is configured; every call falls back.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineBackend;

#[async_trait]
impl PredictionBackend for OfflineBackend {
    async fn predict(
        &self,
        _request: &RemotePredictionRequest,
    ) -> Result<Vec<RemotePrediction>, RemoteServiceError> {
        Err(RemoteServiceError::Disabled)
    }

    async fn health(&self) -> bool {
        false
    }
}
