use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::prediction::domain::{
    ApplicantProfile, CollegeOffering, GenderPool, InstitutionPreference, InstitutionType,
    SeatCategory,
};
use crate::workflows::prediction::remote::{
    PredictionBackend, RemotePrediction, RemotePredictionRequest, RemoteServiceError,
};
use crate::workflows::prediction::{Catalogue, PredictionService, ProfileSubmission, ScoringEngine};

pub(super) fn profile(rank: u32) -> ApplicantProfile {
    ApplicantProfile {
        rank,
        category: SeatCategory::Open,
        gender: GenderPool::GenderNeutral,
        institution_type: InstitutionPreference::Any,
        year: 2022,
        round: 1,
        state: None,
        region: None,
    }
}

pub(super) fn submission(rank: &str) -> ProfileSubmission {
    ProfileSubmission {
        jee_rank: Some(rank.to_string()),
        category: Some("OPEN".to_string()),
        gender: Some("Gender-Neutral".to_string()),
        institution_type: Some("Any".to_string()),
        year: Some("2022".to_string()),
        round: Some("1".to_string()),
        state: None,
        region: None,
    }
}

pub(super) fn offering(id: &str, closing_rank: u32) -> CollegeOffering {
    CollegeOffering {
        id: id.to_string(),
        institute: format!("Institute {id}"),
        program: "Computer Science and Engineering".to_string(),
        institution_type: InstitutionType::Nit,
        state: "Haryana".to_string(),
        region: "North".to_string(),
        seat_type: "OPEN".to_string(),
        gender: GenderPool::NEUTRAL_LABEL.to_string(),
        opening_rank: closing_rank / 2,
        closing_rank,
        year: 2022,
        round: 1,
    }
}

pub(super) fn remote_item(id: &str, match_percentage: f64) -> RemotePrediction {
    RemotePrediction {
        id: Some(id.to_string()),
        institute_name: Some(format!("Remote {id}")),
        branch: Some("Mechanical Engineering".to_string()),
        institution_type: Some("IIT".to_string()),
        match_percentage: Some(match_percentage),
        closing_rank: Some(2500.0),
        state: Some("Maharashtra".to_string()),
        region: Some("West".to_string()),
        ..RemotePrediction::default()
    }
}

/// Backend that answers with a fixed list and records every request.
#[derive(Debug, Default)]
pub(super) struct FixedBackend {
    items: Vec<RemotePrediction>,
    requests: Mutex<Vec<RemotePredictionRequest>>,
}

impl FixedBackend {
    pub(super) fn new(items: Vec<RemotePrediction>) -> Self {
        Self {
            items,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn requests(&self) -> Vec<RemotePredictionRequest> {
        self.requests.lock().expect("request mutex poisoned").clone()
    }
}

#[async_trait]
impl PredictionBackend for FixedBackend {
    async fn predict(
        &self,
        request: &RemotePredictionRequest,
    ) -> Result<Vec<RemotePrediction>, RemoteServiceError> {
        self.requests
            .lock()
            .expect("request mutex poisoned")
            .push(request.clone());
        Ok(self.items.clone())
    }

    async fn health(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub(super) struct FailingBackend;

#[async_trait]
impl PredictionBackend for FailingBackend {
    async fn predict(
        &self,
        _request: &RemotePredictionRequest,
    ) -> Result<Vec<RemotePrediction>, RemoteServiceError> {
        Err(RemoteServiceError::Status {
            status: 503,
            body: "maintenance".to_string(),
        })
    }

    async fn health(&self) -> bool {
        false
    }
}

pub(super) fn build_service(backend: Arc<dyn PredictionBackend>) -> PredictionService {
    PredictionService::new(backend, ScoringEngine::deterministic(), Catalogue::builtin())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
