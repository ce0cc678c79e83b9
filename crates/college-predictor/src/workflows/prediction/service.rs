use std::sync::Arc;

use tracing::{debug, info, warn};

use super::catalogue::Catalogue;
use super::domain::{
    ApplicantProfile, PredictionOutcome, PredictionRecord, PredictionSource,
};
use super::normalize::normalize_all;
use super::remote::{PredictionBackend, RemotePredictionRequest, RemoteServiceError};
use super::scoring::ScoringEngine;
use super::validation::{validate_submission, ProfileSubmission, ValidationError};

/// Orders records by match percentage, highest first. The sort is stable so
/// records with equal scores keep their input order.
pub fn rank_records(records: &mut [PredictionRecord]) {
    records.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
}

/// Service composing validation, the remote backend, the local catalogue, and
/// the scoring engine.
#[derive(Debug, Clone)]
pub struct PredictionService {
    backend: Arc<dyn PredictionBackend>,
    engine: Arc<ScoringEngine>,
    catalogue: Arc<Catalogue>,
}

impl PredictionService {
    pub fn new(
        backend: Arc<dyn PredictionBackend>,
        engine: ScoringEngine,
        catalogue: Catalogue,
    ) -> Self {
        Self {
            backend,
            engine: Arc::new(engine),
            catalogue: Arc::new(catalogue),
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Validate a raw submission and run the pipeline. Only validation can fail.
    pub async fn predict(
        &self,
        submission: &ProfileSubmission,
    ) -> Result<PredictionOutcome, PredictionError> {
        let profile = validate_submission(submission)?;
        Ok(self.predict_profile(&profile).await)
    }

    /// Ask the remote service first and fall back to the local catalogue when
    /// it fails or has nothing to say.
    pub async fn predict_profile(&self, profile: &ApplicantProfile) -> PredictionOutcome {
        let request = RemotePredictionRequest::from(profile);

        let remote = match self.backend.predict(&request).await {
            Ok(items) if items.is_empty() => Err(RemoteServiceError::Empty),
            other => other,
        };

        match remote {
            Ok(items) => {
                let mut records = normalize_all(items);
                rank_records(&mut records);
                info!(count = records.len(), "using remote predictions");
                PredictionOutcome {
                    records,
                    source: PredictionSource::Remote,
                    notice: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "remote predictions unavailable, using local catalogue");
                let records = self.fallback(profile);
                info!(count = records.len(), "using local fallback predictions");
                PredictionOutcome {
                    records,
                    source: PredictionSource::LocalFallback,
                    notice: Some(fallback_notice(&err)),
                }
            }
        }
    }

    /// Local generator: filter the catalogue, score every survivor, rank.
    pub fn fallback(&self, profile: &ApplicantProfile) -> Vec<PredictionRecord> {
        let mut records: Vec<PredictionRecord> = self
            .catalogue
            .candidates(profile)
            .filter_map(|offering| match self.engine.score(profile, offering) {
                Ok(record) => Some(record),
                Err(err) => {
                    debug!(offering = %offering.id, error = %err, "dropping unscoreable offering");
                    None
                }
            })
            .collect();
        rank_records(&mut records);
        records
    }

    pub async fn backend_healthy(&self) -> bool {
        self.backend.health().await
    }
}

fn fallback_notice(err: &RemoteServiceError) -> String {
    match err {
        RemoteServiceError::Empty => {
            "Backend returned no predictions. Using local fallback.".to_string()
        }
        RemoteServiceError::Disabled => {
            "Remote prediction service is not configured. Using local data.".to_string()
        }
        other => format!("Backend error: {other}. Using local fallback."),
    }
}

/// Error raised by the prediction service.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
