//! College admission prediction: profile validation, rank-band scoring, the
//! remote prediction service with its local catalogue fallback, and the HTTP
//! routes that expose the pipeline.

pub mod catalogue;
pub mod domain;
pub mod normalize;
pub mod remote;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalogue::{offering_matches, Catalogue, CatalogueError, RANK_CLIFF_MULTIPLIER};
pub use domain::{
    AdmissionChance, ApplicantProfile, CollegeOffering, EligibilityStatus, GenderPool,
    InstitutionPreference, InstitutionType, PredictionOutcome, PredictionRecord,
    PredictionSource, SeatCategory,
};
pub use normalize::{normalize_all, normalize_remote, synthesize_id};
pub use remote::{
    HttpPredictionBackend, OfflineBackend, PredictionBackend, RemotePrediction,
    RemotePredictionRequest, RemoteServiceError,
};
pub use router::prediction_router;
pub use scoring::{ScoringEngine, ScoringError};
pub use service::{rank_records, PredictionError, PredictionService};
pub use validation::{validate_submission, ProfileField, ProfileSubmission, ValidationError};
