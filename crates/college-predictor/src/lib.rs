//! Rank-based engineering college recommendations.
//!
//! The crate is organised around three workflows: the prediction pipeline that
//! scores candidate offerings for an applicant, the results engine that filters,
//! sorts, and paginates a prediction set, and the selection store that keeps the
//! applicant's favorites and comparison shortlist on disk.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
