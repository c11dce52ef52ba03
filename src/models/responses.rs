use serde::{Deserialize, Serialize};
use crate::models::catalog::Weekday;
use crate::models::domain::{Learner, Match, Tutor};

/// One active day of a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSlot {
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
}

/// Unfiltered picker entry for the "choose anyone" mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub available: bool,
}

/// Tutor with the days they can meet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorListing {
    #[serde(flatten)]
    pub tutor: Tutor,
    pub schedule: Vec<ActiveSlot>,
}

/// Learner with the days they can meet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerListing {
    #[serde(flatten)]
    pub learner: Learner,
    pub schedule: Vec<ActiveSlot>,
}

/// Response for the learner-side match screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibleTutorsResponse {
    pub learner: Learner,
    pub eligible: Vec<TutorListing>,
    pub candidates: Vec<CandidateSummary>,
}

/// Response for the tutor-side match screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibleLearnersResponse {
    pub tutor: Tutor,
    pub eligible: Vec<LearnerListing>,
    pub candidates: Vec<CandidateSummary>,
}

/// Response for the match list/search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub matches: Vec<Match>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Field-level validation failure for intake forms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormErrorResponse {
    pub error: String,
    pub fields: std::collections::BTreeMap<String, String>,
    pub status_code: u16,
}
