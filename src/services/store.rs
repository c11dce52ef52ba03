use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Learner, Match, NewLearner, NewMatch, NewTutor, Tutor};

/// Errors surfaced by a records backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Persistence collaborator for tutors, learners and matches
///
/// Every method is a single call with two outcomes. Implementations own id
/// assignment and decide whether deleting a missing match is `NotFound` or a
/// silent success.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_learner_by_id(&self, id: &str) -> Result<Learner, StoreError>;

    async fn fetch_tutor_by_id(&self, id: &str) -> Result<Tutor, StoreError>;

    async fn fetch_tutors(&self) -> Result<Vec<Tutor>, StoreError>;

    async fn fetch_learners(&self) -> Result<Vec<Learner>, StoreError>;

    async fn fetch_matches(&self) -> Result<Vec<Match>, StoreError>;

    async fn create_match(&self, new_match: NewMatch) -> Result<Match, StoreError>;

    async fn delete_match(&self, id: &str) -> Result<(), StoreError>;

    async fn create_tutor(&self, tutor: NewTutor) -> Result<Tutor, StoreError>;

    async fn create_learner(&self, learner: NewLearner) -> Result<Learner, StoreError>;
}
