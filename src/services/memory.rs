use crate::models::{Learner, Match, NewLearner, NewMatch, NewTutor, Tutor};
use crate::services::store::{RecordStore, StoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::RwLock;

/// Initial contents of an [`InMemoryStore`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub tutors: Vec<Tutor>,
    #[serde(default)]
    pub learners: Vec<Learner>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl SeedData {
    /// Read seed records from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            StoreError::InvalidResponse(format!(
                "Failed to read seed file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        serde_json::from_str(&raw)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse seed file: {}", e)))
    }
}

/// Process-local records backend
///
/// Used for local runs and tests. Ids are random UUIDs; deleting an unknown
/// match reports `NotFound`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<SeedData>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(seed: SeedData) -> Self {
        Self {
            records: RwLock::new(seed),
        }
    }

    fn next_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn fetch_learner_by_id(&self, id: &str) -> Result<Learner, StoreError> {
        let records = self.records.read().await;
        records
            .learners
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("learner {}", id)))
    }

    async fn fetch_tutor_by_id(&self, id: &str) -> Result<Tutor, StoreError> {
        let records = self.records.read().await;
        records
            .tutors
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("tutor {}", id)))
    }

    async fn fetch_tutors(&self) -> Result<Vec<Tutor>, StoreError> {
        Ok(self.records.read().await.tutors.clone())
    }

    async fn fetch_learners(&self) -> Result<Vec<Learner>, StoreError> {
        Ok(self.records.read().await.learners.clone())
    }

    async fn fetch_matches(&self) -> Result<Vec<Match>, StoreError> {
        Ok(self.records.read().await.matches.clone())
    }

    async fn create_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        let created = Match::from_new(Self::next_id(), new_match);
        self.records.write().await.matches.push(created.clone());
        Ok(created)
    }

    async fn delete_match(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let position = records
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("match {}", id)))?;

        records.matches.remove(position);
        Ok(())
    }

    async fn create_tutor(&self, tutor: NewTutor) -> Result<Tutor, StoreError> {
        let created = Tutor {
            id: Self::next_id(),
            first_name: tutor.first_name,
            last_name: tutor.last_name,
            gender: tutor.gender,
            email: tutor.email,
            phone: tutor.phone,
            available: tutor.available,
            preferences: tutor.preferences,
            availability: tutor.availability,
        };
        self.records.write().await.tutors.push(created.clone());
        Ok(created)
    }

    async fn create_learner(&self, learner: NewLearner) -> Result<Learner, StoreError> {
        let created = Learner {
            id: Self::next_id(),
            first_name: learner.first_name,
            last_name: learner.last_name,
            gender: learner.gender,
            available: learner.available,
            level: learner.level,
            availability: learner.availability,
        };
        self.records.write().await.learners.push(created.clone());
        Ok(created)
    }
}
