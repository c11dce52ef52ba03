use crate::models::{Learner, Match, MatchParty, NewMatch, Tutor};
use crate::services::{RecordStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Errors from creating, listing or removing matches
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence failure: {0}")]
    Persistence(StoreError),
}

impl From<StoreError> for MatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => MatchError::NotFound(what),
            other => MatchError::Persistence(other),
        }
    }
}

/// Creates, lists and removes matches through the records backend
///
/// Matches carry a name snapshot taken at creation. Nothing here re-reads
/// the tutor or learner afterwards, flips their `available` flag, or stops
/// the same person from being matched more than once.
#[derive(Clone)]
pub struct MatchLifecycle {
    store: Arc<dyn RecordStore>,
}

impl MatchLifecycle {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Persist a match built from the six snapshot fields, copied verbatim
    ///
    /// A failed write yields no match.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_match(
        &self,
        tutor_id: &str,
        tutor_first: &str,
        tutor_last: &str,
        learner_id: &str,
        learner_first: &str,
        learner_last: &str,
    ) -> Result<Match, MatchError> {
        let new_match = NewMatch {
            tutor: MatchParty::new(tutor_id, tutor_first, tutor_last),
            learner: MatchParty::new(learner_id, learner_first, learner_last),
        };

        let created = self.store.create_match(new_match).await.map_err(|e| {
            tracing::error!("Failed to create match {} -> {}: {}", tutor_id, learner_id, e);
            MatchError::from(e)
        })?;

        tracing::info!(
            "Created match {} ({} -> {})",
            created.id,
            created.tutor.full_name(),
            created.learner.full_name()
        );
        Ok(created)
    }

    /// Snapshot both records and create the match
    pub async fn match_pair(&self, tutor: &Tutor, learner: &Learner) -> Result<Match, MatchError> {
        self.create_match(
            &tutor.id,
            &tutor.first_name,
            &tutor.last_name,
            &learner.id,
            &learner.first_name,
            &learner.last_name,
        )
        .await
    }

    /// Match a learner with a tutor the operator picked from `tutors`
    pub async fn match_learner_with(
        &self,
        learner: &Learner,
        tutor_id: &str,
        tutors: &[Tutor],
    ) -> Result<Match, MatchError> {
        let tutor = tutors
            .iter()
            .find(|t| t.id == tutor_id)
            .ok_or_else(|| MatchError::NotFound(format!("tutor {}", tutor_id)))?;

        self.match_pair(tutor, learner).await
    }

    /// Match a tutor with a learner the operator picked from `learners`
    pub async fn match_tutor_with(
        &self,
        tutor: &Tutor,
        learner_id: &str,
        learners: &[Learner],
    ) -> Result<Match, MatchError> {
        let learner = learners
            .iter()
            .find(|l| l.id == learner_id)
            .ok_or_else(|| MatchError::NotFound(format!("learner {}", learner_id)))?;

        self.match_pair(tutor, learner).await
    }

    /// Remove a match; a missing id comes back as `NotFound`
    pub async fn delete_match(&self, id: &str) -> Result<(), MatchError> {
        self.store.delete_match(id).await?;
        tracing::info!("Deleted match {}", id);
        Ok(())
    }

    pub async fn list_matches(&self) -> Result<Vec<Match>, MatchError> {
        Ok(self.store.fetch_matches().await?)
    }

    /// List matches and keep those whose tutor or learner name contains `query`
    pub async fn search(&self, query: &str) -> Result<Vec<Match>, MatchError> {
        let needle = query.to_lowercase();
        let matches = self.list_matches().await?;

        Ok(matches
            .into_iter()
            .filter(|m| matches_query(m, &needle))
            .collect())
    }
}

/// Case-insensitive name search over matches; empty query keeps everything
pub fn search_matches<'a>(matches: &'a [Match], query: &str) -> Vec<&'a Match> {
    let needle = query.to_lowercase();
    matches.iter().filter(|m| matches_query(m, &needle)).collect()
}

/// `needle` must already be lowercase
#[inline]
fn matches_query(m: &Match, needle: &str) -> bool {
    m.tutor.full_name().to_lowercase().contains(needle)
        || m.learner.full_name().to_lowercase().contains(needle)
}
