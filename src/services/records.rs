use crate::models::{Learner, Match, NewLearner, NewMatch, NewTutor, Tutor};
use crate::services::store::{RecordStore, StoreError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Collection names on the records backend
#[derive(Debug, Clone)]
pub struct RecordCollections {
    pub tutors: String,
    pub learners: String,
    pub matches: String,
}

impl Default for RecordCollections {
    fn default() -> Self {
        Self {
            tutors: "tutors".to_string(),
            learners: "learners".to_string(),
            matches: "matches".to_string(),
        }
    }
}

/// REST client for the records backend
///
/// Each collection lives at `{base_url}/{collection}`, single records at
/// `{base_url}/{collection}/{id}`. Listings may be a bare JSON array or an
/// object wrapping a `documents` array.
pub struct RecordsClient {
    base_url: String,
    api_key: String,
    client: Client,
    collections: RecordCollections,
}

impl RecordsClient {
    pub fn new(
        base_url: String,
        api_key: String,
        collections: RecordCollections,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            collections,
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), collection)
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), urlencoding::encode(id))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(API_KEY_HEADER, &self.api_key)
    }

    /// Map non-success statuses onto [`StoreError`]
    async fn check(response: Response, what: &str) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(what.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StoreError::Unauthorized(format!("{}: {}", what, status)))
            }
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Records backend failed for {}: {} - {}", what, status, body);
                Err(StoreError::ApiError(format!("{}: {}", what, status)))
            }
        }
    }

    async fn get_one<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<T, StoreError> {
        let url = self.record_url(collection, id);
        tracing::debug!("Fetching record from: {}", url);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::check(response, &format!("{} {}", collection, id)).await?;
        let json: Value = response.json().await?;

        serde_json::from_value(json).map_err(|e| {
            StoreError::InvalidResponse(format!("Failed to parse {} {}: {}", collection, id, e))
        })
    }

    async fn get_all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        let url = self.collection_url(collection);
        tracing::debug!("Fetching collection from: {}", url);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::check(response, collection).await?;
        let json: Value = response.json().await?;

        let documents = match json {
            Value::Array(items) => items,
            Value::Object(mut obj) => match obj.remove("documents") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(StoreError::InvalidResponse("Missing documents array".into()));
                }
            },
            _ => return Err(StoreError::InvalidResponse("Expected a JSON array".into())),
        };

        let total = documents.len();
        let records: Vec<T> = documents
            .into_iter()
            .filter_map(|doc| match serde_json::from_value(doc) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping malformed {} record: {}", collection, e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} of {} {} records", records.len(), total, collection);
        Ok(records)
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        collection: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let url = self.collection_url(collection);

        let response = self
            .authorized(self.client.post(&url))
            .json(body)
            .send()
            .await?;
        let response = Self::check(response, collection).await?;
        let json: Value = response.json().await?;

        serde_json::from_value(json).map_err(|e| {
            StoreError::InvalidResponse(format!("Failed to parse created {}: {}", collection, e))
        })
    }
}

#[async_trait]
impl RecordStore for RecordsClient {
    async fn fetch_learner_by_id(&self, id: &str) -> Result<Learner, StoreError> {
        self.get_one(&self.collections.learners, id).await
    }

    async fn fetch_tutor_by_id(&self, id: &str) -> Result<Tutor, StoreError> {
        self.get_one(&self.collections.tutors, id).await
    }

    async fn fetch_tutors(&self) -> Result<Vec<Tutor>, StoreError> {
        self.get_all(&self.collections.tutors).await
    }

    async fn fetch_learners(&self) -> Result<Vec<Learner>, StoreError> {
        self.get_all(&self.collections.learners).await
    }

    async fn fetch_matches(&self) -> Result<Vec<Match>, StoreError> {
        self.get_all(&self.collections.matches).await
    }

    async fn create_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        let created: Match = self.post(&self.collections.matches, &new_match).await?;
        tracing::debug!("Created match {}", created.id);
        Ok(created)
    }

    async fn delete_match(&self, id: &str) -> Result<(), StoreError> {
        let url = self.record_url(&self.collections.matches, id);

        let response = self.authorized(self.client.delete(&url)).send().await?;
        Self::check(response, &format!("match {}", id)).await?;

        tracing::debug!("Deleted match {}", id);
        Ok(())
    }

    async fn create_tutor(&self, tutor: NewTutor) -> Result<Tutor, StoreError> {
        self.post(&self.collections.tutors, &tutor).await
    }

    async fn create_learner(&self, learner: NewLearner) -> Result<Learner, StoreError> {
        self.post(&self.collections.learners, &learner).await
    }
}
