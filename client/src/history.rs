//! Match-history store collaborator
//!
//! The history store is a separate REST service; it is a consumer of final
//! scores, not part of the live state machine. Failures here are surfaced to
//! the operator who triggered them and never touch the scoreboard.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("match {0} was not found")]
    NotFound(i64),
    #[error("history store returned status {0}")]
    Status(reqwest::StatusCode),
}

/// One stored match result, as the store returns it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: i64,
    pub home_score: u32,
    pub away_score: u32,
    pub played_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewMatch {
    home_score: u32,
    away_score: u32,
}

/// Some store revisions return only a confirmation message from `create`,
/// so the id is optional on the wire.
#[derive(Debug, Deserialize)]
struct CreateResponse {
    #[serde(default)]
    id: Option<i64>,
}

pub struct MatchHistoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl MatchHistoryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HistoryError> {
        let client = reqwest::ClientBuilder::new().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Lists stored match results, newest first.
    pub async fn list(&self) -> Result<Vec<MatchRecord>, HistoryError> {
        let url = format!("{}/api/matches", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(HistoryError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Stores one final score; returns the new record's id when the store
    /// reports one.
    pub async fn create(
        &self,
        home_score: u32,
        away_score: u32,
    ) -> Result<Option<i64>, HistoryError> {
        let url = format!("{}/api/matches", self.base_url);
        let body = NewMatch {
            home_score,
            away_score,
        };

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(HistoryError::Status(response.status()));
        }

        let created: CreateResponse = response.json().await.unwrap_or(CreateResponse { id: None });
        Ok(created.id)
    }

    pub async fn delete(&self, id: i64) -> Result<(), HistoryError> {
        let url = format!("{}/api/matches/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(HistoryError::NotFound(id));
        }
        if !response.status().is_success() {
            return Err(HistoryError::Status(response.status()));
        }

        Ok(())
    }
}
