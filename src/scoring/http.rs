use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::scoring::{reject_error_marker, ScoringError, ScoringService};
use crate::types::{FeatureRequestDiff, SubmissionConstraints};

const ERROR_PREVIEW_CHARS: usize = 180;

#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    client: Client,
    endpoint: String,
}

impl HttpScoringClient {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ideagenie/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .context("failed to build scoring HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs.max(1)),
            Duration::from_secs(config.connect_timeout_secs.max(1)),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScoringService for HttpScoringClient {
    async fn get_top_ideas(
        &self,
        constraints: &SubmissionConstraints,
    ) -> Result<Vec<FeatureRequestDiff>, ScoringError> {
        let url = self.endpoint.as_str();
        debug!(%url, "posting constraints to scoring endpoint");
        let response = self
            .client
            .post(url)
            .json(constraints)
            .send()
            .await
            .map_err(|source| ScoringError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ScoringError::Transport {
                url: url.to_string(),
                source,
            })?;
        if !status.is_success() {
            return Err(ScoringError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        let payload: RankingPayload =
            serde_json::from_str(&body).map_err(|source| ScoringError::Decode {
                url: url.to_string(),
                source,
            })?;
        reject_error_marker(payload.into_rows())
    }
}

// A failed extraction comes back as a bare marker object with a 200.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RankingPayload {
    Rows(Vec<FeatureRequestDiff>),
    Single(FeatureRequestDiff),
}

impl RankingPayload {
    fn into_rows(self) -> Vec<FeatureRequestDiff> {
        match self {
            Self::Rows(rows) => rows,
            Self::Single(row) => vec![row],
        }
    }
}

/// Prefers the service's `{"error": ...}` body; otherwise a short preview.
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(message)) = object.get("error") {
            return message.clone();
        }
    }
    body.chars().take(ERROR_PREVIEW_CHARS).collect()
}
