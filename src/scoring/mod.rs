pub mod fixture;
pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{FeatureRequestDiff, SubmissionConstraints};

pub use fixture::StaticScorer;
pub use http::HttpScoringClient;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("scoring request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("scoring endpoint {url} returned {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },
    #[error("invalid scoring response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("scoring service reported an error: {0}")]
    Upstream(String),
}

#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn get_top_ideas(
        &self,
        constraints: &SubmissionConstraints,
    ) -> Result<Vec<FeatureRequestDiff>, ScoringError>;
}

pub fn reject_error_marker(
    rows: Vec<FeatureRequestDiff>,
) -> Result<Vec<FeatureRequestDiff>, ScoringError> {
    match rows.as_slice() {
        [marker] if marker.is_error_marker() => {
            Err(ScoringError::Upstream(marker.justification.clone()))
        }
        _ => Ok(rows),
    }
}

#[cfg(test)]
mod tests {
    use crate::scoring::{reject_error_marker, ScoringError};
    use crate::types::{FeatureRequestDiff, IdeaId};

    #[test]
    fn passes_ranked_rows_through() {
        let rows = vec![FeatureRequestDiff::new(1, "Dark mode", 8.0, "J1")];
        let kept = reject_error_marker(rows.clone()).expect("rows rejected");
        assert_eq!(kept, rows);
    }

    #[test]
    fn surfaces_error_marker_message() {
        let marker = FeatureRequestDiff {
            idea_id: IdeaId::Text("Error".to_string()),
            idea_summary: String::new(),
            composite_score: 0.0,
            justification: "model unavailable".to_string(),
        };
        match reject_error_marker(vec![marker]) {
            Err(ScoringError::Upstream(message)) => assert_eq!(message, "model unavailable"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn marker_inside_a_longer_ranking_is_kept() {
        let rows = vec![
            FeatureRequestDiff::new(1, "Dark mode", 8.0, "J1"),
            FeatureRequestDiff {
                idea_id: IdeaId::Text("Error".to_string()),
                idea_summary: "Error".to_string(),
                composite_score: 0.0,
                justification: "odd row".to_string(),
            },
        ];
        let kept = reject_error_marker(rows.clone()).expect("rows rejected");
        assert_eq!(kept, rows);
    }
}
