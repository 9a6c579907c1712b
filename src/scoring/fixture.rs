use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::scoring::{ScoringError, ScoringService};
use crate::seed::placeholder_template;
use crate::types::{FeatureRequestDiff, SubmissionConstraints};

#[derive(Debug)]
pub struct StaticScorer {
    outcome: Result<Vec<FeatureRequestDiff>, String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StaticScorer {
    pub fn ranked(rows: Vec<FeatureRequestDiff>) -> Self {
        Self {
            outcome: Ok(rows),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn demo() -> Self {
        Self::ranked(demo_ranking())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScoringService for StaticScorer {
    async fn get_top_ideas(
        &self,
        constraints: &SubmissionConstraints,
    ) -> Result<Vec<FeatureRequestDiff>, ScoringError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(call, constraints = %constraints.describe(), "static scorer invoked");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone().map_err(ScoringError::Upstream)
    }
}

pub fn demo_ranking() -> Vec<FeatureRequestDiff> {
    let ids = [1, 32, 31];
    placeholder_template()
        .iter()
        .zip(ids)
        .map(|(entry, id)| {
            FeatureRequestDiff::new(id, &entry.title, entry.composite_score, &entry.justification)
        })
        .collect()
}
