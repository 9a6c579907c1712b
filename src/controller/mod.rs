pub mod timeline;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::navigation::{Navigator, View};
use crate::scoring::{ScoringError, ScoringService};
use crate::store::RequestStore;
use crate::types::{ConstraintField, FeatureRequestDiff, SubmissionConstraints};

pub use timeline::{
    ProgressTimeline, TimelineTicker, DEFAULT_PROGRESS_INTERVAL, DEFAULT_PROGRESS_MESSAGES,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    Form,
    Processing,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerState {
    pub stage: Stage,
    pub message: Option<String>,
    pub open: bool,
    pub constraints: SubmissionConstraints,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            stage: Stage::Form,
            message: None,
            open: false,
            constraints: SubmissionConstraints::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("no failed submission to retry")]
    NothingToRetry,
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub timeline: ProgressTimeline,
    pub allow_overlapping: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            timeline: ProgressTimeline::default(),
            allow_overlapping: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: u64,
    pub submitted_at: DateTime<Utc>,
    pub constraints: SubmissionConstraints,
}

#[derive(Clone)]
pub struct SubmissionController {
    inner: Arc<Inner>,
}

struct Inner {
    requests: RequestStore,
    scoring: Arc<dyn ScoringService>,
    navigator: Arc<dyn Navigator>,
    options: ControllerOptions,
    state: Arc<watch::Sender<ControllerState>>,
    flight: Mutex<Flight>,
}

#[derive(Default)]
struct Flight {
    next_id: u64,
    latest: Option<u64>,
    in_flight: usize,
    // Owned by the latest submission; dropping it aborts pending messages.
    ticker: Option<TimelineTicker>,
    last_submission: Option<Submission>,
}

impl Inner {
    fn flight(&self) -> MutexGuard<'_, Flight> {
        self.flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct InFlightGuard {
    inner: Arc<Inner>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut flight = self.inner.flight();
        flight.in_flight = flight.in_flight.saturating_sub(1);
    }
}

impl SubmissionController {
    pub fn new(
        requests: RequestStore,
        scoring: Arc<dyn ScoringService>,
        navigator: Arc<dyn Navigator>,
        options: ControllerOptions,
    ) -> Self {
        let (tx, _rx) = watch::channel(ControllerState::default());
        Self {
            inner: Arc::new(Inner {
                requests,
                scoring,
                navigator,
                options,
                state: Arc::new(tx),
                flight: Mutex::new(Flight::default()),
            }),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.inner.state.subscribe()
    }

    pub fn constraints(&self) -> SubmissionConstraints {
        self.inner.state.borrow().constraints.clone()
    }

    pub fn set_constraint(&self, field: ConstraintField, value: impl Into<String>) {
        let value = value.into();
        self.inner
            .state
            .send_modify(|state| state.constraints.set(field, value));
    }

    pub fn open(&self) {
        self.inner.state.send_modify(|state| state.open = true);
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().open
    }

    pub fn close(&self) {
        let ticker = self.inner.flight().ticker.take();
        if ticker.is_some() {
            debug!("progress timeline cancelled");
        }
        drop(ticker);
        self.inner.state.send_modify(|state| {
            state.open = false;
            state.stage = Stage::Form;
            state.message = None;
        });
    }

    pub fn in_flight(&self) -> usize {
        self.inner.flight().in_flight
    }

    pub fn last_submission(&self) -> Option<Submission> {
        self.inner.flight().last_submission.clone()
    }

    pub fn submit(
        &self,
    ) -> impl Future<Output = Result<Vec<FeatureRequestDiff>, SubmissionError>> + Send + 'static
    {
        let started = self.begin(self.constraints());
        let controller = self.clone();
        async move {
            let (submission, guard) = started?;
            controller.complete(submission, guard).await
        }
    }

    pub fn retry(
        &self,
    ) -> impl Future<Output = Result<Vec<FeatureRequestDiff>, SubmissionError>> + Send + 'static
    {
        let failed = matches!(self.inner.state.borrow().stage, Stage::Failed { .. });
        let last = self
            .inner
            .flight()
            .last_submission
            .as_ref()
            .map(|submission| submission.constraints.clone());
        let started = match (failed, last) {
            (true, Some(constraints)) => self.begin(constraints),
            _ => Err(SubmissionError::NothingToRetry),
        };
        let controller = self.clone();
        async move {
            let (submission, guard) = started?;
            controller.complete(submission, guard).await
        }
    }

    fn begin(
        &self,
        constraints: SubmissionConstraints,
    ) -> Result<(Submission, InFlightGuard), SubmissionError> {
        let mut flight = self.inner.flight();
        if !self.inner.options.allow_overlapping && flight.in_flight > 0 {
            warn!(in_flight = flight.in_flight, "rejecting overlapping submission");
            return Err(SubmissionError::AlreadyInFlight);
        }
        for field in constraints.unknown_selections() {
            warn!(field = field.as_key(), value = constraints.get(field), "selection outside known options");
        }

        flight.next_id += 1;
        let submission = Submission {
            id: flight.next_id,
            submitted_at: Utc::now(),
            constraints,
        };
        flight.latest = Some(submission.id);
        flight.in_flight += 1;
        flight.last_submission = Some(submission.clone());

        self.inner.state.send_modify(|state| {
            state.stage = Stage::Processing;
            state.message = None;
            state.open = true;
        });
        let state = Arc::clone(&self.inner.state);
        flight.ticker = Some(self.inner.options.timeline.start(move |_, message| {
            let message = message.to_string();
            state.send_modify(|state| state.message = Some(message));
        }));
        info!(
            submission = submission.id,
            submitted_at = %submission.submitted_at,
            in_flight = flight.in_flight,
            "submission started"
        );

        let guard = InFlightGuard {
            inner: Arc::clone(&self.inner),
        };
        Ok((submission, guard))
    }

    async fn complete(
        &self,
        submission: Submission,
        _guard: InFlightGuard,
    ) -> Result<Vec<FeatureRequestDiff>, SubmissionError> {
        let span = info_span!(
            "submission",
            id = submission.id,
            submitted_at = %submission.submitted_at
        );
        let outcome = self
            .inner
            .scoring
            .get_top_ideas(&submission.constraints)
            .instrument(span)
            .await;
        match outcome {
            Ok(diffs) => {
                info!(
                    submission = submission.id,
                    ranked = diffs.len(),
                    "scoring response received"
                );
                self.inner.requests.set_top_feature_requests(diffs.clone());
                self.close();
                self.inner.navigator.navigate(View::Results);
                Ok(diffs)
            }
            Err(err) => {
                error!(submission = submission.id, error = %err, "submission failed");
                self.fail(submission.id, &err);
                Err(err.into())
            }
        }
    }

    fn fail(&self, id: u64, err: &ScoringError) {
        let ticker = {
            let mut flight = self.inner.flight();
            if flight.latest != Some(id) {
                debug!(submission = id, "superseded submission failed; state unchanged");
                return;
            }
            flight.ticker.take()
        };
        drop(ticker);
        let message = err.to_string();
        self.inner.state.send_if_modified(|state| {
            if !state.open || state.stage != Stage::Processing {
                return false;
            }
            state.stage = Stage::Failed { message };
            state.message = None;
            true
        });
    }
}
