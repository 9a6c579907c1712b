use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

pub const DEFAULT_PROGRESS_MESSAGES: [&str; 8] = [
    "Processing feature requests...",
    "Analyzing each use case...",
    "Determining ROI for each feature...",
    "Assessing user impact...",
    "Ranking based on relevance...",
    "Finalizing prioritization...",
    "Updating dashboard...",
    "Prioritization inprogress!",
];

pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTimeline {
    messages: Vec<String>,
    interval: Duration,
}

impl ProgressTimeline {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn offset(&self, index: usize) -> Duration {
        let steps = u32::try_from(index).unwrap_or(u32::MAX);
        self.interval.saturating_mul(steps)
    }

    pub fn start<F>(&self, mut on_message: F) -> TimelineTicker
    where
        F: FnMut(usize, &str) + Send + 'static,
    {
        let started_at = Instant::now();
        let schedule = self
            .messages
            .iter()
            .enumerate()
            .map(|(index, message)| (started_at + self.offset(index), message.clone()))
            .collect::<Vec<_>>();
        let handle = tokio::spawn(async move {
            for (index, (due, message)) in schedule.into_iter().enumerate() {
                tokio::time::sleep_until(due).await;
                on_message(index, &message);
            }
        });
        TimelineTicker { handle }
    }
}

impl Default for ProgressTimeline {
    fn default() -> Self {
        Self {
            messages: DEFAULT_PROGRESS_MESSAGES
                .iter()
                .map(|m| m.to_string())
                .collect(),
            interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

#[derive(Debug)]
pub struct TimelineTicker {
    handle: JoinHandle<()>,
}

impl TimelineTicker {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TimelineTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
