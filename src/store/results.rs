use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::types::PrioritizedFeature;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultState {
    pub prioritized_features: Vec<PrioritizedFeature>,
    pub selected_prioritized_feature: Option<PrioritizedFeature>,
}

#[derive(Debug, Clone)]
pub struct ResultStore {
    state: Arc<watch::Sender<ResultState>>,
}

impl ResultStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ResultState::default());
        Self {
            state: Arc::new(tx),
        }
    }

    pub fn set_prioritized_features(&self, features: Vec<PrioritizedFeature>) {
        self.state
            .send_modify(|state| state.prioritized_features = features);
    }

    pub fn add_prioritized_feature(&self, feature: PrioritizedFeature) {
        self.state
            .send_modify(|state| state.prioritized_features.push(feature));
    }

    /// Clears the list and the selection in one update.
    pub fn clear_prioritized_features(&self) {
        self.state.send_modify(|state| {
            state.prioritized_features.clear();
            state.selected_prioritized_feature = None;
        });
    }

    pub fn set_selected_prioritized_feature(&self, feature: Option<PrioritizedFeature>) {
        self.state
            .send_modify(|state| state.selected_prioritized_feature = feature);
    }

    pub fn prioritized_features(&self) -> Vec<PrioritizedFeature> {
        self.state.borrow().prioritized_features.clone()
    }

    pub fn selected_prioritized_feature(&self) -> Option<PrioritizedFeature> {
        self.state.borrow().selected_prioritized_feature.clone()
    }

    pub fn snapshot(&self) -> ResultState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResultState> {
        self.state.subscribe()
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}
