use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::types::{FeatureRequest, FeatureRequestDiff};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestState {
    pub requests: Vec<FeatureRequest>,
    pub top_feature_requests: Vec<FeatureRequestDiff>,
    pub selected_request: Option<FeatureRequest>,
}

#[derive(Debug, Clone)]
pub struct RequestStore {
    state: Arc<watch::Sender<RequestState>>,
}

impl RequestStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RequestState::default());
        Self {
            state: Arc::new(tx),
        }
    }

    pub fn set_requests(&self, requests: Vec<FeatureRequest>) {
        self.state.send_modify(|state| state.requests = requests);
    }

    pub fn select_request(&self, request: FeatureRequest) {
        self.state
            .send_modify(|state| state.selected_request = Some(request));
    }

    pub fn set_top_feature_requests(&self, diffs: Vec<FeatureRequestDiff>) {
        self.state
            .send_modify(|state| state.top_feature_requests = diffs);
    }

    pub fn clear_selected_request(&self) {
        self.state.send_modify(|state| state.selected_request = None);
    }

    pub fn requests(&self) -> Vec<FeatureRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn selected_request(&self) -> Option<FeatureRequest> {
        self.state.borrow().selected_request.clone()
    }

    pub fn top_feature_requests(&self) -> Vec<FeatureRequestDiff> {
        self.state.borrow().top_feature_requests.clone()
    }

    pub fn snapshot(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }
}

impl Default for RequestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::seed::seed_feature_requests;
    use crate::store::RequestStore;
    use crate::types::{FeatureRequest, FeatureRequestDiff};

    #[test]
    fn set_requests_round_trips_in_order_without_dedup() {
        let store = RequestStore::new();
        let duplicate = FeatureRequest::new(7, "Same", "Same");
        let list = vec![
            FeatureRequest::new(9, "B", "second"),
            duplicate.clone(),
            FeatureRequest::new(1, "A", "first"),
            duplicate,
        ];
        store.set_requests(list.clone());
        assert_eq!(store.requests(), list);

        store.set_requests(vec![]);
        assert!(store.requests().is_empty());
    }

    #[test]
    fn selection_is_independent_of_list() {
        let store = RequestStore::new();
        store.set_requests(seed_feature_requests());
        let outsider = FeatureRequest::new(999, "Not listed", "Not in the current list");
        store.select_request(outsider.clone());
        assert_eq!(store.selected_request(), Some(outsider));

        store.clear_selected_request();
        assert!(store.selected_request().is_none());
        assert_eq!(store.requests(), seed_feature_requests());
    }

    #[test]
    fn top_feature_requests_are_replaced_wholesale() {
        let store = RequestStore::new();
        store.set_top_feature_requests(vec![
            FeatureRequestDiff::new(1, "Dark mode", 8.0, "J1"),
            FeatureRequestDiff::new(2, "Guest checkout", 7.0, "J2"),
        ]);
        let replacement = vec![FeatureRequestDiff::new(32, "Comparison", 9.0, "J3")];
        store.set_top_feature_requests(replacement.clone());
        assert_eq!(store.top_feature_requests(), replacement);
    }

    #[tokio::test]
    async fn subscribers_observe_mutations() {
        let store = RequestStore::new();
        let mut rx = store.subscribe();
        store.set_requests(seed_feature_requests());
        rx.changed().await.expect("store dropped");
        assert_eq!(rx.borrow_and_update().requests.len(), 12);

        let clone = store.clone();
        clone.clear_selected_request();
        rx.changed().await.expect("store dropped");
        assert_eq!(store.snapshot(), clone.snapshot());
    }
}
