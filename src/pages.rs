use tracing::debug;

use crate::projector::project;
use crate::seed::{placeholder_template, seed_feature_requests};
use crate::store::{RequestStore, ResultStore};
use crate::types::{FeatureRequest, PrioritizedFeature};

pub fn mount_dashboard(store: &RequestStore) {
    let seed = seed_feature_requests();
    let first = seed.first().cloned();
    store.set_requests(seed);
    if let Some(first) = first {
        store.select_request(first);
    }
}

pub fn show_request_detail(store: &RequestStore, request: FeatureRequest) {
    store.select_request(request);
}

pub fn mount_results(requests: &RequestStore, results: &ResultStore) -> Vec<PrioritizedFeature> {
    let ranking = requests.top_feature_requests();
    if ranking.is_empty() {
        debug!("no ranking available; showing placeholder results");
    }
    let projected = project(&placeholder_template(), &ranking);
    results.set_prioritized_features(projected.clone());
    results.set_selected_prioritized_feature(projected.first().cloned());
    projected
}
