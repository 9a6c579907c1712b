use crate::seed::TEMPLATE_LEN;
use crate::types::{FeatureRequestDiff, PrioritizedFeature};

pub fn project(
    template: &[PrioritizedFeature; TEMPLATE_LEN],
    diffs: &[FeatureRequestDiff],
) -> Vec<PrioritizedFeature> {
    template
        .iter()
        .enumerate()
        .map(|(index, placeholder)| match diffs.get(index) {
            Some(diff) => overlay(placeholder, diff),
            None => placeholder.clone(),
        })
        .collect()
}

fn overlay(placeholder: &PrioritizedFeature, diff: &FeatureRequestDiff) -> PrioritizedFeature {
    PrioritizedFeature {
        title: diff.idea_summary.clone(),
        description: diff.idea_summary.clone(),
        composite_score: diff.composite_score,
        justification: diff.justification.clone(),
        ..placeholder.clone()
    }
}
