use anyhow::Result;

use crate::types::{FeatureRequest, FeatureRequestDiff, PrioritizedFeature};

pub fn requests_to_csv(requests: &[FeatureRequest]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["id", "title", "description"])?;
    for r in requests {
        writer.write_record([r.id.to_string(), r.title.clone(), r.description.clone()])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn ranking_to_csv(rows: &[FeatureRequestDiff]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "rank",
        "idea_id",
        "idea_summary",
        "composite_score",
        "justification",
    ])?;
    for (index, row) in rows.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string(),
            row.idea_id.to_string(),
            row.idea_summary.clone(),
            format!("{:.2}", row.composite_score),
            row.justification.clone(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn prioritized_to_csv(features: &[PrioritizedFeature]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "rank",
        "title",
        "composite_score",
        "cost_efficiency",
        "user_satisfaction",
        "dev_complexity",
        "total_budget",
        "locked_budget",
        "feature_budget",
        "justification",
    ])?;
    for (index, f) in features.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string(),
            f.title.clone(),
            format!("{:.2}", f.composite_score),
            format!("{:.2}", f.cost_efficiency),
            format!("{:.2}", f.user_satisfaction),
            format!("{:.2}", f.dev_complexity),
            format!("{:.0}", f.resource_utilization.total_budget),
            format!("{:.0}", f.resource_utilization.locked_budget),
            format!("{:.0}", f.resource_utilization.feature_budget),
            f.justification.clone(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
