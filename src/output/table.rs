use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::types::{FeatureRequest, FeatureRequestDiff, PrioritizedFeature};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn score_cell(score: f64) -> Cell {
    let cell = Cell::new(format!("{score:.1}"));
    if score >= 8.0 {
        cell.fg(Color::Green)
    } else if score >= 5.0 {
        cell.fg(Color::Yellow)
    } else {
        cell.fg(Color::Red)
    }
}

pub fn render_requests_table(requests: &[FeatureRequest]) -> String {
    let mut table = new_table();
    table.set_header(vec!["ID", "Title", "Description"]);
    for r in requests {
        table.add_row(vec![r.id.to_string(), r.title.clone(), r.description.clone()]);
    }
    format!(
        "Showing {} user submitted ideas\n{}",
        requests.len(),
        table
    )
}

pub fn render_ranking_table(rows: &[FeatureRequestDiff]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Rank", "Idea", "Summary", "Score", "Justification"]);
    for (index, row) in rows.iter().enumerate() {
        table.add_row(Row::from(vec![
            Cell::new(format!("#{}", index + 1)),
            Cell::new(row.idea_id.to_string()),
            Cell::new(&row.idea_summary),
            score_cell(row.composite_score),
            Cell::new(&row.justification),
        ]));
    }
    table.to_string()
}

pub fn render_prioritized_table(features: &[PrioritizedFeature]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Rank",
        "Title",
        "Composite",
        "Cost Eff.",
        "User Sat.",
        "Dev Complexity",
    ]);
    for (index, f) in features.iter().enumerate() {
        table.add_row(Row::from(vec![
            Cell::new(format!("#{}", index + 1)),
            Cell::new(&f.title),
            score_cell(f.composite_score),
            Cell::new(format!("{:.1}", f.cost_efficiency)),
            Cell::new(format!("{:.1}", f.user_satisfaction)),
            Cell::new(format!("{:.1}", f.dev_complexity)),
        ]));
    }
    table.to_string()
}

pub fn render_feature_detail(feature: &PrioritizedFeature) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    let radar = &feature.radar_data;
    let budget = &feature.resource_utilization;
    let rows: Vec<(&str, String)> = vec![
        ("Title", feature.title.clone()),
        ("Description", feature.description.clone()),
        ("Composite score", format!("{:.1}", feature.composite_score)),
        ("Justification", feature.justification.clone()),
        ("Relative score", format!("{:.1}", radar.relative_score)),
        ("Value created", format!("{:.1}", radar.value_created)),
        ("Overall ROI", format!("{:.1}", radar.overall_roi)),
        ("Business impact", format!("{:.1}", radar.business_impact)),
        ("User demand", format!("{:.1}", radar.user_demand)),
        ("Total budget", format!("{:.0}", budget.total_budget)),
        ("Locked budget", format!("{:.0}", budget.locked_budget)),
        ("Feature budget", format!("{:.0}", budget.feature_budget)),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table.to_string()
}
