pub mod csv;
pub mod table;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::types::{FeatureRequest, FeatureRequestDiff, PrioritizedFeature};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_requests(requests: &[FeatureRequest], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table::render_requests_table(requests)),
        OutputFormat::Json => render_json(requests),
        OutputFormat::Csv => csv::requests_to_csv(requests),
    }
}

pub fn render_ranking(rows: &[FeatureRequestDiff], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table::render_ranking_table(rows)),
        OutputFormat::Json => render_json(rows),
        OutputFormat::Csv => csv::ranking_to_csv(rows),
    }
}

pub fn render_results(
    features: &[PrioritizedFeature],
    selected: Option<&PrioritizedFeature>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let mut out = table::render_prioritized_table(features);
            if let Some(feature) = selected {
                out.push('\n');
                out.push_str(&table::render_feature_detail(feature));
            }
            Ok(out)
        }
        OutputFormat::Json => render_json(features),
        OutputFormat::Csv => csv::prioritized_to_csv(features),
    }
}

#[cfg(test)]
mod tests {
    use crate::output::{render_json, render_requests, render_results, OutputFormat};
    use crate::seed::{placeholder_template, seed_feature_requests};

    #[test]
    fn renders_pretty_json() {
        let rendered = render_json(&seed_feature_requests()[..2]).expect("render failed");
        assert!(rendered.starts_with("[\n"));
        assert!(rendered.contains("\"title\": \"Introduce Optional Dark Mode\""));
    }

    #[test]
    fn dispatches_on_format() {
        let requests = seed_feature_requests();
        let csv = render_requests(&requests, OutputFormat::Csv).expect("csv failed");
        assert!(csv.starts_with("id,title,description"));
        let table = render_requests(&requests, OutputFormat::Table).expect("table failed");
        assert!(table.contains("Show Prices"));
    }

    #[test]
    fn table_results_include_selected_detail() {
        let template = placeholder_template();
        let rendered = render_results(&template, Some(&template[1]), OutputFormat::Table)
            .expect("render failed");
        assert!(rendered.contains("Implementing a product comparison feature"));
        assert!(rendered.contains("Locked budget"));
    }
}
