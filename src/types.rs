use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureRequest {
    pub id: i64,
    pub title: String,
    pub description: String,
}

impl FeatureRequest {
    pub fn new(id: i64, title: &str, description: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Identifier of a ranked idea. The scoring service echoes whatever it was
/// given, so both numeric and textual ids show up on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum IdeaId {
    Number(i64),
    Text(String),
}

impl Display for IdeaId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureRequestDiff {
    pub idea_id: IdeaId,
    #[serde(default)]
    pub idea_summary: String,
    #[serde(deserialize_with = "lenient_score")]
    pub composite_score: f64,
    #[serde(default)]
    pub justification: String,
}

impl FeatureRequestDiff {
    pub fn new(idea_id: i64, idea_summary: &str, composite_score: f64, justification: &str) -> Self {
        Self {
            idea_id: IdeaId::Number(idea_id),
            idea_summary: idea_summary.to_string(),
            composite_score,
            justification: justification.to_string(),
        }
    }

    /// The service reports ranking failures in-band as a row whose id is
    /// the literal `"Error"` and whose justification carries the message.
    pub fn is_error_marker(&self) -> bool {
        matches!(&self.idea_id, IdeaId::Text(text) if text.eq_ignore_ascii_case("error"))
    }
}

fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScore {
        Number(f64),
        Text(String),
    }

    match RawScore::deserialize(deserializer)? {
        RawScore::Number(n) => Ok(n),
        RawScore::Text(s) => {
            let sanitized = s.trim();
            let sanitized = sanitized.strip_suffix("/10").unwrap_or(sanitized).trim();
            sanitized
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("invalid composite_score: {s}")))
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUtilization {
    pub total_budget: f64,
    pub locked_budget: f64,
    pub feature_budget: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RadarData {
    pub relative_score: f64,
    pub value_created: f64,
    pub overall_roi: f64,
    pub business_impact: f64,
    pub user_demand: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedFeature {
    pub title: String,
    pub description: String,
    pub composite_score: f64,
    pub cost_efficiency: f64,
    pub user_satisfaction: f64,
    pub dev_complexity: f64,
    pub justification: String,
    pub resource_utilization: ResourceUtilization,
    pub radar_data: RadarData,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintField {
    AvailableEngHrs,
    AvailableBudget,
    TeamsAvailable,
    ExpectedTimeline,
    PriorityFocus,
}

impl ConstraintField {
    pub const ALL: [ConstraintField; 5] = [
        ConstraintField::AvailableEngHrs,
        ConstraintField::AvailableBudget,
        ConstraintField::TeamsAvailable,
        ConstraintField::ExpectedTimeline,
        ConstraintField::PriorityFocus,
    ];

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::AvailableEngHrs => "available_eng_hrs",
            Self::AvailableBudget => "available_budget",
            Self::TeamsAvailable => "teams_available",
            Self::ExpectedTimeline => "expected_timeline",
            Self::PriorityFocus => "priority_focus",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AvailableEngHrs => "Available Engineering Hours",
            Self::AvailableBudget => "Available Budget",
            Self::TeamsAvailable => "Number of Available Teams",
            Self::ExpectedTimeline => "Expected Timeline",
            Self::PriorityFocus => "Priority Focus Area",
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::AvailableEngHrs => &["50-100", "150-300", "300-450", "450-600", "600+"],
            Self::AvailableBudget => &[
                "<10000",
                "10000-20000",
                "20000-30000",
                "30000-40000",
                ">40000",
            ],
            Self::TeamsAvailable => &["2", "3", "4", "5", ">5"],
            Self::ExpectedTimeline => &["1-2", "2-4", "4-6", "6-8", "8-12"],
            Self::PriorityFocus => &[
                "Customer Experience",
                "Operational Efficiency",
                "Risk Reduction",
                "Innovation",
            ],
        }
    }
}

impl Display for ConstraintField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Error)]
#[error("unknown constraint field: {0}")]
pub struct ConstraintFieldParseError(pub String);

impl FromStr for ConstraintField {
    type Err = ConstraintFieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "available_eng_hrs" | "eng_hrs" | "eng_hours" => Ok(Self::AvailableEngHrs),
            "available_budget" | "budget" => Ok(Self::AvailableBudget),
            "teams_available" | "teams" => Ok(Self::TeamsAvailable),
            "expected_timeline" | "timeline" => Ok(Self::ExpectedTimeline),
            "priority_focus" | "focus" => Ok(Self::PriorityFocus),
            _ => Err(ConstraintFieldParseError(s.to_string())),
        }
    }
}

/// Form selections sent to the scoring service. An empty string means the
/// field was left on "Select"; nothing here is validated before submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionConstraints {
    #[serde(default)]
    pub available_eng_hrs: String,
    #[serde(default)]
    pub available_budget: String,
    #[serde(default)]
    pub teams_available: String,
    #[serde(default)]
    pub expected_timeline: String,
    #[serde(default)]
    pub priority_focus: String,
}

impl SubmissionConstraints {
    pub fn get(&self, field: ConstraintField) -> &str {
        match field {
            ConstraintField::AvailableEngHrs => &self.available_eng_hrs,
            ConstraintField::AvailableBudget => &self.available_budget,
            ConstraintField::TeamsAvailable => &self.teams_available,
            ConstraintField::ExpectedTimeline => &self.expected_timeline,
            ConstraintField::PriorityFocus => &self.priority_focus,
        }
    }

    pub fn set(&mut self, field: ConstraintField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ConstraintField::AvailableEngHrs => self.available_eng_hrs = value,
            ConstraintField::AvailableBudget => self.available_budget = value,
            ConstraintField::TeamsAvailable => self.teams_available = value,
            ConstraintField::ExpectedTimeline => self.expected_timeline = value,
            ConstraintField::PriorityFocus => self.priority_focus = value,
        }
    }

    pub fn with(mut self, field: ConstraintField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn unknown_selections(&self) -> Vec<ConstraintField> {
        ConstraintField::ALL
            .into_iter()
            .filter(|field| {
                let value = self.get(*field);
                !value.is_empty() && !field.options().contains(&value)
            })
            .collect()
    }

    pub fn describe(&self) -> String {
        format!(
            "The user has approximately {} engineering hours available, a budget of {}, and {} team(s) that can work on the project. The expected delivery timeline is {} weeks, with a primary focus on {}.",
            self.available_eng_hrs,
            self.available_budget,
            self.teams_available,
            self.expected_timeline,
            self.priority_focus.to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use crate::types::{
        ConstraintField, FeatureRequestDiff, IdeaId, PrioritizedFeature, SubmissionConstraints,
    };

    #[test]
    fn parses_ranked_rows_with_mixed_wire_shapes() {
        let payload = json!([
            {"idea_id": 1, "idea_summary": "Dark mode", "composite_score": 8, "justification": "J1"},
            {"idea_id": "32", "idea_summary": "Comparison", "composite_score": "7.5", "justification": "J2"},
            {"idea_id": 31, "composite_score": "6/10"}
        ]);
        let rows: Vec<FeatureRequestDiff> =
            serde_json::from_value(payload).expect("failed to parse rows");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].idea_id, IdeaId::Number(1));
        assert_eq!(rows[1].idea_id, IdeaId::Text("32".to_string()));
        assert!((rows[1].composite_score - 7.5).abs() < 1e-9);
        assert!((rows[2].composite_score - 6.0).abs() < 1e-9);
        assert!(rows[2].idea_summary.is_empty());
        assert!(rows[2].justification.is_empty());
    }

    #[test]
    fn rejects_non_numeric_score() {
        let payload = json!([{"idea_id": 1, "composite_score": "high"}]);
        let parsed: Result<Vec<FeatureRequestDiff>, _> = serde_json::from_value(payload);
        assert!(parsed.is_err());
    }

    #[test]
    fn detects_in_band_error_marker() {
        let payload = json!({"idea_id": "Error", "composite_score": 0, "justification": "llm down"});
        let row: FeatureRequestDiff = serde_json::from_value(payload).expect("failed to parse row");
        assert!(row.is_error_marker());
        assert!(!FeatureRequestDiff::new(1, "x", 1.0, "y").is_error_marker());
    }

    #[test]
    fn prioritized_feature_uses_display_field_names() {
        let feature = crate::seed::placeholder_template()[0].clone();
        let value = serde_json::to_value(&feature).expect("failed to serialize");
        assert!(value.get("compositeScore").is_some());
        assert!(value["resourceUtilization"].get("lockedBudget").is_some());
        assert!(value["radarData"].get("overall_roi").is_some());
        let back: PrioritizedFeature = serde_json::from_value(value).expect("failed to parse");
        assert_eq!(back, feature);
    }

    #[test]
    fn constraints_serialize_as_flat_string_pairs() {
        let constraints = SubmissionConstraints::default()
            .with(ConstraintField::AvailableEngHrs, "50-100")
            .with(ConstraintField::PriorityFocus, "Innovation");
        let value = serde_json::to_value(&constraints).expect("failed to serialize");
        assert_eq!(value["available_eng_hrs"], "50-100");
        assert_eq!(value["available_budget"], "");
        assert_eq!(value["priority_focus"], "Innovation");
    }

    #[test]
    fn flags_selections_outside_option_sets() {
        let constraints = SubmissionConstraints::default()
            .with(ConstraintField::TeamsAvailable, "12")
            .with(ConstraintField::ExpectedTimeline, "2-4");
        assert_eq!(
            constraints.unknown_selections(),
            vec![ConstraintField::TeamsAvailable]
        );
        assert!(SubmissionConstraints::default().unknown_selections().is_empty());
    }

    #[test]
    fn parses_constraint_field_aliases() {
        assert_eq!(
            ConstraintField::from_str("budget").expect("budget"),
            ConstraintField::AvailableBudget
        );
        assert_eq!(
            ConstraintField::from_str("priority-focus").expect("focus"),
            ConstraintField::PriorityFocus
        );
        assert!(ConstraintField::from_str("velocity").is_err());
    }
}
