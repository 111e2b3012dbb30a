// Chart domain models
use crate::domain::failure::ChartFailure;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Template variable carrying the resolved subject identifier
pub const SUBJECT_VAR: &str = "subject";

pub const LABELS_FIELD: &str = "labels";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Employee,
    Team,
    Personal,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Employee, ChartKind::Team, ChartKind::Personal];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Employee => "employee",
            ChartKind::Team => "team",
            ChartKind::Personal => "personal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const GREEN: Rgb = Rgb(40, 167, 69);
    pub const BLUE: Rgb = Rgb(0, 123, 255);
    pub const GREY: Rgb = Rgb(108, 117, 125);

    pub fn rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

/// Score charts are pinned to 0-100, count charts grow with the data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisScale {
    Score,
    Count,
}

impl AxisScale {
    pub fn max(&self) -> Option<f64> {
        match self {
            AxisScale::Score => Some(100.0),
            AxisScale::Count => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub field: String,
    pub label: String,
    pub color: Rgb,
    pub required: bool,
}

impl SeriesSpec {
    pub fn required(field: &str, label: &str, color: Rgb) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            color,
            required: true,
        }
    }

    pub fn optional(field: &str, label: &str, color: Rgb) -> Self {
        Self {
            required: false,
            ..Self::required(field, label, color)
        }
    }
}

/// Everything needed to request, validate and draw one kind of chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub container_selector: String,
    pub canvas_id: String,
    pub endpoint_template: String,
    pub series: Vec<SeriesSpec>,
    pub scale: AxisScale,
    pub step_size: f64,
    pub unit: String,
    pub y_title: String,
    pub x_title: String,
    /// x-axis title used once every optional series is present
    pub x_title_comparison: Option<String>,
    pub aspect_ratio: f64,
    /// Show the page legend element when the optional series arrives
    pub reveals_legend: bool,
}

impl ChartSpec {
    pub fn request(&self) -> ChartRequest {
        let mut required_fields: BTreeSet<String> = self
            .series
            .iter()
            .filter(|s| s.required)
            .map(|s| s.field.clone())
            .collect();
        required_fields.insert(LABELS_FIELD.to_string());

        ChartRequest {
            kind: self.kind,
            container_selector: self.container_selector.clone(),
            endpoint_template: self.endpoint_template.clone(),
            required_fields,
        }
    }

    /// True when the chart has optional series and all of them arrived
    pub fn has_comparison(&self, dataset: &ChartDataset) -> bool {
        let mut optional = self.series.iter().filter(|s| !s.required).peekable();
        optional.peek().is_some() && optional.all(|s| dataset.get(&s.field).is_some())
    }

    pub fn x_axis_title(&self, dataset: &ChartDataset) -> &str {
        match &self.x_title_comparison {
            Some(title) if self.has_comparison(dataset) => title.as_str(),
            _ => self.x_title.as_str(),
        }
    }
}

/// One chart instantiation. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub container_selector: String,
    pub endpoint_template: String,
    pub required_fields: BTreeSet<String>,
}

impl ChartRequest {
    pub fn needs_subject(&self) -> bool {
        self.endpoint_template
            .contains(&format!("${{{}}}", SUBJECT_VAR))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub field: String,
    pub values: Vec<f64>,
}

/// Validated chart data: every series has exactly one value per label
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    labels: Vec<String>,
    series: Vec<Series>,
}

impl ChartDataset {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn get(&self, field: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.field == field)
    }

    /// Validate a raw payload against the request's required fields and the
    /// series the chart knows how to draw. Optional series that are absent,
    /// null or empty are omitted.
    pub fn from_payload(
        payload: &Value,
        request: &ChartRequest,
        specs: &[SeriesSpec],
    ) -> Result<Self, ChartFailure> {
        let object = payload.as_object().ok_or_else(|| {
            ChartFailure::SchemaInvalid("response is not a JSON object".to_string())
        })?;

        let labels = match object.get(LABELS_FIELD) {
            Some(Value::Array(items)) if !items.is_empty() => items
                .iter()
                .map(label_text)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| {
                    ChartFailure::SchemaInvalid("labels must be strings or numbers".to_string())
                })?,
            _ => {
                return Err(ChartFailure::SchemaInvalid(
                    "missing or empty labels".to_string(),
                ));
            }
        };

        for field in &request.required_fields {
            if object.get(field).is_none_or(Value::is_null) {
                return Err(ChartFailure::SchemaInvalid(format!("missing {}", field)));
            }
        }

        let mut series = Vec::new();
        for spec in specs {
            let required = spec.required || request.required_fields.contains(&spec.field);
            let values = match object.get(&spec.field) {
                None | Some(Value::Null) => continue,
                Some(value) => numbers(value).ok_or_else(|| {
                    ChartFailure::SchemaInvalid(format!(
                        "{} must be an array of numbers",
                        spec.field
                    ))
                })?,
            };

            if values.is_empty() && !required {
                continue;
            }

            if values.len() != labels.len() {
                return Err(ChartFailure::SchemaInvalid(format!(
                    "{} has {} points for {} labels",
                    spec.field,
                    values.len(),
                    labels.len()
                )));
            }

            series.push(Series {
                field: spec.field.clone(),
                values,
            });
        }

        Ok(Self { labels, series })
    }
}

/// Numeric labels (e.g. week numbers) are drawn as their decimal text
fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn numbers(value: &Value) -> Option<Vec<f64>> {
    value.as_array()?.iter().map(Value::as_f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn team_spec() -> Vec<SeriesSpec> {
        vec![
            SeriesSpec::required("current_week", "Current Week", Rgb::BLUE),
            SeriesSpec::optional("previous_week", "Previous Week", Rgb::GREY),
        ]
    }

    fn team_request() -> ChartRequest {
        ChartRequest {
            kind: ChartKind::Team,
            container_selector: ".performance-chart-container".to_string(),
            endpoint_template: "/performance_data".to_string(),
            required_fields: ["labels", "current_week"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    #[test]
    fn test_optional_series_omitted_when_absent_or_empty() {
        let payload = json!({"labels": ["W1", "W2"], "current_week": [80, 90]});
        let dataset = ChartDataset::from_payload(&payload, &team_request(), &team_spec()).unwrap();
        assert_eq!(dataset.series().len(), 1);
        assert!(dataset.get("previous_week").is_none());

        let payload = json!({"labels": ["W1"], "current_week": [80], "previous_week": []});
        let dataset = ChartDataset::from_payload(&payload, &team_request(), &team_spec()).unwrap();
        assert_eq!(dataset.series().len(), 1);
    }

    #[test]
    fn test_series_lengths_match_labels() {
        let payload = json!({
            "labels": ["W1", "W2", "W3"],
            "current_week": [80, 90, 85.5],
            "previous_week": [70, 75, 72]
        });
        let dataset = ChartDataset::from_payload(&payload, &team_request(), &team_spec()).unwrap();
        for series in dataset.series() {
            assert_eq!(series.values.len(), dataset.labels().len());
        }
        assert_eq!(dataset.get("current_week").unwrap().values[2], 85.5);
    }

    #[test]
    fn test_rejects_missing_fields_and_empty_labels() {
        let cases = [
            json!({"current_week": [1]}),
            json!({"labels": [], "current_week": []}),
            json!({"labels": ["W1"]}),
            json!({"labels": ["W1"], "current_week": null}),
            json!({"labels": "W1", "current_week": [1]}),
            json!([1, 2, 3]),
        ];

        for payload in cases {
            let result = ChartDataset::from_payload(&payload, &team_request(), &team_spec());
            assert!(
                matches!(result, Err(ChartFailure::SchemaInvalid(_))),
                "payload {} should be rejected",
                payload
            );
        }
    }

    #[test]
    fn test_rejects_length_mismatch_and_non_numbers() {
        let payload = json!({"labels": ["W1", "W2"], "current_week": [80]});
        let err = ChartDataset::from_payload(&payload, &team_request(), &team_spec()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid data: current_week has 1 points for 2 labels");

        let payload = json!({"labels": ["W1"], "current_week": ["high"]});
        assert!(ChartDataset::from_payload(&payload, &team_request(), &team_spec()).is_err());
    }

    #[test]
    fn test_numeric_labels_become_text() {
        let payload = json!({"labels": [1, "W2", 3.5], "current_week": [80, 90, 85]});
        let dataset = ChartDataset::from_payload(&payload, &team_request(), &team_spec()).unwrap();
        assert_eq!(dataset.labels(), ["1", "W2", "3.5"]);

        let payload = json!({"labels": ["W1", true], "current_week": [80, 90]});
        let err = ChartDataset::from_payload(&payload, &team_request(), &team_spec()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid data: labels must be strings or numbers");

        let payload = json!({"labels": [null], "current_week": [80]});
        assert!(ChartDataset::from_payload(&payload, &team_request(), &team_spec()).is_err());
    }

    #[test]
    fn test_request_from_spec() {
        let spec = ChartSpec {
            kind: ChartKind::Employee,
            container_selector: ".chart-placeholder".to_string(),
            canvas_id: "employeePerformanceChart".to_string(),
            endpoint_template: "/employee_performance_data/${subject}".to_string(),
            series: vec![
                SeriesSpec::required("current_month", "Current Month", Rgb::GREEN),
                SeriesSpec::required("previous_month", "Previous Month", Rgb::BLUE),
            ],
            scale: AxisScale::Score,
            step_size: 20.0,
            unit: "pts".to_string(),
            y_title: "Performance Score".to_string(),
            x_title: "Week".to_string(),
            x_title_comparison: None,
            aspect_ratio: 2.5,
            reveals_legend: false,
        };

        let request = spec.request();
        assert!(request.needs_subject());
        assert_eq!(
            request.required_fields.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["current_month", "labels", "previous_month"]
        );
        assert!(!team_request().needs_subject());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(ChartKind::parse("team"), Some(ChartKind::Team));
        assert_eq!(ChartKind::parse("Team"), None);
        assert_eq!(Rgb::BLUE.rgba(0.2), "rgba(0, 123, 255, 0.2)");
    }
}
