// Chart.js configuration builder
//
// Presentation is a fixed policy per chart: nothing here is derived from the
// data beyond labels, values and which series are present.
use crate::domain::chart::{ChartDataset, ChartSpec, SeriesSpec};
use serde_json::{Value, json};

const FONT_FAMILY: &str = "Inter, sans-serif";

/// Build the `new Chart(ctx, config)` argument for a validated dataset.
///
/// Chart.js formatting callbacks cannot travel as JSON, so the unit suffix
/// is published under `options.plugins.valueFormat` and the page script
/// installs the tick and tooltip callbacks from it.
pub fn chart_config(spec: &ChartSpec, dataset: &ChartDataset) -> Value {
    let datasets: Vec<Value> = spec
        .series
        .iter()
        .filter_map(|s| dataset.get(&s.field).map(|series| line_dataset(s, &series.values)))
        .collect();

    let mut y_axis = json!({
        "beginAtZero": true,
        "ticks": {
            "font": { "size": 11, "family": FONT_FAMILY },
            "stepSize": spec.step_size
        },
        "title": axis_title(&spec.y_title),
        "grid": { "color": "rgba(0, 0, 0, 0.05)" }
    });
    if let Some(max) = spec.scale.max() {
        y_axis["max"] = json!(max);
    }

    json!({
        "type": "line",
        "data": {
            "labels": dataset.labels(),
            "datasets": datasets
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": true,
            "aspectRatio": spec.aspect_ratio,
            "interaction": { "mode": "index", "intersect": false },
            "plugins": {
                "legend": {
                    "display": true,
                    "position": "top",
                    "labels": {
                        "font": { "size": 12, "family": FONT_FAMILY },
                        "padding": 15,
                        "usePointStyle": true,
                        "boxWidth": 12,
                        "boxHeight": 12
                    }
                },
                "title": { "display": false },
                "tooltip": {
                    "backgroundColor": "rgba(0, 0, 0, 0.8)",
                    "padding": 12,
                    "titleFont": { "size": 13, "family": FONT_FAMILY },
                    "bodyFont": { "size": 12, "family": FONT_FAMILY }
                },
                "valueFormat": { "suffix": format!(" {}", spec.unit) }
            },
            "scales": {
                "y": y_axis,
                "x": {
                    "ticks": {
                        "font": { "size": 11, "family": FONT_FAMILY },
                        "maxRotation": 45,
                        "minRotation": 0
                    },
                    "title": axis_title(spec.x_axis_title(dataset)),
                    "grid": { "display": false }
                }
            }
        }
    })
}

fn line_dataset(spec: &SeriesSpec, values: &[f64]) -> Value {
    json!({
        "label": spec.label,
        "data": values,
        "backgroundColor": spec.color.rgba(0.2),
        "borderColor": spec.color.rgba(1.0),
        "borderWidth": 3,
        "fill": true,
        "tension": 0.4,
        "pointRadius": 6,
        "pointBackgroundColor": spec.color.rgba(1.0),
        "pointBorderColor": "#fff",
        "pointBorderWidth": 2,
        "pointHoverRadius": 8
    })
}

fn axis_title(text: &str) -> Value {
    json!({
        "display": true,
        "text": text,
        "font": { "size": 12, "family": FONT_FAMILY, "weight": "600" }
    })
}
