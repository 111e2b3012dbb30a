// Chart catalog - the dashboard's three performance charts
use crate::domain::chart::{AxisScale, ChartKind, ChartSpec, Rgb, SeriesSpec};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartCatalog {
    employee: ChartSpec,
    team: ChartSpec,
    personal: ChartSpec,
}

impl Default for ChartCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ChartCatalog {
    pub fn standard() -> Self {
        Self {
            employee: employee_trend(),
            team: team_performance(),
            personal: personal_goals(),
        }
    }

    pub fn spec(&self, kind: ChartKind) -> &ChartSpec {
        match kind {
            ChartKind::Employee => &self.employee,
            ChartKind::Team => &self.team,
            ChartKind::Personal => &self.personal,
        }
    }

    pub fn spec_mut(&mut self, kind: ChartKind) -> &mut ChartSpec {
        match kind {
            ChartKind::Employee => &mut self.employee,
            ChartKind::Team => &mut self.team,
            ChartKind::Personal => &mut self.personal,
        }
    }
}

/// Current month vs previous month for one employee
fn employee_trend() -> ChartSpec {
    ChartSpec {
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
    }
}

/// Current week, plus previous week for managers
fn team_performance() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Team,
        container_selector: ".performance-chart-container".to_string(),
        canvas_id: "teamPerformanceChart".to_string(),
        endpoint_template: "/performance_data".to_string(),
        series: vec![
            SeriesSpec::required("current_week", "Current Week", Rgb::BLUE),
            SeriesSpec::optional("previous_week", "Previous Week", Rgb::GREY),
        ],
        scale: AxisScale::Score,
        step_size: 20.0,
        unit: "pts".to_string(),
        y_title: "Performance Score".to_string(),
        x_title: "Weekly Progress".to_string(),
        x_title_comparison: Some("Team Members".to_string()),
        aspect_ratio: 2.0,
        reveals_legend: true,
    }
}

fn personal_goals() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Personal,
        container_selector: ".goals-chart-container".to_string(),
        canvas_id: "personalGoalsChart".to_string(),
        endpoint_template: "/personal_performance_data".to_string(),
        series: vec![
            SeriesSpec::required("actual", "Actual Goals", Rgb::GREEN),
            SeriesSpec::required("planned", "Planned Goals", Rgb::BLUE),
        ],
        scale: AxisScale::Count,
        step_size: 5.0,
        unit: "goals".to_string(),
        y_title: "Number of Goals".to_string(),
        x_title: "Weekly Progress".to_string(),
        x_title_comparison: None,
        aspect_ratio: 2.0,
        reveals_legend: false,
    }
}
